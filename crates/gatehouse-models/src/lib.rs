//! # Gatehouse Models
//!
//! Domain models and DTOs for the Gatehouse API.
//!
//! - [`users`]: the stored user record and the sign-up / sign-in payloads

pub mod users;

pub use users::{
    AuthorityDto, CheckResponse, NewUser, SignRequest, SignResponse, SignUpRequest,
    SignUpResponse, User,
};
