//! Sign-up, sign-in and the signed-in check.

pub mod controller;
pub mod router;
pub mod service;
pub mod store;

pub use gatehouse_models::users as model;
