//! User roles and the authorities they grant.
//!
//! A role is serialized by its name (`"USER"`, `"ADMIN"`); this is the value
//! embedded in the `auth` claim of every token.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 2] = [UserRole::User, UserRole::Admin];

    /// Wire name of the role, e.g. `USER`.
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }

    /// Authority string granted by the role, e.g. `ROLE_USER`.
    pub fn authority(self) -> &'static str {
        match self {
            UserRole::User => "ROLE_USER",
            UserRole::Admin => "ROLE_ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
