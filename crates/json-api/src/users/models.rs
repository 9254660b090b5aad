//! User request and response bodies.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::users::models::{Role, User};

/// User Response
///
/// Never carries the password hash.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            uuid: user.uuid.into_uuid(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// Create User Request
#[derive(Serialize, Deserialize)]
pub(crate) struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,

    /// Defaults to `user`
    #[serde(default)]
    pub role: Option<Role>,
}

/// Update User Request
///
/// Omitting `password` or `role` leaves it unchanged.
#[derive(Serialize, Deserialize)]
pub(crate) struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub role: Option<Role>,
}

impl Debug for CreateUserRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CreateUserRequest")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("UpdateUserRequest")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
