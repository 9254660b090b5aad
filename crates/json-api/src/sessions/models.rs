//! Session request and response bodies.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{
    auth::{CurrentUser, IssuedSession},
    domain::users::models::Role,
};

use crate::users::models::UserResponse;

/// Issued Session Response
///
/// `token` is only ever returned here; the server keeps a hash of it.
#[derive(Serialize, Deserialize)]
pub(crate) struct SessionResponse {
    pub token: String,
    pub session: Uuid,
    pub expires_at: String,
    pub user: UserResponse,
}

impl From<IssuedSession> for SessionResponse {
    fn from(issued: IssuedSession) -> Self {
        Self {
            token: issued.token,
            session: issued.session.uuid.into_uuid(),
            expires_at: issued.session.expires_at.to_string(),
            user: issued.user.into(),
        }
    }
}

impl Debug for SessionResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SessionResponse")
            .field("token", &"**redacted**")
            .field("session", &self.session)
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// Current User Response
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CurrentUserResponse {
    pub session: Uuid,
    pub user: Uuid,
    pub email: String,
    pub role: Role,
}

impl From<&CurrentUser> for CurrentUserResponse {
    fn from(current: &CurrentUser) -> Self {
        Self {
            session: current.session_uuid.into_uuid(),
            user: current.user_uuid.into_uuid(),
            email: current.email.clone(),
            role: current.role,
        }
    }
}

/// Register Request
#[derive(Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Login Request
#[derive(Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}
