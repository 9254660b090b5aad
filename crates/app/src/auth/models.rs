//! Auth data models.

use std::fmt;

use jiff::Timestamp;

use crate::{
    domain::users::models::{Role, User, UserUuid},
    uuids::TypedUuid,
};

pub type SessionUuid = TypedUuid<Session>;

/// Default lifetime of a login session.
pub const DEFAULT_SESSION_TTL_HOURS: u32 = 24;

/// A persisted login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// The authenticated principal behind a bearer token.
///
/// `role` is read from the stored user at authentication time, never from the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub session_uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session: Session,
    pub user: User,
}

/// Self-service sign-up payload. Registered users always get [`Role::User`].
#[derive(Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub ttl_hours: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl_hours: DEFAULT_SESSION_TTL_HOURS,
        }
    }
}

/// Session row joined with its owner, used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub email: String,
    pub role: Role,
    pub token_hash: String,
}
