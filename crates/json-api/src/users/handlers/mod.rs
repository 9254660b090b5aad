//! User Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

use storefront_app::domain::users::models::UserUuid;

use crate::envelope::ApiError;

/// Malformed ids cannot name a user.
fn parse_user(raw: &str) -> Result<UserUuid, ApiError> {
    let Ok(user) = UserUuid::parse(raw) else {
        return Err(ApiError::not_found("user not found"));
    };

    Ok(user)
}
