//! Session Errors

use tracing::error;

use storefront_app::auth::AuthServiceError;

use crate::envelope::ApiError;

pub(crate) fn into_api_error(error: AuthServiceError) -> ApiError {
    match error {
        AuthServiceError::InvalidCredentials => ApiError::unauthorized("invalid email or password"),
        AuthServiceError::Token(_) => ApiError::unauthorized("invalid or expired session token"),
        AuthServiceError::NotFound => ApiError::not_found("session not found"),
        AuthServiceError::AlreadyExists => {
            ApiError::conflict("a user with that e-mail already exists")
        }
        AuthServiceError::MissingRequiredData | AuthServiceError::InvalidData => {
            ApiError::bad_request(format!("invalid registration payload: {error}"))
        }
        AuthServiceError::Sql(source) => {
            error!("session operation failed: {source}");

            ApiError::internal()
        }
        AuthServiceError::Password(source) => {
            error!("session password processing failed: {source}");

            ApiError::internal()
        }
    }
}
