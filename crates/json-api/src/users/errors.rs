//! User Errors

use tracing::error;

use storefront_app::domain::users::UsersServiceError;

use crate::envelope::ApiError;

pub(crate) fn into_api_error(error: UsersServiceError) -> ApiError {
    match error {
        UsersServiceError::AlreadyExists => ApiError::conflict(error.to_string()),
        UsersServiceError::NotFound => ApiError::not_found(error.to_string()),
        UsersServiceError::InvalidReference
        | UsersServiceError::MissingRequiredData
        | UsersServiceError::InvalidData => {
            ApiError::bad_request(format!("invalid user payload: {error}"))
        }
        UsersServiceError::Sql(source) => {
            error!("user operation failed: {source}");

            ApiError::internal()
        }
        UsersServiceError::Password(source) => {
            error!("user password processing failed: {source}");

            ApiError::internal()
        }
    }
}
