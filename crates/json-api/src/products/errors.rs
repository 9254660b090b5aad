//! Product Errors

use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

use crate::envelope::ApiError;

pub(crate) fn into_api_error(error: ProductsServiceError) -> ApiError {
    match error {
        ProductsServiceError::AlreadyExists => ApiError::conflict("product already exists"),
        ProductsServiceError::NotFound => ApiError::not_found("product not found"),
        ProductsServiceError::PageOutOfRange { .. }
        | ProductsServiceError::InvalidPrice(_)
        | ProductsServiceError::InvalidStock(_)
        | ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => ApiError::bad_request(error.to_string()),
        ProductsServiceError::Sql(source) => {
            error!("product operation failed: {source}");

            ApiError::internal()
        }
    }
}
