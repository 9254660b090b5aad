//! Cart Errors
//!
//! Every rejection other than a storage fault is a 404.

use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

use crate::envelope::ApiError;

pub(crate) fn cart_not_found(cart: &str) -> ApiError {
    ApiError::not_found(format!("cart {cart} not found"))
}

pub(crate) fn product_not_found(product: &str) -> ApiError {
    ApiError::not_found(format!("product {product} not found"))
}

pub(crate) fn line_not_found(cart: &str, product: &str) -> ApiError {
    ApiError::not_found(format!("product {product} not found in cart {cart}"))
}

pub(crate) fn invalid_payload(reason: &str) -> ApiError {
    ApiError::not_found(format!("invalid cart payload: {reason}"))
}

/// Map a failed cart operation on `cart` (and optionally one of its lines).
pub(crate) fn into_api_error(
    error: CartsServiceError,
    cart: &str,
    product: Option<&str>,
) -> ApiError {
    match error {
        CartsServiceError::NotFound => cart_not_found(cart),
        CartsServiceError::LineNotFound => line_not_found(cart, product.unwrap_or_default()),
        CartsServiceError::InvalidReference => ApiError::not_found(product.map_or_else(
            || "product not found".to_string(),
            |product| format!("product {product} not found"),
        )),
        CartsServiceError::AlreadyExists
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => {
            ApiError::not_found(format!("cart {cart} could not be updated"))
        }
        CartsServiceError::Sql(source) => {
            error!(cart, "cart operation failed: {source}");

            ApiError::internal()
        }
    }
}
