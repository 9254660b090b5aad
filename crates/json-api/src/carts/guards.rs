//! Existence checks run before any cart mutation.

use storefront_app::domain::{
    carts::models::{Cart, CartUuid},
    existence::Existence,
    products::models::ProductUuid,
};

use crate::{
    carts::errors::{cart_not_found, line_not_found, product_not_found},
    envelope::ApiError,
    state::State,
};

/// Resolve a cart path segment. Malformed ids cannot name a cart and are reported as absent.
pub(crate) async fn require_cart(state: &State, raw: &str) -> Result<CartUuid, ApiError> {
    let Ok(cart) = CartUuid::parse(raw) else {
        return Err(cart_not_found(raw));
    };

    match state.app.carts.cart_exists(cart).await {
        Existence::Found => Ok(cart),
        Existence::Absent => Err(cart_not_found(raw)),
        Existence::Fault => Err(ApiError::internal()),
    }
}

/// Resolve a product reference, treating soft-deleted products as absent.
pub(crate) async fn require_product(state: &State, raw: &str) -> Result<ProductUuid, ApiError> {
    let Ok(product) = ProductUuid::parse(raw) else {
        return Err(product_not_found(raw));
    };

    match state.app.products.product_exists(product).await {
        Existence::Found => Ok(product),
        Existence::Absent => Err(product_not_found(raw)),
        Existence::Fault => Err(ApiError::internal()),
    }
}

pub(crate) fn require_line(
    cart: &Cart,
    product: ProductUuid,
    raw_cart: &str,
    raw_product: &str,
) -> Result<(), ApiError> {
    if cart.contains(product) {
        Ok(())
    } else {
        Err(line_not_found(raw_cart, raw_product))
    }
}
