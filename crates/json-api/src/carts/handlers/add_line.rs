//! Add Cart Line Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{
    carts::{
        errors::into_api_error,
        guards::{require_cart, require_product},
        models::CartResponse,
    },
    envelope::{ApiError, Success, success},
    extensions::*,
    state::State,
};

/// Add Cart Line Handler
///
/// Adds one unit of a product: appends a line or increments the existing one.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Success<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let raw_cart = req.param::<String>("cart").unwrap_or_default();
    let raw_product = req.param::<String>("product").unwrap_or_default();

    let cart = require_cart(state, &raw_cart).await?;
    let product = require_product(state, &raw_product).await?;

    let updated = state
        .app
        .carts
        .add_line(cart, product)
        .await
        .map_err(|error| into_api_error(error, &raw_cart, Some(&raw_product)))?;

    info!(cart = %cart, product = %product, "cart line added");

    Ok(success(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{
            CartsServiceError, MockCartsService,
            models::{CartLine, CartUuid, Quantity},
        },
        existence::Existence,
        products::{MockProductsService, models::ProductUuid},
    };

    use crate::test_helpers::{TestState, make_cart};

    use super::*;

    fn make_service(carts: MockCartsService, products: MockProductsService) -> Service {
        TestState::default()
            .carts(carts)
            .products(products)
            .service(Router::with_path("carts/{cart}/product/{product}").post(handler))
    }

    fn url(cart: impl std::fmt::Display, product: impl std::fmt::Display) -> String {
        format!("http://example.com/carts/{cart}/product/{product}")
    }

    #[tokio::test]
    async fn test_add_line_returns_updated_cart() -> TestResult {
        let cart = CartUuid::new();
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();
        let mut products = MockProductsService::new();

        carts
            .expect_cart_exists()
            .once()
            .withf(move |c| *c == cart)
            .return_const(Existence::Found);

        products
            .expect_product_exists()
            .once()
            .withf(move |p| *p == product)
            .return_const(Existence::Found);

        carts
            .expect_add_line()
            .once()
            .withf(move |c, p| *c == cart && *p == product)
            .return_once(move |_, _| {
                Ok(make_cart(
                    cart,
                    vec![CartLine {
                        product_uuid: product,
                        quantity: Quantity::ONE,
                    }],
                ))
            });

        let mut res = TestClient::post(url(cart, product))
            .send(&make_service(carts, products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Value = res.take_json().await?;

        assert_eq!(
            body["payload"]["lines"],
            json!([{ "idProduct": product.into_uuid(), "quantity": 1 }])
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_cart_short_circuits_before_product_lookup() -> TestResult {
        let cart = CartUuid::new();

        let mut carts = MockCartsService::new();
        let mut products = MockProductsService::new();

        carts
            .expect_cart_exists()
            .once()
            .return_const(Existence::Absent);

        products.expect_product_exists().never();
        carts.expect_add_line().never();

        let mut res = TestClient::post(url(cart, ProductUuid::new()))
            .send(&make_service(carts, products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let body: Value = res.take_json().await?;

        assert_eq!(body["error"], format!("cart {cart} not found"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_returns_404_without_mutation() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();
        let mut products = MockProductsService::new();

        carts
            .expect_cart_exists()
            .once()
            .return_const(Existence::Found);

        products
            .expect_product_exists()
            .once()
            .return_const(Existence::Absent);

        carts.expect_add_line().never();

        let mut res = TestClient::post(url(CartUuid::new(), product))
            .send(&make_service(carts, products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let body: Value = res.take_json().await?;

        assert_eq!(body["error"], format!("product {product} not found"));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_product_id_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();
        let mut products = MockProductsService::new();

        carts
            .expect_cart_exists()
            .once()
            .return_const(Existence::Found);

        products.expect_product_exists().never();
        carts.expect_add_line().never();

        let res = TestClient::post(url(CartUuid::new(), "42"))
            .send(&make_service(carts, products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_product_lookup_fault_returns_500() -> TestResult {
        let mut carts = MockCartsService::new();
        let mut products = MockProductsService::new();

        carts
            .expect_cart_exists()
            .once()
            .return_const(Existence::Found);

        products
            .expect_product_exists()
            .once()
            .return_const(Existence::Fault);

        carts.expect_add_line().never();

        let res = TestClient::post(url(CartUuid::new(), ProductUuid::new()))
            .send(&make_service(carts, products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[tokio::test]
    async fn test_line_at_max_quantity_returns_404() -> TestResult {
        let cart = CartUuid::new();

        let mut carts = MockCartsService::new();
        let mut products = MockProductsService::new();

        carts
            .expect_cart_exists()
            .once()
            .return_const(Existence::Found);

        products
            .expect_product_exists()
            .once()
            .return_const(Existence::Found);

        carts
            .expect_add_line()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidData));

        let mut res = TestClient::post(url(cart, ProductUuid::new()))
            .send(&make_service(carts, products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let body: Value = res.take_json().await?;

        assert_eq!(body["error"], format!("cart {cart} could not be updated"));

        Ok(())
    }
}
