//! Product Create Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::domain::products::models::{NewProduct, ProductUuid};

use crate::{
    envelope::{ApiError, Success, success},
    extensions::*,
    products::{
        errors::into_api_error,
        models::{CreateProductRequest, ProductResponse},
    },
    state::State,
};

/// Product Create Handler
///
/// Adds a product to the catalog. Admin only.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Success<ProductResponse>>, ApiError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let body = req
        .parse_json::<CreateProductRequest>()
        .await
        .map_err(|error| ApiError::bad_request(format!("invalid product payload: {error}")))?;

    let title = body.title.trim();

    if title.is_empty() {
        return Err(ApiError::bad_request("title is required"));
    }

    let product = state
        .app
        .products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            title: title.to_string(),
            description: body.description.trim().to_string(),
            price: body.price,
            stock: body.stock,
        })
        .await
        .map_err(into_api_error)?;

    Ok(success(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use serde_json::{Value, json};
    use testresult::TestResult;

    use storefront_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{
        TestState, admin_user, authenticating_as, bearer, make_product, regular_user,
        take_payload,
    };

    use super::*;

    fn make_service(products: MockProductsService, admin: bool) -> Service {
        let user = if admin { admin_user() } else { regular_user() };

        TestState::default()
            .products(products)
            .auth(authenticating_as(user))
            .authenticated_service(Router::with_path("products").post(handler))
    }

    #[tokio::test]
    async fn test_admin_creates_product() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|product| {
                product.title == "Yerba"
                    && product.description == "Loose leaf"
                    && product.price == 850
                    && product.stock == 3
            })
            .return_once(|product| {
                let mut created = make_product(product.uuid);
                created.title = product.title;
                created.price = product.price;

                Ok(created)
            });

        let mut res = TestClient::post("http://example.com/products")
            .add_header(AUTHORIZATION, bearer(), true)
            .json(&json!({
                "title": "  Yerba ",
                "description": "Loose leaf",
                "price": 850,
                "stock": 3,
            }))
            .send(&make_service(products, true))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let payload: ProductResponse = take_payload(&mut res).await?;

        assert_eq!(payload.title, "Yerba");
        assert_eq!(payload.price, 850);

        Ok(())
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let mut res = TestClient::post("http://example.com/products")
            .add_header(AUTHORIZATION, bearer(), true)
            .json(&json!({ "title": "Yerba", "price": 850 }))
            .send(&make_service(products, false))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        let body: Value = res.take_json().await?;

        assert_eq!(body["error"], "admin role required");

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_is_unauthorized() -> TestResult {
        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "title": "Yerba", "price": 850 }))
            .send(&make_service(MockProductsService::new(), true))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_title_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .add_header(AUTHORIZATION, bearer(), true)
            .json(&json!({ "title": "   ", "price": 850 }))
            .send(&make_service(products, true))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_negative_price_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .add_header(AUTHORIZATION, bearer(), true)
            .json(&json!({ "title": "Yerba", "price": -1 }))
            .send(&make_service(products, true))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_oversized_price_returns_400() -> TestResult {
        let overflow = i64::try_from(u64::MAX).expect_err("u64::MAX does not fit in i64");

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(move |_| Err(ProductsServiceError::InvalidPrice(overflow)));

        let res = TestClient::post("http://example.com/products")
            .add_header(AUTHORIZATION, bearer(), true)
            .json(&json!({ "title": "Yerba", "price": u64::MAX }))
            .send(&make_service(products, true))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
