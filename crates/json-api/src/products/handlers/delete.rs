//! Product Delete Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde_json::{Value, json};

use storefront_app::domain::products::models::ProductUuid;

use crate::{
    envelope::{ApiError, Success, success},
    extensions::*,
    products::errors::into_api_error,
    state::State,
};

/// Product Delete Handler
///
/// Soft-deletes a product so it disappears from the catalog and can no longer
/// be added to carts. Admin only.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Success<Value>>, ApiError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let raw_product = req.param::<String>("product").unwrap_or_default();

    let Ok(product) = ProductUuid::parse(&raw_product) else {
        return Err(ApiError::not_found("product not found"));
    };

    state
        .app
        .products
        .delete_product(product)
        .await
        .map_err(into_api_error)?;

    Ok(success(json!({ "uuid": product.into_uuid() })))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use storefront_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{TestState, admin_user, authenticating_as, bearer};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        TestState::default()
            .products(products)
            .auth(authenticating_as(admin_user()))
            .authenticated_service(Router::with_path("products/{product}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_returns_deleted_uuid() -> TestResult {
        let product = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_delete_product()
            .once()
            .withf(move |p| *p == product)
            .return_once(|_| Ok(()));

        let mut res = TestClient::delete(format!("http://example.com/products/{product}"))
            .add_header(AUTHORIZATION, bearer(), true)
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Value = res.take_json().await?;

        assert_eq!(body["payload"]["uuid"], json!(product.into_uuid()));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_delete_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/products/{}", ProductUuid::new()))
            .add_header(AUTHORIZATION, bearer(), true)
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
