//! Product Get Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::domain::products::models::ProductUuid;

use crate::{
    envelope::{ApiError, Success, success},
    extensions::*,
    products::{errors::into_api_error, models::ProductResponse},
    state::State,
};

/// Product Get Handler
///
/// Returns a single product. Deleted products are not found.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Success<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let raw_product = req.param::<String>("product").unwrap_or_default();

    let Ok(product) = ProductUuid::parse(&raw_product) else {
        return Err(ApiError::not_found("product not found"));
    };

    let product = state
        .app
        .products
        .get_product(product)
        .await
        .map_err(into_api_error)?;

    Ok(success(product.into()))
}
