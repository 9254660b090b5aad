//! Product Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::domain::products::models::PageRequest;

use crate::{
    envelope::{ApiError, Success, success},
    extensions::*,
    products::{errors::into_api_error, models::ProductsPageResponse},
    state::State,
};

fn page_param(req: &Request, name: &str) -> Result<Option<u32>, ApiError> {
    req.query::<String>(name)
        .map(|raw| {
            raw.trim()
                .parse::<u32>()
                .map_err(|error| ApiError::bad_request(format!("invalid {name}: {error}")))
        })
        .transpose()
}

/// Product Index Handler
///
/// Returns one page of the catalog, oldest products first.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Success<ProductsPageResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = PageRequest::new(page_param(req, "limit")?, page_param(req, "page")?)
        .map_err(|error| ApiError::bad_request(error.to_string()))?;

    let products = state
        .app
        .products
        .list_products(page)
        .await
        .map_err(into_api_error)?;

    Ok(success(products.into()))
}
