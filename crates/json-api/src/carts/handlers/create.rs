//! Create Cart Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::{error, info};

use storefront_app::domain::carts::{
    CartsServiceError,
    models::{CartUuid, NewCart},
};

use crate::{
    carts::models::CartResponse,
    envelope::{ApiError, Success, success},
    extensions::*,
    state::State,
};

/// Create Cart Handler
///
/// Creates an empty cart. Any failure other than a storage fault is a 404.
#[handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Success<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .create_cart(NewCart {
            uuid: CartUuid::new(),
        })
        .await
        .map_err(|failure| match failure {
            CartsServiceError::Sql(source) => {
                error!("failed to create cart: {source}");

                ApiError::internal()
            }
            other => ApiError::not_found(format!("cart could not be created: {other}")),
        })?;

    info!(cart = %cart.uuid, "cart created");

    Ok(success(cart.into()))
}
