//! Register Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::auth::Registration;

use crate::{
    envelope::{ApiError, Success, success},
    extensions::*,
    sessions::{
        errors::into_api_error,
        models::{RegisterRequest, SessionResponse},
    },
    state::State,
};

/// Register Handler
///
/// Creates a shopper account and signs it in.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Success<SessionResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let body = req
        .parse_json::<RegisterRequest>()
        .await
        .map_err(|error| ApiError::bad_request(format!("invalid registration payload: {error}")))?;

    let issued = state
        .app
        .auth
        .register(Registration {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            password: body.password,
        })
        .await
        .map_err(into_api_error)?;

    Ok(success(issued.into()))
}
