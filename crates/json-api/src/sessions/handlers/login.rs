//! Login Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, Success, success},
    extensions::*,
    sessions::{
        errors::into_api_error,
        models::{LoginRequest, SessionResponse},
    },
    state::State,
};

/// Login Handler
///
/// Exchanges an e-mail and password for a bearer token.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Success<SessionResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let body = req
        .parse_json::<LoginRequest>()
        .await
        .map_err(|error| ApiError::bad_request(format!("invalid login payload: {error}")))?;

    let issued = state
        .app
        .auth
        .login(&body.email, &body.password)
        .await
        .map_err(into_api_error)?;

    Ok(success(issued.into()))
}
