//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use storefront_app::auth::AuthServiceError;
use tracing::{debug, error};

use crate::{
    envelope::ApiError, extensions::*, observability::current_request_id, state::State,
};

/// Resolve the bearer token into a [`CurrentUser`](storefront_app::auth::CurrentUser)
/// and inject it into the depot, or answer 401.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(ApiError::unauthorized(
            "missing or invalid Authorization header",
        ));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state.clone(),
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    let current_user = match state.app.auth.authenticate_bearer(token).await {
        Ok(current_user) => current_user,
        Err(AuthServiceError::Sql(source)) => {
            error!(
                request_id = current_request_id(depot).unwrap_or_default(),
                "failed to validate session token: {source}"
            );

            res.render(ApiError::internal());
            ctrl.skip_rest();

            return;
        }
        Err(rejected) => {
            debug!("session token rejected: {rejected}");

            res.render(ApiError::unauthorized("invalid or expired session token"));
            ctrl.skip_rest();

            return;
        }
    };

    depot.inject(current_user);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
