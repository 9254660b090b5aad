//! User Get Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, Success, success},
    extensions::*,
    state::State,
    users::{errors::into_api_error, handlers::parse_user, models::UserResponse},
};

/// User Get Handler
///
/// Admin only.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Success<UserResponse>>, ApiError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = parse_user(&req.param::<String>("user").unwrap_or_default())?;

    let user = state
        .app
        .users
        .get_user(user)
        .await
        .map_err(into_api_error)?;

    Ok(success(user.into()))
}
