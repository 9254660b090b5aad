//! User Delete Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde_json::{Value, json};

use crate::{
    envelope::{ApiError, Success, success},
    extensions::*,
    state::State,
    users::{errors::into_api_error, handlers::parse_user},
};

/// User Delete Handler
///
/// Deletes an account along with its sessions. Admin only.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Success<Value>>, ApiError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = parse_user(&req.param::<String>("user").unwrap_or_default())?;

    state
        .app
        .users
        .delete_user(user)
        .await
        .map_err(into_api_error)?;

    Ok(success(json!({ "uuid": user.into_uuid() })))
}
