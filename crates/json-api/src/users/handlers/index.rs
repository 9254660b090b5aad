//! User Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, Success, success},
    extensions::*,
    state::State,
    users::{errors::into_api_error, models::UserResponse},
};

/// User Index Handler
///
/// Lists every account, oldest first. Admin only.
#[handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Success<Vec<UserResponse>>>, ApiError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = state.app.users.list_users().await.map_err(into_api_error)?;

    Ok(success(users.into_iter().map(Into::into).collect()))
}
