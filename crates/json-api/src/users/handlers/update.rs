//! User Update Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::domain::users::models::UserUpdate;

use crate::{
    envelope::{ApiError, Success, success},
    extensions::*,
    state::State,
    users::{
        errors::into_api_error,
        handlers::parse_user,
        models::{UpdateUserRequest, UserResponse},
    },
};

/// User Update Handler
///
/// Replaces an account's profile. Admin only.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Success<UserResponse>>, ApiError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = parse_user(&req.param::<String>("user").unwrap_or_default())?;

    let body = req
        .parse_json::<UpdateUserRequest>()
        .await
        .map_err(|error| ApiError::bad_request(format!("invalid user payload: {error}")))?;

    let updated = state
        .app
        .users
        .update_user(
            user,
            UserUpdate {
                first_name: body.first_name,
                last_name: body.last_name,
                email: body.email,
                password: body.password,
                role: body.role,
            },
        )
        .await
        .map_err(into_api_error)?;

    Ok(success(updated.into()))
}
