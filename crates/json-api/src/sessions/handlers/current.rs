//! Current Session Handler

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, Success, success},
    extensions::*,
    sessions::models::CurrentUserResponse,
};

/// Current Session Handler
///
/// Describes the user behind the presented bearer token.
#[handler]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Success<CurrentUserResponse>>, ApiError> {
    let current = depot.current_user_or_401()?;

    Ok(success(current.into()))
}
