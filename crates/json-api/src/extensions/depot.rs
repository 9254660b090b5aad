//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;
use storefront_app::auth::CurrentUser;

use crate::envelope::ApiError;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    /// The user resolved by the auth middleware.
    fn current_user_or_401(&self) -> Result<&CurrentUser, ApiError>;

    /// The resolved user, provided they hold the admin role.
    fn admin_or_403(&self) -> Result<&CurrentUser, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>()
            .map_err(|_ignored| ApiError::internal())
    }

    fn current_user_or_401(&self) -> Result<&CurrentUser, ApiError> {
        self.obtain::<CurrentUser>()
            .map_err(|_ignored| ApiError::unauthorized("authentication required"))
    }

    fn admin_or_403(&self) -> Result<&CurrentUser, ApiError> {
        let user = self.current_user_or_401()?;

        if !user.is_admin() {
            return Err(ApiError::forbidden("admin role required"));
        }

        Ok(user)
    }
}
