//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde_json::{Value, json};
use tracing::info;

use crate::{
    envelope::{ApiError, Success, success},
    extensions::*,
    sessions::errors::into_api_error,
    state::State,
};

/// Logout Handler
///
/// Revokes the session behind the presented bearer token.
#[handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Success<Value>>, ApiError> {
    let current = depot.current_user_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .logout(current.session_uuid)
        .await
        .map_err(into_api_error)?;

    info!(user = %current.user_uuid, "signed out");

    Ok(success(json!({ "session": current.session_uuid.into_uuid() })))
}

#[cfg(test)]
mod tests {
    use salvo::{http::header::AUTHORIZATION, test::TestClient};
    use testresult::TestResult;

    use storefront_app::auth::MockAuthService;

    use crate::test_helpers::{TEST_TOKEN, TestState, bearer, regular_user};

    use super::*;

    #[tokio::test]
    async fn test_logout_revokes_current_session() -> TestResult {
        let user = regular_user();
        let session = user.session_uuid;

        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == TEST_TOKEN)
            .return_once(move |_| Ok(user));

        auth.expect_logout()
            .once()
            .withf(move |uuid| *uuid == session)
            .return_once(|_| Ok(()));

        let service = TestState::default()
            .auth(auth)
            .authenticated_service(Router::with_path("sessions/logout").post(handler));

        let res = TestClient::post("http://example.com/sessions/logout")
            .add_header(AUTHORIZATION, bearer(), true)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_without_token_returns_401() -> TestResult {
        let service = TestState::default()
            .authenticated_service(Router::with_path("sessions/logout").post(handler));

        let res = TestClient::post("http://example.com/sessions/logout")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
