//! User Create Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::domain::users::models::{NewUser, Role, UserUuid};

use crate::{
    envelope::{ApiError, Success, success},
    extensions::*,
    state::State,
    users::{
        errors::into_api_error,
        models::{CreateUserRequest, UserResponse},
    },
};

/// User Create Handler
///
/// Creates an account with the given role. Admin only.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Success<UserResponse>>, ApiError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let body = req
        .parse_json::<CreateUserRequest>()
        .await
        .map_err(|error| ApiError::bad_request(format!("invalid user payload: {error}")))?;

    let user = state
        .app
        .users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            password: body.password,
            role: body.role.unwrap_or(Role::User),
        })
        .await
        .map_err(into_api_error)?;

    Ok(success(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use serde_json::{Value, json};
    use testresult::TestResult;

    use storefront_app::domain::users::{MockUsersService, UsersServiceError};

    use crate::test_helpers::{
        TestState, admin_user, authenticating_as, bearer, make_user, take_payload,
    };

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        TestState::default()
            .users(users)
            .auth(authenticating_as(admin_user()))
            .authenticated_service(Router::with_path("users").post(handler))
    }

    #[tokio::test]
    async fn test_create_defaults_role_to_user() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .withf(|user| user.role == Role::User && user.password == "hunter22")
            .return_once(|user| Ok(make_user(user.uuid, user.role)));

        let mut res = TestClient::post("http://example.com/users")
            .add_header(AUTHORIZATION, bearer(), true)
            .json(&json!({
                "first_name": "Ana",
                "last_name": "Diaz",
                "email": "ana@example.com",
                "password": "hunter22",
            }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let payload: UserResponse = take_payload(&mut res).await?;

        assert_eq!(payload.role, Role::User);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_with_admin_role() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .withf(|user| user.role == Role::Admin)
            .return_once(|user| Ok(make_user(user.uuid, user.role)));

        let res = TestClient::post("http://example.com/users")
            .add_header(AUTHORIZATION, bearer(), true)
            .json(&json!({
                "first_name": "Ana",
                "last_name": "Diaz",
                "email": "ana@example.com",
                "password": "hunter22",
                "role": "admin",
            }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_returns_409() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .return_once(|_| Err(UsersServiceError::AlreadyExists));

        let mut res = TestClient::post("http://example.com/users")
            .add_header(AUTHORIZATION, bearer(), true)
            .json(&json!({
                "first_name": "Ana",
                "last_name": "Diaz",
                "email": "ana@example.com",
                "password": "hunter22",
            }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        let body: Value = res.take_json().await?;

        assert_eq!(body["error"], "a user with that e-mail already exists");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_role_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_create_user().never();

        let res = TestClient::post("http://example.com/users")
            .add_header(AUTHORIZATION, bearer(), true)
            .json(&json!({
                "first_name": "Ana",
                "last_name": "Diaz",
                "email": "ana@example.com",
                "password": "hunter22",
                "role": "owner",
            }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
