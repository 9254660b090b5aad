//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*, test::ResponseExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use storefront_app::{
    auth::{CurrentUser, MockAuthService, SessionUuid},
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{Cart, CartLine, CartUuid},
        },
        products::{
            MockProductsService,
            models::{Product, ProductUuid},
        },
        users::{
            MockUsersService,
            models::{Role, User, UserUuid},
        },
    },
};

use testresult::TestResult;

use crate::{auth, state::State};

/// Bearer token accepted by [`authenticating_as`].
pub(crate) const TEST_TOKEN: &str = "test-token";

pub(crate) fn admin_user() -> CurrentUser {
    CurrentUser {
        session_uuid: SessionUuid::new(),
        user_uuid: UserUuid::new(),
        email: "admin@example.com".to_string(),
        role: Role::Admin,
    }
}

pub(crate) fn regular_user() -> CurrentUser {
    CurrentUser {
        session_uuid: SessionUuid::new(),
        user_uuid: UserUuid::new(),
        email: "shopper@example.com".to_string(),
        role: Role::User,
    }
}

pub(crate) fn make_cart(uuid: CartUuid, lines: Vec<CartLine>) -> Cart {
    Cart {
        uuid,
        lines,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> Product {
    Product {
        uuid,
        title: "Mate".to_string(),
        description: "Calabash gourd".to_string(),
        price: 1_200,
        stock: 5,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_user(uuid: UserUuid, role: Role) -> User {
    User {
        uuid,
        first_name: "Ana".to_string(),
        last_name: "Diaz".to_string(),
        email: "ana@example.com".to_string(),
        role,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_cart_exists().never();
    carts.expect_get_cart().never();
    carts.expect_create_cart().never();
    carts.expect_add_line().never();
    carts.expect_remove_line().never();
    carts.expect_replace_lines().never();
    carts.expect_set_line_quantity().never();
    carts.expect_clear_lines().never();

    carts
}

pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_product_exists().never();
    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_delete_product().never();

    products
}

pub(crate) fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_list_users().never();
    users.expect_get_user().never();
    users.expect_create_user().never();
    users.expect_update_user().never();
    users.expect_delete_user().never();

    users
}

pub(crate) fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_register().never();
    auth.expect_login().never();
    auth.expect_logout().never();
    auth.expect_authenticate_bearer().never();

    auth
}

/// An auth mock that resolves [`TEST_TOKEN`] to `user` any number of times.
pub(crate) fn authenticating_as(user: CurrentUser) -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_register().never();
    auth.expect_login().never();
    auth.expect_logout().never();
    auth.expect_authenticate_bearer()
        .withf(|token| token == TEST_TOKEN)
        .returning(move |_| Ok(user.clone()));

    auth
}

/// Build state from mocks; every service defaults to a strict mock.
#[derive(Default)]
pub(crate) struct TestState {
    carts: Option<MockCartsService>,
    products: Option<MockProductsService>,
    users: Option<MockUsersService>,
    auth: Option<MockAuthService>,
}

impl TestState {
    pub(crate) fn carts(mut self, carts: MockCartsService) -> Self {
        self.carts = Some(carts);
        self
    }

    pub(crate) fn products(mut self, products: MockProductsService) -> Self {
        self.products = Some(products);
        self
    }

    pub(crate) fn users(mut self, users: MockUsersService) -> Self {
        self.users = Some(users);
        self
    }

    pub(crate) fn auth(mut self, auth: MockAuthService) -> Self {
        self.auth = Some(auth);
        self
    }

    pub(crate) fn build(self) -> Arc<State> {
        State::from_app_context(AppContext {
            carts: Arc::new(self.carts.unwrap_or_else(strict_carts_mock)),
            products: Arc::new(self.products.unwrap_or_else(strict_products_mock)),
            users: Arc::new(self.users.unwrap_or_else(strict_users_mock)),
            auth: Arc::new(self.auth.unwrap_or_else(strict_auth_mock)),
        })
    }

    /// A service with state injected in front of `route`.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.build())).push(route))
    }

    /// Like [`TestState::service`] but with the auth middleware in front of `route`.
    pub(crate) fn authenticated_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.build()))
                .hoop(auth::middleware::handler)
                .push(route),
        )
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    TestState::default().auth(auth).build()
}

/// The `Authorization` header value carrying [`TEST_TOKEN`].
pub(crate) fn bearer() -> String {
    format!("Bearer {TEST_TOKEN}")
}

/// Deserialize the `payload` of a success envelope.
pub(crate) async fn take_payload<T: DeserializeOwned>(res: &mut Response) -> TestResult<T> {
    let mut body: Value = res.take_json().await?;

    Ok(serde_json::from_value(body["payload"].take())?)
}
