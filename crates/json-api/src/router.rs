//! App Router

use salvo::Router;

use crate::{auth, carts, healthcheck, products, sessions, users};

/// Every route served under `/api`, plus the healthcheck.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("api")
                .push(carts_router())
                .push(products_router())
                .push(users_router())
                .push(sessions_router()),
        )
}

fn carts_router() -> Router {
    Router::with_path("carts").post(carts::create::handler).push(
        Router::with_path("{cart}")
            .get(carts::get::handler)
            .put(carts::replace::handler)
            .delete(carts::clear::handler)
            .push(
                Router::with_path("product/{product}")
                    .post(carts::add_line::handler)
                    .put(carts::set_quantity::handler)
                    .delete(carts::remove_line::handler),
            ),
    )
}

fn products_router() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .push(Router::with_path("{product}").get(products::get::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .post(products::create::handler)
                .push(Router::with_path("{product}").delete(products::delete::handler)),
        )
}

fn users_router() -> Router {
    Router::with_path("users")
        .hoop(auth::middleware::handler)
        .get(users::index::handler)
        .post(users::create::handler)
        .push(
            Router::with_path("{user}")
                .get(users::get::handler)
                .put(users::update::handler)
                .delete(users::delete::handler),
        )
}

fn sessions_router() -> Router {
    Router::with_path("sessions")
        .push(Router::with_path("register").post(sessions::register::handler))
        .push(Router::with_path("login").post(sessions::login::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("logout").post(sessions::logout::handler))
                .push(Router::with_path("current").get(sessions::current::handler)),
        )
}
