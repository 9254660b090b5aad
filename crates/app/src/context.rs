//! App Context

use std::sync::Arc;

use crate::{
    auth::{AuthService, PgAuthService, SessionSettings},
    database::Db,
    domain::{
        carts::{CartsService, PgCartsService},
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub products: Arc<dyn ProductsService>,
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    #[must_use]
    pub fn from_db(db: &Db, sessions: SessionSettings) -> Self {
        Self {
            carts: Arc::new(PgCartsService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db.clone(), sessions)),
        }
    }
}
