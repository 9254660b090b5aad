//! Test Helpers

use crate::{
    domain::{
        carts::{
            CartsService, CartsServiceError,
            models::{Cart, CartUuid, NewCart},
        },
        products::{
            ProductsService, ProductsServiceError,
            models::{NewProduct, Product, ProductUuid},
        },
        users::models::{NewUser, Role, UserUuid},
    },
    test::TestContext,
};

/// Password given to every user built by [`new_user`].
pub(crate) const TEST_PASSWORD: &str = "password123";

pub(crate) async fn create_cart(ctx: &TestContext) -> Result<Cart, CartsServiceError> {
    ctx.carts
        .create_cart(NewCart {
            uuid: CartUuid::new(),
        })
        .await
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    title: &str,
    price: u64,
) -> Result<Product, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            title: title.to_string(),
            description: format!("{title} description"),
            price,
            stock: 25,
        })
        .await
}

pub(crate) fn new_user(email: &str, role: Role) -> NewUser {
    NewUser {
        uuid: UserUuid::new(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        role,
    }
}
