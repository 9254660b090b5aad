//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{Cart, CartUuid, NewCart, NewCartLine, Quantity},
            repositories::{PgCartLinesRepository, PgCartsRepository},
        },
        existence::Existence,
        products::models::ProductUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    lines_repository: PgCartLinesRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            lines_repository: PgCartLinesRepository::new(),
        }
    }

    async fn with_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut cart: Cart,
    ) -> Result<Cart, CartsServiceError> {
        let lines = self.lines_repository.get_cart_lines(tx, cart.uuid).await?;

        cart.lines = lines;

        Ok(cart)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn cart_exists(&self, cart: CartUuid) -> Existence {
        let lookup = self
            .carts_repository
            .cart_exists(self.db.pool(), cart)
            .await;

        Existence::from_lookup(lookup, "cart", cart)
    }

    async fn get_cart(&self, cart: CartUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let found = self.carts_repository.get_cart(&mut tx, cart).await?;
        let found = self.with_lines(&mut tx, found).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn create_cart(&self, cart: NewCart) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .carts_repository
            .create_cart(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        debug!(cart = %created.uuid, "cart created");

        Ok(created)
    }

    async fn add_line(
        &self,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let touched = self.carts_repository.touch_cart(&mut tx, cart).await?;

        let rows_affected = self
            .lines_repository
            .add_cart_line(&mut tx, cart, product)
            .await?;

        // The line is already at the largest storable quantity.
        if rows_affected == 0 {
            return Err(CartsServiceError::InvalidData);
        }

        let updated = self.with_lines(&mut tx, touched).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn remove_line(
        &self,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let touched = self.carts_repository.touch_cart(&mut tx, cart).await?;

        let rows_affected = self
            .lines_repository
            .delete_cart_line(&mut tx, cart, product)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::LineNotFound);
        }

        let updated = self.with_lines(&mut tx, touched).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn replace_lines(
        &self,
        cart: CartUuid,
        lines: Vec<NewCartLine>,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let touched = self.carts_repository.touch_cart(&mut tx, cart).await?;

        self.lines_repository
            .clear_cart_lines(&mut tx, cart)
            .await?;

        for line in lines {
            self.lines_repository
                .insert_cart_line(&mut tx, cart, line)
                .await?;
        }

        let updated = self.with_lines(&mut tx, touched).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn set_line_quantity(
        &self,
        cart: CartUuid,
        product: ProductUuid,
        quantity: Quantity,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let touched = self.carts_repository.touch_cart(&mut tx, cart).await?;

        let rows_affected = self
            .lines_repository
            .set_cart_line_quantity(&mut tx, cart, product, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::LineNotFound);
        }

        let updated = self.with_lines(&mut tx, touched).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn clear_lines(&self, cart: CartUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut touched = self.carts_repository.touch_cart(&mut tx, cart).await?;

        let removed = self
            .lines_repository
            .clear_cart_lines(&mut tx, cart)
            .await?;

        tx.commit().await?;

        debug!(cart = %cart, removed, "cart cleared");

        touched.lines.clear();

        Ok(touched)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Report whether a cart is present. Never fails; storage problems surface as
    /// [`Existence::Fault`].
    async fn cart_exists(&self, cart: CartUuid) -> Existence;

    /// Retrieve a single cart with its lines in insertion order.
    async fn get_cart(&self, cart: CartUuid) -> Result<Cart, CartsServiceError>;

    /// Creates a new, empty cart.
    async fn create_cart(&self, cart: NewCart) -> Result<Cart, CartsServiceError>;

    /// Add one unit of a product, appending a line or incrementing the existing one.
    ///
    /// A line already at [`MAX_QUANTITY`](super::models::MAX_QUANTITY) returns `InvalidData`.
    async fn add_line(
        &self,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove the line holding a product.
    async fn remove_line(
        &self,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError>;

    /// Replace every line of the cart, keeping the given order.
    async fn replace_lines(
        &self,
        cart: CartUuid,
        lines: Vec<NewCartLine>,
    ) -> Result<Cart, CartsServiceError>;

    /// Set the quantity of an existing line.
    async fn set_line_quantity(
        &self,
        cart: CartUuid,
        product: ProductUuid,
        quantity: Quantity,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove all lines from the cart.
    async fn clear_lines(&self, cart: CartUuid) -> Result<Cart, CartsServiceError>;
}
