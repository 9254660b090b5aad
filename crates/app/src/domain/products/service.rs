//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        existence::Existence,
        products::{
            errors::ProductsServiceError,
            models::{NewProduct, PageRequest, Product, ProductUuid, ProductsPage},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn product_exists(&self, product: ProductUuid) -> Existence {
        let lookup = self
            .repository
            .product_exists(self.db.pool(), product)
            .await;

        Existence::from_lookup(lookup, "product", product)
    }

    async fn list_products(&self, page: PageRequest) -> Result<ProductsPage, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let total = self.repository.count_products(&mut tx).await?;
        let total_pages = ProductsPage::pages_for(total, page.limit());

        if page.page() > total_pages {
            return Err(ProductsServiceError::PageOutOfRange {
                page: page.page(),
                total_pages,
            });
        }

        let products = self.repository.list_products(&mut tx, page).await?;

        tx.commit().await?;

        Ok(ProductsPage {
            products,
            total,
            limit: page.limit(),
            page: page.page(),
            total_pages,
        })
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let price = i64::try_from(product.price)?;
        let stock = i32::try_from(product.stock).map_err(ProductsServiceError::InvalidStock)?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_product(&mut tx, &product, price, stock)
            .await?;

        tx.commit().await?;

        info!(product = %created.uuid, title = %created.title, "product created");

        Ok(created)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(product = %product, "product deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Report whether a product is present and not deleted.
    async fn product_exists(&self, product: ProductUuid) -> Existence;

    /// Retrieves one page of products, oldest first.
    async fn list_products(&self, page: PageRequest) -> Result<ProductsPage, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Soft-deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}
