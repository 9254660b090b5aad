//! Product request and response bodies.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::models::{Product, ProductsPage};

/// Product Response
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub title: String,
    pub description: String,

    /// Price in minor currency units
    pub price: u64,

    pub stock: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            title: product.title,
            description: product.description,
            price: product.price,
            stock: product.stock,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Products Page Response
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProductsPageResponse {
    pub products: Vec<ProductResponse>,
    pub total: u64,
    pub limit: u32,
    pub page: u32,
    pub total_pages: u32,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
}

impl From<ProductsPage> for ProductsPageResponse {
    fn from(page: ProductsPage) -> Self {
        Self {
            has_prev_page: page.has_prev_page(),
            has_next_page: page.has_next_page(),
            prev_page: page.prev_page(),
            next_page: page.next_page(),
            total: page.total,
            limit: page.limit,
            page: page.page,
            total_pages: page.total_pages,
            products: page.products.into_iter().map(Into::into).collect(),
        }
    }
}

/// Create Product Request
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CreateProductRequest {
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub price: u64,

    #[serde(default)]
    pub stock: u32,
}
