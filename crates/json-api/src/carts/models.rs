//! Cart request and response bodies.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::{Cart, CartLine};

/// Cart Response
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CartResponse {
    pub uuid: Uuid,

    /// Lines in insertion order
    pub lines: Vec<CartLineResponse>,

    pub created_at: String,

    pub updated_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            uuid: cart.uuid.into_uuid(),
            lines: cart.lines.into_iter().map(CartLineResponse::from).collect(),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLineResponse {
    pub id_product: Uuid,
    pub quantity: u32,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            id_product: line.product_uuid.into_uuid(),
            quantity: line.quantity.get(),
        }
    }
}

/// One entry of a full cart replacement.
///
/// Ids stay textual so a malformed id can be reported as a missing product.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLineRequest {
    pub id_product: String,
    pub quantity: i64,
}

/// Set Line Quantity Request
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SetQuantityRequest {
    pub quantity: i64,
}
