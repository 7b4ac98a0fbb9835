//! Cart Lines

use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId};

/// One product in the cart, priced as it was when first added.
///
/// Serialized with the catalog's field names so a stored cart and an order's item list
/// read the same as a product row plus a `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line holds
    #[serde(rename = "id")]
    pub product_id: ProductId,

    /// Product title at the time of the first add
    pub title: String,

    /// Unit price at the time of the first add, in whole rupees
    pub price: u64,

    /// Product image at the time of the first add
    #[serde(rename = "image_url")]
    pub image_reference: String,

    /// Number of units; never zero for a line held in a cart
    pub quantity: u32,
}

impl CartLine {
    /// Start a line for `product` with a single unit.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            title: product.title.clone(),
            price: product.price,
            image_reference: product.image_reference.clone(),
            quantity: 1,
        }
    }

    /// Price of all units on this line.
    pub fn line_total(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_multiplies_quantity() {
        let line = CartLine {
            product_id: ProductId::new(1),
            title: "Rose Bouquet".to_string(),
            price: 500,
            image_reference: String::new(),
            quantity: 3,
        };

        assert_eq!(line.line_total(), 1500);
    }
}
