//! Catalog store.

use async_trait::async_trait;
use mockall::automock;
use storefront::products::{Product, ProductDraft, ProductId};
use thiserror::Error;

use crate::backend::BackendError;

/// Errors raised by the catalog store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product has the requested id.
    #[error("product not found")]
    NotFound,

    /// The catalog could not be reached or rejected the request.
    #[error("catalog unavailable")]
    Backend(#[from] BackendError),
}

/// Product fields written by the admin panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpsert {
    /// Product to overwrite; a new product is created when absent
    pub id: Option<ProductId>,

    /// Product title
    pub title: String,

    /// Price in whole rupees
    pub price: u64,

    /// Public image URL
    pub image_reference: String,
}

impl From<ProductDraft> for ProductUpsert {
    fn from(draft: ProductDraft) -> Self {
        Self {
            id: draft.id,
            title: draft.title,
            price: draft.price,
            image_reference: draft.image_reference,
        }
    }
}

/// Read-mostly source of product listings.
#[automock]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Retrieves all products, ordered by id.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Deletes the product with the given id.
    async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError>;

    /// Creates a product, or overwrites the one named by `product.id`.
    async fn upsert_product(&self, product: ProductUpsert) -> Result<Product, CatalogError>;
}
