//! Catalog over the `products` table.

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use storefront::products::{Product, ProductId};
use tracing::debug;

use crate::catalog::{CatalogError, CatalogStore, ProductUpsert};

use super::RestBackend;

const PRODUCTS: &str = "products";

#[derive(Debug, Serialize)]
struct ProductRow<'a> {
    title: &'a str,
    price: u64,
    image_url: &'a str,
}

fn by_id(id: ProductId) -> String {
    format!("id=eq.{id}")
}

#[async_trait]
impl CatalogStore for RestBackend {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let request = self.request(Method::GET, PRODUCTS, "select=*&order=id.asc");

        let products: Vec<Product> = self.rows(request).await?;

        debug!(count = products.len(), "products listed");

        Ok(products)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        let request = self
            .request(Method::DELETE, PRODUCTS, &by_id(id))
            .header("Prefer", "return=representation");

        let deleted: Vec<Product> = self.rows(request).await?;

        if deleted.is_empty() {
            return Err(CatalogError::NotFound);
        }

        Ok(())
    }

    async fn upsert_product(&self, product: ProductUpsert) -> Result<Product, CatalogError> {
        let row = ProductRow {
            title: &product.title,
            price: product.price,
            image_url: &product.image_reference,
        };

        let request = match product.id {
            Some(id) => self.request(Method::PATCH, PRODUCTS, &by_id(id)),
            None => self.request(Method::POST, PRODUCTS, ""),
        }
        .header("Prefer", "return=representation")
        .json(&row);

        let stored: Vec<Product> = self.rows(request).await?;

        stored.into_iter().next().ok_or(CatalogError::NotFound)
    }
}
