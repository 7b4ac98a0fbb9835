//! Orders over the `orders` table.

use async_trait::async_trait;
use reqwest::Method;
use storefront::orders::{Order, OrderPayload};
use tracing::debug;

use crate::orders::{OrderStore, OrdersError};

use super::RestBackend;

const ORDERS: &str = "orders";

#[async_trait]
impl OrderStore for RestBackend {
    async fn insert_order(&self, order: &OrderPayload) -> Result<Order, OrdersError> {
        let request = self
            .request(Method::POST, ORDERS, "")
            .header("Prefer", "return=representation")
            .json(&[order]);

        let stored: Vec<Order> = self.rows(request).await?;

        let order = stored.into_iter().next().ok_or(OrdersError::NotReturned)?;

        debug!(order_id = %order.id, "order stored");

        Ok(order)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, OrdersError> {
        let request = self.request(Method::GET, ORDERS, "select=*&order=created_at.desc");

        Ok(self.rows(request).await?)
    }
}
