//! Order store.

use async_trait::async_trait;
use mockall::automock;
use storefront::orders::{Order, OrderPayload};
use thiserror::Error;

use crate::backend::BackendError;

/// Errors raised by the order store.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// The insert was acknowledged but no row came back.
    ///
    /// The order may well have been stored, so a resubmission can duplicate it.
    #[error("order store did not return the stored order")]
    NotReturned,

    /// The order store could not be reached or rejected the request.
    #[error("order store unavailable")]
    Backend(#[from] BackendError),
}

/// System of record for placed orders.
#[automock]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Stores a new order, returning it with its assigned id.
    async fn insert_order(&self, order: &OrderPayload) -> Result<Order, OrdersError>;

    /// Retrieves all orders, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersError>;
}
