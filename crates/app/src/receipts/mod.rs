//! Receipt sender.

use async_trait::async_trait;
use mockall::automock;
use storefront::receipts::{MissingFields, ReceiptRequest};
use thiserror::Error;

use crate::backend::BackendError;

mod http;

pub use http::{HttpReceiptSender, ReceiptSenderConfig};

/// Errors raised while sending a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The request lacks a field the endpoint requires; nothing was sent.
    #[error(transparent)]
    MissingFields(#[from] MissingFields),

    /// The endpoint refused the request.
    #[error("receipt request rejected: {0}")]
    Rejected(String),

    /// The email provider failed to send.
    #[error("email provider error: {0}")]
    Provider(String),

    /// The endpoint could not be reached.
    #[error("receipt sender unreachable")]
    Backend(#[from] BackendError),
}

/// A receipt accepted by the email provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptDelivery {
    /// Provider-assigned id of the sent email
    pub email_id: Option<String>,
}

/// External system that emails order confirmations.
#[automock]
#[async_trait]
pub trait ReceiptSender: Send + Sync {
    /// Emails the order confirmation described by `request`.
    async fn send(&self, request: &ReceiptRequest) -> Result<ReceiptDelivery, ReceiptError>;
}
