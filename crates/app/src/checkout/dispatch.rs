//! Background receipt dispatch.

use std::sync::Arc;

use storefront::receipts::ReceiptRequest;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::receipts::{ReceiptDelivery, ReceiptSender};

/// A receipt being sent in the background.
///
/// Dropping the dispatch detaches it; the receipt is still sent. A failed send is logged
/// and otherwise ignored.
#[derive(Debug)]
pub struct ReceiptDispatch {
    handle: JoinHandle<Option<ReceiptDelivery>>,
}

impl ReceiptDispatch {
    pub(crate) fn spawn(sender: Arc<dyn ReceiptSender>, request: ReceiptRequest) -> Self {
        let handle = tokio::spawn(async move {
            match sender.send(&request).await {
                Ok(delivery) => {
                    info!(order_id = %request.order_id, "receipt delivered");

                    Some(delivery)
                }
                Err(send_error) => {
                    error!(
                        order_id = %request.order_id,
                        error = %send_error,
                        "failed to send receipt"
                    );

                    None
                }
            }
        });

        Self { handle }
    }

    /// Wait for the send to finish. `None` when it failed.
    pub async fn settled(self) -> Option<ReceiptDelivery> {
        match self.handle.await {
            Ok(delivery) => delivery,
            Err(join_error) => {
                error!(error = %join_error, "receipt task did not complete");

                None
            }
        }
    }
}
