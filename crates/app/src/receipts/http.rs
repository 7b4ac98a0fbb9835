//! HTTP receipt sender.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use storefront::receipts::ReceiptRequest;
use tracing::{debug, info};

use crate::backend::BackendError;

use super::{ReceiptDelivery, ReceiptError, ReceiptSender};

/// Where receipt requests are posted.
#[derive(Debug, Clone)]
pub struct ReceiptSenderConfig {
    /// Receipt endpoint, e.g. `"https://shop.example/api/send-receipt"`.
    pub endpoint: String,
}

/// Posts receipt requests as JSON to the shop's send-receipt endpoint.
#[derive(Debug, Clone)]
pub struct HttpReceiptSender {
    config: ReceiptSenderConfig,
    http: Client,
}

impl HttpReceiptSender {
    /// Create a new sender from the given configuration.
    #[must_use]
    pub fn new(config: ReceiptSenderConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ReceiptSender for HttpReceiptSender {
    async fn send(&self, request: &ReceiptRequest) -> Result<ReceiptDelivery, ReceiptError> {
        request.ensure_complete()?;

        debug!(order_id = %request.order_id, "posting receipt request");

        let response = self
            .http
            .post(&self.config.endpoint)
            .json(request)
            .send()
            .await
            .map_err(BackendError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(BackendError::from)?;

        let delivery = interpret(status, &body)?;

        info!(
            order_id = %request.order_id,
            email_id = delivery.email_id.as_deref().unwrap_or("unknown"),
            "receipt sent"
        );

        Ok(delivery)
    }
}

#[derive(Debug, Deserialize)]
struct SentResponse {
    #[serde(rename = "emailId")]
    email_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    details: Option<String>,
}

fn interpret(status: StatusCode, body: &str) -> Result<ReceiptDelivery, ReceiptError> {
    if status.is_success() {
        let sent: SentResponse = serde_json::from_str(body).map_err(|error| {
            BackendError::UnexpectedResponse(format!("unreadable receipt response: {error}"))
        })?;

        return Ok(ReceiptDelivery {
            email_id: sent.email_id,
        });
    }

    let message = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            error,
            details: Some(details),
        }) => format!("{error}: {details}"),
        Ok(ErrorResponse {
            error,
            details: None,
        }) => error,
        Err(_) => format!("status {status}: {body}"),
    };

    if status.is_client_error() {
        Err(ReceiptError::Rejected(message))
    } else {
        Err(ReceiptError::Provider(message))
    }
}

#[cfg(test)]
mod tests {
    use storefront::orders::OrderId;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn success_carries_email_id() -> TestResult {
        let delivery = interpret(StatusCode::OK, r#"{"success":true,"emailId":"em_123"}"#)?;

        assert_eq!(delivery.email_id.as_deref(), Some("em_123"));

        Ok(())
    }

    #[test]
    fn missing_fields_response_is_rejected() {
        let result = interpret(
            StatusCode::BAD_REQUEST,
            r#"{"error":"Missing required fields"}"#,
        );

        assert!(
            matches!(&result, Err(ReceiptError::Rejected(message)) if message == "Missing required fields"),
            "expected Rejected, got {result:?}"
        );
    }

    #[test]
    fn provider_failure_keeps_provider_message() {
        let result = interpret(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"Failed to send email","details":"domain not verified"}"#,
        );

        assert!(
            matches!(&result, Err(ReceiptError::Provider(message)) if message == "Failed to send email: domain not verified"),
            "expected Provider, got {result:?}"
        );
    }

    #[test]
    fn unreadable_error_body_is_still_a_provider_failure() {
        let result = interpret(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");

        assert!(
            matches!(result, Err(ReceiptError::Provider(_))),
            "expected Provider, got {result:?}"
        );
    }

    #[tokio::test]
    async fn incomplete_request_is_not_sent() {
        let sender = HttpReceiptSender::new(ReceiptSenderConfig {
            endpoint: "http://127.0.0.1:9/unreachable".to_string(),
        });

        let request = ReceiptRequest {
            order_id: OrderId::new(1),
            customer_email: String::new(),
            customer_name: "Asha".to_string(),
            items: Vec::new(),
            total: 100,
            address: "somewhere".to_string(),
        };

        let result = sender.send(&request).await;

        assert!(
            matches!(result, Err(ReceiptError::MissingFields(_))),
            "expected MissingFields, got {result:?}"
        );
    }
}
