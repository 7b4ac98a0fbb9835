//! Receipts
//!
//! The request handed to the receipt sender once an order is stored, and the plain-text
//! confirmation rendered from it.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::CartLine,
    money::format_rupees,
    orders::{OrderId, OrderPayload},
};

/// Name the shop signs its receipts with.
pub const STORE_NAME: &str = "Floral Blossom";

/// A receipt request was missing at least one required field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required fields: {}", .0.join(", "))]
pub struct MissingFields(pub Vec<&'static str>);

/// One line of a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptItem {
    /// Product title
    pub title: String,

    /// Units ordered
    pub quantity: u32,

    /// Unit price, in whole rupees
    pub price: u64,
}

impl From<&CartLine> for ReceiptItem {
    fn from(line: &CartLine) -> Self {
        Self {
            title: line.title.clone(),
            quantity: line.quantity,
            price: line.price,
        }
    }
}

impl ReceiptItem {
    /// Price of all units on this line.
    pub fn line_total(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Everything the receipt sender needs to confirm an order by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRequest {
    /// Stored order id
    pub order_id: OrderId,

    /// Where to send the receipt
    pub customer_email: String,

    /// Who to address it to
    pub customer_name: String,

    /// What was ordered
    pub items: Vec<ReceiptItem>,

    /// Order total, in whole rupees
    pub total: u64,

    /// Single-line delivery address
    pub address: String,
}

impl ReceiptRequest {
    /// Build the request for a stored order.
    pub fn for_order(order_id: OrderId, payload: &OrderPayload) -> Self {
        Self {
            order_id,
            customer_email: payload.email().to_string(),
            customer_name: payload.customer_name().to_string(),
            items: payload.items().iter().map(ReceiptItem::from).collect(),
            total: payload.total(),
            address: payload.full_address(),
        }
    }

    /// Check every required field carries a value.
    ///
    /// Blank strings and a zero total count as missing; an empty item list does not.
    ///
    /// # Errors
    ///
    /// Returns [`MissingFields`] naming each absent field by its wire name.
    pub fn ensure_complete(&self) -> Result<(), MissingFields> {
        let missing: Vec<&'static str> = [
            ("customerEmail", self.customer_email.trim().is_empty()),
            ("customerName", self.customer_name.trim().is_empty()),
            ("total", self.total == 0),
            ("address", self.address.trim().is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingFields(missing))
        }
    }

    /// Subject line for the confirmation email.
    pub fn subject(&self) -> String {
        format!("Order Confirmation #{} - {STORE_NAME}", self.order_id)
    }

    /// Plain-text body of the confirmation email.
    pub fn render_text(&self) -> String {
        let mut body = String::new();

        // Writing into a String cannot fail.
        _ = writeln!(body, "Dear {},", self.customer_name);
        _ = writeln!(body);
        _ = writeln!(
            body,
            "Thank you for your order! Order #{} has been received and is being processed.",
            self.order_id
        );
        _ = writeln!(body);

        for item in &self.items {
            _ = writeln!(
                body,
                "{} x {} @ {} = {}",
                item.title,
                item.quantity,
                format_rupees(item.price),
                format_rupees(item.line_total())
            );
        }

        _ = writeln!(body);
        _ = writeln!(body, "Total: {}", format_rupees(self.total));
        _ = writeln!(body);
        _ = writeln!(body, "Delivery address: {}", self.address);
        _ = writeln!(body, "Payment method: Cash on Delivery");
        _ = writeln!(body);
        _ = write!(body, "{STORE_NAME}");

        body
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn request() -> ReceiptRequest {
        ReceiptRequest {
            order_id: OrderId::new(42),
            customer_email: "asha@example.com".to_string(),
            customer_name: "Asha Patil".to_string(),
            items: vec![ReceiptItem {
                title: "Rose Bouquet".to_string(),
                quantity: 2,
                price: 500,
            }],
            total: 1000,
            address: "12 Lokmanya Nagar, Parbhani - 431401".to_string(),
        }
    }

    #[test]
    fn complete_request_passes() {
        assert_eq!(request().ensure_complete(), Ok(()));
    }

    #[test]
    fn blank_fields_are_reported_by_wire_name() {
        let request = ReceiptRequest {
            customer_email: "  ".to_string(),
            total: 0,
            ..request()
        };

        let Err(missing) = request.ensure_complete() else {
            panic!("expected missing fields");
        };

        assert_eq!(missing.0, ["customerEmail", "total"]);
        assert_eq!(
            missing.to_string(),
            "Missing required fields: customerEmail, total"
        );
    }

    #[test]
    fn serializes_camel_case() -> TestResult {
        let value = serde_json::to_value(request())?;

        assert_eq!(value["orderId"], 42);
        assert_eq!(value["customerEmail"], "asha@example.com");
        assert_eq!(value["items"][0]["quantity"], 2);

        Ok(())
    }

    #[test]
    fn rendered_text_mentions_order_and_address() {
        let request = request();

        let body = request.render_text();

        assert_eq!(request.subject(), "Order Confirmation #42 - Floral Blossom");
        assert!(body.contains("Dear Asha Patil,"), "{body}");
        assert!(body.contains("Rose Bouquet x 2"), "{body}");
        assert!(body.contains("Parbhani - 431401"), "{body}");
    }
}
