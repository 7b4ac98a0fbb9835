//! Orders

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{cart::CartLine, checkout::ValidatedCustomer, ids::TypedId};

/// Order Id
pub type OrderId = TypedId<Order>;

/// Fulfilment status of an order.
///
/// The storefront only ever writes [`OrderStatus::Pending`]; the rest are set by staff and
/// show up when orders are read back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet handled
    #[default]
    Pending,

    /// Accepted by the shop
    Confirmed,

    /// Handed to the customer
    Delivered,

    /// Will not be fulfilled
    Cancelled,
}

/// An order ready to be stored.
///
/// Built once from a validated customer and a cart snapshot, then only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    customer_name: String,
    phone: String,
    email: String,
    address: String,
    city: String,
    pincode: String,
    notes: Option<String>,
    items: Vec<CartLine>,
    total: u64,
    status: OrderStatus,
}

impl OrderPayload {
    /// Assemble a pending order.
    pub fn new(customer: ValidatedCustomer, items: Vec<CartLine>, total: u64) -> Self {
        let ([customer_name, phone, email, address, city, pincode], notes) =
            customer.into_parts();

        Self {
            customer_name,
            phone,
            email,
            address,
            city,
            pincode,
            notes,
            items,
            total,
            status: OrderStatus::Pending,
        }
    }

    /// Customer name
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Phone number
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Email address
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Street address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// City
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Postal code
    pub fn pincode(&self) -> &str {
        &self.pincode
    }

    /// Delivery notes
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Ordered lines, priced as they were in the cart
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Order total in whole rupees
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Order status
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Single-line delivery address, as printed on the receipt.
    pub fn full_address(&self) -> String {
        format!("{}, {} - {}", self.address, self.city, self.pincode)
    }
}

/// An order as held by the order store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Id assigned by the order store
    pub id: OrderId,

    /// When the order was stored
    pub created_at: Timestamp,

    /// What was ordered, and by whom
    #[serde(flatten)]
    pub payload: OrderPayload,
}

/// Sum of order totals.
pub fn revenue(orders: &[Order]) -> u64 {
    orders
        .iter()
        .fold(0, |total, order| total.saturating_add(order.payload.total()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        checkout::{CustomerDetails, validate},
        products::ProductId,
    };

    use super::*;

    fn customer() -> ValidatedCustomer {
        let details = CustomerDetails {
            name: "Asha Patil".to_string(),
            phone: "9876543210".to_string(),
            email: "asha@example.com".to_string(),
            address: "12 Lokmanya Nagar".to_string(),
            city: "Parbhani".to_string(),
            pincode: "431401".to_string(),
            notes: Some("Ring twice".to_string()),
        };

        match validate(&details) {
            Ok(customer) => customer,
            Err(report) => panic!("fixture customer should validate: {report}"),
        }
    }

    fn line(id: i64, price: u64, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            title: format!("Product {id}"),
            price,
            image_reference: String::new(),
            quantity,
        }
    }

    #[test]
    fn new_payload_is_pending() {
        let payload = OrderPayload::new(customer(), vec![line(1, 500, 2)], 1000);

        assert_eq!(payload.status(), OrderStatus::Pending);
        assert_eq!(payload.customer_name(), "Asha Patil");
        assert_eq!(payload.notes(), Some("Ring twice"));
        assert_eq!(payload.full_address(), "12 Lokmanya Nagar, Parbhani - 431401");
    }

    #[test]
    fn payload_serializes_with_storefront_columns() -> TestResult {
        let payload = OrderPayload::new(customer(), vec![line(1, 500, 2)], 1000);

        let value = serde_json::to_value(&payload)?;

        assert_eq!(value["customer_name"], "Asha Patil");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["total"], 1000);
        assert_eq!(value["items"][0]["id"], 1);
        assert_eq!(value["items"][0]["quantity"], 2);

        Ok(())
    }

    #[test]
    fn stored_order_reads_flattened_row() -> TestResult {
        let raw = r#"{
            "id": 42,
            "created_at": "2024-05-01T10:00:00Z",
            "customer_name": "Asha Patil",
            "phone": "9876543210",
            "email": "asha@example.com",
            "address": "12 Lokmanya Nagar",
            "city": "Parbhani",
            "pincode": "431401",
            "notes": null,
            "items": [],
            "total": 750,
            "status": "delivered"
        }"#;

        let order: Order = serde_json::from_str(raw)?;

        assert_eq!(order.id, OrderId::new(42));
        assert_eq!(order.payload.status(), OrderStatus::Delivered);
        assert_eq!(revenue(&[order.clone(), order]), 1500);

        Ok(())
    }
}
