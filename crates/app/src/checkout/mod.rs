//! Checkout service.
//!
//! Places an order for the current cart. Storing the order is the point of no return:
//! if the order store fails nothing else happens and the customer may simply submit
//! again, while a failed receipt never undoes or delays a stored order.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use storefront::{
    cart::CartManager,
    checkout::{CustomerDetails, ValidationReport, validate},
    orders::{Order, OrderPayload},
    receipts::ReceiptRequest,
    storage::KeyValueStore,
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    notify::{Notification, Notifier},
    orders::{OrderStore, OrdersError},
    receipts::ReceiptSender,
};

mod dispatch;
mod guard;

pub use dispatch::ReceiptDispatch;
pub use guard::SubmissionGuard;

/// Why an order was not placed. The cart is untouched in every case.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Another submission is still running.
    #[error("an order is already being placed")]
    SubmissionInProgress,

    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// One or more customer fields failed validation.
    #[error("invalid customer details: {0}")]
    Invalid(ValidationReport),

    /// The order store failed; the customer may resubmit.
    #[error("failed to store order")]
    Persistence(#[source] OrdersError),
}

/// An order that was stored.
#[derive(Debug)]
pub struct PlacedOrder {
    /// The order as stored, with its assigned id
    pub order: Order,

    /// The receipt email, already on its way
    pub receipt: ReceiptDispatch,
}

/// Places orders for a cart, one submission at a time.
pub struct CheckoutService {
    orders: Arc<dyn OrderStore>,
    receipts: Arc<dyn ReceiptSender>,
    notifier: Arc<dyn Notifier>,
    submitting: AtomicBool,
}

impl Debug for CheckoutService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CheckoutService")
            .field("submitting", &self.is_submitting())
            .finish_non_exhaustive()
    }
}

impl CheckoutService {
    /// Create a new checkout service over the given collaborators.
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrderStore>,
        receipts: Arc<dyn ReceiptSender>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            orders,
            receipts,
            notifier,
            submitting: AtomicBool::new(false),
        }
    }

    /// Whether an order is being placed right now; the submit control should be disabled
    /// while this holds.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Claim the right to submit.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::SubmissionInProgress`] while another submission holds it.
    pub fn begin_submission(&self) -> Result<SubmissionGuard<'_>, CheckoutError> {
        SubmissionGuard::acquire(&self.submitting).ok_or(CheckoutError::SubmissionInProgress)
    }

    /// Place an order for everything in `cart`.
    ///
    /// On success the cart is cleared and the receipt is already on its way. On any
    /// failure the cart is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] when a submission is already running, the cart is empty,
    /// the customer details are invalid, or the order store fails.
    pub async fn place_order<S: KeyValueStore>(
        &self,
        cart: &mut CartManager<S>,
        details: &CustomerDetails,
    ) -> Result<PlacedOrder, CheckoutError> {
        let _guard = self.begin_submission()?;

        if cart.is_empty() {
            self.notifier.notify(Notification::error("Your cart is empty"));

            return Err(CheckoutError::EmptyCart);
        }

        let customer = match validate(details) {
            Ok(customer) => customer,
            Err(report) => {
                warn!(%report, "checkout form rejected");

                self.notifier
                    .notify(Notification::error("Please fix form errors"));

                return Err(CheckoutError::Invalid(report));
            }
        };

        let payload = OrderPayload::new(customer, cart.to_order_items(), cart.total_price());

        info!(
            items = payload.items().len(),
            total = payload.total(),
            "placing order"
        );

        let order = match self.orders.insert_order(&payload).await {
            Ok(order) => order,
            Err(store_error) => {
                if matches!(store_error, OrdersError::NotReturned) {
                    error!(
                        customer_email = payload.email(),
                        total = payload.total(),
                        "order acknowledged but not returned; it may already be stored"
                    );
                } else {
                    error!(error = %store_error, "failed to place order");
                }

                self.notifier.notify(Notification::error(
                    "Error placing order. Please try again.",
                ));

                return Err(CheckoutError::Persistence(store_error));
            }
        };

        info!(order_id = %order.id, "order placed");

        let receipt = ReceiptDispatch::spawn(
            Arc::clone(&self.receipts),
            ReceiptRequest::for_order(order.id, &payload),
        );

        cart.clear();

        self.notifier.notify(Notification::success(format!(
            "Order #{} placed successfully",
            order.id
        )));

        Ok(PlacedOrder { order, receipt })
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use storefront::{
        checkout::{Field, FieldErrorKind},
        orders::{OrderId, OrderStatus},
        products::{Product, ProductId},
        storage::MemoryStore,
    };
    use testresult::TestResult;

    use crate::{
        backend::BackendError,
        notify::{MockNotifier, NotificationKind},
        orders::MockOrderStore,
        receipts::{MockReceiptSender, ReceiptDelivery, ReceiptError},
    };

    use super::*;

    fn rose() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Rose Bouquet".to_string(),
            price: 500,
            image_reference: "rose.jpg".to_string(),
        }
    }

    fn details() -> CustomerDetails {
        CustomerDetails {
            name: "Asha Patil".to_string(),
            phone: "9876543210".to_string(),
            email: "asha@example.com".to_string(),
            address: "12 Lokmanya Nagar".to_string(),
            city: "Parbhani".to_string(),
            pincode: "431401".to_string(),
            notes: None,
        }
    }

    fn cart_with_two_roses() -> CartManager<MemoryStore> {
        let mut cart = CartManager::new(MemoryStore::new());

        cart.add(&rose());
        cart.add(&rose());

        cart
    }

    fn storing_orders(id: i64) -> MockOrderStore {
        let mut orders = MockOrderStore::new();

        orders
            .expect_insert_order()
            .once()
            .returning(move |payload| {
                Ok(Order {
                    id: OrderId::new(id),
                    created_at: Timestamp::UNIX_EPOCH,
                    payload: payload.clone(),
                })
            });

        orders
    }

    fn failing_orders() -> MockOrderStore {
        let mut orders = MockOrderStore::new();

        orders.expect_insert_order().once().returning(|_| {
            Err(OrdersError::Backend(BackendError::UnexpectedResponse(
                "network down".to_string(),
            )))
        });

        orders
    }

    fn unused_receipts() -> MockReceiptSender {
        let mut receipts = MockReceiptSender::new();

        receipts.expect_send().never();

        receipts
    }

    fn expect_one(kind: NotificationKind, message: &'static str) -> MockNotifier {
        let mut notifier = MockNotifier::new();

        notifier
            .expect_notify()
            .once()
            .withf(move |n| n.kind == kind && n.message == message)
            .return_const(());

        notifier
    }

    fn service(
        orders: MockOrderStore,
        receipts: MockReceiptSender,
        notifier: MockNotifier,
    ) -> CheckoutService {
        CheckoutService::new(Arc::new(orders), Arc::new(receipts), Arc::new(notifier))
    }

    #[tokio::test]
    async fn placing_order_clears_cart_and_sends_receipt() -> TestResult {
        let mut orders = MockOrderStore::new();

        orders
            .expect_insert_order()
            .once()
            .withf(|payload| {
                payload.total() == 1000
                    && payload.status() == OrderStatus::Pending
                    && payload.items().len() == 1
                    && payload.items().first().map(|line| line.quantity) == Some(2)
            })
            .returning(|payload| {
                Ok(Order {
                    id: OrderId::new(42),
                    created_at: Timestamp::UNIX_EPOCH,
                    payload: payload.clone(),
                })
            });

        let mut receipts = MockReceiptSender::new();

        receipts
            .expect_send()
            .once()
            .withf(|request| {
                request.order_id == OrderId::new(42)
                    && request.customer_email == "asha@example.com"
                    && request.total == 1000
                    && request.address == "12 Lokmanya Nagar, Parbhani - 431401"
            })
            .returning(|_| {
                Ok(ReceiptDelivery {
                    email_id: Some("em_1".to_string()),
                })
            });

        let notifier = expect_one(NotificationKind::Success, "Order #42 placed successfully");
        let checkout = service(orders, receipts, notifier);
        let mut cart = cart_with_two_roses();

        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_price(), 1000);

        let placed = checkout.place_order(&mut cart, &details()).await?;

        assert_eq!(placed.order.id, OrderId::new(42));
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
        assert!(!checkout.is_submitting());

        let delivery = placed.receipt.settled().await;

        assert_eq!(delivery.and_then(|d| d.email_id).as_deref(), Some("em_1"));

        Ok(())
    }

    #[tokio::test]
    async fn order_store_failure_keeps_cart() {
        let checkout = service(
            failing_orders(),
            unused_receipts(),
            expect_one(
                NotificationKind::Error,
                "Error placing order. Please try again.",
            ),
        );
        let mut cart = cart_with_two_roses();

        let result = checkout.place_order(&mut cart, &details()).await;

        assert!(
            matches!(result, Err(CheckoutError::Persistence(_))),
            "expected Persistence, got {result:?}"
        );
        assert_eq!(cart.total_quantity(), 2);
        assert!(!checkout.is_submitting());
    }

    #[tokio::test]
    async fn unreturned_order_keeps_cart() {
        let mut orders = MockOrderStore::new();

        orders
            .expect_insert_order()
            .once()
            .returning(|_| Err(OrdersError::NotReturned));

        let checkout = service(
            orders,
            unused_receipts(),
            expect_one(
                NotificationKind::Error,
                "Error placing order. Please try again.",
            ),
        );
        let mut cart = cart_with_two_roses();

        let result = checkout.place_order(&mut cart, &details()).await;

        assert!(
            matches!(
                result,
                Err(CheckoutError::Persistence(OrdersError::NotReturned))
            ),
            "expected Persistence(NotReturned), got {result:?}"
        );
        assert_eq!(cart.total_quantity(), 2);
        assert!(!checkout.is_submitting());
    }

    #[tokio::test]
    async fn receipt_failure_still_reports_success() -> TestResult {
        let mut receipts = MockReceiptSender::new();

        receipts
            .expect_send()
            .once()
            .returning(|_| Err(ReceiptError::Provider("quota exceeded".to_string())));

        let checkout = service(
            storing_orders(7),
            receipts,
            expect_one(NotificationKind::Success, "Order #7 placed successfully"),
        );
        let mut cart = cart_with_two_roses();

        let placed = checkout.place_order(&mut cart, &details()).await?;

        assert!(cart.is_empty());
        assert_eq!(placed.receipt.settled().await, None);

        Ok(())
    }

    #[tokio::test]
    async fn invalid_details_never_reach_order_store() {
        let mut orders = MockOrderStore::new();

        orders.expect_insert_order().never();

        let checkout = service(
            orders,
            unused_receipts(),
            expect_one(NotificationKind::Error, "Please fix form errors"),
        );
        let mut cart = cart_with_two_roses();
        let details = CustomerDetails {
            phone: "12345".to_string(),
            ..details()
        };

        let result = checkout.place_order(&mut cart, &details).await;

        let Err(CheckoutError::Invalid(report)) = result else {
            panic!("expected Invalid, got {result:?}");
        };

        assert_eq!(
            report.error_for(Field::Phone).map(|e| e.kind),
            Some(FieldErrorKind::InvalidFormat)
        );
        assert_eq!(cart.total_quantity(), 2);
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let mut orders = MockOrderStore::new();

        orders.expect_insert_order().never();

        let checkout = service(
            orders,
            unused_receipts(),
            expect_one(NotificationKind::Error, "Your cart is empty"),
        );
        let mut cart = CartManager::new(MemoryStore::new());

        let result = checkout.place_order(&mut cart, &details()).await;

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[tokio::test]
    async fn second_submission_is_refused_while_first_runs() {
        let mut orders = MockOrderStore::new();

        orders.expect_insert_order().never();

        let mut notifier = MockNotifier::new();

        notifier.expect_notify().never();

        let checkout = service(orders, unused_receipts(), notifier);
        let mut cart = cart_with_two_roses();

        let guard = checkout.begin_submission();

        assert!(guard.is_ok());
        assert!(checkout.is_submitting());

        let result = checkout.place_order(&mut cart, &details()).await;

        assert!(
            matches!(result, Err(CheckoutError::SubmissionInProgress)),
            "expected SubmissionInProgress, got {result:?}"
        );

        drop(guard);

        assert!(!checkout.is_submitting());
        assert_eq!(cart.total_quantity(), 2);
    }
}
