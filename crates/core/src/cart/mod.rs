//! Cart

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    products::{Product, ProductId},
    storage::KeyValueStore,
};

mod events;
mod line;

pub use events::CartEvent;
pub use line::CartLine;

use events::Listeners;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "floralblossom_cart";

/// Reasons a stored cart is discarded on load.
#[derive(Debug, Error)]
enum MalformedCart {
    #[error("stored cart is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("stored line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),

    #[error("stored cart holds product {0} more than once")]
    DuplicateLine(ProductId),
}

/// The shopping cart for one browsing session.
///
/// Lines keep the order products were first added in. Every effective mutation overwrites
/// the stored copy and is then announced to subscribers. Operations naming a product that
/// is not in the cart do nothing: the storefront may fire the same event twice.
#[derive(Debug)]
pub struct CartManager<S: KeyValueStore> {
    store: S,
    lines: Vec<CartLine>,
    listeners: Listeners,
}

impl<S: KeyValueStore> CartManager<S> {
    /// Create an empty cart over `store` without reading it.
    pub fn new(store: S) -> Self {
        Self {
            store,
            lines: Vec::new(),
            listeners: Listeners::default(),
        }
    }

    /// Create a cart over `store` and restore whatever it holds.
    pub fn open(store: S) -> Self {
        let mut cart = Self::new(store);

        cart.load();

        cart
    }

    /// Register a listener called after every change to the cart.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Restore the cart from storage.
    ///
    /// A missing, unreadable or malformed entry leaves the cart empty.
    pub fn load(&mut self) {
        self.lines = match self.store.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => decode(&raw).unwrap_or_else(|reason| {
                warn!(%reason, "discarding stored cart");

                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(%error, "failed to read stored cart");

                Vec::new()
            }
        };

        debug!(lines = self.lines.len(), "cart loaded");

        self.listeners.emit(&CartEvent::Loaded {
            lines: self.lines.len(),
        });
    }

    /// Add one unit of `product`, returning the line's quantity afterwards.
    ///
    /// A product already in the cart keeps the title, price and image it was first added
    /// with; only its quantity grows.
    pub fn add(&mut self, product: &Product) -> u32 {
        let quantity = if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
            line.quantity
        } else {
            self.lines.push(CartLine::from_product(product));
            1
        };

        debug!(product_id = %product.id, quantity, "added to cart");

        self.persist();
        self.listeners.emit(&CartEvent::Added {
            product_id: product.id,
            quantity,
        });

        quantity
    }

    /// Change a line's quantity by `delta`, removing it when the result is not positive.
    pub fn update_quantity(&mut self, product_id: ProductId, delta: i64) {
        let Some(line) = self.line_mut(product_id) else {
            return;
        };

        let next = i64::from(line.quantity).saturating_add(delta);

        if next <= 0 {
            self.remove(product_id);

            return;
        }

        line.quantity = u32::try_from(next).unwrap_or(u32::MAX);

        let quantity = line.quantity;

        self.persist();
        self.listeners.emit(&CartEvent::QuantityChanged {
            product_id,
            quantity,
        });
    }

    /// Remove the line for `product_id`, if there is one.
    pub fn remove(&mut self, product_id: ProductId) {
        let before = self.lines.len();

        self.lines.retain(|line| line.product_id != product_id);

        if self.lines.len() == before {
            return;
        }

        debug!(%product_id, "removed from cart");

        self.persist();
        self.listeners.emit(&CartEvent::Removed { product_id });
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();

        self.persist();
        self.listeners.emit(&CartEvent::Cleared);
    }

    /// Total number of units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Total price of the cart at the prices captured when each line was added.
    pub fn total_price(&self) -> u64 {
        self.lines
            .iter()
            .fold(0, |total, line| total.saturating_add(line.line_total()))
    }

    /// Snapshot of the lines for inclusion in an order.
    pub fn to_order_items(&self) -> Vec<CartLine> {
        self.lines.clone()
    }

    /// Quantity held for `product_id`, zero when absent.
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map_or(0, |line| line.quantity)
    }

    /// Lines in first-added order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The store the cart persists to.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }

    fn persist(&mut self) {
        let encoded = match serde_json::to_string(&self.lines) {
            Ok(encoded) => encoded,
            Err(error) => {
                warn!(%error, "failed to encode cart");

                return;
            }
        };

        if let Err(error) = self.store.set(CART_STORAGE_KEY, encoded) {
            warn!(%error, "failed to save cart");
        }
    }
}

fn decode(raw: &str) -> Result<Vec<CartLine>, MalformedCart> {
    let lines: Vec<CartLine> = serde_json::from_str(raw)?;
    let mut seen = FxHashSet::default();

    for line in &lines {
        if line.quantity == 0 {
            return Err(MalformedCart::ZeroQuantity(line.product_id));
        }

        if !seen.insert(line.product_id) {
            return Err(MalformedCart::DuplicateLine(line.product_id));
        }
    }

    Ok(lines)
}
