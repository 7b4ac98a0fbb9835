//! Cart Events

use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::products::ProductId;

/// A change to the cart, delivered to subscribers after it has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// The cart was restored from storage with this many lines.
    Loaded {
        /// Number of restored lines
        lines: usize,
    },

    /// A product was added; `quantity` is the line's quantity afterwards.
    Added {
        /// Product added
        product_id: ProductId,

        /// Resulting quantity
        quantity: u32,
    },

    /// A line's quantity changed without the line being removed.
    QuantityChanged {
        /// Product changed
        product_id: ProductId,

        /// Resulting quantity
        quantity: u32,
    },

    /// A line was removed.
    Removed {
        /// Product removed
        product_id: ProductId,
    },

    /// Every line was removed.
    Cleared,
}

type Listener = Box<dyn FnMut(&CartEvent) + Send>;

/// Registered cart subscribers.
#[derive(Default)]
pub(crate) struct Listeners(Vec<Listener>);

impl Listeners {
    pub(crate) fn push(&mut self, listener: Listener) {
        self.0.push(listener);
    }

    pub(crate) fn emit(&mut self, event: &CartEvent) {
        for listener in &mut self.0 {
            listener(event);
        }
    }
}

impl Debug for Listeners {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Listeners")
            .field("count", &self.0.len())
            .finish()
    }
}
