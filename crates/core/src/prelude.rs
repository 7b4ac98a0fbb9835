//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CART_STORAGE_KEY, CartEvent, CartLine, CartManager},
    checkout::{
        CustomerDetails, Field, FieldError, FieldErrorKind, ValidatedCustomer, ValidationReport,
        check_field, validate,
    },
    ids::TypedId,
    money::{format_rupees, rupees},
    orders::{Order, OrderId, OrderPayload, OrderStatus, revenue},
    products::{ImageUpload, Product, ProductDraft, ProductDraftError, ProductId, search},
    receipts::{MissingFields, ReceiptItem, ReceiptRequest},
    storage::{FileStore, KeyValueStore, MemoryStore, StorageError},
};
