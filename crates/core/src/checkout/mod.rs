//! Checkout
//!
//! Customer field rules for the checkout form. Validation is pure: it never touches the
//! cart or the network, and a form that fails it never reaches order submission.

mod fields;
mod validation;

pub use fields::{Field, FieldError, FieldErrorKind};
pub use validation::{
    CustomerDetails, ValidatedCustomer, ValidationReport, check_field, validate,
};
