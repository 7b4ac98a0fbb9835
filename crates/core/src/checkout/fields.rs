//! Checkout Fields

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A customer field on the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Customer name
    Name,

    /// Ten-digit phone number
    Phone,

    /// Email address for the receipt
    Email,

    /// Street address
    Address,

    /// City
    City,

    /// Six-digit postal code
    Pincode,
}

impl Field {
    /// Every validated field, in form order.
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Phone,
        Self::Email,
        Self::Address,
        Self::City,
        Self::Pincode,
    ];

    /// Form field name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Address => "address",
            Self::City => "city",
            Self::Pincode => "pincode",
        }
    }

    /// The way this field fails when its rule is broken.
    pub const fn rule_kind(self) -> FieldErrorKind {
        match self {
            Self::Name | Self::Address | Self::City => FieldErrorKind::TooShort,
            Self::Phone | Self::Email | Self::Pincode => FieldErrorKind::InvalidFormat,
        }
    }

    /// Message shown when the rule is broken.
    pub const fn rule_message(self) -> &'static str {
        match self {
            Self::Name => "Name must be at least 3 characters",
            Self::Phone => "Enter valid 10-digit phone",
            Self::Email => "Enter valid email",
            Self::Address => "Address too short",
            Self::City => "Enter valid city",
            Self::Pincode => "Enter valid 6-digit pincode",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldErrorKind {
    /// Nothing was entered in a required field.
    Required,

    /// Fewer characters than the field's minimum.
    TooShort,

    /// The value does not have the expected shape.
    InvalidFormat,
}

/// A rejected field together with the message to show beside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// The rejected field
    pub field: Field,

    /// Why it was rejected
    pub kind: FieldErrorKind,
}

impl FieldError {
    /// Message to show beside the field.
    pub const fn message(&self) -> &'static str {
        match self.kind {
            FieldErrorKind::Required => "Required",
            FieldErrorKind::TooShort | FieldErrorKind::InvalidFormat => self.field.rule_message(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {}", self.field, self.message())
    }
}
