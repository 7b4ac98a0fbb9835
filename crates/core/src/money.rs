//! Money
//!
//! Catalog prices and order totals are whole rupees. They stay plain integers everywhere
//! in the domain and only become [`Money`] when they are shown to a person.

use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// The currency every price in the store is denominated in.
pub const STORE_CURRENCY: &Currency = iso::INR;

/// Convert a whole-rupee amount into a [`Money`] value.
///
/// Amounts beyond `i64::MAX` saturate.
pub fn rupees(amount: u64) -> Money<'static, Currency> {
    Money::from_major(i64::try_from(amount).unwrap_or(i64::MAX), STORE_CURRENCY)
}

/// Format a whole-rupee amount for display.
pub fn format_rupees(amount: u64) -> String {
    rupees(amount).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_representable() {
        assert!(rupees(0).is_zero());
    }

    #[test]
    fn formatted_amount_mentions_the_value() {
        let formatted = format_rupees(500);

        assert!(formatted.contains("500"), "got {formatted}");
    }
}
