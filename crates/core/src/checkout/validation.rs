//! Checkout Validation

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::fields::{Field, FieldError, FieldErrorKind};

/// Customer details exactly as entered on the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    /// Customer name
    pub name: String,

    /// Phone number
    pub phone: String,

    /// Email address
    pub email: String,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// Postal code
    pub pincode: String,

    /// Free-form delivery notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl CustomerDetails {
    /// The raw value entered for `field`.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::Pincode => &self.pincode,
        }
    }
}

/// Customer details that passed every field rule, trimmed.
///
/// Only [`validate`] produces one, so holding a `ValidatedCustomer` is proof the order form
/// was acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCustomer {
    name: String,
    phone: String,
    email: String,
    address: String,
    city: String,
    pincode: String,
    notes: Option<String>,
}

impl ValidatedCustomer {
    /// Customer name
    pub fn name(&self) -> &str {
        &self.name
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

    /// Delivery notes, absent when left blank
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Take the owned values apart, in form order followed by the notes.
    pub(crate) fn into_parts(self) -> ([String; 6], Option<String>) {
        (
            [
                self.name,
                self.phone,
                self.email,
                self.address,
                self.city,
                self.pincode,
            ],
            self.notes,
        )
    }
}

/// Every field that failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: SmallVec<[FieldError; 6]>,
}

impl ValidationReport {
    /// Whether every field passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The failure recorded for `field`, if any.
    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.field == field)
    }

    /// Iterate over the failures in form order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }

            Display::fmt(error, f)?;
        }

        Ok(())
    }
}

/// Check a single field the way the form does when the customer leaves it.
///
/// Blank values pass here; whether a blank is acceptable is decided on submission by
/// [`validate`].
pub fn check_field(field: Field, value: &str) -> Option<FieldError> {
    let value = value.trim();

    if value.is_empty() || satisfies_rule(field, value) {
        return None;
    }

    Some(FieldError {
        field,
        kind: field.rule_kind(),
    })
}

/// Validate the whole checkout form.
///
/// # Errors
///
/// Returns a [`ValidationReport`] listing every blank or malformed field.
pub fn validate(details: &CustomerDetails) -> Result<ValidatedCustomer, ValidationReport> {
    let mut report = ValidationReport::default();

    for field in Field::ALL {
        let value = details.value(field);

        if value.trim().is_empty() {
            report.errors.push(FieldError {
                field,
                kind: FieldErrorKind::Required,
            });
        } else if let Some(error) = check_field(field, value) {
            report.errors.push(error);
        }
    }

    if !report.is_valid() {
        return Err(report);
    }

    let notes = details
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|notes| !notes.is_empty())
        .map(str::to_string);

    Ok(ValidatedCustomer {
        name: details.name.trim().to_string(),
        phone: details.phone.trim().to_string(),
        email: details.email.trim().to_string(),
        address: details.address.trim().to_string(),
        city: details.city.trim().to_string(),
        pincode: details.pincode.trim().to_string(),
        notes,
    })
}

fn satisfies_rule(field: Field, value: &str) -> bool {
    match field {
        Field::Name => value.chars().count() >= 3,
        Field::Phone => is_digits(value, 10),
        Field::Email => is_email(value),
        Field::Address => value.chars().count() >= 10,
        Field::City => value.chars().count() >= 2,
        Field::Pincode => is_digits(value, 6),
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// `local@domain.tld`: one `@`, no whitespace, and a dot inside the domain with text on
/// both sides of it.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_details() -> CustomerDetails {
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

    #[test]
    fn phone_needs_ten_digits() {
        let error = check_field(Field::Phone, "12345");

        assert_eq!(error.map(|e| e.kind), Some(FieldErrorKind::InvalidFormat));
        assert_eq!(
            error.map(|e| e.message()),
            Some("Enter valid 10-digit phone")
        );
        assert_eq!(check_field(Field::Phone, "9876543210"), None);
        assert!(check_field(Field::Phone, "98765a3210").is_some());
        assert!(check_field(Field::Phone, "98765432100").is_some());
    }

    #[test]
    fn pincode_needs_six_digits() {
        assert!(check_field(Field::Pincode, "44160").is_some());
        assert_eq!(check_field(Field::Pincode, "441601"), None);
        assert_eq!(check_field(Field::Pincode, " 441601 "), None);
    }

    #[test]
    fn email_needs_dot_in_domain() {
        assert!(check_field(Field::Email, "a@b").is_some());
        assert_eq!(check_field(Field::Email, "a@b.com"), None);

        for bad in ["@b.com", "a@.com", "a@b.", "a@@b.com", "a b@c.com", "ab.com"] {
            assert!(check_field(Field::Email, bad).is_some(), "{bad} should fail");
        }
    }

    #[test]
    fn lengths_count_trimmed_characters() {
        assert_eq!(
            check_field(Field::Name, "  Al  ").map(|e| e.kind),
            Some(FieldErrorKind::TooShort)
        );
        assert_eq!(check_field(Field::Name, "Ali"), None);
        assert_eq!(check_field(Field::City, "Pu"), None);
        assert!(check_field(Field::Address, "Short St").is_some());
        assert_eq!(check_field(Field::Address, "Gandhi Chowk"), None);
    }

    #[test]
    fn blank_fields_pass_on_blur() {
        for field in Field::ALL {
            assert_eq!(check_field(field, "   "), None, "{field} should pass blank");
        }
    }

    #[test]
    fn validate_accepts_good_form() {
        let mut details = valid_details();

        details.name = "  Asha Patil ".to_string();
        details.notes = Some("  ".to_string());

        let customer = match validate(&details) {
            Ok(customer) => customer,
            Err(report) => panic!("expected valid form, got {report}"),
        };

        assert_eq!(customer.name(), "Asha Patil");
        assert_eq!(customer.notes(), None);
    }

    #[test]
    fn validate_reports_required_and_rule_failures() {
        let details = CustomerDetails {
            phone: "12345".to_string(),
            ..valid_details()
        };
        let details = CustomerDetails {
            name: String::new(),
            ..details
        };

        let Err(report) = validate(&details) else {
            panic!("expected validation to fail");
        };

        assert_eq!(report.len(), 2);
        assert_eq!(
            report.error_for(Field::Name).map(FieldError::message),
            Some("Required")
        );
        assert_eq!(
            report.error_for(Field::Phone).map(|e| e.kind),
            Some(FieldErrorKind::InvalidFormat)
        );
        assert!(report.error_for(Field::Email).is_none());
    }

    #[test]
    fn empty_form_requires_everything() {
        let Err(report) = validate(&CustomerDetails::default()) else {
            panic!("expected validation to fail");
        };

        assert_eq!(report.len(), Field::ALL.len());
        assert!(report.iter().all(|e| e.kind == FieldErrorKind::Required));
    }
}
