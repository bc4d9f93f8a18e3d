//! Shipping form and its field rules.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

// US ZIP or ZIP+4.
static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("Invalid regex"));

/// A field of the shipping form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingField {
    FirstName,
    LastName,
    Email,
    Address,
    City,
    State,
    ZipCode,
}

impl ShippingField {
    /// Returns the field name as used in JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingField::FirstName => "first_name",
            ShippingField::LastName => "last_name",
            ShippingField::Email => "email",
            ShippingField::Address => "address",
            ShippingField::City => "city",
            ShippingField::State => "state",
            ShippingField::ZipCode => "zip_code",
        }
    }
}

impl std::fmt::Display for ShippingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: ShippingField,
    pub message: String,
}

/// Every field-level error found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Returns all errors in form order.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns the error for a specific field.
    pub fn for_field(&self, field: ShippingField) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, field: ShippingField, message: &str) {
        self.0.push(FieldError {
            field,
            message: message.to_string(),
        });
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

/// Shipping address collected in the first checkout stage.
///
/// Missing JSON fields deserialize as empty strings so that they surface as
/// field errors instead of a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl ShippingInfo {
    /// Returns a copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            zip_code: self.zip_code.trim().to_string(),
        }
    }

    /// Checks every field and reports all failures at once.
    ///
    /// Whitespace-only values count as empty.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let required = [
            (ShippingField::FirstName, &self.first_name, "First name is required"),
            (ShippingField::LastName, &self.last_name, "Last name is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.push(field, message);
            }
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(ShippingField::Email, "Email is required");
        } else if !EMAIL_RE.is_match(email) {
            errors.push(ShippingField::Email, "Invalid email address");
        }

        let required = [
            (ShippingField::Address, &self.address, "Address is required"),
            (ShippingField::City, &self.city, "City is required"),
            (ShippingField::State, &self.state, "State is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.push(field, message);
            }
        }

        let zip = self.zip_code.trim();
        if zip.is_empty() {
            errors.push(ShippingField::ZipCode, "ZIP code is required");
        } else if !ZIP_RE.is_match(zip) {
            errors.push(ShippingField::ZipCode, "Invalid ZIP code");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ShippingInfo {
        ShippingInfo {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            address: "12 St James's Square".to_string(),
            city: "London".to_string(),
            state: "NY".to_string(),
            zip_code: "10001".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_zip_plus_four_passes() {
        let info = ShippingInfo {
            zip_code: "10001-1234".to_string(),
            ..valid()
        };
        assert!(info.validate().is_ok());
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = ShippingInfo::default().validate().unwrap_err();
        assert_eq!(errors.len(), 7);
        assert_eq!(
            errors.for_field(ShippingField::Email).unwrap().message,
            "Email is required"
        );
        assert_eq!(
            errors.for_field(ShippingField::ZipCode).unwrap().message,
            "ZIP code is required"
        );
    }

    #[test]
    fn test_bad_email_and_zip() {
        let info = ShippingInfo {
            email: "ada@example".to_string(),
            zip_code: "1000".to_string(),
            ..valid()
        };
        let errors = info.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.for_field(ShippingField::Email).unwrap().message,
            "Invalid email address"
        );
        assert_eq!(
            errors.for_field(ShippingField::ZipCode).unwrap().message,
            "Invalid ZIP code"
        );
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let info = ShippingInfo {
            city: "   ".to_string(),
            ..valid()
        };
        let errors = info.validate().unwrap_err();
        assert_eq!(errors.errors()[0].field, ShippingField::City);
    }

    #[test]
    fn test_trimmed_strips_every_field() {
        let padded = ShippingInfo {
            first_name: " Ada ".to_string(),
            email: "  ada@example.com\t".to_string(),
            zip_code: " 10001 ".to_string(),
            ..valid()
        };
        assert!(padded.validate().is_ok());
        assert_eq!(padded.trimmed(), valid());
    }

    #[test]
    fn test_display_joins_messages() {
        let info = ShippingInfo {
            first_name: String::new(),
            last_name: String::new(),
            ..valid()
        };
        let errors = info.validate().unwrap_err();
        assert_eq!(
            errors.to_string(),
            "first_name: First name is required; last_name: Last name is required"
        );
    }

    #[test]
    fn test_missing_json_fields_become_empty() {
        let info: ShippingInfo = serde_json::from_str(r#"{"first_name": "Ada"}"#).unwrap();
        assert_eq!(info.first_name, "Ada");
        assert!(info.email.is_empty());
    }
}
