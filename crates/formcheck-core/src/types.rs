//! Shared types for the form submission check.
//!
//! The check submits one [`ExpectedRecord`] and expects every one of its
//! [`FormField`]s to be echoed back by the page.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four text inputs on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    /// Full name
    Name,
    /// Email address
    Email,
    /// Current postal address
    CurrentAddress,
    /// Permanent postal address
    PermanentAddress,
}

impl FormField {
    /// All fields, in the order the form lays them out.
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::CurrentAddress,
        FormField::PermanentAddress,
    ];

    /// Stable snake_case key, matching the serde representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::CurrentAddress => "current_address",
            Self::PermanentAddress => "permanent_address",
        }
    }

    /// Label the page renders in front of the echoed value.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::CurrentAddress => "Current Address",
            Self::PermanentAddress => "Permanent Address",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The values typed into the form, which are also the values expected back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedRecord {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Current postal address
    pub current_address: String,
    /// Permanent postal address
    pub permanent_address: String,
}

impl Default for ExpectedRecord {
    fn default() -> Self {
        Self {
            name: "Michael Davis".to_string(),
            email: "michael.davis@gmail.com".to_string(),
            current_address: "456 Elm Avenue, Los Angeles, USA".to_string(),
            permanent_address: "987 Pine Road, Chicago, USA".to_string(),
        }
    }
}

impl ExpectedRecord {
    /// Value for a single field.
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::CurrentAddress => &self.current_address,
            FormField::PermanentAddress => &self.permanent_address,
        }
    }

    /// Iterate `(field, value)` pairs in form order.
    pub fn fields(&self) -> impl Iterator<Item = (FormField, &str)> + '_ {
        FormField::ALL.into_iter().map(|f| (f, self.value(f)))
    }

    /// Check that every value can be submitted meaningfully.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in self.fields() {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(
                    format!("record.{field}"),
                    "must not be empty",
                ));
            }
        }

        if !self.email.contains('@') {
            return Err(ConfigError::invalid(
                "record.email",
                format!("'{}' is not an email address", self.email),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record() {
        let record = ExpectedRecord::default();
        assert_eq!(record.value(FormField::Name), "Michael Davis");
        assert_eq!(record.value(FormField::Email), "michael.davis@gmail.com");
        assert_eq!(
            record.value(FormField::CurrentAddress),
            "456 Elm Avenue, Los Angeles, USA"
        );
        assert_eq!(
            record.value(FormField::PermanentAddress),
            "987 Pine Road, Chicago, USA"
        );
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_fields_in_form_order() {
        let record = ExpectedRecord::default();
        let keys: Vec<_> = record.fields().map(|(f, _)| f.as_str()).collect();
        assert_eq!(
            keys,
            ["name", "email", "current_address", "permanent_address"]
        );
    }

    #[test]
    fn test_validate_rejects_blank_value() {
        let record = ExpectedRecord {
            current_address: "   ".to_string(),
            ..ExpectedRecord::default()
        };
        let err = record.validate().unwrap_err();
        assert!(err.to_string().contains("record.current_address"));
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let record = ExpectedRecord {
            email: "michael.davis".to_string(),
            ..ExpectedRecord::default()
        };
        let err = record.validate().unwrap_err();
        assert!(err.to_string().contains("record.email"));
    }

    #[test]
    fn test_field_serialization() {
        let json = serde_json::to_string(&FormField::CurrentAddress).unwrap();
        assert_eq!(json, "\"current_address\"");
        assert_eq!(FormField::PermanentAddress.label(), "Permanent Address");
    }
}
