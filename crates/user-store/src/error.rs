//! Error types for the user store.
//!
//! Field-level failures are reported through [`ValidationError`]; everything
//! the store itself can refuse or fail at is a [`StoreError`]. Both follow the
//! project's `thiserror` conventions and carry enough context for adapters to
//! pick a status code without string matching.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A user field subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Display name.
    Name,
    /// Contact email address; unique across the collection.
    Email,
    /// Mobile phone number.
    Mobile,
    /// Age in whole years.
    Age,
    /// Postal address.
    Address,
}

impl Field {
    /// Column and payload key for the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Mobile => "mobile",
            Self::Age => "age",
            Self::Address => "address",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation failures.
///
/// The display strings are surfaced verbatim to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is shorter than the minimum once trimmed.
    #[error("Name must be at least {min} characters")]
    NameTooShort {
        /// Minimum number of visible characters.
        min: usize,
    },
    /// Email does not look like `local@domain.tld`.
    #[error("Invalid email address")]
    InvalidEmail,
    /// Mobile number carries too few digits.
    #[error("Invalid mobile number (minimum {min_digits} digits)")]
    MobileTooShort {
        /// Minimum number of digits once separators are discarded.
        min_digits: usize,
    },
    /// Age was not supplied on insert.
    #[error("Age is required")]
    AgeMissing,
    /// Age is not an integer.
    #[error("Invalid age format")]
    AgeNotInteger,
    /// Age is an integer outside the accepted range.
    #[error("Age must be between {min} and {max}")]
    AgeOutOfRange {
        /// Smallest accepted age.
        min: u32,
        /// Largest accepted age.
        max: u32,
    },
    /// Address is shorter than the minimum once trimmed.
    #[error("Address must be at least {min} characters")]
    AddressTooShort {
        /// Minimum number of visible characters.
        min: usize,
    },
}

impl ValidationError {
    /// The field that failed validation.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::NameTooShort { .. } => Field::Name,
            Self::InvalidEmail => Field::Email,
            Self::MobileTooShort { .. } => Field::Mobile,
            Self::AgeMissing | Self::AgeNotInteger | Self::AgeOutOfRange { .. } => Field::Age,
            Self::AddressTooShort { .. } => Field::Address,
        }
    }

    /// Stable machine-readable reason code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NameTooShort { .. } => "name_too_short",
            Self::InvalidEmail => "invalid_email",
            Self::MobileTooShort { .. } => "mobile_too_short",
            Self::AgeMissing => "age_missing",
            Self::AgeNotInteger => "age_not_integer",
            Self::AgeOutOfRange { .. } => "age_out_of_range",
            Self::AddressTooShort { .. } => "address_too_short",
        }
    }
}

/// Errors raised by [`crate::UserStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A supplied field failed validation; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another record already uses the email address.
    #[error("Email already registered")]
    Conflict {
        /// The normalised email that collided.
        email: String,
    },

    /// No record carries the identifier.
    #[error("User not found")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// Reading or writing the backing table failed.
    #[error("storage failure at '{path}': {message}")]
    Storage {
        /// File or directory involved in the failure.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The backing table could not be decoded.
    #[error("malformed user table at row {row}: {message}")]
    MalformedTable {
        /// One-based data row (the header is row 0).
        row: usize,
        /// Description of the decoding failure.
        message: String,
    },

    /// The store configuration cannot be used.
    #[error("invalid store configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },
}

impl StoreError {
    pub(crate) fn storage(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ValidationError::NameTooShort { min: 2 }, Field::Name, "Name must be at least 2 characters")]
    #[case(ValidationError::InvalidEmail, Field::Email, "Invalid email address")]
    #[case(
        ValidationError::MobileTooShort { min_digits: 10 },
        Field::Mobile,
        "Invalid mobile number (minimum 10 digits)"
    )]
    #[case(ValidationError::AgeMissing, Field::Age, "Age is required")]
    #[case(ValidationError::AgeNotInteger, Field::Age, "Invalid age format")]
    #[case(
        ValidationError::AgeOutOfRange { min: 1, max: 150 },
        Field::Age,
        "Age must be between 1 and 150"
    )]
    #[case(
        ValidationError::AddressTooShort { min: 5 },
        Field::Address,
        "Address must be at least 5 characters"
    )]
    fn validation_errors_name_their_field(
        #[case] error: ValidationError,
        #[case] field: Field,
        #[case] message: &str,
    ) {
        assert_eq!(error.field(), field);
        assert_eq!(error.to_string(), message);
    }

    #[test]
    fn validation_error_is_transparent_inside_store_error() {
        let err = StoreError::from(ValidationError::InvalidEmail);
        assert_eq!(err.to_string(), "Invalid email address");
    }

    #[test]
    fn storage_error_formats_path_and_message() {
        let err = StoreError::Storage {
            path: PathBuf::from("/tmp/users.csv"),
            message: "permission denied".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "storage failure at '/tmp/users.csv': permission denied"
        );
    }

    #[test]
    fn conflict_and_not_found_use_caller_facing_messages() {
        let conflict = StoreError::Conflict {
            email: "ann@x.com".to_owned(),
        };
        let missing = StoreError::NotFound {
            id: "nope".to_owned(),
        };
        assert_eq!(conflict.to_string(), "Email already registered");
        assert_eq!(missing.to_string(), "User not found");
    }
}
