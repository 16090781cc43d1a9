//! Field validation rules.
//!
//! Each function checks one field and returns its normalised value, so the
//! store never has to re-derive what was accepted.
//!
//! # Validation Rules
//!
//! - Name: at least 2 characters once trimmed
//! - Email: `local@domain.tld` shape; stored trimmed and lowercased
//! - Mobile: at least 10 digits once separators are discarded
//! - Age: an integer between 1 and 150 inclusive
//! - Address: at least 5 characters once trimmed

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::record::UserFields;

/// Minimum visible characters in a name.
pub const NAME_MIN: usize = 2;
/// Minimum digits in a mobile number.
pub const MOBILE_MIN_DIGITS: usize = 10;
/// Smallest accepted age.
pub const AGE_MIN: u32 = 1;
/// Largest accepted age.
pub const AGE_MAX: u32 = 150;
/// Minimum visible characters in an address.
pub const ADDRESS_MIN: usize = 5;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Validate a name, returning it trimmed.
///
/// # Errors
///
/// Returns [`ValidationError::NameTooShort`] below [`NAME_MIN`] characters.
///
/// # Examples
/// ```
/// use user_store::validation::validate_name;
///
/// assert_eq!(validate_name("  Ann Lee ").as_deref(), Ok("Ann Lee"));
/// assert!(validate_name(" A ").is_err());
/// ```
pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < NAME_MIN {
        return Err(ValidationError::NameTooShort { min: NAME_MIN });
    }
    Ok(trimmed.to_owned())
}

/// Validate an email, returning it trimmed and lowercased.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`] when the address lacks an `@`,
/// a dotted domain, or contains characters outside the accepted set.
///
/// # Examples
/// ```
/// use user_store::validation::validate_email;
///
/// assert_eq!(validate_email(" Ann@X.com ").as_deref(), Ok("ann@x.com"));
/// assert!(validate_email("ann.x.com").is_err());
/// assert!(validate_email("ann@localhost").is_err());
/// ```
pub fn validate_email(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if !email_regex().is_match(trimmed) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(trimmed.to_lowercase())
}

/// Validate a mobile number, returning it trimmed with separators intact.
///
/// # Errors
///
/// Returns [`ValidationError::MobileTooShort`] when fewer than
/// [`MOBILE_MIN_DIGITS`] digits remain after discarding everything else.
pub fn validate_mobile(raw: &str) -> Result<String, ValidationError> {
    let digits = raw.chars().filter(char::is_ascii_digit).count();
    if digits < MOBILE_MIN_DIGITS {
        return Err(ValidationError::MobileTooShort {
            min_digits: MOBILE_MIN_DIGITS,
        });
    }
    Ok(raw.trim().to_owned())
}

/// Validate an age, returning it as an integer.
///
/// # Errors
///
/// Returns [`ValidationError::AgeNotInteger`] for non-integer text and
/// [`ValidationError::AgeOutOfRange`] outside [`AGE_MIN`]..=[`AGE_MAX`].
///
/// # Examples
/// ```
/// use user_store::validation::validate_age;
///
/// assert_eq!(validate_age(" 40 "), Ok(40));
/// assert!(validate_age("0").is_err());
/// assert!(validate_age("forty").is_err());
/// ```
pub fn validate_age(raw: &str) -> Result<u32, ValidationError> {
    let parsed = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::AgeNotInteger)?;
    u32::try_from(parsed)
        .ok()
        .filter(|age| (AGE_MIN..=AGE_MAX).contains(age))
        .ok_or(ValidationError::AgeOutOfRange {
            min: AGE_MIN,
            max: AGE_MAX,
        })
}

/// Validate an address, returning it trimmed.
///
/// # Errors
///
/// Returns [`ValidationError::AddressTooShort`] below [`ADDRESS_MIN`]
/// characters.
pub fn validate_address(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < ADDRESS_MIN {
        return Err(ValidationError::AddressTooShort { min: ADDRESS_MIN });
    }
    Ok(trimmed.to_owned())
}

/// Field values that passed every check for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUser {
    /// Trimmed name.
    pub name: String,
    /// Trimmed, lowercased email.
    pub email: String,
    /// Trimmed mobile number.
    pub mobile: String,
    /// Age in years.
    pub age: u32,
    /// Trimmed address.
    pub address: String,
}

/// Validate all fields of an insert request in order, stopping at the first
/// failure.
///
/// Missing text fields are checked as empty strings; a missing age is
/// reported as [`ValidationError::AgeMissing`].
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate_new_user(fields: &UserFields) -> Result<ValidUser, ValidationError> {
    let name = validate_name(fields.name.as_deref().unwrap_or_default())?;
    let email = validate_email(fields.email.as_deref().unwrap_or_default())?;
    let mobile = validate_mobile(fields.mobile.as_deref().unwrap_or_default())?;
    let age = match fields.age.as_deref() {
        Some(raw) if !raw.trim().is_empty() => validate_age(raw)?,
        _ => return Err(ValidationError::AgeMissing),
    };
    let address = validate_address(fields.address.as_deref().unwrap_or_default())?;
    Ok(ValidUser {
        name,
        email,
        mobile,
        age,
        address,
    })
}
