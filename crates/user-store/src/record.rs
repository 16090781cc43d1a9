//! User record model.
//!
//! Records hold typed values in memory; text only appears at the table
//! boundary (see [`crate::table`]).

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, store-assigned record identifier.
///
/// New identifiers are UUID v4 strings, but identifiers read back from an
/// existing table are accepted as any non-empty text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an identifier read from storage or a request path.
    ///
    /// Returns `None` when the identifier is empty once trimmed.
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Age as persisted.
///
/// Rows written by this crate always hold [`StoredAge::Years`]. Older tables
/// may carry text that is not a plain digit string; that text is kept as
/// [`StoredAge::Unparsed`] so rewriting the table does not alter it, and it is
/// skipped by [`crate::summarize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredAge {
    /// A whole number of years.
    Years(u32),
    /// Raw text that is not a non-negative integer.
    Unparsed(String),
}

impl StoredAge {
    /// Interpret persisted age text.
    ///
    /// Only non-empty all-ASCII-digit strings count as numeric; signs,
    /// whitespace and decimals are kept verbatim.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|byte| byte.is_ascii_digit()) {
            if let Ok(years) = raw.parse::<u32>() {
                return Self::Years(years);
            }
        }
        Self::Unparsed(raw.to_owned())
    }

    /// Numeric age, when there is one.
    #[must_use]
    pub const fn years(&self) -> Option<u32> {
        match self {
            Self::Years(years) => Some(*years),
            Self::Unparsed(_) => None,
        }
    }
}

impl fmt::Display for StoredAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Years(years) => write!(f, "{years}"),
            Self::Unparsed(raw) => f.write_str(raw),
        }
    }
}

/// One persisted user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Store-assigned identifier; never reused or changed.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Lowercased email address, unique across the collection.
    pub email: String,
    /// Mobile number as supplied, separators included.
    pub mobile: String,
    /// Age in years.
    pub age: StoredAge,
    /// Postal address.
    pub address: String,
    /// RFC 3339 creation timestamp; written once.
    pub created_at: String,
}

impl UserRecord {
    /// Email normalised for uniqueness comparisons.
    pub(crate) fn email_key(&self) -> String {
        email_key(&self.email)
    }
}

pub(crate) fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Caller-supplied field values for an insert or a partial update.
///
/// Values are raw request text; the store validates and normalises them.
/// For inserts every field is consulted, for updates only the `Some` ones.
///
/// # Examples
/// ```
/// use user_store::UserFields;
///
/// let fields = UserFields::default().with_name("Ann Lee").with_age("40");
/// assert_eq!(fields.name.as_deref(), Some("Ann Lee"));
/// assert!(fields.email.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Mobile number.
    pub mobile: Option<String>,
    /// Age as text.
    pub age: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

impl UserFields {
    /// Set the name.
    #[must_use]
    pub fn with_name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    /// Set the email.
    #[must_use]
    pub fn with_email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    /// Set the mobile number.
    #[must_use]
    pub fn with_mobile(mut self, value: impl Into<String>) -> Self {
        self.mobile = Some(value.into());
        self
    }

    /// Set the age text.
    #[must_use]
    pub fn with_age(mut self, value: impl Into<String>) -> Self {
        self.age = Some(value.into());
        self
    }

    /// Set the address.
    #[must_use]
    pub fn with_address(mut self, value: impl Into<String>) -> Self {
        self.address = Some(value.into());
        self
    }

    /// True when no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.mobile.is_none()
            && self.age.is_none()
            && self.address.is_none()
    }
}
