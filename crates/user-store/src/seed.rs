//! Demonstration rows written when a table is first created.

use crate::error::ValidationError;
use crate::record::{StoredAge, UserFields, UserId, UserRecord};
use crate::validation::validate_new_user;

/// Raw seed values: name, email, mobile, age, address.
const SEED_USERS: [(&str, &str, &str, &str, &str); 5] = [
    (
        "John Doe",
        "john.doe@example.com",
        "+1-555-010-0101",
        "28",
        "123 Main St, New York, NY",
    ),
    (
        "Jane Smith",
        "jane.smith@example.com",
        "+1-555-010-0102",
        "32",
        "456 Oak Ave, Los Angeles, CA",
    ),
    (
        "Robert Johnson",
        "robert.j@example.com",
        "+1-555-010-0103",
        "45",
        "789 Pine Rd, Chicago, IL",
    ),
    (
        "Sarah Williams",
        "sarah.w@example.com",
        "+1-555-010-0104",
        "29",
        "321 Elm St, Houston, TX",
    ),
    (
        "Michael Brown",
        "michael.b@example.com",
        "+1-555-010-0105",
        "38",
        "654 Maple Dr, Phoenix, AZ",
    ),
];

/// Build the seed records, stamped with `created_at`.
///
/// Seeds pass through the same validation as inserts.
pub(crate) fn seed_records(created_at: &str) -> Result<Vec<UserRecord>, ValidationError> {
    SEED_USERS
        .iter()
        .map(|&(name, email, mobile, age, address)| {
            let fields = UserFields::default()
                .with_name(name)
                .with_email(email)
                .with_mobile(mobile)
                .with_age(age)
                .with_address(address);
            let valid = validate_new_user(&fields)?;
            Ok(UserRecord {
                id: UserId::generate(),
                name: valid.name,
                email: valid.email,
                mobile: valid.mobile,
                age: StoredAge::Years(valid.age),
                address: valid.address,
                created_at: created_at.to_owned(),
            })
        })
        .collect()
}
