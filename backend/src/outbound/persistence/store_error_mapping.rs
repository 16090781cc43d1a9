//! Mapping from user store failures to HTTP-safe domain errors.

use serde_json::json;
use tracing::error;
use user_store::StoreError;

use crate::domain::Error;

pub(super) fn map_store_error(err: StoreError) -> Error {
    match &err {
        StoreError::Validation(validation) => Error::invalid_request(validation.to_string())
            .with_details(json!({
                "field": validation.field().as_str(),
                "code": validation.code(),
            })),
        StoreError::Conflict { .. } => {
            Error::conflict(err.to_string()).with_details(json!({ "field": "email" }))
        }
        StoreError::NotFound { .. } => Error::not_found(err.to_string()),
        StoreError::Storage { .. }
        | StoreError::MalformedTable { .. }
        | StoreError::InvalidConfig { .. } => {
            error!(error = %err, "user store failure");
            Error::internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rstest::rstest;
    use serde_json::Value;
    use user_store::ValidationError;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(ValidationError::InvalidEmail, "email", "invalid_email")]
    #[case(ValidationError::AgeOutOfRange { min: 1, max: 150 }, "age", "age_out_of_range")]
    #[case(ValidationError::NameTooShort { min: 2 }, "name", "name_too_short")]
    fn validation_failures_carry_field_details(
        #[case] validation: ValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let message = validation.to_string();

        let error = map_store_error(StoreError::Validation(validation));

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), message);
        let details = error.details().expect("details present");
        assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
        assert_eq!(details.get("code").and_then(Value::as_str), Some(code));
    }

    #[test]
    fn conflict_keeps_the_registered_message() {
        let error = map_store_error(StoreError::Conflict {
            email: "ann@x.com".to_owned(),
        });
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), "Email already registered");
    }

    #[test]
    fn not_found_uses_the_user_message() {
        let error = map_store_error(StoreError::NotFound {
            id: "missing".to_owned(),
        });
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "User not found");
    }

    #[rstest]
    #[case(StoreError::Storage { path: PathBuf::from("/srv/users.csv"), message: "denied".to_owned() })]
    #[case(StoreError::MalformedTable { row: 3, message: "row has no id".to_owned() })]
    #[case(StoreError::InvalidConfig { message: "bad name".to_owned() })]
    fn infrastructure_failures_are_internal(#[case] err: StoreError) {
        assert_eq!(map_store_error(err).code(), ErrorCode::InternalError);
    }
}
