use crate::api::{ApiError, GENERIC_FAILURE};
use crate::storage::StorageError;
use resource_store::{OperationFailure, StoreError};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Error returned by every resource client operation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// The round trip failed; see [`ApiError::user_message`].
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Client-side checks rejected the input. Nothing was sent and no store
    /// changed state.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ClientError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    /// True when the server had nothing for the request.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api(e) if e.is_not_found())
    }
}

impl OperationFailure for ClientError {
    fn user_message(&self) -> String {
        match self {
            ClientError::Api(e) => e.user_message(),
            ClientError::Validation(message) => message.clone(),
            ClientError::Store(_) | ClientError::Storage(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_messages(&errors, &mut messages);
        ClientError::Validation(messages.join("; "))
    }
}

fn collect_messages(errors: &ValidationErrors, out: &mut Vec<String>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(failures) => {
                for failure in failures {
                    let message = failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    out.push(message);
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, out),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BrandCreate, ImageUpload};
    use validator::Validate;

    #[test]
    fn test_validation_messages_are_joined() {
        let create = BrandCreate {
            brand_name: String::new(),
            image: ImageUpload::new("", "image/png", vec![1]),
        };
        let error = ClientError::from(create.validate().unwrap_err());
        assert_eq!(
            error,
            ClientError::Validation("Brand name is required; Image file name is required".into())
        );
        assert_eq!(
            error.user_message(),
            "Brand name is required; Image file name is required"
        );
    }

    #[test]
    fn test_internal_failures_use_generic_message() {
        assert_eq!(ClientError::Store(StoreError::Closed).user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_not_found_covers_http_404() {
        let missing = ApiError::Remote {
            status: 404,
            message: None,
        };
        assert!(ClientError::Api(missing).is_not_found());
        assert!(ClientError::Api(ApiError::NotFound("gone".into())).is_not_found());
        assert!(!ClientError::Validation("bad".into()).is_not_found());
    }
}
