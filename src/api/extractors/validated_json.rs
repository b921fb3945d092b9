//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::errors::AppError;

/// JSON body that has passed `validator` checks.
///
/// Malformed JSON and failed validation both become `AppError::Validation`
/// (400). Nested structs and lists are walked, so a bad question inside a
/// quiz reports as `questions[1].correct_answer: ...`.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flatten validation errors into one message, sorted by field path.
fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, "", &mut messages);
    messages.sort();
    messages.join(", ")
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                for e in errs {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "is invalid".to_string());
                    out.push(format!("{}: {}", path, message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Item {
        #[validate(length(min = 1, message = "Label is required"))]
        label: String,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "Title is required"))]
        title: String,
        #[validate(nested)]
        items: Vec<Item>,
    }

    fn json_request(body: &str) -> Request {
        axum::http::Request::builder()
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_payload_passes() {
        let req = json_request(r#"{"title":"Quiz","items":[{"label":"a"}]}"#);
        let ValidatedJson(payload) = ValidatedJson::<Payload>::from_request(req, &())
            .await
            .unwrap();

        assert_eq!(payload.title, "Quiz");
        assert_eq!(payload.items[0].label, "a");
    }

    #[tokio::test]
    async fn test_nested_error_reports_path() {
        let req = json_request(r#"{"title":"","items":[{"label":"a"},{"label":""}]}"#);
        let result = ValidatedJson::<Payload>::from_request(req, &()).await;

        match result {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "items[1].label: Label is required, title: Title is required");
            }
            _ => panic!("expected validation error"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let req = json_request(r#"{"title":"#);
        let result = ValidatedJson::<Payload>::from_request(req, &()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
