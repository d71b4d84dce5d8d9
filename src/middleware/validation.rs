//! Schema-checked JSON bodies
//!
//! [`ValidatedJson`] parses the body into `T` and runs its `validator`
//! rules. Either the whole value reaches the handler or the request fails
//! with a 400 listing every violated constraint.
//!
//! Request types declare required fields as `Option<T>` with
//! `#[validate(required)]` so a missing field is reported next to every
//! other violation. Decoding itself only fails on malformed values.

use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::{ApiError, AppError, FieldError};

pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request data";

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<Value>::from_request(req, state)
            .await
            .map_err(rejection_error)?;

        let value: T = serde_json::from_value(raw).map_err(|err| {
            ApiError::validation(INVALID_REQUEST_MESSAGE, vec![decode_error(&err)])
        })?;

        value.validate().map_err(|errors| {
            ApiError::validation(INVALID_REQUEST_MESSAGE, field_errors(&errors))
        })?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_error(rejection: JsonRejection) -> ApiError {
    ApiError::validation(
        INVALID_REQUEST_MESSAGE,
        vec![FieldError::new("", rejection.body_text())],
    )
}

/// Name the offending field when serde reports one
fn decode_error(err: &serde_json::Error) -> FieldError {
    let text = err.to_string();
    if let Some(field) = quoted_after(&text, "missing field ") {
        return FieldError::new(field, "Required");
    }
    if let Some(field) = quoted_after(&text, "unknown field ") {
        return FieldError::new(field, "Unrecognized key");
    }
    FieldError::new("", text)
}

fn quoted_after<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(prefix)?.strip_prefix('`')?;
    rest.split_once('`').map(|(field, _)| field)
}

/// Flatten nested validation errors into dot-joined wire paths
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = join(prefix, &camel_case(field));
        match kind {
            ValidationErrorsKind::Field(violations) => {
                out.extend(
                    violations
                        .iter()
                        .map(|violation| FieldError::new(path.clone(), message_for(violation))),
                );
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &join(&path, &index.to_string()), out);
                }
            }
        }
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

/// Request bodies are camelCase on the wire
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn message_for(violation: &ValidationError) -> String {
    if let Some(message) = &violation.message {
        return message.to_string();
    }
    match violation.code.as_ref() {
        "required" => "Required".to_string(),
        "email" => "Invalid email".to_string(),
        "url" => "Invalid url".to_string(),
        "length" => "Invalid length".to_string(),
        "range" => "Value out of range".to_string(),
        code => format!("Invalid value ({})", code),
    }
}
