use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::config::Environment;
use crate::error::{error_trace, translate, AppError, RaisedError};

/// Terminal error layer
///
/// Any response carrying a [`RaisedError`] is re-rendered for the configured
/// environment. Every other response passes through untouched.
pub async fn translate_errors(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let mut response = next.run(request).await;
    let Some(RaisedError(err)) = response.extensions_mut().remove::<RaisedError>() else {
        return response;
    };

    if let AppError::Unexpected(inner) = err.as_ref() {
        error!(
            method = %method,
            uri = %uri,
            error = %inner,
            trace = %error_trace(inner.as_ref()),
            "Unhandled error"
        );
    }

    let (status, envelope) = translate(&err, environment);
    (status, Json(envelope)).into_response()
}
