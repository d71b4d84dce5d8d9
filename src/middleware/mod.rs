//! Request/response middleware: error translation, validation, rate limiting,
//! security headers, access logging

pub mod error_translator;
pub mod rate_limit;
pub mod request_logger;
pub mod security_headers;
pub mod validation;

pub use error_translator::translate_errors;
pub use rate_limit::{rate_limit, RateDecision, RateLimiter};
pub use request_logger::request_logger;
pub use security_headers::add_security_headers;
pub use validation::{field_errors, ValidatedJson};
