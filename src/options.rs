use crate::context::RequestContext;
use crate::origin::Origin;
use crate::util::{is_header_value_safe, is_http_token};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Predicate deciding whether a request bypasses CORS handling entirely.
pub type SkipFn = dyn for<'a> Fn(&RequestContext<'a>) -> bool + Send + Sync;

/// Static CORS policy. Consumed once by [`crate::Cors::new`].
///
/// The default value is the zero policy: no origin is allowed and no optional
/// header is emitted.
#[derive(Clone, Default)]
pub struct CorsOptions {
    pub origin: Origin,
    pub methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub exposed_headers: Vec<String>,
    pub credentials: bool,
    /// `None` or zero omits `Access-Control-Max-Age`. Emitted in whole seconds.
    pub max_age: Option<Duration>,
    pub skip: Option<Arc<SkipFn>>,
}

impl CorsOptions {
    pub fn with_skip<F>(mut self, skip: F) -> Self
    where
        F: for<'a> Fn(&RequestContext<'a>) -> bool + Send + Sync + 'static,
    {
        self.skip = Some(Arc::new(skip));
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(method) = self.methods.iter().find(|method| !is_http_token(method)) {
            return Err(ValidationError::InvalidMethod(method.clone()));
        }

        if let Some(name) = self
            .allowed_headers
            .iter()
            .chain(self.exposed_headers.iter())
            .find(|name| !is_http_token(name))
        {
            return Err(ValidationError::InvalidHeaderName(name.clone()));
        }

        if let Origin::List(values) = &self.origin
            && let Some(origin) = values.iter().find(|value| !is_header_value_safe(value))
        {
            return Err(ValidationError::InvalidOrigin(origin.clone()));
        }

        Ok(())
    }
}

impl fmt::Debug for CorsOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorsOptions")
            .field("origin", &self.origin)
            .field("methods", &self.methods)
            .field("allowed_headers", &self.allowed_headers)
            .field("exposed_headers", &self.exposed_headers)
            .field("credentials", &self.credentials)
            .field("max_age", &self.max_age)
            .field("skip", &self.skip.as_ref().map(|_| "<predicate>"))
            .finish()
    }
}

/// Configuration problems detected before any request is served.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("allowed method {0:?} is not a valid HTTP token")]
    InvalidMethod(String),
    #[error("header name {0:?} is not a valid HTTP token")]
    InvalidHeaderName(String),
    #[error("allowed origin {0:?} contains characters that cannot appear in a header value")]
    InvalidOrigin(String),
    #[error("max age must not be negative (got {0} seconds)")]
    NegativeMaxAge(i64),
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
