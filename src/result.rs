use crate::constants::{header, status};
use crate::headers::Headers;

/// CORS headers for a single accepted request.
///
/// Borrows the bundle precomputed by [`crate::Cors`]; the only per-request
/// piece is the echoed origin in allow-list mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorsHeaders<'a> {
    allow_origin: Option<&'a str>,
    bundle: &'a Headers,
}

impl<'a> CorsHeaders<'a> {
    pub(crate) fn new(allow_origin: Option<&'a str>, bundle: &'a Headers) -> Self {
        Self {
            allow_origin,
            bundle,
        }
    }

    /// Echoed request origin. `None` when the bundle already carries `*`.
    pub fn echoed_origin(&self) -> Option<&'a str> {
        self.allow_origin
    }

    pub fn bundle(&self) -> &'a Headers {
        self.bundle
    }

    pub fn get(&self, name: &str) -> Option<&'a str> {
        match self.allow_origin {
            Some(origin) if name.eq_ignore_ascii_case(header::ACCESS_CONTROL_ALLOW_ORIGIN) => {
                Some(origin)
            }
            _ => self.bundle.get(name),
        }
    }

    pub fn get_all(&self, name: &str) -> Vec<&'a str> {
        self.iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
            .collect()
    }

    /// `(name, value)` pairs to write, one per value.
    pub fn iter(self) -> impl Iterator<Item = (&'static str, &'a str)> + 'a {
        self.allow_origin
            .map(|origin| (header::ACCESS_CONTROL_ALLOW_ORIGIN, origin))
            .into_iter()
            .chain(self.bundle.iter())
    }
}

/// Outcome of evaluating one request against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorsDecision<'a> {
    /// The skip predicate matched. Forward untouched.
    Skipped,
    /// No `Origin` header. Forward untouched.
    NotApplicable,
    /// Origin not allowed. Answer 403 with an empty body and no CORS headers.
    Forbidden,
    /// Allowed preflight. Answer 200 with these headers and an empty body.
    Preflight(CorsHeaders<'a>),
    /// Allowed actual request. Merge these headers and forward.
    Simple(CorsHeaders<'a>),
}

impl<'a> CorsDecision<'a> {
    /// Status to answer with when the middleware ends the exchange itself.
    pub fn short_circuit_status(&self) -> Option<u16> {
        match self {
            CorsDecision::Forbidden => Some(status::FORBIDDEN),
            CorsDecision::Preflight(_) => Some(status::PREFLIGHT_OK),
            _ => None,
        }
    }

    pub fn headers(&self) -> Option<CorsHeaders<'a>> {
        match self {
            CorsDecision::Preflight(headers) | CorsDecision::Simple(headers) => Some(*headers),
            _ => None,
        }
    }

    pub fn calls_next(&self) -> bool {
        self.short_circuit_status().is_none()
    }
}
