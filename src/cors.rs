use crate::constants::method;
use crate::context::RequestContext;
use crate::header_builder::HeaderBuilder;
use crate::headers::Headers;
use crate::options::{CorsOptions, SkipFn, ValidationError};
use crate::origin::AllowedOrigins;
use crate::result::{CorsDecision, CorsHeaders};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Core CORS policy engine.
///
/// Everything that depends only on [`CorsOptions`] is computed in [`Cors::new`];
/// [`Cors::check`] is a set lookup and a method comparison.
#[derive(Clone)]
pub struct Cors {
    allowed_origins: AllowedOrigins,
    preflight_headers: Headers,
    simple_headers: Headers,
    skip: Option<Arc<SkipFn>>,
}

impl Cors {
    pub fn new(options: CorsOptions) -> Result<Self, ValidationError> {
        options.validate()?;

        let builder = HeaderBuilder::new(&options);
        let preflight_headers = builder.build_preflight_headers();
        let simple_headers = builder.build_simple_headers();
        let allowed_origins = AllowedOrigins::from_origin(&options.origin);

        if options.credentials && options.origin.allows_all() {
            warn!(
                "CORS: credentials are enabled together with a wildcard origin; browsers reject credentialed responses carrying Access-Control-Allow-Origin: *"
            );
        }
        debug!(
            allow_all_origins = options.origin.allows_all(),
            allowed_origins = allowed_origins.len(),
            preflight_headers = preflight_headers.len(),
            simple_headers = simple_headers.len(),
            skip = options.skip.is_some(),
            "CORS policy prepared"
        );

        Ok(Self {
            allowed_origins,
            preflight_headers,
            simple_headers,
            skip: options.skip,
        })
    }

    pub fn check<'s>(&'s self, request: &RequestContext<'s>) -> CorsDecision<'s> {
        if let Some(skip) = &self.skip
            && skip(request)
        {
            return CorsDecision::Skipped;
        }

        let Some(origin) = request.cross_origin() else {
            return CorsDecision::NotApplicable;
        };

        let allow_origin = match &self.allowed_origins {
            AllowedOrigins::Any => None,
            allowed if allowed.allows(origin) => Some(origin),
            _ => {
                trace!(origin, "CORS: origin not allowed");
                return CorsDecision::Forbidden;
            }
        };

        if request.method == method::OPTIONS {
            CorsDecision::Preflight(CorsHeaders::new(allow_origin, &self.preflight_headers))
        } else {
            CorsDecision::Simple(CorsHeaders::new(allow_origin, &self.simple_headers))
        }
    }

    pub fn preflight_headers(&self) -> &Headers {
        &self.preflight_headers
    }

    pub fn simple_headers(&self) -> &Headers {
        &self.simple_headers
    }

    pub fn allows_all_origins(&self) -> bool {
        matches!(self.allowed_origins, AllowedOrigins::Any)
    }
}

impl fmt::Debug for Cors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cors")
            .field("allowed_origins", &self.allowed_origins)
            .field("preflight_headers", &self.preflight_headers)
            .field("simple_headers", &self.simple_headers)
            .field("skip", &self.skip.as_ref().map(|_| "<predicate>"))
            .finish()
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
