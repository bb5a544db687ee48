use bunner_cors_middleware::constants::method;
use bunner_cors_middleware::{Cors, CorsDecision, CorsOptions, Origin, RequestContext};
use std::time::Duration;

#[derive(Default)]
pub struct CorsBuilder {
    options: CorsOptions,
}

impl CorsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: Origin) -> Self {
        self.options.origin = origin;
        self
    }

    pub fn allow_all_origins(self) -> Self {
        self.origin(Origin::any())
    }

    pub fn allow_origins<I, S>(self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.origin(Origin::list(origins))
    }

    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.methods = methods.into_iter().map(Into::into).collect();
        self
    }

    pub fn allowed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.allowed_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn exposed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.exposed_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.options.credentials = enabled;
        self
    }

    pub fn max_age(mut self, value: Duration) -> Self {
        self.options.max_age = Some(value);
        self
    }

    pub fn skip<F>(mut self, skip: F) -> Self
    where
        F: for<'a> Fn(&RequestContext<'a>) -> bool + Send + Sync + 'static,
    {
        self.options = self.options.with_skip(skip);
        self
    }

    pub fn options(self) -> CorsOptions {
        self.options
    }

    pub fn build(self) -> Cors {
        Cors::new(self.options).expect("valid CORS configuration")
    }
}

/// Owns the request parts so decisions can borrow from it.
#[derive(Clone, Debug)]
pub struct RequestBuilder {
    method: String,
    path: String,
    origin: Option<String>,
}

impl RequestBuilder {
    fn with_method(method: &str) -> Self {
        Self {
            method: method.into(),
            path: "/".into(),
            origin: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn context(&self) -> RequestContext<'_> {
        RequestContext::new(&self.method, &self.path, self.origin.as_deref())
    }

    pub fn check<'a>(&'a self, cors: &'a Cors) -> CorsDecision<'a> {
        cors.check(&self.context())
    }
}

pub fn cors() -> CorsBuilder {
    CorsBuilder::new()
}

pub fn simple_request() -> RequestBuilder {
    RequestBuilder::with_method(method::GET)
}

pub fn preflight_request() -> RequestBuilder {
    RequestBuilder::with_method(method::OPTIONS)
}
