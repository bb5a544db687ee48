use crate::constants::header;
use crate::headers::Headers;
use crate::options::CorsOptions;
use crate::origin::Origin;

/// Derives the static response header bundles from a policy.
pub(crate) struct HeaderBuilder<'a> {
    options: &'a CorsOptions,
}

impl<'a> HeaderBuilder<'a> {
    pub(crate) fn new(options: &'a CorsOptions) -> Self {
        Self { options }
    }

    /// Headers answered to an accepted `OPTIONS` request.
    pub(crate) fn build_preflight_headers(&self) -> Headers {
        let mut headers = Headers::new();
        self.build_credentials_header(&mut headers);
        self.build_methods_header(&mut headers);
        self.build_allowed_headers(&mut headers);
        self.build_max_age_header(&mut headers);
        match self.options.origin {
            Origin::Any => {
                headers.set(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");
            }
            Origin::List(_) => {
                headers.append(header::VARY, header::ORIGIN);
                headers.append(header::VARY, header::ACCESS_CONTROL_REQUEST_METHOD);
                headers.append(header::VARY, header::ACCESS_CONTROL_REQUEST_HEADERS);
            }
        }
        headers
    }

    /// Headers merged into every other accepted cross-origin response.
    pub(crate) fn build_simple_headers(&self) -> Headers {
        let mut headers = Headers::new();
        self.build_credentials_header(&mut headers);
        self.build_exposed_headers(&mut headers);
        match self.options.origin {
            Origin::Any => {
                headers.set(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");
            }
            Origin::List(_) => {
                headers.set(header::VARY, header::ORIGIN);
            }
        }
        headers
    }

    fn build_credentials_header(&self, headers: &mut Headers) {
        if self.options.credentials {
            headers.set(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
        }
    }

    fn build_methods_header(&self, headers: &mut Headers) {
        if !self.options.methods.is_empty() {
            headers.set(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                self.options.methods.join(","),
            );
        }
    }

    fn build_allowed_headers(&self, headers: &mut Headers) {
        if !self.options.allowed_headers.is_empty() {
            headers.set(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                self.options.allowed_headers.join(","),
            );
        }
    }

    fn build_exposed_headers(&self, headers: &mut Headers) {
        if !self.options.exposed_headers.is_empty() {
            headers.set(
                header::ACCESS_CONTROL_EXPOSE_HEADERS,
                self.options.exposed_headers.join(","),
            );
        }
    }

    // Sub-second remainders are truncated, so 1500ms is announced as 1.
    fn build_max_age_header(&self, headers: &mut Headers) {
        if let Some(max_age) = self.options.max_age
            && !max_age.is_zero()
        {
            headers.set(header::ACCESS_CONTROL_MAX_AGE, max_age.as_secs().to_string());
        }
    }
}

#[cfg(test)]
#[path = "header_builder_test.rs"]
mod header_builder_test;
