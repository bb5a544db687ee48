/// Host-agnostic view of the parts of a request the policy looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub origin: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn new(method: &'a str, path: &'a str, origin: Option<&'a str>) -> Self {
        Self {
            method,
            path,
            origin,
        }
    }

    /// Returns the `Origin` value when it is present and non-empty.
    pub fn cross_origin(&self) -> Option<&'a str> {
        self.origin.filter(|origin| !origin.is_empty())
    }
}
