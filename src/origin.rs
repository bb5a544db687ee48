use std::collections::HashSet;

/// Which request origins the policy authorizes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Every origin is allowed and receives `Access-Control-Allow-Origin: *`.
    Any,
    /// Only these origins, compared as exact case-sensitive strings, are allowed.
    /// The matching request origin is echoed back.
    List(Vec<String>),
}

impl Default for Origin {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl Origin {
    pub fn any() -> Self {
        Self::Any
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    pub fn allows_all(&self) -> bool {
        matches!(self, Origin::Any)
    }
}

/// Lookup structure derived once from [`Origin`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum AllowedOrigins {
    Any,
    Set(HashSet<String>),
}

impl AllowedOrigins {
    pub(crate) fn from_origin(origin: &Origin) -> Self {
        match origin {
            Origin::Any => Self::Any,
            Origin::List(values) => Self::Set(values.iter().cloned().collect()),
        }
    }

    pub(crate) fn allows(&self, origin: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Set(values) => values.contains(origin),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Any => 0,
            Self::Set(values) => values.len(),
        }
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
