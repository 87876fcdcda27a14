//! Route lookup identity.

use std::fmt;

use crate::routing::method::RequestMethod;

/// A URL pattern paired with an HTTP method.
///
/// Equality is exact: the pattern is stored verbatim, so `/users`,
/// `/users/` and `/Users` are three different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerKey {
    url: String,
    method: RequestMethod,
}

impl HandlerKey {
    pub fn new(url: impl Into<String>, method: RequestMethod) -> Self {
        Self {
            url: url.into(),
            method,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> RequestMethod {
        self.method
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandlerKey [url={}, method={}]", self.url, self.method)
    }
}
