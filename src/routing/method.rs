//! HTTP request methods understood by the router.
//!
//! # Design Decisions
//! - Closed set: anything outside it is rejected, never defaulted
//! - Parsing is case-insensitive ("get" == "GET")

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::routing::error::UnknownMethodToken;

/// HTTP method half of a [`HandlerKey`](crate::routing::HandlerKey).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
}

impl RequestMethod {
    pub const ALL: [RequestMethod; 8] = [
        RequestMethod::Get,
        RequestMethod::Post,
        RequestMethod::Put,
        RequestMethod::Delete,
        RequestMethod::Patch,
        RequestMethod::Head,
        RequestMethod::Options,
        RequestMethod::Trace,
    ];

    /// Canonical upper-case token.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Head => "HEAD",
            RequestMethod::Options => "OPTIONS",
            RequestMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RequestMethod {
    type Err = UnknownMethodToken;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        RequestMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| UnknownMethodToken(token.to_string()))
    }
}

impl TryFrom<&axum::http::Method> for RequestMethod {
    type Error = UnknownMethodToken;

    fn try_from(method: &axum::http::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("GET".parse::<RequestMethod>().unwrap(), RequestMethod::Get);
        assert_eq!("post".parse::<RequestMethod>().unwrap(), RequestMethod::Post);
        assert_eq!("Delete".parse::<RequestMethod>().unwrap(), RequestMethod::Delete);
    }

    #[test]
    fn test_unknown_token_rejected() {
        let err = "BREW".parse::<RequestMethod>().unwrap_err();
        assert_eq!(err.token(), "BREW");

        assert!("".parse::<RequestMethod>().is_err());
        assert!(" GET".parse::<RequestMethod>().is_err());
    }

    #[test]
    fn test_display_roundtrips_every_method() {
        for method in RequestMethod::ALL {
            assert_eq!(method.to_string().parse::<RequestMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_from_http_method() {
        let patch = axum::http::Method::PATCH;
        assert_eq!(RequestMethod::try_from(&patch).unwrap(), RequestMethod::Patch);

        let custom = axum::http::Method::from_bytes(b"PURGE").unwrap();
        assert!(RequestMethod::try_from(&custom).is_err());
    }
}
