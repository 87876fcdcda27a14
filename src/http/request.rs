//! Request descriptor handed to the router and to handlers.
//!
//! # Responsibilities
//! - Fix the request type every handler receives
//! - Extract routing-relevant information (path, method token)
//!
//! # Design Decisions
//! - Body is fully buffered before dispatch; handlers are synchronous
//! - Path excludes the query string and is never normalized

use axum::body::Bytes;

/// Request as seen by handlers: an `http` request with a buffered body.
pub type Request = axum::http::Request<Bytes>;

/// Routing view over a request.
pub trait RequestExt {
    /// Target path used for route lookup.
    fn request_path(&self) -> &str;

    /// Raw HTTP method token.
    fn method_token(&self) -> &str;

    /// Value of a query string parameter, if present.
    fn query_param(&self, name: &str) -> Option<String>;
}

impl RequestExt for Request {
    fn request_path(&self) -> &str {
        self.uri().path()
    }

    fn method_token(&self) -> &str {
        self.method().as_str()
    }

    fn query_param(&self, name: &str) -> Option<String> {
        self.uri().query()?.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (k == name).then(|| v.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_excludes_query() {
        let req = axum::http::Request::builder()
            .method("GET")
            .uri("http://example.com/users?page=2&sort")
            .body(Bytes::new())
            .unwrap();

        assert_eq!(req.request_path(), "/users");
        assert_eq!(req.method_token(), "GET");
        assert_eq!(req.query_param("page").as_deref(), Some("2"));
        assert_eq!(req.query_param("sort").as_deref(), Some(""));
        assert_eq!(req.query_param("missing"), None);
    }

    #[test]
    fn test_trailing_slash_preserved() {
        let req = axum::http::Request::builder()
            .uri("/users/")
            .body(Bytes::new())
            .unwrap();
        assert_eq!(req.request_path(), "/users/");
    }
}
