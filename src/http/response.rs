//! Response context passed through to handlers.
//!
//! # Design Decisions
//! - Handlers may set status and headers; the body is derived from the
//!   returned ModelAndView by the transport adapter
//! - Defaults to 200 OK with no headers

use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

/// Mutable response handle shared between a handler and the transport.
#[derive(Debug, Clone, Default)]
pub struct Response {
    status: Option<StatusCode>,
    headers: HeaderMap,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status explicitly set by a handler, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    pub(crate) fn into_parts(self) -> (Option<StatusCode>, HeaderMap) {
        (self.status, self.headers)
    }
}
