//! Request-time dispatch across one or more handler mappings.
//!
//! # Responsibilities
//! - Ask each mapping, in order, for a handler
//! - Invoke the handler and hand its ModelAndView back to the transport
//!
//! # Design Decisions
//! - First mapping that finds a handler wins
//! - Not-found is an outcome (`Dispatch::NotFound`), not an error
//! - Errors from a mapping stop the chain; no fallback on failure

use std::sync::Arc;
use std::time::Instant;

use crate::http::{ModelAndView, Request, RequestExt, Response};
use crate::observability::metrics;
use crate::routing::error::DispatchError;
use crate::routing::execution::HandlerExecution;
use crate::routing::mapping::HandlerMapping;
use crate::routing::method::RequestMethod;

/// Result of a dispatch that did not fail.
#[derive(Debug)]
pub enum Dispatch {
    Handled(ModelAndView),
    NotFound,
}

/// Front controller over an ordered list of handler mappings.
#[derive(Clone, Default)]
pub struct Dispatcher {
    mappings: Vec<Arc<dyn HandlerMapping>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mapping(mut self, mapping: Arc<dyn HandlerMapping>) -> Self {
        self.mappings.push(mapping);
        self
    }

    /// Look up the handler for `request`.
    pub fn get_handler(&self, request: &Request) -> Result<Option<&HandlerExecution>, DispatchError> {
        for mapping in &self.mappings {
            if let Some(handler) = mapping.get_handler(request)? {
                return Ok(Some(handler));
            }
        }
        Ok(None)
    }

    /// Look up and invoke the handler for `request`.
    pub fn dispatch(&self, request: &Request, response: &mut Response) -> Result<Dispatch, DispatchError> {
        let start = Instant::now();
        let method = method_label(request);

        let outcome = match self.get_handler(request) {
            Ok(Some(handler)) => {
                tracing::debug!(
                    path = request.request_path(),
                    method,
                    handler = handler.method(),
                    "Dispatching request"
                );
                handler
                    .handle(request, response)
                    .map(Dispatch::Handled)
                    .map_err(DispatchError::from)
            }
            Ok(None) => Ok(Dispatch::NotFound),
            Err(e) => Err(e),
        };

        metrics::record_dispatch(method, outcome_label(&outcome), start);
        outcome
    }
}

/// Bounded metric label for the request's method token.
fn method_label(request: &Request) -> &'static str {
    request
        .method_token()
        .parse::<RequestMethod>()
        .map_or("unknown", |method| method.as_str())
}

fn outcome_label(outcome: &Result<Dispatch, DispatchError>) -> &'static str {
    match outcome {
        Ok(Dispatch::Handled(_)) => "handled",
        Ok(Dispatch::NotFound) => "not_found",
        Err(DispatchError::UnknownMethod(_)) => "unknown_method",
        Err(DispatchError::NotReady(_)) => "not_ready",
        Err(DispatchError::Invocation(_)) => "handler_error",
    }
}
