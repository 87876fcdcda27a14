//! Routing error taxonomy.
//!
//! Not-found is deliberately absent: a missing route is an `Ok(None)`
//! lookup result, not an error.

use thiserror::Error;

use crate::routing::execution::HandlerError;

/// Fatal startup failure. The mapping never reaches `Ready`.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("no controller scan scopes configured")]
    NoScopes,

    #[error("invalid controller scan scope {0:?}")]
    InvalidScope(String),

    #[error("failed to instantiate controller {controller}: {source}")]
    Instantiation {
        controller: &'static str,
        #[source]
        source: HandlerError,
    },

    #[error("handler mapping already initialized; create a new instance to re-initialize")]
    AlreadyInitialized,
}

/// The request carried an HTTP method token the router does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown HTTP method token {0:?}")]
pub struct UnknownMethodToken(pub String);

impl UnknownMethodToken {
    pub fn token(&self) -> &str {
        &self.0
    }
}

/// A handler failed while serving a single request.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("handler {method} failed: {source}")]
    Failed {
        method: String,
        #[source]
        source: HandlerError,
    },

    #[error("handler {method} panicked: {message}")]
    Panicked { method: String, message: String },
}

impl InvocationError {
    /// Fully-qualified identifier of the failing handler method.
    pub fn method(&self) -> &str {
        match self {
            InvocationError::Failed { method, .. } | InvocationError::Panicked { method, .. } => {
                method
            }
        }
    }
}

/// Request-time failures surfaced by a [`HandlerMapping`](crate::routing::HandlerMapping)
/// or the [`Dispatcher`](crate::routing::Dispatcher).
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    UnknownMethod(#[from] UnknownMethodToken),

    #[error("handler mapping is not ready (state: {0})")]
    NotReady(crate::routing::mapping::MappingState),

    #[error(transparent)]
    Invocation(#[from] InvocationError),
}
