//! Bound, invocable route targets.
//!
//! # Design Decisions
//! - One fixed handler signature: `(&C, &Request, &mut Response) -> HandlerResult`
//! - Controller instances are shared via `Arc`; executions are cheap to clone
//! - Handler errors and panics both surface as `InvocationError`, never unwind
//!   into the transport

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::http::{ModelAndView, Request, Response};
use crate::routing::error::InvocationError;

/// Error type handlers and controller factories return.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result every handler method produces.
pub type HandlerResult = Result<ModelAndView, HandlerError>;

type BoundHandler = dyn Fn(&Request, &mut Response) -> HandlerResult + Send + Sync;

/// A handler method bound to its controller instance.
#[derive(Clone)]
pub struct HandlerExecution {
    method: Arc<str>,
    handler: Arc<BoundHandler>,
}

impl HandlerExecution {
    /// Bind `handler` to `controller`. `method` is the `<Type>.<method>`
    /// identifier used in logs and errors.
    pub fn new<C, F>(controller: Arc<C>, method: impl Into<String>, handler: F) -> Self
    where
        C: Send + Sync + 'static,
        F: Fn(&C, &Request, &mut Response) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            method: Arc::from(method.into()),
            handler: Arc::new(move |req: &Request, resp: &mut Response| {
                handler(&controller, req, resp)
            }),
        }
    }

    /// Fully-qualified handler method identifier.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Invoke the bound handler once.
    pub fn handle(
        &self,
        request: &Request,
        response: &mut Response,
    ) -> Result<ModelAndView, InvocationError> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (self.handler)(request, response)));

        match outcome {
            Ok(Ok(mav)) => Ok(mav),
            Ok(Err(source)) => Err(InvocationError::Failed {
                method: self.method.to_string(),
                source,
            }),
            Err(payload) => Err(InvocationError::Panicked {
                method: self.method.to_string(),
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    /// True when both executions invoke the same bound handler.
    pub fn same_target(&self, other: &HandlerExecution) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl fmt::Debug for HandlerExecution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerExecution")
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
