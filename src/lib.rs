//! Controller-based request routing for web applications.
//!
//! Controllers declare their handler methods; at startup the router scans
//! them, freezes a `(path, method) → handler` table, and resolves each
//! incoming request to its handler by exact key.

pub mod config;
pub mod controller;
pub mod demo;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::MvcConfig;
pub use controller::{Controller, ControllerCatalog, RequestMappings};
pub use http::{HttpServer, ModelAndView, Request, Response};
pub use lifecycle::Shutdown;
pub use routing::{
    AnnotationHandlerMapping, Dispatch, DispatchError, Dispatcher, HandlerExecution, HandlerKey,
    HandlerMapping, HandlerResult, RequestMethod,
};
