//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route table build (at startup):
//!     ControllerSet
//!     → each controller's declared RequestMappings
//!     → registry.rs (HandlerKey → HandlerExecution, last write wins)
//!     → Freeze as immutable HandlerRegistry
//!
//! Incoming request (path, method token)
//!     → mapping.rs (parse method, build HandlerKey, exact lookup)
//!     → dispatcher.rs (first mapping with a match, invoke)
//!     → Return: ModelAndView, NotFound, or DispatchError
//! ```
//!
//! # Design Decisions
//! - Routes built at startup, immutable at runtime (no locks on lookup)
//! - Exact string match on the path; no templates, prefixes or normalization
//! - Unknown method tokens fail fast instead of falling back to a default
//! - Explicit NotFound rather than an error or silent default

pub mod dispatcher;
pub mod error;
pub mod execution;
pub mod key;
pub mod mapping;
pub mod method;
pub mod registry;

pub use dispatcher::{Dispatch, Dispatcher};
pub use error::{DispatchError, InitializationError, InvocationError, UnknownMethodToken};
pub use execution::{HandlerError, HandlerExecution, HandlerResult};
pub use key::HandlerKey;
pub use mapping::{AnnotationHandlerMapping, HandlerMapping, MappingState};
pub use method::RequestMethod;
pub use registry::{HandlerRegistry, HandlerRegistryBuilder};
