//! Annotation-style handler mapping.
//!
//! # Responsibilities
//! - Drive initialization: scan controllers, build and freeze the registry
//! - Track the lifecycle state and refuse lookups outside `Ready`
//! - Resolve a request to its handler by exact (path, method) key
//!
//! # State Machine
//! ```text
//! Uninitialized ──initialize()──▶ Ready
//!        │
//!        └──────initialize() fails──▶ Failed
//! ```
//! `initialize` takes `&mut self`, so the transient initializing phase can
//! never overlap a lookup or a second initialization.

use std::fmt;

use crate::controller::{ControllerCatalog, ControllerScanner};
use crate::http::{Request, RequestExt};
use crate::routing::error::{DispatchError, InitializationError};
use crate::routing::execution::HandlerExecution;
use crate::routing::key::HandlerKey;
use crate::routing::method::RequestMethod;
use crate::routing::registry::{HandlerRegistry, HandlerRegistryBuilder};

/// Resolves requests to handlers.
pub trait HandlerMapping: Send + Sync {
    /// `Ok(None)` when no handler matches.
    fn get_handler(&self, request: &Request) -> Result<Option<&HandlerExecution>, DispatchError>;
}

/// Observable lifecycle state of an [`AnnotationHandlerMapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingState {
    Uninitialized,
    Ready,
    Failed,
}

impl fmt::Display for MappingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MappingState::Uninitialized => "uninitialized",
            MappingState::Ready => "ready",
            MappingState::Failed => "failed",
        };
        f.write_str(s)
    }
}

enum Lifecycle {
    Uninitialized,
    Ready(HandlerRegistry),
    Failed,
}

/// Handler mapping built from controllers' declared request mappings.
pub struct AnnotationHandlerMapping {
    base_packages: Vec<String>,
    lifecycle: Lifecycle,
}

impl AnnotationHandlerMapping {
    pub fn new<I, S>(base_packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_packages: base_packages.into_iter().map(Into::into).collect(),
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Scan `catalog` within the base packages and build the route table.
    ///
    /// Runs at most once. On error the mapping is left `Failed` for good.
    pub fn initialize(&mut self, catalog: &ControllerCatalog) -> Result<(), InitializationError> {
        if !matches!(self.lifecycle, Lifecycle::Uninitialized) {
            return Err(InitializationError::AlreadyInitialized);
        }

        let scanner = ControllerScanner::new(self.base_packages.iter().cloned());
        match scanner.scan(catalog) {
            Ok(controllers) => {
                let mut builder = HandlerRegistryBuilder::new();
                builder.add_controllers(controllers);
                let declared = builder.declared();
                let registry = builder.build();

                tracing::info!(
                    routes = registry.len(),
                    declared,
                    "Handler mapping ready"
                );
                self.lifecycle = Lifecycle::Ready(registry);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Handler mapping initialization failed");
                self.lifecycle = Lifecycle::Failed;
                Err(e)
            }
        }
    }

    pub fn state(&self) -> MappingState {
        match self.lifecycle {
            Lifecycle::Uninitialized => MappingState::Uninitialized,
            Lifecycle::Ready(_) => MappingState::Ready,
            Lifecycle::Failed => MappingState::Failed,
        }
    }

    /// Registered keys in arbitrary order. Empty unless `Ready`.
    pub fn handler_keys(&self) -> Vec<&HandlerKey> {
        match &self.lifecycle {
            Lifecycle::Ready(registry) => registry.keys().collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_handler_key_present(&self, url: &str, method: RequestMethod) -> bool {
        match &self.lifecycle {
            Lifecycle::Ready(registry) => registry.contains(url, method),
            _ => false,
        }
    }

    fn registry(&self) -> Result<&HandlerRegistry, DispatchError> {
        match &self.lifecycle {
            Lifecycle::Ready(registry) => Ok(registry),
            _ => Err(DispatchError::NotReady(self.state())),
        }
    }
}

impl HandlerMapping for AnnotationHandlerMapping {
    fn get_handler(&self, request: &Request) -> Result<Option<&HandlerExecution>, DispatchError> {
        let registry = self.registry()?;
        let method: RequestMethod = request.method_token().parse()?;
        let key = HandlerKey::new(request.request_path(), method);
        Ok(registry.get(&key))
    }
}

impl fmt::Debug for AnnotationHandlerMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationHandlerMapping")
            .field("base_packages", &self.base_packages)
            .field("state", &self.state())
            .finish()
    }
}
