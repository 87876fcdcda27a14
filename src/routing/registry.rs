//! Route table construction and storage.
//!
//! # Responsibilities
//! - Collect bound handlers from every scanned controller
//! - Resolve duplicate keys (last write wins, silently)
//! - Freeze into an immutable, lock-free lookup table
//!
//! # Design Decisions
//! - Builder and table are separate types: nothing can insert after `build`
//! - One info line per registered route, in registration order

use std::collections::HashMap;

use crate::controller::ControllerSet;
use crate::observability::metrics;
use crate::routing::execution::HandlerExecution;
use crate::routing::key::HandlerKey;
use crate::routing::method::RequestMethod;

/// Mutable staging area used only during initialization.
#[derive(Debug, Default)]
pub struct HandlerRegistryBuilder {
    executions: HashMap<HandlerKey, HandlerExecution>,
    declared: usize,
}

impl HandlerRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `execution` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: HandlerKey, execution: HandlerExecution) -> &mut Self {
        tracing::info!("{}, execution method: {}", key, execution.method());
        self.declared += 1;

        if let Some(previous) = self.executions.insert(key.clone(), execution) {
            tracing::debug!(
                key = %key,
                replaced = previous.method(),
                "Handler key registered more than once, last registration wins"
            );
        }
        self
    }

    /// Bind and register every handler method of every controller in `controllers`.
    pub fn add_controllers(&mut self, controllers: ControllerSet) -> &mut Self {
        for (ty, instance) in controllers.into_instances() {
            let handlers = instance.bind_handlers();
            tracing::debug!(controller = %ty, handlers = handlers.len(), "Registering controller");
            for bound in handlers {
                self.insert(bound.key, bound.execution);
            }
        }
        self
    }

    /// Number of handler methods registered so far, duplicates included.
    pub fn declared(&self) -> usize {
        self.declared
    }

    pub fn build(self) -> HandlerRegistry {
        metrics::record_registered_routes(self.executions.len());
        HandlerRegistry {
            executions: self.executions,
        }
    }
}

/// Immutable route table.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    executions: HashMap<HandlerKey, HandlerExecution>,
}

impl HandlerRegistry {
    pub fn get(&self, key: &HandlerKey) -> Option<&HandlerExecution> {
        self.executions.get(key)
    }

    pub fn contains(&self, url: &str, method: RequestMethod) -> bool {
        self.executions.contains_key(&HandlerKey::new(url, method))
    }

    pub fn keys(&self) -> impl Iterator<Item = &HandlerKey> {
        self.executions.keys()
    }

    pub fn len(&self) -> usize {
        self.executions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.executions.is_empty()
    }
}
