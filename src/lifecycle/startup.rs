//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize logging and metrics from configuration
//! - Scan controllers and build the handler mapping
//! - Assemble the dispatcher served by the HTTP layer
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listeners start last (traffic only when ready)

use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;

use crate::config::MvcConfig;
use crate::controller::ControllerCatalog;
use crate::observability::metrics;
use crate::routing::{AnnotationHandlerMapping, Dispatcher, InitializationError};

/// Fatal error during startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("controller initialization failed: {0}")]
    Initialization(#[from] InitializationError),

    #[error("metrics exporter failed: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),
}

/// A dispatcher ready to serve, plus the mapping behind it.
pub struct Application {
    pub mapping: Arc<AnnotationHandlerMapping>,
    pub dispatcher: Dispatcher,
}

/// Scan `catalog` within the configured base packages and freeze the routes.
pub fn build_application(
    config: &MvcConfig,
    catalog: &ControllerCatalog,
) -> Result<Application, StartupError> {
    let mut mapping = AnnotationHandlerMapping::new(config.scan.base_packages.iter().cloned());
    mapping.initialize(catalog)?;

    let mapping = Arc::new(mapping);
    let dispatcher = Dispatcher::new().with_mapping(mapping.clone());
    Ok(Application {
        mapping,
        dispatcher,
    })
}

/// Start the metrics exporter when enabled. Requires a Tokio runtime.
pub fn start_metrics(config: &MvcConfig) -> Result<(), StartupError> {
    if !config.observability.metrics_enabled {
        return Ok(());
    }
    let addr: SocketAddr = config
        .observability
        .metrics_address
        .parse()
        .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
    metrics::init_metrics(addr)?;
    Ok(())
}
