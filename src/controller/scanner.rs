//! Controller discovery and instantiation.
//!
//! # Responsibilities
//! - Hold the catalog of known controller types and their factories
//! - Select the controllers living inside the configured scan scopes
//! - Produce exactly one live instance per selected type
//!
//! # Design Decisions
//! - Scope matching is by module path: `app::web` covers `app::web::*`
//!   but not `app::website`
//! - Any factory failure aborts the whole scan; no partial `ControllerSet`
//! - A scope that selects nothing is suspicious but not fatal (warn)

use std::collections::HashMap;
use std::sync::Arc;

use crate::controller::{Controller, ControllerInstance, ControllerType};
use crate::routing::{HandlerError, InitializationError};

type ControllerFactory =
    Box<dyn Fn() -> Result<Arc<dyn ControllerInstance>, HandlerError> + Send + Sync>;

struct ControllerDescriptor {
    ty: ControllerType,
    factory: ControllerFactory,
}

/// Every controller type the application knows about.
#[derive(Default)]
pub struct ControllerCatalog {
    descriptors: Vec<ControllerDescriptor>,
}

impl ControllerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller built with `Default`.
    pub fn register<C: Controller + Default>(&mut self) -> &mut Self {
        self.register_with(|| Ok::<C, HandlerError>(C::default()))
    }

    /// Register a controller built by a fallible factory.
    pub fn register_with<C, F, E>(&mut self, factory: F) -> &mut Self
    where
        C: Controller,
        F: Fn() -> Result<C, E> + Send + Sync + 'static,
        E: Into<HandlerError>,
    {
        self.descriptors.push(ControllerDescriptor {
            ty: ControllerType::of::<C>(),
            factory: Box::new(move || {
                let controller = factory().map_err(Into::into)?;
                Ok(Arc::new(controller) as Arc<dyn ControllerInstance>)
            }),
        });
        self
    }
}

/// Live controller instances keyed by type.
#[derive(Default)]
pub struct ControllerSet {
    instances: HashMap<ControllerType, Arc<dyn ControllerInstance>>,
}

impl ControllerSet {
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn contains<C: Controller>(&self) -> bool {
        self.instances.contains_key(&ControllerType::of::<C>())
    }

    pub(crate) fn into_instances(
        self,
    ) -> impl Iterator<Item = (ControllerType, Arc<dyn ControllerInstance>)> {
        self.instances.into_iter()
    }
}

/// Discovers controllers within a set of scan scopes.
#[derive(Debug, Clone)]
pub struct ControllerScanner {
    scopes: Vec<String>,
}

impl ControllerScanner {
    pub fn new<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    /// Instantiate every catalog entry that lives within a scan scope.
    pub fn scan(&self, catalog: &ControllerCatalog) -> Result<ControllerSet, InitializationError> {
        self.validate_scopes()?;

        let mut set = ControllerSet::default();
        let mut matched = vec![0usize; self.scopes.len()];

        for descriptor in &catalog.descriptors {
            let package = descriptor.ty.package();
            let mut in_scope = false;
            for (i, scope) in self.scopes.iter().enumerate() {
                if scope_contains(scope, package) {
                    matched[i] += 1;
                    in_scope = true;
                }
            }
            if !in_scope {
                continue;
            }
            if set.instances.contains_key(&descriptor.ty) {
                tracing::debug!(controller = %descriptor.ty, "Controller registered twice, keeping first instance");
                continue;
            }

            let instance = (descriptor.factory)().map_err(|source| {
                tracing::error!(controller = %descriptor.ty, error = %source, "Controller instantiation failed");
                InitializationError::Instantiation {
                    controller: descriptor.ty.name(),
                    source,
                }
            })?;

            tracing::debug!(controller = %descriptor.ty, "Controller instantiated");
            set.instances.insert(descriptor.ty, instance);
        }

        for (scope, count) in self.scopes.iter().zip(&matched) {
            if *count == 0 {
                tracing::warn!(scope = %scope, "Scan scope matched no controllers");
            }
        }

        tracing::info!(
            scopes = ?self.scopes,
            controllers = set.len(),
            "Controller scan complete"
        );
        Ok(set)
    }

    fn validate_scopes(&self) -> Result<(), InitializationError> {
        if self.scopes.is_empty() {
            return Err(InitializationError::NoScopes);
        }
        match self.scopes.iter().find(|s| !is_valid_scope(s)) {
            Some(bad) => Err(InitializationError::InvalidScope(bad.clone())),
            None => Ok(()),
        }
    }
}

/// A scope is a `::`-separated Rust module path.
pub fn is_valid_scope(scope: &str) -> bool {
    !scope.is_empty() && scope.split("::").all(is_identifier)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn scope_contains(scope: &str, package: &str) -> bool {
    package == scope
        || package
            .strip_prefix(scope)
            .is_some_and(|rest| rest.starts_with("::"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::RequestMappings;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Default)]
    struct Alpha;

    impl Controller for Alpha {
        fn request_mappings(_: &mut RequestMappings<Self>) {}
    }

    struct Counted;

    impl Controller for Counted {
        fn request_mappings(_: &mut RequestMappings<Self>) {}
    }

    struct Unbuildable;

    impl Controller for Unbuildable {
        fn request_mappings(_: &mut RequestMappings<Self>) {}
    }

    fn own_scope() -> String {
        ControllerType::of::<Alpha>().package().to_string()
    }

    #[test]
    fn test_scope_matching() {
        assert!(scope_contains("app::web", "app::web"));
        assert!(scope_contains("app::web", "app::web::users"));
        assert!(!scope_contains("app::web", "app::website"));
        assert!(!scope_contains("app::web", "app"));
    }

    #[test]
    fn test_scope_validation() {
        assert!(is_valid_scope("mvc_router::demo"));
        assert!(is_valid_scope("_private"));
        assert!(!is_valid_scope(""));
        assert!(!is_valid_scope("next.controller"));
        assert!(!is_valid_scope("app::"));
        assert!(!is_valid_scope("1app"));
    }

    #[test]
    fn test_scan_instantiates_in_scope_controllers_once() {
        let mut catalog = ControllerCatalog::new();
        catalog
            .register::<Alpha>()
            .register::<Alpha>()
            .register_with(|| {
                BUILDS.fetch_add(1, Ordering::SeqCst);
                Ok::<_, HandlerError>(Counted)
            });

        let set = ControllerScanner::new([own_scope()]).scan(&catalog).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains::<Alpha>());
        assert!(set.contains::<Counted>());
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_out_of_scope_controllers_skipped() {
        let mut catalog = ControllerCatalog::new();
        catalog.register::<Alpha>();

        let set = ControllerScanner::new(["some_other_crate::web"])
            .scan(&catalog)
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_instantiation_failure_is_fatal() {
        let mut catalog = ControllerCatalog::new();
        catalog
            .register::<Alpha>()
            .register_with(|| Err::<Unbuildable, _>("missing database url"));

        let err = ControllerScanner::new([own_scope()])
            .scan(&catalog)
            .err()
            .unwrap();
        match err {
            InitializationError::Instantiation { controller, source } => {
                assert!(controller.ends_with("Unbuildable"));
                assert_eq!(source.to_string(), "missing database url");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bad_scopes_rejected() {
        let catalog = ControllerCatalog::new();

        let err = ControllerScanner::new(Vec::<String>::new()).scan(&catalog).err();
        assert!(matches!(err, Some(InitializationError::NoScopes)));

        let err = ControllerScanner::new(["core.mvc"]).scan(&catalog).err();
        assert!(matches!(err, Some(InitializationError::InvalidScope(s)) if s == "core.mvc"));
    }
}
