//! Controller subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     ControllerCatalog (explicit registrations)
//!     → scanner.rs (filter by scan scope, instantiate once per type)
//!     → ControllerSet
//!     → mappings.rs (each controller declares its handler methods)
//!     → handed to the routing registry build
//! ```
//!
//! # Design Decisions
//! - Registration in the catalog marks a type as a controller
//! - A controller's namespace is its Rust module path, declared through
//!   [`Controller::package`]
//! - Instantiation is all-or-nothing: one failure aborts startup

pub mod mappings;
pub mod scanner;

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::http::{Request, Response};
use crate::routing::{HandlerExecution, HandlerKey};

pub use mappings::{RequestMapping, RequestMappings};
pub use scanner::{ControllerCatalog, ControllerScanner, ControllerSet};

/// A type whose methods serve requests.
///
/// Implementors declare their handler methods in [`Controller::request_mappings`]:
///
/// ```ignore
/// impl Controller for UserController {
///     fn request_mappings(mappings: &mut RequestMappings<Self>) {
///         mappings
///             .get("/users", "list", Self::list)
///             .post("/users", "create", Self::create);
///     }
/// }
/// ```
pub trait Controller: Send + Sync + Sized + 'static {
    fn request_mappings(mappings: &mut RequestMappings<Self>);

    /// Module path matched against the scan scopes.
    ///
    /// The default is derived from [`std::any::type_name`], whose format is
    /// not guaranteed. Override with `module_path!()` to pin it.
    fn package() -> &'static str {
        type_package(type_name::<Self>())
    }
}

/// Module part of a type name, ignoring generic arguments.
fn type_package(name: &'static str) -> &'static str {
    let path = name.split_once('<').map_or(name, |(path, _)| path);
    path.rsplit_once("::").map_or("", |(package, _)| package)
}

/// Identity of a controller type.
#[derive(Debug, Clone, Copy)]
pub struct ControllerType {
    id: TypeId,
    name: &'static str,
    package: &'static str,
}

impl ControllerType {
    pub fn of<C: Controller>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
            package: C::package(),
        }
    }

    /// Fully-qualified type name, e.g. `my_app::web::UserController`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Module path the type lives in, as reported by [`Controller::package`].
    pub fn package(&self) -> &'static str {
        self.package
    }
}

impl PartialEq for ControllerType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ControllerType {}

impl Hash for ControllerType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A handler method bound to a live controller, ready for the registry.
pub(crate) struct BoundHandler {
    pub(crate) key: HandlerKey,
    pub(crate) execution: HandlerExecution,
}

/// Type-erased live controller instance.
pub(crate) trait ControllerInstance: Send + Sync {
    fn bind_handlers(self: Arc<Self>) -> Vec<BoundHandler>;
}

impl<C: Controller> ControllerInstance for C {
    fn bind_handlers(self: Arc<Self>) -> Vec<BoundHandler> {
        let mut mappings = RequestMappings::new();
        C::request_mappings(&mut mappings);

        mappings
            .into_methods()
            .into_iter()
            .map(|method| {
                let handler = method.handler.clone();
                BoundHandler {
                    key: method.mapping.handler_key(),
                    execution: HandlerExecution::new(
                        Arc::clone(&self),
                        method.qualified_name(),
                        move |c: &C, req: &Request, resp: &mut Response| handler(c, req, resp),
                    ),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl Controller for Probe {
        fn request_mappings(_: &mut RequestMappings<Self>) {}
    }

    struct Wrapper<T>(std::marker::PhantomData<T>);

    impl<T: Send + Sync + 'static> Controller for Wrapper<T> {
        fn request_mappings(_: &mut RequestMappings<Self>) {}
    }

    struct Pinned;

    impl Controller for Pinned {
        fn request_mappings(_: &mut RequestMappings<Self>) {}

        fn package() -> &'static str {
            "app::pinned"
        }
    }

    #[test]
    fn test_type_package_ignores_generic_arguments() {
        assert_eq!(type_package("a::B<c::D>"), "a");
        assert_eq!(type_package("a::b::C"), "a::b");
        assert_eq!(type_package("Bare"), "");

        let ty = ControllerType::of::<Wrapper<Probe>>();
        assert!(ty.package().ends_with("controller::tests"));
        assert!(!ty.package().contains('<'));
        assert_ne!(ty, ControllerType::of::<Wrapper<Pinned>>());
    }

    #[test]
    fn test_package_override() {
        assert_eq!(ControllerType::of::<Pinned>().package(), "app::pinned");
    }

    #[test]
    fn test_controller_type_package() {
        let ty = ControllerType::of::<Probe>();
        assert!(ty.name().ends_with("controller::tests::Probe"));
        assert!(ty.package().ends_with("controller::tests"));
        assert_eq!(ty, ControllerType::of::<Probe>());
    }
}
