//! Sample controllers served by the `mvc-router` binary.

pub mod home;
pub mod user;

pub use home::{HomeController, StatusController};
pub use user::{User, UserController};

use crate::controller::ControllerCatalog;

/// Catalog of every demo controller.
pub fn catalog() -> ControllerCatalog {
    let mut catalog = ControllerCatalog::new();
    catalog.register::<HomeController>().register::<UserController>();
    catalog
}
