//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, request ID, tracing, timeout)
//!     → buffer body into request.rs `Request`
//!     → routing::Dispatcher (lookup + invoke)
//!     → view.rs `ModelAndView` + response.rs `Response`
//!     → server.rs renders status, headers and JSON body
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod view;

pub use request::{Request, RequestExt};
pub use response::Response;
pub use server::HttpServer;
pub use view::ModelAndView;
