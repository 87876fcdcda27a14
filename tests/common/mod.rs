//! Shared fixtures for integration tests.
#![allow(dead_code)]

use axum::body::Bytes;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use mvc_router::controller::ControllerType;
use mvc_router::{Controller, Dispatcher, HttpServer, MvcConfig, Request, Shutdown};

pub mod users {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use mvc_router::http::RequestExt;
    use mvc_router::{Controller, HandlerResult, ModelAndView, Request, RequestMappings, Response};

    #[derive(Default)]
    pub struct UserController {
        list_calls: Arc<AtomicUsize>,
    }

    impl UserController {
        /// Controller whose `list` invocations are counted in `list_calls`.
        pub fn counting(list_calls: Arc<AtomicUsize>) -> Self {
            Self { list_calls }
        }

        fn list(&self, _req: &Request, _resp: &mut Response) -> HandlerResult {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(ModelAndView::new("user/list").add_object("handler", "list"))
        }

        fn create(&self, req: &Request, _resp: &mut Response) -> HandlerResult {
            Ok(ModelAndView::new("user/created")
                .add_object("handler", "create")
                .add_object("name", req.query_param("name").unwrap_or_default()))
        }

        fn explode(&self, _req: &Request, _resp: &mut Response) -> HandlerResult {
            Err("user store offline".into())
        }
    }

    impl Controller for UserController {
        fn request_mappings(mappings: &mut RequestMappings<Self>) {
            mappings
                .get("/users", "list", Self::list)
                .post("/users", "create", Self::create)
                .get("/users/explode", "explode", Self::explode);
        }
    }
}

pub mod shadow {
    use mvc_router::{Controller, HandlerResult, ModelAndView, Request, RequestMappings, Response};

    /// Declares a key that collides with `UserController`.
    #[derive(Default)]
    pub struct ShadowController;

    impl ShadowController {
        fn list(&self, _req: &Request, _resp: &mut Response) -> HandlerResult {
            Ok(ModelAndView::new("shadow/list").add_object("handler", "shadow"))
        }

        fn about(&self, _req: &Request, _resp: &mut Response) -> HandlerResult {
            Ok(ModelAndView::new("shadow/about"))
        }
    }

    impl Controller for ShadowController {
        fn request_mappings(mappings: &mut RequestMappings<Self>) {
            mappings
                .get("/users", "list", Self::list)
                .get("/about", "about", Self::about);
        }
    }
}

pub mod slow {
    use std::thread;
    use std::time::Duration;

    use mvc_router::{Controller, HandlerResult, ModelAndView, Request, RequestMappings, Response};

    /// How long `SlowController::report` blocks.
    pub const REPORT_DELAY: Duration = Duration::from_secs(2);

    #[derive(Default)]
    pub struct SlowController;

    impl SlowController {
        fn report(&self, _req: &Request, _resp: &mut Response) -> HandlerResult {
            thread::sleep(REPORT_DELAY);
            Ok(ModelAndView::new("report"))
        }

        fn ping(&self, _req: &Request, _resp: &mut Response) -> HandlerResult {
            Ok(ModelAndView::new("pong"))
        }
    }

    impl Controller for SlowController {
        fn request_mappings(mappings: &mut RequestMappings<Self>) {
            mappings
                .get("/report", "report", Self::report)
                .get("/ping", "ping", Self::ping);
        }
    }
}

/// Scan scope containing exactly controller `C`'s module.
pub fn scope_of<C: Controller>() -> String {
    ControllerType::of::<C>().package().to_string()
}

pub fn request(method: &str, uri: &str) -> Request {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Bytes::new())
        .unwrap()
}

/// Start an HTTP server for `dispatcher` on an ephemeral local port.
pub async fn start_server(config: &MvcConfig, dispatcher: Dispatcher) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, dispatcher);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}
