//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with a single catch-all dispatch handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Buffer the request body and hand the request to the Dispatcher on the
//!   blocking pool, so the timeout layer bounds handler work
//! - Map dispatch outcomes onto HTTP status codes
//!
//! # Outcome Mapping
//! - Handled → handler status (default 200) + JSON `{view, model}`
//! - `redirect:` view → handler status (default 302) + Location
//! - NotFound → 404, unknown method → 405, not ready → 503
//! - Handler failure → 500 (logged with the failing method)
//! - Handler still running after `timeouts.request_secs` → 408

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response as AxumResponse},
    Json, Router,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::MvcConfig;
use crate::http::{ModelAndView, Request, Response};
use crate::routing::{Dispatch, DispatchError, Dispatcher};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub max_body_bytes: usize,
}

/// HTTP front end for a [`Dispatcher`].
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: &MvcConfig, dispatcher: Dispatcher) -> Self {
        let state = AppState {
            dispatcher,
            max_body_bytes: config.listener.max_body_bytes,
        };
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &MvcConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(middleware)
    }

    /// The fully layered router, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: buffer, dispatch, render.
///
/// Handlers are synchronous, so dispatch runs on the blocking pool. The
/// request future stays cancellable and the timeout layer can answer while
/// a slow handler is still running.
async fn dispatch_handler(State(state): State<AppState>, request: axum::extract::Request) -> AxumResponse {
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %parts.uri.path(), error = %e, "Failed to read request body");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body rejected").into_response();
        }
    };
    let request = Request::from_parts(parts, bytes);
    let path = request.uri().path().to_string();
    let method = request.method().clone();

    let dispatcher = state.dispatcher;
    let joined = tokio::task::spawn_blocking(move || {
        let mut response = Response::new();
        let outcome = dispatcher.dispatch(&request, &mut response);
        (outcome, response)
    })
    .await;

    let (outcome, response) = match joined {
        Ok(done) => done,
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Dispatch task did not complete");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Handler failed").into_response();
        }
    };

    match outcome {
        Ok(Dispatch::Handled(mav)) => render(mav, response),
        Ok(Dispatch::NotFound) => {
            tracing::debug!(path = %path, method = %method, "No handler matched");
            (StatusCode::NOT_FOUND, "No handler found").into_response()
        }
        Err(DispatchError::UnknownMethod(e)) => {
            tracing::debug!(path = %path, error = %e, "Rejected method token");
            (StatusCode::METHOD_NOT_ALLOWED, e.to_string()).into_response()
        }
        Err(DispatchError::NotReady(mapping_state)) => {
            tracing::error!(state = %mapping_state, "Request received before handler mapping was ready");
            (StatusCode::SERVICE_UNAVAILABLE, "Handlers not ready").into_response()
        }
        Err(DispatchError::Invocation(e)) => {
            tracing::error!(path = %path, handler = e.method(), error = %e, "Handler failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Handler failed").into_response()
        }
    }
}

fn render(mav: ModelAndView, response: Response) -> AxumResponse {
    let (status, headers) = response.into_parts();

    if let Some(location) = mav.redirect_location() {
        let Ok(location) = HeaderValue::from_str(location) else {
            tracing::error!(view = mav.view(), "Redirect target is not a valid header value");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect").into_response();
        };
        let mut res = (status.unwrap_or(StatusCode::FOUND), headers).into_response();
        res.headers_mut().insert(header::LOCATION, location);
        return res;
    }

    (status.unwrap_or(StatusCode::OK), headers, Json(mav)).into_response()
}
