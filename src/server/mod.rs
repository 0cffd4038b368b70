pub mod api;

pub use api::{build_app, AppState};

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use log::info;
use std::error::Error;
use tower::ServiceExt;

/// Standalone HTTP listener for local or container hosting.
pub struct Server {
    addr: String,
    state: AppState,
}

impl Server {
    pub fn new(addr: String, state: AppState) -> Self {
        Self { addr, state }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let app = api::build_app(self.state.clone());
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        info!("webhook server listening on http://{}", self.addr);
        axum::serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

/// Serverless adapter: drives a single request through the same router
/// the standalone listener serves, for hosts that hand over one HTTP
/// event at a time.
pub async fn handle_event(state: AppState, request: Request<Body>) -> Response {
    let app = api::build_app(state);
    app.oneshot(request)
        .await
        .unwrap_or_else(|infallible| match infallible {})
}
