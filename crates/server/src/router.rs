//! Router building for the sidecar endpoints.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use searchwatch_health::{ClusterMonitor, Probe};

use crate::handlers::{index_handler, livez_handler, readyz_handler};

/// Status page branding.
#[derive(Clone, Debug)]
pub struct PageConfig {
    /// Page title.
    pub title: String,
    /// Logo URL, empty to omit the logo.
    pub logo: String,
}

/// Shared state injected into the handlers.
#[derive(Debug)]
pub struct Context<P> {
    /// The aggregator run once per readiness request.
    pub monitor: Arc<ClusterMonitor<P>>,
    /// Status page branding.
    pub page: PageConfig,
}

impl<P> Clone for Context<P> {
    fn clone(&self) -> Self {
        Self {
            monitor: self.monitor.clone(),
            page: self.page.clone(),
        }
    }
}

/// Builds the sidecar router: `/` (status page), `/livez`, `/readyz`.
pub fn build_router<P: Probe>(ctx: Context<P>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/livez", get(livez_handler))
        .route("/readyz", get(readyz_handler))
        .with_state(ctx)
}
