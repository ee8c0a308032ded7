//! Handlers for the sidecar endpoints.

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Json, Response};
use searchwatch_health::{ClusterReport, Probe};
use tracing::error;

use crate::page::render_status_page;
use crate::router::Context;

/// Handler for the `/livez` endpoint. Process liveness only; performs no
/// probing.
pub async fn livez_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], ".")
}

/// Handler for the `/readyz` endpoint. Runs one aggregation round and maps
/// the verdict onto the response status:
/// - 200 when the cluster is healthy
/// - 503 when the report computed but the cluster is not healthy
/// - 500 when aggregation itself failed; the body is then a conservative
///   not-ready report
pub async fn readyz_handler<P: Probe>(State(ctx): State<Context<P>>) -> Response {
    let (status, report) = match ctx.monitor.check().await {
        Ok(report) => {
            let status = if report.cluster_health {
                StatusCode::OK
            } else {
                StatusCode::SERVICE_UNAVAILABLE
            };
            (status, report)
        }
        Err(e) => {
            error!("error getting cluster health: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ClusterReport::unavailable(),
            )
        }
    };

    (status, Json(report)).into_response()
}

/// Handler for the `/` status page.
pub async fn index_handler<P: Probe>(State(ctx): State<Context<P>>) -> Html<String> {
    Html(render_status_page(&ctx.page))
}
