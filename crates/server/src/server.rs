//! HTTP server lifecycle for the sidecar endpoints.

use std::future::IntoFuture;
use std::net::SocketAddr;

use axum::Router;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::info;

use crate::error::Error;

/// Serves the sidecar router until shut down.
pub struct HealthcheckServer {
    listen_addr: SocketAddr,
    shutdown_token: CancellationToken,
    task_tracker: TaskTracker,
}

impl HealthcheckServer {
    /// Creates a new `HealthcheckServer`.
    #[must_use]
    pub fn new(listen_addr: SocketAddr) -> Self {
        Self {
            listen_addr,
            shutdown_token: CancellationToken::new(),
            task_tracker: TaskTracker::new(),
        }
    }

    /// Binds the listen address and starts serving the router.
    ///
    /// # Errors
    ///
    /// Returns an error if the server was already started or the listen
    /// address cannot be bound.
    pub async fn start(&self, router: Router) -> Result<JoinHandle<()>, Error> {
        if self.task_tracker.is_closed() {
            return Err(Error::AlreadyStarted);
        }

        let listener = tokio::net::TcpListener::bind(self.listen_addr)
            .await
            .map_err(Error::Bind)?;

        info!("healthcheck server listening on {}", self.listen_addr);

        let shutdown_token = self.shutdown_token.clone();
        let handle = self.task_tracker.spawn(async move {
            tokio::select! {
                e = axum::serve(listener, router.into_make_service()).into_future() => {
                    info!("healthcheck server exited {:?}", e);
                }
                () = shutdown_token.cancelled() => {}
            };
        });

        self.task_tracker.close();

        Ok(handle)
    }

    /// Shuts down the server and waits for the serve task to drain.
    pub async fn shutdown(&self) {
        info!("healthcheck server shutting down...");

        self.shutdown_token.cancel();
        self.task_tracker.wait().await;

        info!("healthcheck server shutdown");
    }
}
