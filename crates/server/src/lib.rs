//! HTTP surface of the readiness sidecar: liveness and readiness
//! endpoints plus the HTML status page.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;
mod handlers;
mod page;
mod router;
mod server;

pub use error::Error;
pub use router::{Context, PageConfig, build_router};
pub use server::HealthcheckServer;
