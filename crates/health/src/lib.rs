//! Cluster-health aggregation for a distributed search-engine cluster.
//!
//! This crate provides:
//! - Wire types for per-node consensus state and the aggregated report
//! - Member-list resolution (`NodeDirectory`)
//! - Bounded-timeout HTTP probing of cluster members (`HttpProber`)
//! - The quorum classifier and the `ClusterMonitor` aggregator
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod classifier;
mod directory;
mod error;
mod monitor;
mod prober;
mod types;

pub use classifier::{classify, quorum};
pub use directory::{Member, NodeDirectory, NodeDirectoryOptions};
pub use error::Error;
pub use monitor::ClusterMonitor;
pub use prober::{HttpProber, HttpProberOptions, Probe, ProbeError};
pub use types::{
    ClusterReport, ClusterStatus, NodeHealth, NodeObservation, NodeRole, NodeStatus, ResourceError,
};
