//! Wire types shared between the probers, the classifier, and the HTTP layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Consensus role a member reports, or a locally synthesized failure state.
///
/// `Error` and `Unreachable` are never reported by a member; they are
/// synthesized when a probe fails or returns a malformed body.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeRole {
    /// Member believes itself the elected leader.
    Leader,
    /// Member is replicating from a leader.
    Follower,
    /// Member is campaigning in an election.
    Candidate,
    /// Member is up but not ready to participate in commits.
    NotReady,
    /// Probe could not be built or its body could not be decoded.
    Error,
    /// Probe transport failed; the member could not be reached.
    Unreachable,
}

/// Point-in-time consensus state of one member, as reported by its status
/// endpoint.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NodeStatus {
    /// Index of the last committed write.
    pub committed_index: i64,
    /// Depth of the member's write queue.
    pub queued_writes: i64,
    /// Consensus role the member reports.
    pub state: NodeRole,
}

impl NodeStatus {
    /// Status synthesized for a member whose probe failed.
    #[must_use]
    pub const fn degraded(state: NodeRole) -> Self {
        Self {
            committed_index: 0,
            queued_writes: 0,
            state,
        }
    }
}

/// Resource exhaustion reported by a member's health endpoint.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceError {
    /// Member is out of memory.
    OutOfMemory,
    /// Member is out of disk space.
    OutOfDisk,
}

/// Health of one member. A failed or undecodable health probe degrades to
/// `ok = false`, never to "unknown".
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NodeHealth {
    /// Whether the member reports itself healthy.
    pub ok: bool,
    /// Resource exhaustion, when the member reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_error: Option<ResourceError>,
}

impl NodeHealth {
    /// Health synthesized for a member whose probe failed.
    #[must_use]
    pub const fn unhealthy() -> Self {
        Self {
            ok: false,
            resource_error: None,
        }
    }
}

/// Combined status and health of one member for a single aggregation call.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NodeObservation {
    /// Consensus state of the member.
    pub node_status: NodeStatus,
    /// Health of the member.
    pub node_health: NodeHealth,
}

/// Cluster-wide status derived from one round of member observations.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterStatus {
    /// A single leader exists and a quorum of members can commit.
    Ok,
    /// More than one member simultaneously believes itself leader.
    SplitBrain,
    /// The cluster cannot safely serve traffic.
    NotReady,
    /// No leader exists despite every member being reachable.
    ElectionDeadlock,
}

/// The externally visible artifact of one aggregation call.
///
/// Serializes to the wire contract consumed by the readiness endpoint:
/// `cluster_status`, `cluster_health`, and `nodes_health_check` keyed by
/// member identifier.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ClusterReport {
    /// Derived cluster-wide status.
    pub cluster_status: ClusterStatus,
    /// The single boolean the readiness probe acts on.
    pub cluster_health: bool,
    /// Per-member observations, one per configured member.
    pub nodes_health_check: BTreeMap<String, NodeObservation>,
}

impl ClusterReport {
    /// Conservative report used when aggregation itself failed.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            cluster_status: ClusterStatus::NotReady,
            cluster_health: false,
            nodes_health_check: BTreeMap::new(),
        }
    }
}
