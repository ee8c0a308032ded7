//! The quorum classifier: reduces one round of per-member statuses to a
//! single cluster-wide status.

use std::collections::BTreeMap;

use crate::types::{ClusterStatus, NodeRole, NodeStatus};

/// Minimum number of members required for a safe commit: majority-of-n.
///
/// `quorum(1) == 1`, `quorum(2) == 1`, `quorum(3) == 2`, `quorum(4) == 2`,
/// `quorum(5) == 3`.
#[must_use]
pub const fn quorum(n: usize) -> usize {
    n.saturating_sub(1) / 2 + 1
}

/// Classifies one round of member statuses.
///
/// Split-brain dominates every other signal: it is the only condition that
/// represents active disagreement rather than mere unavailability. The
/// trailing `NotReady` covers role combinations the branches above cannot
/// produce.
#[must_use]
pub fn classify(statuses: &BTreeMap<String, NodeStatus>) -> ClusterStatus {
    if statuses.is_empty() {
        return ClusterStatus::NotReady;
    }

    let n = statuses.len();
    let mut leaders = 0;
    let mut not_ready = 0;
    let mut unreachable = 0;

    for status in statuses.values() {
        match status.state {
            NodeRole::Leader => leaders += 1,
            NodeRole::NotReady => not_ready += 1,
            NodeRole::Unreachable => unreachable += 1,
            NodeRole::Follower | NodeRole::Candidate | NodeRole::Error => {}
        }
    }

    if leaders > 1 {
        return ClusterStatus::SplitBrain;
    }

    if leaders == 0 {
        // A lone member with no leader is never ready, even when its own
        // probe failed and its role is Error rather than NotReady.
        if n == 1 {
            return ClusterStatus::NotReady;
        }

        // No leader while part of the cluster is unreachable is presumed a
        // reachability problem, not a stuck election.
        if unreachable != 0 {
            return ClusterStatus::NotReady;
        }

        return ClusterStatus::ElectionDeadlock;
    }

    if leaders == 1 {
        // Members that are neither NotReady nor Unreachable are presumed
        // capable of participating in commits.
        if quorum(n) > n - (not_ready + unreachable) {
            return ClusterStatus::NotReady;
        }

        return ClusterStatus::Ok;
    }

    ClusterStatus::NotReady
}
