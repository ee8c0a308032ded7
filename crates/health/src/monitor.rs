//! Orchestration of one aggregation round: probe every member, classify,
//! and derive the readiness verdict.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::classifier::{classify, quorum};
use crate::directory::{Member, NodeDirectory};
use crate::error::Error;
use crate::prober::Probe;
use crate::types::{ClusterReport, ClusterStatus, NodeHealth, NodeObservation, NodeStatus};

/// Stateless cluster-health aggregator.
///
/// Explicitly constructed with its directory and prober and passed by
/// reference to request handlers; holds no mutable state, caches nothing
/// between calls.
#[derive(Clone, Debug)]
pub struct ClusterMonitor<P> {
    directory: NodeDirectory,
    prober: P,
}

impl<P: Probe> ClusterMonitor<P> {
    /// Creates a new `ClusterMonitor`.
    #[must_use]
    pub const fn new(directory: NodeDirectory, prober: P) -> Self {
        Self { directory, prober }
    }

    /// Performs one aggregation round and returns the assembled report.
    ///
    /// Probe failures are degraded into per-member observations and never
    /// abort the round; one bad member must not blank out the whole
    /// report.
    ///
    /// # Errors
    ///
    /// Returns an error only if the member list cannot be resolved. The
    /// caller is expected to render a conservative not-ready report in
    /// that case.
    pub async fn check(&self) -> Result<ClusterReport, Error> {
        let members = self.directory.resolve().await?;

        let observations =
            futures::future::join_all(members.iter().map(|member| self.observe(member))).await;

        let nodes_health_check: BTreeMap<String, NodeObservation> = members
            .into_iter()
            .map(|member| member.id)
            .zip(observations)
            .collect();

        let statuses: BTreeMap<String, NodeStatus> = nodes_health_check
            .iter()
            .map(|(id, observation)| (id.clone(), observation.node_status))
            .collect();

        let cluster_status = classify(&statuses);

        // The healthy quorum is computed against the total probed member
        // count, not the healthy subset.
        let minimum_required = quorum(nodes_health_check.len());
        let healthy_count = nodes_health_check
            .values()
            .filter(|observation| observation.node_health.ok)
            .count();

        let cluster_health =
            healthy_count >= minimum_required && cluster_status == ClusterStatus::Ok;

        debug!(
            "classified cluster as {cluster_status:?}: {healthy_count} healthy of {} (minimum {minimum_required})",
            nodes_health_check.len()
        );

        Ok(ClusterReport {
            cluster_status,
            cluster_health,
            nodes_health_check,
        })
    }

    /// Probes one member. Both queries are always attempted; each failure
    /// is degraded independently.
    async fn observe(&self, member: &Member) -> NodeObservation {
        let (status, health) = tokio::join!(
            self.prober.status(member),
            self.prober.health(member)
        );

        let node_status = match status {
            Ok(status) => status,
            Err(e) => {
                warn!("status probe for {} failed: {e}", member.id);
                NodeStatus::degraded(e.role())
            }
        };

        let node_health = match health {
            Ok(health) => health,
            Err(e) => {
                debug!("health probe for {} failed: {e}", member.id);
                NodeHealth::unhealthy()
            }
        };

        NodeObservation {
            node_status,
            node_health,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use async_trait::async_trait;

    use super::*;
    use crate::directory::NodeDirectoryOptions;
    use crate::prober::ProbeError;
    use crate::types::{NodeRole, ResourceError};

    /// Probe double returning canned per-member results. A member missing
    /// from `statuses` gets a decode failure.
    struct StaticProber {
        statuses: HashMap<String, NodeStatus>,
        healths: HashMap<String, NodeHealth>,
    }

    #[async_trait]
    impl Probe for StaticProber {
        async fn status(&self, member: &Member) -> Result<NodeStatus, ProbeError> {
            self.statuses.get(&member.id).copied().ok_or_else(|| {
                ProbeError::Decode(serde_json::from_str::<NodeStatus>("garbage").unwrap_err())
            })
        }

        async fn health(&self, member: &Member) -> Result<NodeHealth, ProbeError> {
            self.healths.get(&member.id).copied().ok_or_else(|| {
                ProbeError::Decode(serde_json::from_str::<NodeHealth>("garbage").unwrap_err())
            })
        }
    }

    fn nodes_file(entries: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let list: Vec<String> = entries.iter().map(|e| format!("{e}:8107:8108")).collect();
        write!(file, "{}", list.join(",")).unwrap();
        file
    }

    fn directory(file: &tempfile::NamedTempFile) -> NodeDirectory {
        NodeDirectory::new(NodeDirectoryOptions {
            nodes_path: file.path().to_path_buf(),
            peering_port: 8107,
            api_port: 8108,
            namespace: "default".to_string(),
            in_cluster: false,
        })
    }

    fn status(role: NodeRole) -> NodeStatus {
        NodeStatus {
            committed_index: 42,
            queued_writes: 0,
            state: role,
        }
    }

    const HEALTHY: NodeHealth = NodeHealth {
        ok: true,
        resource_error: None,
    };

    #[tokio::test]
    async fn test_healthy_cluster() {
        let file = nodes_file(&["a", "b", "c"]);
        let prober = StaticProber {
            statuses: HashMap::from([
                ("a".to_string(), status(NodeRole::Leader)),
                ("b".to_string(), status(NodeRole::Follower)),
                ("c".to_string(), status(NodeRole::Follower)),
            ]),
            healths: HashMap::from([
                ("a".to_string(), HEALTHY),
                ("b".to_string(), HEALTHY),
                ("c".to_string(), HEALTHY),
            ]),
        };

        let monitor = ClusterMonitor::new(directory(&file), prober);
        let report = monitor.check().await.unwrap();

        assert_eq!(report.cluster_status, ClusterStatus::Ok);
        assert!(report.cluster_health);
        assert_eq!(report.nodes_health_check.len(), 3);
    }

    #[tokio::test]
    async fn test_ok_status_with_unhealthy_quorum_is_not_healthy() {
        // A valid leader and quorum of reachable members, but resource
        // exhaustion on enough members to fall below the healthy quorum.
        let file = nodes_file(&["a", "b", "c"]);
        let exhausted = NodeHealth {
            ok: false,
            resource_error: Some(ResourceError::OutOfMemory),
        };
        let prober = StaticProber {
            statuses: HashMap::from([
                ("a".to_string(), status(NodeRole::Leader)),
                ("b".to_string(), status(NodeRole::Follower)),
                ("c".to_string(), status(NodeRole::Follower)),
            ]),
            healths: HashMap::from([
                ("a".to_string(), HEALTHY),
                ("b".to_string(), exhausted),
                ("c".to_string(), exhausted),
            ]),
        };

        let monitor = ClusterMonitor::new(directory(&file), prober);
        let report = monitor.check().await.unwrap();

        assert_eq!(report.cluster_status, ClusterStatus::Ok);
        assert!(!report.cluster_health);
    }

    #[tokio::test]
    async fn test_probe_failures_degrade_without_dropping_members() {
        // Member "c" fails both probes; it must still appear in the
        // report, tagged with a synthesized role.
        let file = nodes_file(&["a", "b", "c"]);
        let prober = StaticProber {
            statuses: HashMap::from([
                ("a".to_string(), status(NodeRole::Leader)),
                ("b".to_string(), status(NodeRole::Follower)),
            ]),
            healths: HashMap::from([
                ("a".to_string(), HEALTHY),
                ("b".to_string(), HEALTHY),
            ]),
        };

        let monitor = ClusterMonitor::new(directory(&file), prober);
        let report = monitor.check().await.unwrap();

        assert_eq!(report.nodes_health_check.len(), 3);
        let degraded = &report.nodes_health_check["c"];
        assert_eq!(degraded.node_status.state, NodeRole::Error);
        assert!(!degraded.node_health.ok);

        // Two healthy members of three meet quorum, and an Error role does
        // not block classification.
        assert_eq!(report.cluster_status, ClusterStatus::Ok);
        assert!(report.cluster_health);
    }

    #[tokio::test]
    async fn test_split_brain_overrides_healthy_members() {
        let file = nodes_file(&["a", "b"]);
        let prober = StaticProber {
            statuses: HashMap::from([
                ("a".to_string(), status(NodeRole::Leader)),
                ("b".to_string(), status(NodeRole::Leader)),
            ]),
            healths: HashMap::from([
                ("a".to_string(), HEALTHY),
                ("b".to_string(), HEALTHY),
            ]),
        };

        let monitor = ClusterMonitor::new(directory(&file), prober);
        let report = monitor.check().await.unwrap();

        assert_eq!(report.cluster_status, ClusterStatus::SplitBrain);
        assert!(!report.cluster_health);
    }

    #[tokio::test]
    async fn test_identical_rounds_serialize_identically() {
        let file = nodes_file(&["a", "b"]);
        let prober = StaticProber {
            statuses: HashMap::from([
                ("a".to_string(), status(NodeRole::Leader)),
                ("b".to_string(), status(NodeRole::Follower)),
            ]),
            healths: HashMap::from([
                ("a".to_string(), HEALTHY),
                ("b".to_string(), HEALTHY),
            ]),
        };

        let monitor = ClusterMonitor::new(directory(&file), prober);
        let first = serde_json::to_string(&monitor.check().await.unwrap()).unwrap();
        let second = serde_json::to_string(&monitor.check().await.unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_directory_failure_surfaces_as_error() {
        let prober = StaticProber {
            statuses: HashMap::new(),
            healths: HashMap::new(),
        };
        let directory = NodeDirectory::new(NodeDirectoryOptions {
            nodes_path: "/nonexistent/nodes".into(),
            peering_port: 8107,
            api_port: 8108,
            namespace: "default".to_string(),
            in_cluster: false,
        });

        let monitor = ClusterMonitor::new(directory, prober);
        assert!(monitor.check().await.is_err());
    }
}
