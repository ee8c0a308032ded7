//! Resolution of the static member list into per-member connection
//! endpoints.

use std::path::PathBuf;

use tracing::debug;

use crate::error::Error;

/// One configured cluster member.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Member {
    /// Member identifier: the configured entry with the port suffix
    /// stripped.
    pub id: String,
    /// Name to dial when probing this member.
    pub dial_name: String,
}

/// Options for configuring a `NodeDirectory`.
#[derive(Clone, Debug)]
pub struct NodeDirectoryOptions {
    /// Path of the mounted member list: comma-separated
    /// `host:peeringPort:apiPort` triples.
    pub nodes_path: PathBuf,

    /// Peering port the member list entries carry.
    pub peering_port: u16,

    /// API port the member list entries carry.
    pub api_port: u16,

    /// Namespace used for in-cluster name resolution.
    pub namespace: String,

    /// Whether members are dialed via cluster-internal service names
    /// instead of the configured hosts.
    pub in_cluster: bool,
}

/// Resolves the configured member list into per-member connection
/// endpoints. The list is read on every call; the file is mounted and may
/// be rewritten underneath us.
#[derive(Clone, Debug)]
pub struct NodeDirectory {
    nodes_path: PathBuf,
    port_suffix: String,
    namespace: String,
    in_cluster: bool,
}

impl NodeDirectory {
    /// Creates a new `NodeDirectory`.
    #[must_use]
    pub fn new(
        NodeDirectoryOptions {
            nodes_path,
            peering_port,
            api_port,
            namespace,
            in_cluster,
        }: NodeDirectoryOptions,
    ) -> Self {
        Self {
            nodes_path,
            port_suffix: format!(":{peering_port}:{api_port}"),
            namespace,
            in_cluster,
        }
    }

    /// Resolves the ordered set of configured members.
    ///
    /// # Errors
    ///
    /// Returns an error if the member list cannot be read or resolves to
    /// zero members. Zero members must never be misclassified as a healthy
    /// single-node cluster.
    pub async fn resolve(&self) -> Result<Vec<Member>, Error> {
        let raw = tokio::fs::read_to_string(&self.nodes_path)
            .await
            .map_err(|e| Error::Io("reading member list", e))?;

        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::NoMembers);
        }

        let members: Vec<Member> = raw
            .split(',')
            .map(|entry| {
                let id = entry.strip_suffix(&self.port_suffix).unwrap_or(entry);
                Member {
                    id: id.to_string(),
                    dial_name: self.dial_name(id),
                }
            })
            .collect();

        debug!("resolved {} members from member list", members.len());

        Ok(members)
    }

    fn dial_name(&self, id: &str) -> String {
        if self.in_cluster {
            format!("{id}.{}.svc.cluster.local", self.namespace)
        } else {
            id.to_string()
        }
    }
}
