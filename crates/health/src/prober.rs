//! Bounded-timeout HTTP probing of individual cluster members.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::directory::Member;
use crate::error::Error;
use crate::types::{NodeHealth, NodeRole, NodeStatus};

/// Per-request probe timeout. A slow member is operationally equivalent to
/// an unreachable one for readiness purposes.
const PROBE_TIMEOUT: Duration = Duration::from_millis(100);

/// Why a probe failed. Each failure site maps to the role synthesized for
/// the member, so callers degrade instead of discarding the error.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The probe request could not be constructed.
    #[error("building probe request: {0}")]
    BuildRequest(#[source] reqwest::Error),

    /// The member could not be reached before the probe timeout.
    #[error("probe transport: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body could not be read.
    #[error("reading probe body: {0}")]
    Body(#[source] reqwest::Error),

    /// The response body was not decodable.
    #[error("decoding probe body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ProbeError {
    /// The role synthesized for a member whose status probe failed this
    /// way.
    #[must_use]
    pub const fn role(&self) -> NodeRole {
        match self {
            Self::Transport(_) => NodeRole::Unreachable,
            Self::BuildRequest(_) | Self::Body(_) | Self::Decode(_) => NodeRole::Error,
        }
    }
}

/// Issues the status and health queries against one cluster member.
///
/// The two queries are independent: a failure of one never short-circuits
/// the other.
#[async_trait]
pub trait Probe: Send + Sync + 'static {
    /// Queries the member's consensus status.
    async fn status(&self, member: &Member) -> Result<NodeStatus, ProbeError>;

    /// Queries the member's health.
    async fn health(&self, member: &Member) -> Result<NodeHealth, ProbeError>;
}

/// Options for configuring an `HttpProber`.
#[derive(Clone, Debug)]
pub struct HttpProberOptions {
    /// API key presented on status queries.
    pub api_key: String,

    /// Transport scheme members are probed over (`http` or `https`).
    pub protocol: String,

    /// Port the member API listens on.
    pub api_port: u16,
}

/// Probes members over HTTP with a short fixed timeout.
#[derive(Clone, Debug)]
pub struct HttpProber {
    client: Client,
    api_key: String,
    protocol: String,
    api_port: u16,
}

impl HttpProber {
    /// Creates a new `HttpProber`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        HttpProberOptions {
            api_key,
            protocol,
            api_port,
        }: HttpProberOptions,
    ) -> Result<Self, Error> {
        let client = Client::builder().timeout(PROBE_TIMEOUT).build()?;

        Ok(Self {
            client,
            api_key,
            protocol,
            api_port,
        })
    }

    fn url(&self, member: &Member, path: &str) -> String {
        format!(
            "{}://{}:{}{path}",
            self.protocol, member.dial_name, self.api_port
        )
    }

    fn classify_send_error(e: reqwest::Error) -> ProbeError {
        if e.is_builder() {
            ProbeError::BuildRequest(e)
        } else {
            ProbeError::Transport(e)
        }
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn status(&self, member: &Member) -> Result<NodeStatus, ProbeError> {
        let response = self
            .client
            .get(self.url(member, "/status"))
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(Self::classify_send_error)?;

        // The reported role is decoded verbatim regardless of the HTTP
        // status code; an undecodable body degrades to Error.
        let body = response.text().await.map_err(ProbeError::Body)?;
        serde_json::from_str(&body).map_err(ProbeError::Decode)
    }

    async fn health(&self, member: &Member) -> Result<NodeHealth, ProbeError> {
        let response = self
            .client
            .get(self.url(member, "/health"))
            .send()
            .await
            .map_err(Self::classify_send_error)?;

        let body = response.text().await.map_err(ProbeError::Body)?;
        serde_json::from_str(&body).map_err(ProbeError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_failure_maps_to_error_role() {
        let err = ProbeError::Decode(serde_json::from_str::<NodeStatus>("nope").unwrap_err());
        assert_eq!(err.role(), NodeRole::Error);
    }
}
