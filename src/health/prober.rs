use std::time::Duration;

use super::types::ProbeError;
use crate::logbus::service::{LogBus, timestamp};
use crate::membership::types::Node;

/// Timeout applied to every probe so a hung leader cannot stall the schedule.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Performs liveness probes against the current leader.
pub struct LeaderProber {
    http_client: reqwest::Client,
    logs: LogBus,
}

impl LeaderProber {
    pub fn new(logs: LogBus) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            logs,
        }
    }

    /// Runs one liveness check against `leader` and records the outcome.
    ///
    /// On success the response body is logged at info level; on failure the
    /// error is logged at error level with the leader's identity. Failures are
    /// terminal for this call; the next scheduled tick is the only retry.
    pub async fn probe(&self, leader: &Node) -> Result<String, ProbeError> {
        let result = self.fetch_health(&leader.health_url()).await;

        match &result {
            Ok(body) => {
                tracing::info!("Leader {} is healthy: {}", leader.name, body);
                self.logs.publish(format!(
                    "{} Leader {} is healthy: {}",
                    timestamp(),
                    leader.name,
                    body
                ));
            }
            Err(e) => {
                tracing::error!("Error checking leader {} health: {}", leader.name, e);
                self.logs.publish(format!(
                    "{} Error checking leader {} health: {}",
                    timestamp(),
                    leader.name,
                    e
                ));
            }
        }

        result
    }

    async fn fetch_health(&self, url: &str) -> Result<String, ProbeError> {
        let response = self
            .http_client
            .get(url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProbeError::BadStatus(response.status()));
        }

        Ok(response.text().await?)
    }
}
