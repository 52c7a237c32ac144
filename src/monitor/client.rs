use std::time::Duration;
use tokio::sync::RwLock;

use super::types::{RegisterRequest, RegistrationError, RegistrationState};
use crate::logbus::service::{LogBus, timestamp};

const REGISTER_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the external monitor service.
pub struct MonitorClient {
    http_client: reqwest::Client,
    register_url: String,
    state: RwLock<RegistrationState>,
    logs: LogBus,
}

impl MonitorClient {
    pub fn new(monitor_ip: &str, monitor_port: u16, logs: LogBus) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            register_url: format!("http://{}:{}/register", monitor_ip, monitor_port),
            state: RwLock::new(RegistrationState::Unregistered),
            logs,
        }
    }

    /// One-shot announcement of this node's identity to the monitor.
    ///
    /// On failure the state is recorded as `Failed`, the error is logged, and
    /// the node keeps serving; nothing retries automatically.
    pub async fn register_self(
        &self,
        request: &RegisterRequest,
    ) -> Result<(), RegistrationError> {
        match self.send_registration(request).await {
            Ok(body) => {
                *self.state.write().await = RegistrationState::Registered;
                tracing::info!("Server registered successfully in monitor: {}", body);
                self.logs.publish(format!(
                    "{} Server registered successfully in monitor: {}",
                    timestamp(),
                    body
                ));
                Ok(())
            }
            Err(e) => {
                *self.state.write().await = RegistrationState::Failed;
                tracing::error!("Error registering server: {}", e);
                self.logs
                    .publish(format!("{} Error registering server: {}", timestamp(), e));
                Err(e)
            }
        }
    }

    async fn send_registration(
        &self,
        request: &RegisterRequest,
    ) -> Result<String, RegistrationError> {
        let response = self
            .http_client
            .post(&self.register_url)
            .json(request)
            .timeout(REGISTER_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RegistrationError::Rejected(response.status()));
        }

        Ok(response.text().await?)
    }

    pub async fn state(&self) -> RegistrationState {
        *self.state.read().await
    }
}
