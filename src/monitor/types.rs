use serde::Serialize;
use thiserror::Error;

/// Body posted to the monitor's `/register` endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub ip: String,
    pub port: u16,
    pub id: String,
    pub is_leader: bool,
}

/// Outcome of the one-time startup announcement.
///
/// Set once; the core never retries a failed registration on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Unregistered,
    Registered,
    Failed,
}

/// The startup announcement to the monitor failed.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The request never produced a response: connect failure, timeout, DNS.
    #[error("monitor request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The monitor answered, but not with a 2xx status.
    #[error("monitor rejected registration with status {0}")]
    Rejected(reqwest::StatusCode),
}
