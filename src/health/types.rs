use thiserror::Error;

/// Failure modes of a single leader probe.
///
/// All variants are terminal for the probe call that produced them; nothing
/// retries inside a tick and nothing escalates past the probe loop.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The request never produced a response: connect failure, timeout, DNS.
    #[error("request to leader failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The leader answered, but not with a 2xx status.
    #[error("leader answered with status {0}")]
    BadStatus(reqwest::StatusCode),
}
