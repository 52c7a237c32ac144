//! Runtime Configuration
//!
//! Everything is read once from the environment at startup. Absent variables
//! fall back to local-development defaults; invalid numeric values abort
//! startup with a contextual error.

use anyhow::{Context, Result};
use std::net::SocketAddr;

/// Node configuration assembled from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to (`IP_ADDRESS` + `PORT`).
    pub bind_addr: SocketAddr,
    /// Name this node advertises to the monitor (`SERVER_NAME`).
    pub node_name: String,
    /// Address other nodes reach this node at (`HOST_IP` + `PORT_HOST`).
    pub host_ip: String,
    pub host_port: u16,
    /// Stable identifier for this node (`SERVER_ID`, random UUID if unset).
    pub node_id: String,
    /// Whether this node claims leadership when registering (`IS_LEADER`).
    pub is_leader: bool,
    /// Monitor service this node announces itself to (`MONITOR_IP` + `MONITOR_PORT`).
    pub monitor_ip: String,
    pub monitor_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let ip = env_or("IP_ADDRESS", "127.0.0.1");
        let port: u16 = env_or("PORT", "3000")
            .parse()
            .context("PORT must be a valid port number")?;
        let bind_addr: SocketAddr = format!("{}:{}", ip, port)
            .parse()
            .context("IP_ADDRESS/PORT do not form a valid socket address")?;

        let host_ip = env_or("HOST_IP", &ip);
        let host_port: u16 = env_or("PORT_HOST", &port.to_string())
            .parse()
            .context("PORT_HOST must be a valid port number")?;

        let monitor_port: u16 = env_or("MONITOR_PORT", "9000")
            .parse()
            .context("MONITOR_PORT must be a valid port number")?;

        Ok(Self {
            bind_addr,
            node_name: env_or("SERVER_NAME", "watchdog-node"),
            host_ip,
            host_port,
            node_id: std::env::var("SERVER_ID")
                .unwrap_or_else(|_| uuid::Uuid::new_v4().to_string()),
            is_leader: env_or("IS_LEADER", "true")
                .parse()
                .context("IS_LEADER must be true or false")?,
            monitor_ip: env_or("MONITOR_IP", "127.0.0.1"),
            monitor_port,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults_are_usable() {
        let config = Config::from_env().expect("defaults should parse");

        assert!(!config.node_name.is_empty());
        assert!(!config.node_id.is_empty());
        assert!(!config.monitor_ip.is_empty());
    }

    #[test]
    fn test_generated_node_ids_are_unique() {
        let a = Config::from_env().unwrap();
        let b = Config::from_env().unwrap();

        // SERVER_ID is unset in the test environment, so each call draws a UUID
        if std::env::var("SERVER_ID").is_err() {
            assert_ne!(a.node_id, b.node_id);
        }
    }
}
