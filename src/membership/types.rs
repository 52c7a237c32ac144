use serde::{Deserialize, Serialize};

/// Represents a single member of the cluster as reported by the monitor.
///
/// Nodes are immutable value snapshots: a membership update replaces the whole
/// set, the system never mutates a `Node` in place. The wire format uses
/// camelCase field names (`isLeader`), and a node that omits the leader flag
/// is treated as a follower.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub name: String,
    pub ip: String,
    pub port: u16,
    #[serde(default)]
    pub is_leader: bool,
}

impl Node {
    /// URL of this node's health endpoint, as probed by its peers.
    pub fn health_url(&self) -> String {
        format!("http://{}:{}/health", self.ip, self.port)
    }
}
