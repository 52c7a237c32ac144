use tokio::sync::RwLock;

use super::types::Node;

/// Owns the current membership snapshot.
///
/// The snapshot is an ordered list replaced wholesale on every update; readers
/// never observe a partially applied list. In-flight probes hold a leader
/// clone captured at scheduling time, so a replacement cannot corrupt them.
pub struct MembershipStore {
    nodes: RwLock<Vec<Node>>,
}

impl MembershipStore {
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(Vec::new()),
        }
    }

    /// Replaces the snapshot and returns the new leader, if any.
    ///
    /// When multiple nodes claim leadership the first in sequence order wins;
    /// upstream is expected to send at most one.
    pub async fn replace(&self, nodes: Vec<Node>) -> Option<Node> {
        let leader = nodes.iter().find(|node| node.is_leader).cloned();
        *self.nodes.write().await = nodes;
        leader
    }

    /// Current snapshot, in the order it was delivered.
    pub async fn snapshot(&self) -> Vec<Node> {
        self.nodes.read().await.clone()
    }
}

impl Default for MembershipStore {
    fn default() -> Self {
        Self::new()
    }
}
