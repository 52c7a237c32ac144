use std::sync::Arc;
use tokio::sync::Mutex;

use super::store::MembershipStore;
use super::types::Node;
use crate::health::scheduler::HealthScheduler;
use crate::logbus::service::{LogBus, timestamp};

/// The update ingress: accepts membership snapshots and keeps the leader
/// health schedule in sync with them.
///
/// Snapshot replacement and schedule reset form one logical unit. Updates are
/// serialized through the scheduler mutex, in arrival order, so a second
/// update can never interleave between "replace" and "re-arm".
pub struct MembershipService {
    store: MembershipStore,
    scheduler: Mutex<HealthScheduler>,
    logs: LogBus,
}

impl MembershipService {
    pub fn new(scheduler: HealthScheduler, logs: LogBus) -> Arc<Self> {
        Arc::new(Self {
            store: MembershipStore::new(),
            scheduler: Mutex::new(scheduler),
            logs,
        })
    }

    /// Applies a new membership snapshot.
    ///
    /// Never fails the caller: an empty or leaderless snapshot is a valid,
    /// quiet state that simply suspends health checking.
    pub async fn apply_update(&self, nodes: Vec<Node>) {
        let mut scheduler = self.scheduler.lock().await;

        let count = nodes.len();
        let leader = self.store.replace(nodes).await;

        match leader {
            Some(node) => {
                let interval = scheduler.arm(node.clone());
                tracing::info!(
                    "Health check to leader {} scheduled every {}ms",
                    node.name,
                    interval.as_millis()
                );
                self.logs.publish(format!(
                    "{} Health check to leader {} scheduled every {}ms",
                    timestamp(),
                    node.name,
                    interval.as_millis()
                ));
            }
            None => {
                scheduler.disarm();
                tracing::info!("No leader in server list, health check suspended");
                self.logs
                    .publish(format!("{} No leader server", timestamp()));
            }
        }

        tracing::info!("Updated server list: {} node(s)", count);
        self.logs.publish(format!(
            "{} Updated server list: {} node(s)",
            timestamp(),
            count
        ));
    }

    /// Current membership snapshot.
    pub async fn snapshot(&self) -> Vec<Node> {
        self.store.snapshot().await
    }

    /// Whether a leader probe loop is currently armed.
    pub async fn is_armed(&self) -> bool {
        self.scheduler.lock().await.is_armed()
    }

    /// Leader the probe loop is currently bound to, if armed.
    pub async fn current_leader(&self) -> Option<Node> {
        self.scheduler.lock().await.current_leader().cloned()
    }

    /// Number of times the probe loop has been armed since startup.
    pub async fn schedule_generation(&self) -> u64 {
        self.scheduler.lock().await.generation()
    }
}
