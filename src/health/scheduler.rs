use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::prober::LeaderProber;
use crate::membership::types::Node;

/// Bounds of the per-update randomized probe interval.
const MIN_PROBE_INTERVAL_MS: u64 = 1_000;
const MAX_PROBE_INTERVAL_MS: u64 = 30_000;

/// Drives the repeating leader health check.
///
/// Two states: `Idle` (no loop) and `Armed` (one probe loop counting down to
/// the next tick, bound to a specific leader and a specific interval). The
/// scheduler owns the only handle to the live loop, and every transition
/// aborts it before spawning a new one, so at most one loop exists at any
/// instant regardless of how often membership changes.
pub struct HealthScheduler {
    prober: Arc<LeaderProber>,
    state: SchedulerState,
    // Bumped on every arm; lets callers tell a re-arm from a no-op.
    generation: u64,
}

enum SchedulerState {
    Idle,
    Armed(ArmedProbe),
}

/// Handle to the single live probe loop.
struct ArmedProbe {
    leader: Node,
    interval: Duration,
    task: JoinHandle<()>,
}

impl HealthScheduler {
    pub fn new(prober: Arc<LeaderProber>) -> Self {
        Self {
            prober,
            state: SchedulerState::Idle,
            generation: 0,
        }
    }

    /// Applies the leader derived from a membership update and returns the
    /// drawn interval when a new loop was armed.
    pub fn apply_leader(&mut self, leader: Option<Node>) -> Option<Duration> {
        match leader {
            Some(node) => Some(self.arm(node)),
            None => {
                self.disarm();
                None
            }
        }
    }

    /// Cancels any live probe loop and arms a new one against `leader`.
    ///
    /// The interval is drawn fresh on every arm, even when the leader is
    /// unchanged; membership updates always reset the schedule.
    pub fn arm(&mut self, leader: Node) -> Duration {
        self.disarm();

        let interval = draw_interval();
        let task = tokio::spawn(probe_loop(self.prober.clone(), leader.clone(), interval));

        self.generation += 1;
        self.state = SchedulerState::Armed(ArmedProbe {
            leader,
            interval,
            task,
        });

        interval
    }

    /// Cancels the live probe loop, if any.
    ///
    /// An in-flight probe is torn down at its next await point; it can no
    /// longer re-arm or outlive the schedule that spawned it.
    pub fn disarm(&mut self) {
        if let SchedulerState::Armed(armed) =
            std::mem::replace(&mut self.state, SchedulerState::Idle)
        {
            armed.task.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, SchedulerState::Armed(_))
    }

    /// Leader the live loop is bound to, if armed.
    pub fn current_leader(&self) -> Option<&Node> {
        match &self.state {
            SchedulerState::Armed(armed) => Some(&armed.leader),
            SchedulerState::Idle => None,
        }
    }

    /// Interval of the live loop, if armed.
    pub fn current_interval(&self) -> Option<Duration> {
        match &self.state {
            SchedulerState::Armed(armed) => Some(armed.interval),
            SchedulerState::Idle => None,
        }
    }

    /// Number of times a loop has been armed since startup.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for HealthScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}

/// Draws the probe period for one arming, uniformly from the inclusive range.
fn draw_interval() -> Duration {
    let millis = rand::thread_rng().gen_range(MIN_PROBE_INTERVAL_MS..=MAX_PROBE_INTERVAL_MS);
    Duration::from_millis(millis)
}

/// The repeating tick bound to one leader and one fixed period.
async fn probe_loop(prober: Arc<LeaderProber>, leader: Node, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    // A slow probe delays the next tick instead of causing a burst.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first interval tick completes immediately; consume it so the first
    // probe lands one full period after arming.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        // Outcome is logged by the prober; the loop never re-arms and never
        // exits on failure.
        let _ = prober.probe(&leader).await;
    }
}
