use chrono::Utc;
use tokio::sync::broadcast;

/// Fan-out buffer size; a lagging observer skips dropped lines.
const CHANNEL_CAPACITY: usize = 256;

/// Fan-out channel for live log observers.
///
/// Publishing never blocks and never fails: with no observers attached the
/// line is simply dropped.
#[derive(Clone)]
pub struct LogBus {
    tx: broadcast::Sender<String>,
}

impl LogBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Pushes one line to every connected observer.
    pub fn publish(&self, line: impl Into<String>) {
        // A send error just means no observers are attached right now.
        let _ = self.tx.send(line.into());
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for LogBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Timestamp prefix used on broadcast lines.
pub fn timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
