use crossbeam_channel::{Receiver, Sender};
use std::sync::Mutex;

/// Records which processing units exist.
///
/// Units call `register` once per `run` and never read anything back.
pub trait Registry: Send + Sync {
    fn register(&self, identity: &str);
}

/// Writes `Registered: <identity>` to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRegistry;

impl LogRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl Registry for LogRegistry {
    fn register(&self, identity: &str) {
        log::info!("Registered: {}", identity);
    }
}

/// Keeps registrations in memory, in call order.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    records: Mutex<Vec<String>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn count(&self, identity: &str) -> usize {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|r| r.as_str() == identity)
            .count()
    }
}

impl Registry for MemoryRegistry {
    fn register(&self, identity: &str) {
        log::info!("Registered: {}", identity);
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(identity.to_string());
    }
}

/// Forwards registrations to a channel consumer.
pub struct ChannelRegistry {
    tx: Sender<String>,
}

impl ChannelRegistry {
    /// Creates an unbounded registry together with its receiving end.
    pub fn unbounded() -> (Self, Receiver<String>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }

    pub fn from_sender(tx: Sender<String>) -> Self {
        Self { tx }
    }
}

impl Registry for ChannelRegistry {
    fn register(&self, identity: &str) {
        // A dropped receiver means nobody is watching anymore.
        if self.tx.send(identity.to_string()).is_err() {
            log::debug!("registration of {} dropped: receiver gone", identity);
        }
    }
}
