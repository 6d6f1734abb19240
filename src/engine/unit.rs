use crate::buffers::BufferStore;
use crate::config::{FlushScope, UnitConfig};
use crate::core::Runnable;
use crate::error::{Result, WorkerError};
use crate::observability::UnitMetrics;
use crate::registry::Registry;
use super::UnitState;
use serde_json::Value;
use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};

/// Display-only size hint: the buffer length, never below `floor`.
pub fn capacity_hint(len: usize, floor: usize) -> usize {
    len.max(floor)
}

/// Outcome of one accepted item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    /// 1-based position of the item among everything this unit accepted.
    pub sequence: u64,
    pub capacity: usize,
    /// The status line written to the log.
    pub line: String,
}

/// Buffers items under one worker identity and flushes after every insert.
///
/// All buffer mutation happens while holding the store lock, so concurrent
/// callers of [`ProcessingUnit::process`] are fully serialized: one caller's
/// append, status line and flush complete before the next caller's append.
pub struct ProcessingUnit<T> {
    config: UnitConfig,
    store: Mutex<BufferStore<T>>,
    state: Mutex<UnitState>,
    registry: Arc<dyn Registry>,
    metrics: Arc<UnitMetrics>,
}

impl<T> ProcessingUnit<T> {
    /// Unit named `DefaultWorker` with default settings.
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self::build(UnitConfig::default(), BufferStore::new(), registry)
    }

    pub fn with_identity(identity: impl Into<String>, registry: Arc<dyn Registry>) -> Self {
        Self::build(UnitConfig::new(identity), BufferStore::new(), registry)
    }

    pub fn with_config(config: UnitConfig, registry: Arc<dyn Registry>) -> Result<Self> {
        Self::with_store(config, BufferStore::new(), registry)
    }

    /// Starts from an already populated store, e.g. one handed over from a
    /// previous unit.
    pub fn with_store(
        config: UnitConfig,
        store: BufferStore<T>,
        registry: Arc<dyn Registry>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, store, registry))
    }

    pub fn from_json(config: Value, registry: Arc<dyn Registry>) -> Result<Self> {
        let config = UnitConfig::from_json(config)?;
        Ok(Self::build(config, BufferStore::new(), registry))
    }

    fn build(config: UnitConfig, store: BufferStore<T>, registry: Arc<dyn Registry>) -> Self {
        let metrics = Arc::new(UnitMetrics::new(config.identity.clone()));
        Self {
            config,
            store: Mutex::new(store),
            state: Mutex::new(UnitState::Idle),
            registry,
            metrics,
        }
    }

    pub fn identity(&self) -> &str {
        &self.config.identity
    }

    pub fn config(&self) -> &UnitConfig {
        &self.config
    }

    pub fn metrics(&self) -> Arc<UnitMetrics> {
        self.metrics.clone()
    }

    pub fn state(&self) -> UnitState {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Items currently buffered under this unit's identity.
    pub fn buffered_len(&self) -> usize {
        self.buffered_len_of(&self.config.identity)
    }

    pub fn buffered_len_of(&self, identity: &str) -> usize {
        self.lock_store().len_of(identity)
    }

    fn lock_store(&self) -> MutexGuard<'_, BufferStore<T>> {
        self.store.lock().unwrap_or_else(|poisoned| {
            log::warn!("buffer store of {} was poisoned, recovering", self.config.identity);
            let guard = poisoned.into_inner();
            self.store.clear_poison();
            guard
        })
    }

    fn set_state(&self, next: UnitState) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !state.can_transition_to(&next) {
            log::debug!(
                "{}: ignoring transition {} -> {}",
                self.config.identity,
                state.name(),
                next.name()
            );
            return;
        }
        *state = next;
    }

    fn flush(&self, store: &mut BufferStore<T>) {
        if store.len_of(&self.config.identity) == 0 {
            return;
        }
        match self.config.flush_scope {
            FlushScope::AllWorkers => store.clear_all(),
            FlushScope::OwnIdentity => store.clear(&self.config.identity),
        }
        self.metrics.record_flush();
    }
}

impl<T: Display + Clone> ProcessingUnit<T> {
    /// Accepts one item; `None` is the absent marker and does nothing.
    pub fn process(&self, item: Option<T>) -> Result<Option<Processed>> {
        self.process_with(item, false)
    }

    /// `force` is reserved and currently has no effect.
    pub fn process_with(&self, item: Option<T>, _force: bool) -> Result<Option<Processed>> {
        let Some(item) = item else {
            self.metrics.record_item_skipped();
            return Ok(None);
        };

        let mut store = self.lock_store();
        let start = self.metrics.start_processing();
        let active = ActiveSection::enter(self);

        let shown = item.to_string();
        let mut buffer = store.get_or_create(&self.config.identity);
        buffer.push(item);
        let capacity = capacity_hint(buffer.len(), self.config.capacity_floor);
        store.put(self.config.identity.clone(), buffer);

        let line = format!("Processed {} at capacity {}", shown, capacity);
        log::info!("{}", line);
        let sequence = self.metrics.record_item_accepted();

        self.flush(&mut store);
        drop(active);
        drop(store);
        self.metrics.finish_processing(start);

        Ok(Some(Processed {
            sequence,
            capacity,
            line,
        }))
    }
}

/// Marks the unit `Processing` for the lifetime of the guard, including
/// when the section unwinds.
struct ActiveSection<'a, T> {
    unit: &'a ProcessingUnit<T>,
}

impl<'a, T> ActiveSection<'a, T> {
    fn enter(unit: &'a ProcessingUnit<T>) -> Self {
        unit.set_state(UnitState::Processing);
        Self { unit }
    }
}

impl<T> Drop for ActiveSection<'_, T> {
    fn drop(&mut self) {
        self.unit.set_state(UnitState::Idle);
    }
}

impl<T: Display + Clone + Send> Runnable for ProcessingUnit<T> {
    fn run(&self) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.registry.register(&self.config.identity);
            self.process(None)
        }));

        let error = match outcome {
            Ok(Ok(_)) => return,
            Ok(Err(e)) => e,
            Err(payload) => WorkerError::Panicked(panic_message(payload.as_ref())),
        };

        log::error!("worker {} failed: {}", self.config.identity, error);
        self.metrics.record_run_failure();
        self.set_state(UnitState::Failed {
            error_msg: error.to_string(),
        });
    }

    fn name(&self) -> &str {
        &self.config.identity
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
