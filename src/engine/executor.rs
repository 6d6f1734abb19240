use crate::core::Runnable;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Runs a worker's entry point on tokio's blocking pool.
///
/// `run` never fails, so the handle only resolves once the worker is done.
/// Must be called from within a tokio runtime.
pub fn spawn_worker(worker: Arc<dyn Runnable>) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        log::debug!("starting worker {}", worker.name());
        worker.run();
    })
}

pub fn spawn_all<I>(workers: I) -> Vec<JoinHandle<()>>
where
    I: IntoIterator<Item = Arc<dyn Runnable>>,
{
    workers.into_iter().map(spawn_worker).collect()
}
