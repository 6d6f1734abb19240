use std::sync::Arc;
use workbuffer::core::Runnable;
use workbuffer::engine::{spawn_worker, ProcessingUnit};
use workbuffer::registry::LogRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let registry = Arc::new(LogRegistry::new());

    // Default worker fed inline
    let unit: ProcessingUnit<&str> = ProcessingUnit::new(registry.clone());
    for item in ["a", "b"] {
        unit.process(Some(item))?;
        log::debug!("{} items left buffered", unit.buffered_len());
    }

    // A configured worker started by the runtime
    let config = serde_json::json!({
        "identity": "ingest",
        "flush_scope": "own_identity"
    });
    let ingest: Arc<ProcessingUnit<String>> =
        Arc::new(ProcessingUnit::from_json(config, registry)?);
    spawn_worker(ingest.clone() as Arc<dyn Runnable>).await?;

    let metrics = ingest.metrics();
    log::info!(
        "{}: {} accepted, {} skipped, state {}",
        metrics.identity(),
        metrics.items_accepted(),
        metrics.items_skipped(),
        ingest.state().name()
    );

    Ok(())
}
