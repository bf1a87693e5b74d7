//! Runtime bootstrap for streaming top-N dataflows.

use anyhow::{anyhow, Result};
use tracing::{info, Level};

pub mod metrics;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_max_level(Level::INFO)
        .try_init();
}

/// Start a single-process timely runtime with `workers` threads and run
/// `f` once per worker with its index. Blocks until every worker has
/// drained its dataflows.
pub fn start_runtime<F>(workers: usize, f: F) -> Result<()>
where
    F: Fn(usize, &mut timely::worker::Worker<timely::communication::allocator::Generic>)
        + Clone
        + Send
        + Sync
        + 'static,
{
    info!(%workers, "starting timely runtime");
    let guards = timely::execute(timely::Config::process(workers.max(1)), move |worker| {
        let index = worker.index();
        f(index, worker);
    })
    .map_err(|e| anyhow!("timely runtime failed to start: {e}"))?;

    for outcome in guards.join() {
        outcome.map_err(|e| anyhow!("worker failed: {e}"))?;
    }
    Ok(())
}
