use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::Config;
use crate::shutdown::ShutdownToken;

use super::walk::{TreeWalker, WalkReport};

/// Top-level entry for one run.
/// - Validates the config before touching the tree.
/// - Runs the walk sequentially, or inside a dedicated rayon pool when fan-out is enabled.
/// - Returns the run totals; the first fatal error aborts the run.
pub fn run(config: &Config, shutdown: &ShutdownToken) -> Result<WalkReport> {
    config.validate()?;

    let walker = TreeWalker::new(config, shutdown);
    let report = match config.jobs {
        Some(n) if config.is_parallel() => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .thread_name(|i| format!("find-replace-{i}"))
                .build()
                .context("build worker pool")?;
            debug!(threads = pool.current_num_threads(), "walking with subtree fan-out");
            pool.install(|| walker.walk())?
        }
        _ => walker.walk()?,
    };

    info!(
        root = %config.root.display(),
        dry_run = config.dry_run,
        rewritten = report.files_rewritten,
        renamed = report.renamed,
        "Done"
    );
    Ok(report)
}
