use anyhow::{Context, Result};
use eclasspath_core::{build_classpath, expand_filesets, load_descriptor};
use log::{debug, info, warn};
use path_clean::clean;

use crate::{config::Config, types::ClasspathReport};

pub fn run_resolve(mut cfg: Config) -> Result<ClasspathReport> {
    info!("Starting classpath resolution");

    // Initialize config (resolve working dir, merge mappings)
    cfg.initialize()?;
    let dir = cfg.working_dir()?.clone();

    debug!("Fetching classpath file {} into entries", cfg.file);
    let entries = load_descriptor(&dir, &cfg.file)
        .with_context(|| format!("Unable to load Eclipse classpath file from {}", dir.display()))?;
    if entries.is_empty() {
        warn!("No classpath entries found in {}", cfg.file);
    }
    info!("Found {} entries in classpath file", entries.len());

    let supplementary =
        expand_filesets(&cfg.resolved_filesets).context("Failed to expand file sets")?;
    debug!("Expanded file sets into {} locations", supplementary.len());

    let locations = build_classpath(&entries, &supplementary, &cfg.resolve)
        .context("Failed to resolve classpath entries")?;
    info!("Resolved {} into {} locations", cfg.path_id, locations.len());

    Ok(ClasspathReport {
        path_id: cfg.path_id.clone(),
        descriptor: clean(dir.join(&cfg.file)),
        entries_read: entries.len(),
        locations,
    })
}
