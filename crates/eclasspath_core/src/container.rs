use log::{debug, trace, warn};
use serde::Deserialize;
use std::path::PathBuf;

use crate::{config::ResolveConfig, discovery::discover_jars, error::ResolveError};

/// Associates a container identifier with the directory holding its jars.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContainerMapping {
    pub name: String,
    #[serde(alias = "root")]
    pub path: PathBuf,
}

impl ContainerMapping {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), path: path.into() }
    }
}

/// First mapping whose name equals `name` exactly.
pub fn find_container<'a>(
    containers: &'a [ContainerMapping],
    name: &str,
) -> Option<&'a ContainerMapping> {
    containers.iter().find(|entry| {
        trace!("Checking container '{}' against '{}'", name, entry.name);
        entry.name == name
    })
}

/// Jars provided by the container `name`, or nothing when it is unmapped.
///
/// A relative container root is looked up under the working directory and
/// the jars found there are returned relative to it.
pub fn resolve_container(name: &str, cfg: &ResolveConfig) -> Result<Vec<PathBuf>, ResolveError> {
    debug!("Replacing container path: {}", name);
    let Some(mapping) = find_container(&cfg.containers, name) else {
        warn!("No container mapping configured for '{}'", name);
        return Ok(Vec::new());
    };

    if mapping.path.is_absolute() {
        return discover_jars(&mapping.path, cfg.recursive, &cfg.vcs_dirs);
    }

    let root = cfg.working_dir.join(&mapping.path);
    let jars = discover_jars(&root, cfg.recursive, &cfg.vcs_dirs)?;
    Ok(jars
        .into_iter()
        .map(|jar| match jar.strip_prefix(&cfg.working_dir) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => jar,
        })
        .collect())
}
