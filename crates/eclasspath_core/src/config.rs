use std::path::PathBuf;

use crate::{
    constants::VCS_METADATA_DIRS, container::ContainerMapping, mapping::PathMappingRule,
};

/// Everything a single resolution run needs besides the entries themselves.
#[derive(Debug, Clone)]
pub struct ResolveConfig {
    /// Base for existence checks on relative locations.
    pub working_dir: PathBuf,
    pub containers: Vec<ContainerMapping>,
    pub mappings: Vec<PathMappingRule>,
    /// Directory names never descended into during jar discovery.
    pub vcs_dirs: Vec<String>,
    pub recursive: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            containers: Vec::new(),
            mappings: Vec::new(),
            vcs_dirs: VCS_METADATA_DIRS.iter().map(|d| d.to_string()).collect(),
            recursive: true,
        }
    }
}
