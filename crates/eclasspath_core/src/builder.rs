use log::{debug, trace, warn};
use std::path::{Path, PathBuf};

use crate::{
    config::ResolveConfig,
    error::ResolveError,
    mapping::apply_rules,
    resolver::resolve_entry,
    types::{ClasspathEntry, EntryKind, OrderedClasspath},
};

/// Accumulates resolved locations in descriptor order.
pub struct ClasspathBuilder<'a> {
    cfg: &'a ResolveConfig,
    classpath: OrderedClasspath,
}

impl<'a> ClasspathBuilder<'a> {
    pub fn new(cfg: &'a ResolveConfig) -> Self {
        Self { cfg, classpath: OrderedClasspath::new() }
    }

    /// Resolve one entry and append its locations, returning how many were added.
    ///
    /// A location that cannot be turned into a path is logged and skipped.
    /// Only scan failures abort.
    pub fn add_entry(&mut self, entry: &ClasspathEntry) -> Result<usize, ResolveError> {
        debug!("Found {} with {}", entry.kind, entry.path);
        let candidates = resolve_entry(entry, self.cfg)?;

        let mut added = 0;
        for candidate in candidates {
            match locate(&entry.kind, &candidate, self.cfg) {
                Ok(location) => {
                    debug!("Adding {}", location.display());
                    self.classpath.push(location);
                    added += 1;
                }
                Err(e) => warn!("Error processing [{}]: {}", candidate, e),
            }
        }
        Ok(added)
    }

    pub fn add_entries(&mut self, entries: &[ClasspathEntry]) -> Result<(), ResolveError> {
        for entry in entries {
            self.add_entry(entry)?;
        }
        Ok(())
    }

    /// Append already-resolved locations after everything added so far.
    pub fn add_supplementary<I>(&mut self, locations: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for location in locations {
            debug!("Adding file {}", location.display());
            self.classpath.push(location);
        }
    }

    pub fn build(self) -> OrderedClasspath {
        self.classpath
    }
}

/// Resolve every entry, then append the supplementary locations.
pub fn build_classpath(
    entries: &[ClasspathEntry],
    supplementary: &[PathBuf],
    cfg: &ResolveConfig,
) -> Result<OrderedClasspath, ResolveError> {
    debug!("Building classpath from {} entries", entries.len());
    let mut builder = ClasspathBuilder::new(cfg);
    builder.add_entries(entries)?;
    builder.add_supplementary(supplementary.iter().cloned());
    let classpath = builder.build();
    debug!("Built classpath with {} locations", classpath.len());
    Ok(classpath)
}

/// Turn a candidate string into its final location.
///
/// Absolute locations are kept as is. Relative ones go through the mapping
/// rules when they come from a library or do not exist under the working
/// directory.
fn locate(kind: &EntryKind, candidate: &str, cfg: &ResolveConfig) -> Result<PathBuf, ResolveError> {
    validate(candidate)?;
    let path = Path::new(candidate);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    if *kind == EntryKind::Library || !cfg.working_dir.join(path).exists() {
        let mapped = apply_rules(&cfg.mappings, candidate);
        trace!("Mapped relative location '{}' to '{}'", candidate, mapped);
        validate(&mapped)?;
        return Ok(PathBuf::from(mapped));
    }

    Ok(path.to_path_buf())
}

fn validate(location: &str) -> Result<(), ResolveError> {
    if location.is_empty() || location.contains('\0') {
        return Err(ResolveError::InvalidLocation(location.to_string()));
    }
    Ok(())
}
