use log::{trace, warn};

use crate::{
    config::ResolveConfig,
    container::resolve_container,
    error::ResolveError,
    types::{ClasspathEntry, EntryKind},
};

/// Candidate location strings for one descriptor entry, before mapping rules.
///
/// Source and output folders contribute nothing. A library contributes its
/// raw path. A container contributes the jars found under its mapped root.
/// Unknown kinds are reported and contribute nothing.
pub fn resolve_entry(
    entry: &ClasspathEntry,
    cfg: &ResolveConfig,
) -> Result<Vec<String>, ResolveError> {
    match &entry.kind {
        EntryKind::Source | EntryKind::Output => {
            trace!("Skipping {} entry: {}", entry.kind, entry.path);
            Ok(Vec::new())
        }
        EntryKind::Library => Ok(vec![entry.path.clone()]),
        EntryKind::Container => {
            let jars = resolve_container(&entry.path, cfg)?;
            Ok(jars
                .into_iter()
                .filter_map(|jar| match jar.into_os_string().into_string() {
                    Ok(location) => Some(location),
                    Err(raw) => {
                        warn!("Error processing [{}]: path is not valid UTF-8", raw.to_string_lossy());
                        None
                    }
                })
                .collect())
        }
        EntryKind::Unknown(raw) => {
            warn!("Unsupported kind of classpath entry '{}' ({})", raw, entry.path);
            Ok(Vec::new())
        }
    }
}
