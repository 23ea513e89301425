use ignore::{DirEntry, WalkBuilder};
use log::{debug, trace, warn};
use std::{
    io,
    path::{Path, PathBuf},
};

use crate::{constants::JAR_SUFFIX, error::ResolveError};

/// Collect the jar files under `root`.
///
/// Directories named in `vcs_dirs` are never entered. Symlinked directories
/// are followed, but a link pointing back at one of its ancestors is skipped
/// with a warning instead of being walked again, and so is a dangling link.
/// A missing root yields no jars; any other I/O failure during the walk is
/// returned.
pub fn discover_jars(
    root: &Path,
    recursive: bool,
    vcs_dirs: &[String],
) -> Result<Vec<PathBuf>, ResolveError> {
    debug!("Extracting jar files from folder {}", root.display());
    if !root.is_dir() {
        debug!("Jar root {} is not a directory", root.display());
        return Ok(Vec::new());
    }

    let excluded = vcs_dirs.to_vec();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(true)
        .max_depth(if recursive { None } else { Some(1) })
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |dent| !is_excluded_dir(dent, &excluded))
        .build();

    let mut jars = Vec::new();
    for res in walker {
        let dent = match res {
            Ok(dent) => dent,
            Err(err) if is_loop(&err) => {
                warn!("Skipping directory cycle under {}: {}", root.display(), err);
                continue;
            }
            Err(err) if is_dangling(&err) => {
                warn!("Skipping broken link under {}: {}", root.display(), err);
                continue;
            }
            Err(source) => {
                return Err(ResolveError::Scan { path: root.to_path_buf(), source });
            }
        };

        let is_file = dent.file_type().is_some_and(|t| t.is_file());
        if is_file && dent.file_name().to_string_lossy().ends_with(JAR_SUFFIX) {
            trace!("Found jar: {}", dent.path().display());
            jars.push(dent.path().to_path_buf());
        }
    }

    debug!("Discovered {} jar files under {}", jars.len(), root.display());
    Ok(jars)
}

fn is_excluded_dir(dent: &DirEntry, vcs_dirs: &[String]) -> bool {
    if dent.depth() == 0 || !dent.file_type().is_some_and(|t| t.is_dir()) {
        return false;
    }
    let name = dent.file_name();
    let excluded = vcs_dirs.iter().any(|d| name == d.as_str());
    if excluded {
        trace!("Skipping version-control directory: {}", dent.path().display());
    }
    excluded
}

fn is_loop(err: &ignore::Error) -> bool {
    match err {
        ignore::Error::Loop { .. } => true,
        ignore::Error::WithPath { err, .. }
        | ignore::Error::WithDepth { err, .. }
        | ignore::Error::WithLineNumber { err, .. } => is_loop(err),
        _ => false,
    }
}

fn is_dangling(err: &ignore::Error) -> bool {
    err.io_error().is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}
