use ignore::{
    DirEntry, WalkBuilder,
    overrides::{Override, OverrideBuilder},
};
use log::{debug, trace, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{constants::VCS_METADATA_DIRS, error::ResolveError};

/// A directory plus gitignore-style globs selecting files and folders in it.
///
/// With no includes every path under `dir` is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileSet {
    pub dir: PathBuf,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
}

impl FileSet {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), ..Default::default() }
    }

    pub fn include(mut self, glob: impl Into<String>) -> Self {
        self.includes.push(glob.into());
        self
    }

    pub fn exclude(mut self, glob: impl Into<String>) -> Self {
        self.excludes.push(glob.into());
        self
    }
}

/// Selected files first, then selected directories, each under `set.dir`.
///
/// Version-control metadata directories are never entered, and an excluded
/// directory drops everything beneath it.
pub fn expand_fileset(set: &FileSet) -> Result<Vec<PathBuf>, ResolveError> {
    debug!("Expanding file set rooted at {}", set.dir.display());
    if !set.dir.is_dir() {
        warn!("File set directory {} does not exist", set.dir.display());
        return Ok(Vec::new());
    }

    let includes = build_matcher(&set.dir, &set.includes)?;
    let excludes = build_matcher(&set.dir, &set.excludes)?;

    let walker = WalkBuilder::new(&set.dir)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |dent| !is_pruned(dent, &excludes))
        .build();

    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for res in walker {
        let dent = res.map_err(|source| ResolveError::Scan { path: set.dir.clone(), source })?;
        if dent.depth() == 0 {
            continue;
        }

        let is_dir = dent.file_type().is_some_and(|t| t.is_dir());
        let path = dent.path();
        let included = set.includes.is_empty() || includes.matched(path, is_dir).is_whitelist();
        if !included {
            continue;
        }

        trace!("File set selected {}", path.display());
        if is_dir {
            dirs.push(path.to_path_buf());
        } else {
            files.push(path.to_path_buf());
        }
    }

    debug!("File set {} selected {} files and {} folders", set.dir.display(), files.len(), dirs.len());
    files.append(&mut dirs);
    Ok(files)
}

/// Expand every set in declaration order.
pub fn expand_filesets(sets: &[FileSet]) -> Result<Vec<PathBuf>, ResolveError> {
    let mut locations = Vec::new();
    for set in sets {
        locations.extend(expand_fileset(set)?);
    }
    Ok(locations)
}

fn is_pruned(dent: &DirEntry, excludes: &Override) -> bool {
    if dent.depth() == 0 {
        return false;
    }
    let is_dir = dent.file_type().is_some_and(|t| t.is_dir());
    if is_dir && VCS_METADATA_DIRS.iter().any(|d| dent.file_name() == *d) {
        trace!("Skipping version-control directory: {}", dent.path().display());
        return true;
    }
    let excluded = excludes.matched(dent.path(), is_dir).is_whitelist();
    if excluded {
        trace!("File set excluded {}", dent.path().display());
    }
    excluded
}

fn build_matcher(dir: &Path, globs: &[String]) -> Result<Override, ResolveError> {
    let mut builder = OverrideBuilder::new(dir);
    for glob in globs {
        builder
            .add(glob)
            .map_err(|source| ResolveError::InvalidGlob { pattern: glob.clone(), source })?;
    }
    builder
        .build()
        .map_err(|source| ResolveError::InvalidGlob { pattern: globs.join(","), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, path: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, b"").expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_include_glob_selects_matching_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let a = touch(root, "a.jar");
        let nested = touch(root, "ext/b.jar");
        touch(root, "readme.txt");

        let set = FileSet::new(root).include("*.jar");
        let selected = expand_fileset(&set).unwrap();
        assert_eq!(selected, vec![a, nested]);
    }

    #[test]
    fn test_exclude_glob_removes_matches() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let kept = touch(root, "a.jar");
        touch(root, "a-sources.jar");

        let set = FileSet::new(root).include("*.jar").exclude("*-sources.jar");
        assert_eq!(expand_fileset(&set).unwrap(), vec![kept]);
    }

    #[test]
    fn test_files_come_before_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("aaa-classes")).unwrap();
        let file = touch(root, "zzz.properties");

        let set = FileSet::new(root);
        let selected = expand_fileset(&set).unwrap();
        assert_eq!(selected, vec![file, root.join("aaa-classes")]);
    }

    #[test]
    fn test_directory_globs_select_folders() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("classes")).unwrap();
        touch(root, "other/x.txt");

        let set = FileSet::new(root).include("classes/");
        assert_eq!(expand_fileset(&set).unwrap(), vec![root.join("classes")]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let set = FileSet::new(temp_dir.path().join("missing")).include("*.jar");
        assert!(expand_fileset(&set).unwrap().is_empty());
    }

    #[test]
    fn test_filesets_keep_declaration_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let second = touch(root, "b/second.jar");
        let first = touch(root, "a/first.jar");

        let sets = vec![
            FileSet::new(root.join("b")).include("*.jar"),
            FileSet::new(root.join("a")).include("*.jar"),
        ];
        assert_eq!(expand_filesets(&sets).unwrap(), vec![second, first]);
    }

    #[test]
    fn test_invalid_glob_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let set = FileSet::new(temp_dir.path()).include("[unclosed");
        assert!(matches!(expand_fileset(&set), Err(ResolveError::InvalidGlob { .. })));
    }

    #[test]
    fn test_excluded_directory_drops_its_contents() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let kept = touch(root, "a.jar");
        touch(root, "ext/b.jar");
        touch(root, "ext/deeper/c.jar");

        let set = FileSet::new(root).include("*.jar").exclude("ext/");
        assert_eq!(expand_fileset(&set).unwrap(), vec![kept]);
    }

    #[test]
    fn test_vcs_metadata_directories_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let kept = touch(root, "lib/new.jar");
        touch(root, ".svn/text-base/old.jar");
        touch(root, "lib/.git/objects/stale.jar");

        let set = FileSet::new(root).include("*.jar");
        assert_eq!(expand_fileset(&set).unwrap(), vec![kept]);
    }
}
