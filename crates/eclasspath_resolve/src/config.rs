use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eclasspath_core::{
    ContainerMapping, DEFAULT_DESCRIPTOR, FileSet, PathMappingRule, ResolveConfig,
};
use log::{debug, info, trace};
use path_clean::clean;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::types::OutputFormat;

#[derive(Debug, Clone, Parser)]
#[command(name = "resolve")]
#[command(about = "Resolve an Eclipse .classpath descriptor into an ordered classpath")]
pub struct Config {
    /// Directory holding the descriptor (defaults to the current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Descriptor file name
    #[arg(long, default_value = DEFAULT_DESCRIPTOR)]
    pub file: String,

    /// Identifier the resolved classpath is registered under
    #[arg(long, default_value = "classpath")]
    pub path_id: String,

    /// JSON file with containers, mappings and filesets
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Map a container to the directory holding its jars
    #[arg(long = "container", value_name = "NAME=DIR", value_parser = parse_container)]
    pub containers: Vec<ContainerMapping>,

    /// Rewrite the first match of PATTERN in relative locations with DIR
    #[arg(long = "mapping", value_name = "PATTERN=DIR", value_parser = parse_mapping)]
    pub mappings: Vec<RawMapping>,

    /// Append files and folders under DIR matching the globs (`!` excludes)
    #[arg(long = "fileset", value_name = "DIR[=GLOB,...]", value_parser = parse_fileset)]
    pub filesets: Vec<FileSet>,

    /// Only look at the immediate children of container directories
    #[arg(long)]
    pub flat: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Path)]
    pub format: OutputFormat,

    /// Log every step of the resolution
    #[arg(short, long)]
    pub verbose: bool,

    #[clap(skip)]
    pub resolve: ResolveConfig,

    /// File sets from the mapping file and the flags, with absolute directories
    #[clap(skip)]
    pub resolved_filesets: Vec<FileSet>,
}

/// Layout of the `--config` JSON file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingFile {
    pub containers: Vec<ContainerMapping>,
    pub mappings: Vec<RawMapping>,
    pub filesets: Vec<FileSet>,
}

/// An uncompiled path mapping rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawMapping {
    pub pattern: String,
    pub path: PathBuf,
}

impl Config {
    /// Resolve the working directory and merge the mapping file with the flags.
    ///
    /// Entries from the mapping file come before entries given as flags.
    /// Relative directories are taken relative to the working directory.
    /// The flag fields are left as parsed, so calling this again rebuilds the
    /// same result.
    pub fn initialize(&mut self) -> Result<()> {
        let dir = if let Some(d) = self.dir.take() {
            debug!("Using provided working directory: {:?}", d);
            d.canonicalize().unwrap_or(d)
        } else {
            debug!("No directory provided, using the current directory");
            env::current_dir().context("Failed to read the current directory")?
        };
        info!("Using working directory: {}", dir.display());

        let file = match &self.config {
            Some(path) => read_mapping_file(&absolutize(&dir, path))?,
            None => MappingFile::default(),
        };

        let mut containers = file.containers;
        containers.extend(self.containers.iter().cloned());
        for container in &mut containers {
            container.path = absolutize(&dir, &container.path);
            debug!("Adding container mapping ({}, {})", container.name, container.path.display());
        }

        let mut mappings = Vec::new();
        for raw in file.mappings.iter().chain(self.mappings.iter()) {
            let target = absolutize(&dir, &raw.path);
            debug!("Adding relative path mapping (pattern {}, {})", raw.pattern, target.display());
            mappings.push(PathMappingRule::new(&raw.pattern, target)?);
        }

        let mut filesets = file.filesets;
        filesets.extend(self.filesets.iter().cloned());
        for set in &mut filesets {
            set.dir = absolutize(&dir, &set.dir);
        }
        debug!("Using {} file sets", filesets.len());

        self.resolve = ResolveConfig {
            working_dir: dir.clone(),
            containers,
            mappings,
            recursive: !self.flat,
            ..Default::default()
        };
        self.resolved_filesets = filesets;
        self.dir = Some(dir);
        Ok(())
    }

    /// Get the working directory, returning an error if not initialized
    pub fn working_dir(&self) -> Result<&PathBuf> {
        self.dir
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }
}

fn read_mapping_file(path: &Path) -> Result<MappingFile> {
    debug!("Reading mapping file: {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mapping file {}", path.display()))?;
    let file: MappingFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse mapping file {}", path.display()))?;
    trace!(
        "Mapping file has {} containers, {} mappings, {} filesets",
        file.containers.len(),
        file.mappings.len(),
        file.filesets.len()
    );
    Ok(file)
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { clean(base.join(path)) }
}

fn parse_container(s: &str) -> Result<ContainerMapping, String> {
    let (name, dir) =
        s.split_once('=').ok_or_else(|| format!("expected NAME=DIR, got '{}'", s))?;
    if name.is_empty() || dir.is_empty() {
        return Err(format!("expected NAME=DIR, got '{}'", s));
    }
    Ok(ContainerMapping::new(name, dir))
}

// Split on the last '=' since patterns may contain one.
fn parse_mapping(s: &str) -> Result<RawMapping, String> {
    let (pattern, dir) =
        s.rsplit_once('=').ok_or_else(|| format!("expected PATTERN=DIR, got '{}'", s))?;
    if pattern.is_empty() {
        return Err(format!("expected PATTERN=DIR, got '{}'", s));
    }
    Ok(RawMapping { pattern: pattern.to_string(), path: PathBuf::from(dir) })
}

fn parse_fileset(s: &str) -> Result<FileSet, String> {
    let (dir, globs) = match s.split_once('=') {
        Some((dir, globs)) => (dir, globs),
        None => (s, ""),
    };
    if dir.is_empty() {
        return Err(format!("expected DIR[=GLOB,...], got '{}'", s));
    }

    let mut set = FileSet::new(dir);
    for glob in globs.split(',').map(str::trim).filter(|g| !g.is_empty()) {
        set = match glob.strip_prefix('!') {
            Some(excluded) => set.exclude(excluded),
            None => set.include(glob),
        };
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["resolve"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = parse(&[]);
        assert_eq!(cfg.file, ".classpath");
        assert_eq!(cfg.path_id, "classpath");
        assert_eq!(cfg.format, OutputFormat::Path);
        assert!(!cfg.verbose);
        assert!(!cfg.flat);
    }

    #[test]
    fn test_parse_container_flag() {
        let cfg = parse(&["--container", "JRE_CONTAINER=/jre/lib"]);
        assert_eq!(cfg.containers, vec![ContainerMapping::new("JRE_CONTAINER", "/jre/lib")]);
    }

    #[test]
    fn test_parse_container_rejects_missing_dir() {
        assert!(Config::try_parse_from(["resolve", "--container", "JRE_CONTAINER"]).is_err());
        assert!(Config::try_parse_from(["resolve", "--container", "JRE_CONTAINER="]).is_err());
    }

    #[test]
    fn test_parse_mapping_splits_on_last_equals() {
        let cfg = parse(&["--mapping", "^(?P<a>x)=y=/opt/libs"]);
        assert_eq!(
            cfg.mappings,
            vec![RawMapping { pattern: "^(?P<a>x)=y".to_string(), path: PathBuf::from("/opt/libs") }]
        );
    }

    #[test]
    fn test_parse_fileset_globs() {
        let cfg = parse(&["--fileset", "lib=*.jar, !*-sources.jar", "--fileset", "classes"]);
        assert_eq!(
            cfg.filesets,
            vec![
                FileSet::new("lib").include("*.jar").exclude("*-sources.jar"),
                FileSet::new("classes"),
            ]
        );
    }

    #[test]
    fn test_initialize_merges_file_before_flags() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(
            root.join("mappings.json"),
            r#"{
  "containers": [{"name": "JRE", "path": "from-file"}],
  "mappings": [{"pattern": "^lib", "path": "/opt/lib"}],
  "filesets": [{"dir": "extra", "includes": ["*.jar"]}]
}"#,
        )
        .unwrap();

        let mut cfg = parse(&[
            "--dir",
            root.to_str().unwrap(),
            "--config",
            "mappings.json",
            "--container",
            "JRE=/from-flag",
            "--mapping",
            "^ext=/opt/ext",
        ]);
        cfg.initialize().unwrap();

        let dir = cfg.working_dir().unwrap().clone();
        assert_eq!(cfg.resolve.working_dir, dir);
        assert_eq!(cfg.resolve.containers.len(), 2);
        assert_eq!(cfg.resolve.containers[0].path, dir.join("from-file"));
        assert_eq!(cfg.resolve.containers[1].path, PathBuf::from("/from-flag"));
        let patterns: Vec<_> = cfg.resolve.mappings.iter().map(|m| m.pattern()).collect();
        assert_eq!(patterns, vec!["^lib", "^ext"]);
        assert_eq!(cfg.resolved_filesets[0].dir, dir.join("extra"));
        assert!(cfg.resolve.recursive);
    }

    #[test]
    fn test_initialize_twice_gives_the_same_result() {
        let temp_dir = TempDir::new().unwrap();
        let mut cfg = parse(&[
            "--dir",
            temp_dir.path().to_str().unwrap(),
            "--container",
            "JRE=jre",
            "--fileset",
            "lib=*.jar",
        ]);
        cfg.initialize().unwrap();
        let containers = cfg.resolve.containers.clone();
        let filesets = cfg.resolved_filesets.clone();

        cfg.initialize().unwrap();
        assert_eq!(cfg.resolve.containers, containers);
        assert_eq!(cfg.resolved_filesets, filesets);
        assert_eq!(cfg.containers, vec![ContainerMapping::new("JRE", "jre")]);
        assert_eq!(cfg.filesets, vec![FileSet::new("lib").include("*.jar")]);
    }

    #[test]
    fn test_initialize_rejects_invalid_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let mut cfg =
            parse(&["--dir", temp_dir.path().to_str().unwrap(), "--mapping", "(unclosed=/opt"]);
        assert!(cfg.initialize().is_err());
    }

    #[test]
    fn test_initialize_rejects_unknown_mapping_file_keys() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("bad.json"), r#"{"container": []}"#).unwrap();
        let mut cfg =
            parse(&["--dir", temp_dir.path().to_str().unwrap(), "--config", "bad.json"]);
        assert!(cfg.initialize().is_err());
    }

    #[test]
    fn test_working_dir_requires_initialize() {
        let cfg = parse(&[]);
        assert!(cfg.working_dir().is_err());
    }
}
