use clap::ValueEnum;
use eclasspath_core::OrderedClasspath;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClasspathReport {
    /// Identifier the classpath is registered under downstream.
    pub path_id: String,
    pub descriptor: PathBuf,
    pub entries_read: usize,
    pub locations: OrderedClasspath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Locations joined with the platform path-list separator
    Path,
    /// One location per line
    Lines,
    /// JSON document with the path id and locations
    Json,
}
