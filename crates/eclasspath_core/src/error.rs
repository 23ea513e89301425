use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors raised while configuring or running a resolution.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("invalid mapping pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid file-set pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: ignore::Error,
    },
    #[error("failed to scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },
    #[error("invalid location '{0}'")]
    InvalidLocation(String),
}

/// Errors raised while loading the classpath descriptor.
#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("classpath descriptor not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("malformed classpath descriptor: {0}")]
    Malformed(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
