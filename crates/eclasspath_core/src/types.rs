use serde::Serialize;
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Kind attribute of a `classpathentry` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Source,
    Library,
    Container,
    Output,
    Unknown(String),
}

impl EntryKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "src" => EntryKind::Source,
            "lib" => EntryKind::Library,
            "con" => EntryKind::Container,
            "output" => EntryKind::Output,
            other => EntryKind::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EntryKind::Source => "src",
            EntryKind::Library => "lib",
            EntryKind::Container => "con",
            EntryKind::Output => "output",
            EntryKind::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClasspathEntry {
    pub kind: EntryKind,
    /// Raw `path` attribute; a container identifier for `con` entries.
    pub path: String,
}

impl ClasspathEntry {
    pub fn new(kind: EntryKind, path: impl Into<String>) -> Self {
        Self { kind, path: path.into() }
    }
}

/// Resolved locations in classpath precedence order.
///
/// Locations are only ever appended: no sorting and no deduplication, since
/// earlier locations shadow later ones downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrderedClasspath {
    locations: Vec<PathBuf>,
}

impl OrderedClasspath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, location: PathBuf) {
        self.locations.push(location);
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.locations.iter().map(PathBuf::as_path)
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.locations
    }

    pub fn into_vec(self) -> Vec<PathBuf> {
        self.locations
    }
}

impl Extend<PathBuf> for OrderedClasspath {
    fn extend<T: IntoIterator<Item = PathBuf>>(&mut self, iter: T) {
        self.locations.extend(iter);
    }
}
