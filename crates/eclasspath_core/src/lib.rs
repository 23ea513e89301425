//! Core engine for turning an Eclipse `.classpath` descriptor into an ordered
//! list of filesystem locations.
//!
//! This crate provides:
//! - Loading `classpathentry` records from the XML descriptor
//! - Resolving library, container and skipped entry kinds
//! - Recursive jar discovery under configured container roots
//! - Regex-based relative path mapping rules
//! - File-set expansion for supplementary locations
//! - Building the final ordered classpath

mod builder;
mod config;
mod constants;
mod container;
mod descriptor;
mod discovery;
mod error;
mod fileset;
mod mapping;
mod resolver;
mod types;

// Re-export public API
pub use builder::{ClasspathBuilder, build_classpath};
pub use config::ResolveConfig;
pub use constants::{DEFAULT_DESCRIPTOR, ENTRY_ELEMENT, JAR_SUFFIX, VCS_METADATA_DIRS};
pub use container::{ContainerMapping, find_container, resolve_container};
pub use descriptor::{load_descriptor, parse_descriptor};
pub use discovery::discover_jars;
pub use error::{DescriptorError, ResolveError};
pub use fileset::{FileSet, expand_fileset, expand_filesets};
pub use mapping::{PathMappingRule, apply_rules};
pub use resolver::resolve_entry;
pub use types::{ClasspathEntry, EntryKind, OrderedClasspath};
