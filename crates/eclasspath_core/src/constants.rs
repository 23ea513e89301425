/// File name of the descriptor looked up in the working directory by default.
pub const DEFAULT_DESCRIPTOR: &str = ".classpath";

/// Element name of a single descriptor record.
pub const ENTRY_ELEMENT: &str = "classpathentry";

/// Suffix a file must end with to be picked up by jar discovery.
pub const JAR_SUFFIX: &str = ".jar";

/// Version-control metadata directories skipped by jar discovery.
pub const VCS_METADATA_DIRS: &[&str] = &[".svn", ".git", ".hg", "CVS"];
