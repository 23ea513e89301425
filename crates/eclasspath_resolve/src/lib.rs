//! The `resolve` task: load an Eclipse `.classpath` descriptor, resolve it
//! against container and path mappings, and render the ordered classpath.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use clap::Parser;
//! use eclasspath_resolve::{Config, run_resolve};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config::parse_from([
//!     "resolve",
//!     "--dir",
//!     "/path/to/project",
//!     "--container",
//!     "org.eclipse.jdt.launching.JRE_CONTAINER=/usr/lib/jvm/default/lib",
//!     "--mapping",
//!     "^lib=/opt/project/lib",
//! ]);
//! let format = cfg.format;
//!
//! let report = run_resolve(cfg)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! eclasspath_resolve::print_classpath(&mut stdout, &report, format)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod reporter;
mod task;
mod types;

// Re-export public API
pub use config::{Config, MappingFile, RawMapping};
pub use reporter::{PATH_SEPARATOR, classpath_string, print_classpath, print_summary};
pub use task::run_resolve;
pub use types::{ClasspathReport, OutputFormat};
