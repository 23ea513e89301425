use colored::Colorize;
use eclasspath_core::OrderedClasspath;
use log::trace;
use std::io::{self, Write};

use crate::types::{ClasspathReport, OutputFormat};

/// Separator between locations in a path-list string.
pub const PATH_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Join all locations into a single path-list string.
pub fn classpath_string(classpath: &OrderedClasspath) -> String {
    let separator = PATH_SEPARATOR.to_string();
    classpath
        .iter()
        .map(|p| p.to_string_lossy())
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

pub fn print_classpath<W: Write>(
    w: &mut W,
    report: &ClasspathReport,
    format: OutputFormat,
) -> io::Result<()> {
    trace!("Printing {} locations as {:?}", report.locations.len(), format);
    match format {
        OutputFormat::Path => writeln!(w, "{}", classpath_string(&report.locations))?,
        OutputFormat::Lines => {
            for location in report.locations.iter() {
                writeln!(w, "{}", location.display())?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *w, report)?;
            writeln!(w)?;
        }
    }
    Ok(())
}

pub fn print_summary<W: Write>(
    w: &mut W,
    report: &ClasspathReport,
    elapsed_ms: u128,
) -> io::Result<()> {
    writeln!(
        w,
        "\n{} {} : {} locations from {} entries in {} (finished in {}ms)",
        "●".bright_blue(),
        report.path_id.bold(),
        report.locations.len().to_string().cyan(),
        report.entries_read.to_string().cyan(),
        report.descriptor.display(),
        elapsed_ms.to_string().cyan()
    )
}
