use anyhow::Result;
use clap::{Parser, Subcommand};
use eclasspath_resolve::Config;
use log::{LevelFilter, debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "eclasspath")]
#[command(about = "Turn Eclipse classpath descriptors into build tool classpaths", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a .classpath descriptor into an ordered list of locations
    Resolve(Config),
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve(cfg) => {
            init_logging(cfg.verbose);
            debug!("Parsed CLI arguments: {:?}", cfg);

            // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
            // See https://github.com/rust-lang/rust/issues/60673
            let mut stdout = BufWriter::new(std::io::stdout());
            let start = Instant::now();

            let format = cfg.format;
            let verbose = cfg.verbose;
            info!("Starting execution for path id {}", cfg.path_id);

            let report = eclasspath_resolve::run_resolve(cfg)?;
            eclasspath_resolve::print_classpath(&mut stdout, &report, format)?;
            stdout.flush()?;

            if verbose {
                let mut stderr = std::io::stderr();
                eclasspath_resolve::print_summary(
                    &mut stderr,
                    &report,
                    start.elapsed().as_millis(),
                )?;
            }

            Ok(())
        }
    }
}
