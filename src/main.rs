use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use via_xml_diff::{DiffConfig, DiffRenderer, ViaXmlParser};

#[derive(Debug, Parser)]
#[command(name = "via-xml-diff")]
#[command(about = "Via XML comparison", long_about = None)]
struct Cli {
    /// Ignore return flights match
    #[arg(short, long, visible_alias = "ignore_return")]
    ignore_return: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,

    /// 1st Via XML file to compare
    file_1: PathBuf,

    /// 2nd Via XML file to compare
    file_2: PathBuf,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

// Reports every missing file, returns false if any was missing
fn check_files(out: &mut impl Write, files: &[&Path]) -> io::Result<bool> {
    let mut found = true;
    for file in files {
        if !file.is_file() {
            writeln!(out, "File {} not found.", file.display())?;
            found = false;
        }
    }
    Ok(found)
}

fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !check_files(&mut out, &[cli.file_1.as_path(), cli.file_2.as_path()])? {
        return Ok(());
    }

    let parser = ViaXmlParser::new();
    let old = parser
        .parse_file(&cli.file_1)
        .with_context(|| format!("Failed to parse {}", cli.file_1.display()))?;
    let new = parser
        .parse_file(&cli.file_2)
        .with_context(|| format!("Failed to parse {}", cli.file_2.display()))?;
    debug!(old = old.len(), new = new.len(), "loaded snapshots");

    let renderer = DiffRenderer::new(DiffConfig::ignore_return(cli.ignore_return));
    let summary = renderer.render_sets(&mut out, &old, &new)?;
    out.flush()?;

    if !summary.has_differences() {
        info!("snapshots contain the same itineraries");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
