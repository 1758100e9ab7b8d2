//! fitsgrid
//!
//! Renders a 3x3 grid of background-subtracted cutouts for each FITS file
//! given on the command line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use fitsgrid::output::{grid_path, write_png};
use fitsgrid::{BoundaryMode, GridConfig, GridRenderer};

/// Quick-look cutout grids for FITS images
#[derive(Parser, Debug)]
#[command(name = "fitsgrid", version)]
#[command(about = "Render a 3x3 grid of median-subtracted cutouts per FITS image")]
struct Args {
    /// FITS files to render, processed in order
    paths: Vec<PathBuf>,

    /// Directory for the PNG grids (default: next to each input)
    #[arg(short, long, env = "FITSGRID_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Fail on images too small for a full cutout instead of padding
    #[arg(long)]
    strict: bool,

    /// HDU index to read (default: first HDU with image data)
    #[arg(long)]
    hdu: Option<usize>,

    /// Log level
    #[arg(long, default_value = "info", env = "FITSGRID_LOG")]
    log_level: String,
}

impl Args {
    fn boundary(&self) -> BoundaryMode {
        if self.strict {
            BoundaryMode::Strict
        } else {
            BoundaryMode::Partial
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level)
        .with_context(|| format!("invalid log level {:?}", args.log_level))?;
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    run(&args)
}

/// Render every path in order, stopping at the first failure.
fn run(args: &Args) -> Result<()> {
    let config = GridConfig::new(args.boundary());
    let renderer = GridRenderer::new(&config);

    for path in &args.paths {
        let grid = renderer
            .render(path, args.hdu)
            .with_context(|| format!("rendering {}", path.display()))?;
        let out = grid_path(path, args.output_dir.as_deref());
        write_png(&grid, &out)?;
        info!(input = %path.display(), output = %out.display(), "done");
    }

    Ok(())
}
