//! TileMerge CLI - merge a tile pyramid into one image per zoom level.
//!
//! Usage: `tilemerge <input-dir> <output-dir> [prefix] [zoom]`
//!
//! Tile filenames must carry a `{zoom}x{x}x{y}` coordinate triple
//! (e.g. `2x0x3.png`). Each discovered zoom level is merged into
//! `<output-dir>/<prefix><zoom>.png`.

mod error;

use clap::Parser;
use error::CliError;
use std::path::PathBuf;
use tilemerge::codec::PngCodec;
use tilemerge::logging::{default_log_dir, default_log_file, init_logging};
use tilemerge::pipeline::{merge_directory, MergeOptions, DEFAULT_PREFIX};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "tilemerge")]
#[command(version)]
#[command(about = "Merge a pyramid of map tiles into one image per zoom level", long_about = None)]
struct Args {
    /// Directory containing the tile images (flat, non-recursive)
    input_dir: PathBuf,

    /// Directory merged images are written into
    output_dir: PathBuf,

    /// Output filename prefix; files are named <prefix><zoom>.png
    #[arg(default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Restrict processing to a single zoom level
    zoom: Option<u32>,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        e.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    // Fail fast on bad paths before any discovery or logging setup.
    if !args.input_dir.is_dir() {
        return Err(CliError::NotADirectory {
            role: "input",
            path: args.input_dir,
        });
    }
    if !args.output_dir.is_dir() {
        return Err(CliError::NotADirectory {
            role: "output",
            path: args.output_dir,
        });
    }

    let _logging_guard = init_logging(default_log_dir(), default_log_file())
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    info!("TileMerge v{}", tilemerge::VERSION);
    info!(
        input = %args.input_dir.display(),
        output = %args.output_dir.display(),
        prefix = %args.prefix,
        zoom = ?args.zoom,
        "Starting merge run"
    );

    let mut options = MergeOptions::new(&args.output_dir).with_prefix(&args.prefix);
    if let Some(zoom) = args.zoom {
        options = options.with_zoom(zoom);
    }

    let written = merge_directory(&args.input_dir, &PngCodec::new(), &options)?;
    info!(outputs = written.len(), "Merge complete");
    Ok(())
}
