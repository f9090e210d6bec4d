//! Terrashade CLI - shaded relief from terrain-RGB tiles

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use terrashade_algorithms::terrain::{
    decode_terrain_rgb, encode_terrain_rgb, shaded_relief_with, ReliefMode, ReliefParams,
};
use terrashade_colormap::{ColorRamp, ColorScheme, DEFAULT_STEPS};
use terrashade_core::io::{read_geotiff, write_geotiff, GeoTiffOptions};
use terrashade_core::RgbaImage;
use terrashade_parallel::{num_threads, ProcessingMode};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "terrashade")]
#[command(author, version, about = "Shaded relief from terrain-RGB tiles", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dimensions and elevation statistics of a terrain-RGB tile
    Info {
        /// Input PNG tile
        input: PathBuf,
    },
    /// Render raw, shaded or colorized relief from a terrain-RGB tile
    Shade {
        /// Input PNG tile
        input: PathBuf,
        /// Output PNG file
        output: PathBuf,
        #[command(flatten)]
        relief: ReliefArgs,
    },
    /// Convert a terrain-RGB tile to a Float32 GeoTIFF
    Decode {
        /// Input PNG tile
        input: PathBuf,
        /// Output GeoTIFF file
        output: PathBuf,
        /// Ground resolution in meters per pixel
        #[arg(short, long, default_value = "1.0")]
        resolution: f64,
    },
    /// Convert an elevation GeoTIFF to a terrain-RGB tile
    Encode {
        /// Input GeoTIFF file
        input: PathBuf,
        /// Output PNG file
        output: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
struct ReliefArgs {
    /// JSON file with relief parameters; flags override its values
    #[arg(short, long)]
    params: Option<PathBuf>,
    /// Output mode: raw, shade, colorize
    #[arg(short, long)]
    mode: Option<ReliefMode>,
    /// Ground resolution in meters per pixel
    #[arg(short, long)]
    resolution: Option<f64>,
    /// Vertical exaggeration
    #[arg(long)]
    vert: Option<f64>,
    /// Sun altitude in degrees above horizon
    #[arg(long, allow_negative_numbers = true)]
    sun_elevation: Option<f64>,
    /// Sun azimuth in degrees
    #[arg(long, allow_negative_numbers = true)]
    sun_azimuth: Option<f64>,
    /// Elevations at or below this are drawn as water
    #[arg(long, allow_negative_numbers = true)]
    sea_level: Option<f64>,
    /// Elevation at the bottom of the color ramp
    #[arg(long, allow_negative_numbers = true)]
    min_elevation: Option<f64>,
    /// Elevation at the top of the color ramp
    #[arg(long, allow_negative_numbers = true)]
    max_elevation: Option<f64>,
    /// Number of color ramp steps
    #[arg(long)]
    steps: Option<usize>,
    /// Color scheme: earth, terrain, grayscale
    #[arg(long)]
    scheme: Option<ColorScheme>,
    /// Worker threads (1 = sequential, default = all cores)
    #[arg(short, long)]
    threads: Option<usize>,
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set default subscriber")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_tile(path: &Path) -> Result<RgbaImage> {
    let pb = spinner("Reading tile...");
    let img = image::open(path)
        .with_context(|| format!("Failed to read tile {}", path.display()))?
        .to_rgba8();
    pb.finish_and_clear();

    let (width, height) = img.dimensions();
    info!("Input: {} x {}", width, height);
    RgbaImage::from_raw(width as usize, height as usize, img.into_raw())
        .context("Invalid input tile")
}

fn write_tile(tile: &RgbaImage, path: &Path) -> Result<()> {
    let pb = spinner("Writing output...");
    let width = u32::try_from(tile.width()).context("Tile too wide for PNG")?;
    let height = u32::try_from(tile.height()).context("Tile too tall for PNG")?;
    let img = image::RgbaImage::from_raw(width, height, tile.as_raw().to_vec())
        .context("Tile buffer does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    pb.finish_and_clear();
    Ok(())
}

fn done(name: &str, path: &Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

fn load_params(path: &Path) -> Result<ReliefParams> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid relief parameters in {}", path.display()))
}

/// Merge the parameter file (if any) with command-line overrides.
fn build_params(args: &ReliefArgs) -> Result<ReliefParams> {
    let mut params = match &args.params {
        Some(path) => load_params(path)?,
        None => ReliefParams::default(),
    };

    if let Some(mode) = args.mode {
        params.mode = mode;
    }
    if let Some(v) = args.resolution {
        params.resolution = v;
    }
    if let Some(v) = args.vert {
        params.vertical_exaggeration = v;
    }
    if let Some(v) = args.sun_elevation {
        params.sun_elevation = v;
    }
    if let Some(v) = args.sun_azimuth {
        params.sun_azimuth = v;
    }
    if let Some(v) = args.sea_level {
        params.sea_level = v;
    }
    if let Some(v) = args.min_elevation {
        params.min_elevation = v;
    }
    if let Some(v) = args.max_elevation {
        params.max_elevation = v;
    }

    // A custom ramp from the parameter file survives unless a scheme or step
    // count is requested explicitly.
    if args.scheme.is_some() || args.steps.is_some() {
        let scheme = args.scheme.unwrap_or_default();
        let steps = args.steps.unwrap_or(DEFAULT_STEPS);
        params.ramp =
            ColorRamp::from_scheme(scheme, steps, params.min_elevation, params.max_elevation)
                .context("Invalid color ramp")?;
    }

    params.validate().context("Invalid relief parameters")?;
    Ok(params)
}

fn check_resolution(resolution: f64) -> Result<f64> {
    if !(resolution.is_finite() && resolution > 0.0) {
        anyhow::bail!("Resolution must be a positive number of meters, got {}", resolution);
    }
    Ok(resolution)
}

fn processing_mode(threads: Option<usize>) -> Result<ProcessingMode> {
    match threads {
        None => Ok(ProcessingMode::Parallel),
        Some(0) => anyhow::bail!("Thread count must be at least 1"),
        Some(1) => Ok(ProcessingMode::Sequential),
        Some(n) => Ok(ProcessingMode::ParallelWith(n)),
    }
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Info { input } => {
            let tile = read_tile(&input)?;
            let grid = decode_terrain_rgb(&tile, 1.0)?;
            let stats = grid.statistics();
            let transparent = tile.as_raw().chunks_exact(4).filter(|p| p[3] == 0).count();

            println!("File: {}", input.display());
            println!(
                "Dimensions: {} x {} ({} pixels)",
                tile.width(),
                tile.height(),
                grid.len()
            );
            println!("Transparent pixels: {}", transparent);
            println!("\nElevation:");
            if let Some(min) = stats.min {
                println!("  Min: {:.1} m", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {:.1} m", max);
            }
            if let Some(mean) = stats.mean {
                println!("  Mean: {:.1} m", mean);
            }
        }

        Commands::Shade {
            input,
            output,
            relief,
        } => {
            let params = build_params(&relief)?;
            let processing = processing_mode(relief.threads)?;
            debug!(
                "mode={} resolution={} vert={} sun={}/{} sea_level={} ramp={} steps over [{}, {}]",
                params.mode,
                params.resolution,
                params.vertical_exaggeration,
                params.sun_elevation,
                params.sun_azimuth,
                params.sea_level,
                params.ramp.len(),
                params.min_elevation,
                params.max_elevation
            );

            debug!(
                "workers: {}",
                match processing {
                    ProcessingMode::Sequential => 1,
                    ProcessingMode::Parallel => num_threads(),
                    ProcessingMode::ParallelWith(n) => n,
                }
            );

            let tile = read_tile(&input)?;
            let start = Instant::now();
            let result = shaded_relief_with(&tile, &params, processing)
                .context("Failed to render relief")?;
            let elapsed = start.elapsed();
            write_tile(&result, &output)?;
            done("Relief", &output, elapsed);
        }

        Commands::Decode {
            input,
            output,
            resolution,
        } => {
            let resolution = check_resolution(resolution)?;
            let tile = read_tile(&input)?;
            let start = Instant::now();
            let grid = decode_terrain_rgb(&tile, resolution).context("Failed to decode tile")?;
            let elapsed = start.elapsed();

            let pb = spinner("Writing output...");
            write_geotiff(&grid, &output, Some(GeoTiffOptions::default()))
                .context("Failed to write output")?;
            pb.finish_and_clear();
            done("Elevation", &output, elapsed);
        }

        Commands::Encode { input, output } => {
            let pb = spinner("Reading raster...");
            let grid = read_geotiff(&input).context("Failed to read input raster")?;
            pb.finish_and_clear();
            info!("Input: {} x {}", grid.cols(), grid.rows());
            if let Some(nodata) = grid.nodata() {
                info!("NoData: {} (written as transparent pixels)", nodata);
            }

            let start = Instant::now();
            let tile = encode_terrain_rgb(&grid).context("Failed to encode elevation")?;
            let elapsed = start.elapsed();
            write_tile(&tile, &output)?;
            done("Terrain-RGB tile", &output, elapsed);
        }
    }

    Ok(())
}
