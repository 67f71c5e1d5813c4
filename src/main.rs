use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use dotmorph::{
    capture::{CaptureDevice, ImageSequenceCamera, SyntheticCamera},
    config::Config,
    session::{RenderSession, ScheduledChange},
    snapshot::GridSize,
};

#[derive(Parser)]
#[command(
    name = "dotmorph",
    version,
    about = "Render dot-swarm transitions between successive captures",
    long_about = "dotmorph downsamples successive captures to a small grid and renders each transition as a swarm of dots flying from their best color match in the previous capture to their place in the new one."
)]
struct Cli {
    /// Directory of still images to replay as captures (synthetic scene if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory to write rendered PNG frames into
    #[arg(short, long)]
    output: PathBuf,

    /// Length of the rendered clip in seconds
    #[arg(short, long, default_value_t = 20.0)]
    duration: f64,

    /// Frames rendered per second
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Canvas width in pixels; height follows the grid aspect ratio
    #[arg(long, default_value_t = 640)]
    canvas_width: u32,

    /// Starting fidelity (grid width = 4 * min_dots * fidelity); overrides the config grid
    #[arg(short, long)]
    fidelity: Option<u32>,

    /// Resolution change during the run, as `at_ms:fidelity` (repeatable)
    #[arg(long = "change")]
    changes: Vec<ScheduledChange>,

    /// Milliseconds each input image stays in front of the camera
    #[arg(long, default_value_t = 8000.0)]
    image_period: f64,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting dotmorph v{}", env!("CARGO_PKG_VERSION"));
    info!("Output: {:?}", cli.output);

    // Load configuration
    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    if let Some(fidelity) = cli.fidelity {
        let grid = GridSize::from_fidelity(config.grid.min_dots, fidelity)
            .ok_or_else(|| anyhow::anyhow!("Fidelity must be at least 1, got {}", fidelity))?;
        config.grid.width = grid.width;
        config.grid.height = grid.height;
    }

    let grid = config.grid.size();
    let device: Box<dyn CaptureDevice> = match &cli.input {
        Some(dir) => {
            info!("Replaying images from {:?}", dir);
            Box::new(
                ImageSequenceCamera::from_directory(dir, grid, cli.image_period)
                    .map_err(|e| anyhow::anyhow!(e.user_message()))?,
            )
        }
        None => {
            info!("Using synthetic camera");
            Box::new(SyntheticCamera::new(grid, cli.seed.unwrap_or(0)))
        }
    };

    let mut session = RenderSession::new(config, device, cli.canvas_width, cli.fps, cli.seed)?
        .with_changes(cli.changes);

    let summary = session.run(cli.duration * 1000.0, Some(&cli.output))?;

    info!(
        "Done! {} frames, {} transitions saved to: {:?}",
        summary.frames, summary.transitions_started, cli.output
    );
    Ok(())
}
