// Compare two images the way the engine would and report how the dots move

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use image::imageops::FilterType;
use rand::{rngs::SmallRng, SeedableRng};

use dotmorph::{
    snapshot::{GridSize, Snapshot},
    transition::{CorrespondenceMatcher, PixelCorrespondence},
};

#[derive(Parser)]
#[command(name = "match_stats", about = "Report dot correspondences between two images")]
struct Args {
    /// Previous capture
    previous: PathBuf,

    /// New capture
    next: PathBuf,

    /// Grid width in cells
    #[arg(long, default_value_t = 60)]
    width: u32,

    /// Grid height in cells
    #[arg(long, default_value_t = 45)]
    height: u32,

    /// Color distance below which a dot stays put
    #[arg(long, default_value_t = 30.0)]
    tolerance: f64,
}

fn load(path: &PathBuf, grid: GridSize) -> Result<Snapshot> {
    let image = image::open(path)
        .map_err(|e| anyhow::anyhow!("Could not load {:?}: {}", path, e))?;
    let rgba = image
        .resize_exact(grid.width, grid.height, FilterType::Triangle)
        .to_rgba8()
        .into_raw();
    Ok(Snapshot::from_rgba(grid, &rgba)?)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let grid = GridSize::new(args.width, args.height);

    let prev = load(&args.previous, grid)?;
    let next = load(&args.next, grid)?;

    let matcher = CorrespondenceMatcher::new(args.tolerance);
    let mut rng = SmallRng::seed_from_u64(0);
    let (pairs, stats) = matcher.correspond(&prev, &next, &mut rng);

    let moving: Vec<&PixelCorrespondence> = pairs.iter().filter(|p| !p.is_identity()).collect();
    let mean_travel = if moving.is_empty() {
        0.0
    } else {
        moving.iter().map(|p| p.travel()).sum::<f64>() / moving.len() as f64
    };

    println!("Grid:            {}x{} ({} dots)", grid.width, grid.height, stats.total());
    println!("Kept in place:   {}", stats.identity);
    println!("Nearest color:   {}", stats.searched);
    println!("Random fallback: {}", stats.random_fallback);
    println!("Stationary:      {}", stats.stationary);
    println!("Moving dots:     {} (mean travel {:.2} cells)", moving.len(), mean_travel);

    Ok(())
}
