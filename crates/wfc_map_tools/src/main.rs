//! wfc_map_gen - Map generation CLI

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wfc_map_tools::pipeline::{run_generate, GenerateRequest};

#[derive(Parser)]
#[command(name = "wfc-map-tools")]
#[command(about = "Procedural isometric map generation for Tiled")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a map and export it as a .tmx file
    Generate {
        /// Path to the tile catalog JSON file
        #[arg(long, default_value = "tiles_starter.json")]
        tiles: PathBuf,
        /// Map width in tiles
        #[arg(long, default_value_t = 20)]
        width: u32,
        /// Map height in tiles
        #[arg(long, default_value_t = 20)]
        height: u32,
        /// Seed for reproducible generation (solver and placement)
        #[arg(long)]
        seed: Option<u64>,
        /// Output .tmx file path
        #[arg(long)]
        output: PathBuf,
        /// Also save the raw grid as JSON for debugging
        #[arg(long)]
        save_grid: bool,
        /// Enemy spawns to scatter, as KIND=COUNT (repeatable)
        #[arg(long = "spawn", value_parser = parse_kind_count)]
        spawns: Vec<(String, usize)>,
        /// Minimum distance between spawn points (world units)
        #[arg(long, default_value_t = 150.0)]
        spawn_min_distance: f64,
        /// Number of capture-outpost objectives to place
        #[arg(long, default_value_t = 0)]
        outposts: usize,
        /// Outpost zone radius (world units)
        #[arg(long, default_value_t = 100.0)]
        outpost_radius: f64,
        /// Guards scattered inside each outpost zone
        #[arg(long, default_value_t = 3)]
        outpost_guards: usize,
        /// Number of tiles to avoid from map edges when placing points
        #[arg(long, default_value_t = 3)]
        edge_margin: u32,
    },
}

/// Parse `KIND=COUNT` spawn arguments, e.g. `slime=10`.
fn parse_kind_count(arg: &str) -> Result<(String, usize), String> {
    let (kind, count) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KIND=COUNT, got '{arg}'"))?;
    let count: usize = count
        .parse()
        .map_err(|_| format!("invalid count in '{arg}'"))?;
    if kind.is_empty() {
        return Err(format!("empty kind in '{arg}'"));
    }
    Ok((kind.to_string(), count))
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            tiles,
            width,
            height,
            seed,
            output,
            save_grid,
            spawns,
            spawn_min_distance,
            outposts,
            outpost_radius,
            outpost_guards,
            edge_margin,
        } => {
            let request = GenerateRequest {
                tiles,
                width,
                height,
                seed,
                output,
                save_grid,
                spawns,
                spawn_min_distance,
                outposts,
                outpost_radius,
                outpost_guards,
                edge_margin,
            };
            match run_generate(&request) {
                Ok(grid) => tracing::info!(
                    width = grid.width(),
                    height = grid.height(),
                    "map generation complete"
                ),
                Err(e) => {
                    tracing::error!("map generation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_count_parses() {
        assert_eq!(
            parse_kind_count("slime=10"),
            Ok(("slime".to_string(), 10))
        );
        assert!(parse_kind_count("slime").is_err());
        assert!(parse_kind_count("=3").is_err());
        assert!(parse_kind_count("slime=lots").is_err());
    }
}
