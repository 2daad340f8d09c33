//! lumen - render frames for point displays from the command line
//!
//! Builds a topology, paints a test pattern into a layer stack, renders one
//! frame through the output filters and prints the final pixels.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(author, version, about = "Render frames for LED point displays")]
#[command(long_about = "
Composites layers of per-point render state into final colors and prints them.

Examples:
  lumen render                               # 8x8 grid, 2 layers, gamma + 8 bit
  lumen render circle -n 24 --palette Quepal
  lumen render cloud -n 50 --seed 7 --json
  lumen render grid --rows 4 --columns 16 --colors ff0000,0000ff --discrete 5
  lumen palettes --samples 8
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one frame and print the finalized pixels
    #[command(visible_alias = "r")]
    Render(RenderArgs),

    /// List the built-in palettes
    #[command(visible_alias = "p")]
    Palettes(PalettesArgs),
}

/// Point topology to render on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Topology {
    /// Rows x columns
    Grid,
    /// Points on a circle
    Circle,
    /// Randomly scattered points
    Cloud,
}

#[derive(Args)]
struct RenderArgs {
    /// Topology
    #[arg(value_enum, default_value = "grid")]
    topology: Topology,

    /// Grid rows
    #[arg(long, default_value = "8")]
    rows: usize,

    /// Grid columns
    #[arg(long, default_value = "8")]
    columns: usize,

    /// Number of points (circle, cloud)
    #[arg(short = 'n', long, default_value = "16")]
    points: usize,

    /// Angle of the first circle point, in radians
    #[arg(long, default_value = "0.0")]
    offset: f32,

    /// Minimum distance between cloud points
    #[arg(long)]
    distance: Option<f32>,

    /// Random seed for cloud placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of layers
    #[arg(short, long, default_value = "2")]
    layers: usize,

    /// Palette label from the built-in collection
    #[arg(short, long)]
    palette: Option<String>,

    /// Custom palette as comma separated hex colors (replaces the built-ins)
    #[arg(long, value_delimiter = ',')]
    colors: Vec<String>,

    /// Discretize the custom palette into this many steps
    #[arg(long, requires = "colors")]
    discrete: Option<usize>,

    /// Frame intensity
    #[arg(short, long, default_value = "1.0")]
    intensity: f32,

    /// Gamma exponent
    #[arg(short, long, default_value = "2.2")]
    gamma: f32,

    /// Quantizer steps
    #[arg(short, long, default_value = "256")]
    steps: usize,

    /// Skip gamma and quantization
    #[arg(long)]
    raw: bool,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct PalettesArgs {
    /// Number of colors sampled from each palette
    #[arg(short, long, default_value = "5")]
    samples: usize,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Render(args) => commands::render::run(args, cli.verbose),
        Commands::Palettes(args) => commands::palettes::run(args),
    }
}
