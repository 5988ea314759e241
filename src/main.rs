use std::path::PathBuf;

use anyhow::Context;
use barnsley_fern::render::{self, PostTransform, RenderOptions};
use barnsley_fern::{generate, Config, Summary, DEFAULT_POINTS};
use clap::Parser;
use env_logger::Env;

#[derive(Parser)]
#[command(name = "barnsley-fern")]
#[command(about = "Draw a Barnsley fern with the chaos game", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of points to emit
    #[arg(short, long, default_value_t = DEFAULT_POINTS)]
    points: usize,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Iterates to discard before emitting
    #[arg(short, long, default_value_t = 0)]
    warmup: usize,

    /// Scale applied when placing the fern in the 0..3 window
    #[arg(long, default_value_t = 0.15)]
    scale: f64,

    /// PNG file to write
    #[arg(short, long, default_value = render::DEFAULT_OUTPUT, value_hint = clap::ValueHint::FilePath)]
    output: PathBuf,

    /// Only print the summary
    #[arg(long)]
    no_render: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger with default level (overridden by RUST_LOG)
    let env = Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    let mut config = Config::default()
        .with_points(cli.points)
        .with_warmup(cli.warmup);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    log::info!("computing {} points", config.points);
    let stream = generate(&config).context("failed to generate fern")?;

    let placement = PostTransform::scale_translate(cli.scale, 1.5, 0.5);
    println!("{}", Summary::from_stream(&stream, &placement));

    if !cli.no_render {
        let options = RenderOptions {
            placement,
            ..RenderOptions::default()
        };
        render::render_png(&stream, &cli.output, &options)
            .with_context(|| format!("failed to write {}", cli.output.display()))?;
        println!("Fern saved as '{}'", cli.output.display());
    }

    Ok(())
}
