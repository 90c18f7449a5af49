mod cli;

use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use wheelsieve::{Engine, EngineConfig};

use cli::Args;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args = Args::parse();
    let (min, max) = args.bounds()?;

    info!(min, max, "wheelsieve starting");
    if !args.quiet {
        println!("wheelsieve {} starting, checking numbers on [{}, {}]", env!("CARGO_PKG_VERSION"), min, max);
    }

    let engine = Engine::new(EngineConfig::default())?;
    let start = Instant::now();

    let count = if args.quiet || max < 30 {
        engine.count(min, max)?
    } else {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}%")
                .expect("valid progress template")
                .progress_chars("#>-"),
        );
        let result = engine.count_with_progress(min, max, |done, total| {
            bar.set_position((done * 100) / total.max(1));
        })?;
        bar.finish_and_clear();
        result
    };

    let elapsed = start.elapsed().as_secs_f64();
    info!(count, elapsed, "wheelsieve finished");
    println!("Found {} primes in {:.2} seconds.", count, elapsed);

    Ok(())
}
