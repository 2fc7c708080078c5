use anyhow::Context;
use arcade_execution::{GameRng, OsRandom, Pacer, RandomSource};
use arcade_lobby::{
    console::{Console, Flow},
    Arcade, Config, FileStore, MemoryStore, Store,
};
use clap::Parser;
use std::{path::PathBuf, sync::Arc};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Snapshot file (overrides the configured state_path)
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Replayable session from a fixed seed
    #[arg(long)]
    seed: Option<u64>,

    /// Skip every round delay
    #[arg(long)]
    instant: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    let mut config = config.validate().context("invalid configuration")?;
    if let Some(state) = args.state {
        config.state_path = Some(state);
    }
    if args.instant {
        config.pacer = Pacer::instant();
    }

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    let rng: Arc<dyn RandomSource> = match args.seed {
        Some(seed) => {
            info!(seed, "using seeded randomness");
            Arc::new(GameRng::new(seed))
        }
        None => Arc::new(OsRandom),
    };
    let store: Arc<dyn Store> = match &config.state_path {
        Some(path) => Arc::new(FileStore::new(path.clone())),
        None => Arc::new(MemoryStore::new()),
    };
    let arcade = Arcade::open(&config, rng, store).context("failed to open arcade")?;

    let console = Console::new(arcade);
    println!("{}", console.banner());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("failed to read command")?
    {
        match console.handle(&line).await {
            Flow::Print(text) => println!("{text}"),
            Flow::Skip => {}
            Flow::Quit => break,
        }
    }

    info!(balance = console.arcade().balance(), "leaving arcade");
    Ok(())
}
