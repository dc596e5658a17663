use anyhow::{Context, Result};
use clap::Parser;
use pattern_recall::core::{Game, InputEvent, RandomPalette};
use pattern_recall::effects::{GameController, GameEnv};
use pattern_recall::runtime::TokioScheduler;
use pattern_recall::terminal::{event_from_line, TerminalBell, TextBoard};
use pattern_recall::GameConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pattern-recall")]
#[command(about = "Repeat the pattern: a four-color memory game in the terminal")]
struct Cli {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the color sequence (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Do not ring the terminal bell
    #[arg(long)]
    mute: bool,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let seed = config.seed.unwrap_or_else(rand::random::<u64>);
    tracing::info!(seed, "color sequence seeded");

    let (scheduler, mut timers) = TokioScheduler::channel();
    let env = GameEnv::new(
        Arc::new(TextBoard::stdout()),
        Arc::new(TerminalBell::new(cli.mute)),
        Arc::new(scheduler),
    );
    let colors = RandomPalette::new(StdRng::seed_from_u64(seed));
    let mut controller = GameController::new(Game::new(config.timing()), colors);

    println!("Press Enter to start. Type g, r, y or b (or a color name) to press a pad. Ctrl-D quits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let event = tokio::select! {
            line = lines.next_line() => match line.context("reading stdin")? {
                Some(line) => event_from_line(&line, controller.game().is_started()),
                None => break,
            },
            Some(timer) = timers.recv() => InputEvent::Timer(timer),
        };
        controller.handle(event, &env).await?;
    }

    tracing::info!(
        transitions = controller.game().history().len(),
        "session ended"
    );
    Ok(())
}
