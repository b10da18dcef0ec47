//! Terminal table for High & Low.
//!
//! Usage:
//!   high-low --players Aki,Ben,Chie --stage demon --start 3 --add 1
//!
//! Then type `h` or `l` to guess, `r` to deal a new game, `q` to quit.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use high_low::{
    FollowUp, GameRng, Guess, MissPolicy, Outcome, Presentation, Resolution, RoundEngine,
    SetupForm, Snapshot, Stage,
};

#[derive(Parser, Debug)]
#[command(name = "high-low", about = "Shared-screen High & Low drinking game")]
struct Cli {
    /// Player names in seating order, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    players: Vec<String>,

    /// heaven, human, demon or extreme
    #[arg(long, default_value = "human")]
    stage: Stage,

    /// Cups on the table at the start
    #[arg(long, default_value = "1")]
    start: String,

    /// Cups added after every full pass around the table
    #[arg(long, default_value = "1")]
    add: String,

    /// What happens after a wrong guess: halt or continue
    #[arg(long, default_value = "halt")]
    miss_policy: MissPolicy,

    /// Fixed seed for a reproducible deck
    #[arg(long)]
    seed: Option<u64>,

    /// Pause for Joker and loss displays, in milliseconds
    #[arg(long, default_value_t = 800)]
    delay_ms: u64,

    /// Verbose logging
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.debug { "debug" } else { "high_low=warn,warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(cli.debug)
        .with_writer(io::stderr)
        .init();

    let mut form = SetupForm::new();
    form.set_players(cli.players.clone());
    form.set_stage(cli.stage);
    if !form.set_start_cups(&cli.start) || !form.set_add_per_round(&cli.add) {
        anyhow::bail!("cup counts must be whole numbers");
    }
    let handoff = form.start().context("invalid game setup")?;

    let rng = cli.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    tracing::info!(seed = rng.seed(), "dealing");

    let mut engine =
        RoundEngine::from_handoff(&handoff, cli.miss_policy, Presentation::Deferred, rng);
    let delay = Duration::from_millis(cli.delay_ms);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    render(&mut stdout, &engine.snapshot())?;

    for line in stdin.lock().lines() {
        let line = line.context("reading input")?;
        let command = line.trim();

        match command {
            "q" | "quit" => break,
            "r" | "restart" => engine.restart(),
            other => match other.parse::<Guess>() {
                Ok(guess) => match engine.guess(guess) {
                    Some(resolution) => {
                        report(&mut stdout, &resolution)?;
                        if resolution.follow_up.is_some() {
                            std::thread::sleep(delay);
                            engine.finish_presentation();
                        }
                    }
                    None => writeln!(stdout, "(no guess right now)")?,
                },
                Err(err) => {
                    tracing::debug!(%err, "unrecognised command");
                    writeln!(stdout, "h = high, l = low, r = new game, q = quit")?;
                }
            },
        }

        render(&mut stdout, &engine.snapshot())?;
    }

    Ok(())
}

fn report(out: &mut impl Write, resolution: &Resolution) -> io::Result<()> {
    match resolution.outcome {
        Outcome::Hit => writeln!(out, "{} -> {}  HIT", resolution.previous, resolution.drawn)?,
        Outcome::Miss => writeln!(out, "{} -> {}  MISS", resolution.previous, resolution.drawn)?,
        Outcome::JokerHit => writeln!(
            out,
            "JOKER! cups {} -> {}",
            resolution.cups_before, resolution.cups_after
        )?,
    }
    if resolution.follow_up == Some(FollowUp::JokerOverlay) {
        writeln!(out, "🃏🃏🃏")?;
    }
    if resolution.round_advanced {
        writeln!(out, "Next round! +cups")?;
    }
    Ok(())
}

fn render(out: &mut impl Write, snap: &Snapshot) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Round {}", snap.round)?;
    writeln!(out, "Loser drinks {} cups 🍺 ({} caps)", snap.cups, snap.caps)?;
    writeln!(
        out,
        "{} stage: +{} per round",
        snap.stage.display_name(),
        snap.add_per_round
    )?;

    match &snap.current_card {
        Some(card) => writeln!(out, "Card: {card}")?,
        None => writeln!(out, "Card: --")?,
    }

    if snap.loss_active {
        if let Some(loser) = &snap.loser {
            writeln!(out, "💥 {loser} loses! Drink {} cups.", snap.cups)?;
        }
        if !snap.can_guess {
            writeln!(out, "r = new game, q = quit")?;
        }
    } else if let Some(player) = &snap.current_player {
        writeln!(out, "{player}'s turn. High or low? [h/l]")?;
    }

    out.flush()
}
