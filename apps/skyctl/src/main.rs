use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand};
use selene::{BirthData, Engine, KeplerEphemeris, NatalView, SnapshotView};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sky snapshots and natal charts from the command line")]
struct Args {
    /// Settings file (default: configs/selene.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at info level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON on a single line.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Positions of all bodies and the Moon's phase.
    Now {
        /// Instant to compute for, RFC 3339 (default: now).
        #[arg(long)]
        at: Option<String>,
    },
    /// Natal chart for a birth date and place.
    Natal {
        #[command(flatten)]
        birth: BirthArgs,

        /// Calculation time, also used for stand-in positions (default: now).
        #[arg(long)]
        at: Option<String>,
    },
    /// Aspects from the sky at an instant to a natal chart.
    Transits {
        #[command(flatten)]
        birth: BirthArgs,

        /// Instant of the transiting sky, RFC 3339 (default: now).
        #[arg(long)]
        at: Option<String>,
    },
}

#[derive(ClapArgs, Debug)]
struct BirthArgs {
    /// Birth date, YYYY-MM-DD.
    #[arg(long)]
    date: String,

    /// Birth time, HH:MM (UTC). Noon when omitted.
    #[arg(long)]
    time: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    lng: f64,
}

impl BirthArgs {
    fn birth_data(&self) -> BirthData {
        BirthData::new(self.date.clone(), self.time.as_deref(), self.lat, self.lng)
    }
}

fn parse_instant(at: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match at {
        Some(text) => Ok(DateTime::parse_from_rfc3339(text)
            .with_context(|| format!("Invalid --at {text:?} (expected RFC 3339)"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn print_json<T: serde::Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{text}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let settings = selene_config::load_engine_settings(args.config.as_deref())
        .context("Failed to load engine settings")?;
    let default_time = settings.default_birth_time.clone();
    let engine = Engine::with_settings(KeplerEphemeris::new(), settings);

    match &args.command {
        Command::Now { at } => {
            let at = parse_instant(at.as_deref())?;
            let snapshot = engine.snapshot_at(at);
            print_json(&SnapshotView::from(&snapshot), args.compact)
        }
        Command::Natal { birth, at } => {
            let now = parse_instant(at.as_deref())?;
            let chart = engine
                .natal_chart_at(&birth.birth_data(), now)
                .context("Could not calculate natal chart")?;
            print_json(&NatalView::new(&chart, &default_time), args.compact)
        }
        Command::Transits { birth, at } => {
            let at = parse_instant(at.as_deref())?;
            let natal = engine
                .natal_chart_at(&birth.birth_data(), at)
                .context("Could not calculate natal chart")?;
            let current = engine.snapshot_at(at);
            let aspects = engine.transits(&natal, &current);
            log::info!("{} transit aspect(s) at {}", aspects.len(), at.to_rfc3339());
            print_json(
                &json!({
                    "natal": natal.birth_instant,
                    "at": at,
                    "aspects": aspects,
                }),
                args.compact,
            )
        }
    }
}
