use clap::{Parser, Subcommand};
use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::json;
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use crate::board::Board;
use crate::cli::abbrev;
use crate::cli::error::{user_error, validate_interval};
use crate::cli::output::{
    format_dashboard, format_progress, format_rosters, format_series_table, format_standings_table,
    format_summary, OutputOptions,
};
use crate::config::{Config, Overrides};
use crate::source::DEFAULT_TTL_SECS;
use crate::standings::{DeltaBaseline, SeriesView, Standings};

#[derive(Parser)]
#[command(name = "gcboard")]
#[command(about = "Fantasy Grand Tour standings board - general classification, rosters and stage charts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Standings sheet: CSV export URL or local CSV file
    #[arg(long, global = true, value_name = "URL|PATH")]
    pub standings_source: Option<String>,
    /// Rider roster sheet: CSV export URL or local CSV file
    #[arg(long, global = true, value_name = "URL|PATH")]
    pub roster_source: Option<String>,
    /// Comma-separated participant names (overrides the configured league)
    #[arg(long, global = true, value_name = "NAMES")]
    pub participants: Option<String>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Progress, standings, summary and rosters in one view (default)
    Dashboard,
    /// General classification table
    Standings {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Riders grouped by participant
    Rosters {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Stage-by-stage chart data
    Series {
        /// Which series to show
        #[arg(long, value_enum, default_value_t = SeriesView::Cumulative)]
        view: SeriesView,
        /// Only compute a stage delta when the previous stage was recorded
        #[arg(long)]
        strict_delta: bool,
        /// Output all three series in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Race progress through the stages
    Progress {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Redraw the dashboard periodically; type "r" + Enter to refresh now, "q" to quit
    Watch {
        /// Seconds between redraws (defaults to the cache TTL)
        #[arg(long, value_parser = validate_interval)]
        interval: Option<u64>,
        /// Stop after this many redraws
        #[arg(long, value_name = "N")]
        count: Option<u64>,
    },
}

fn init_logging() {
    let env = env_logger::Env::default().filter_or("GCBOARD_LOG", "warn");
    let _ = env_logger::Builder::from_env(env)
        .target(env_logger::Target::Stderr)
        .try_init();
}

pub fn run() -> Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // Expand command abbreviations before processing
    let args = match abbrev::expand_command_abbreviations(args) {
        Ok(expanded) => expanded,
        Err(e) => user_error(&e),
    };

    let clap_args = std::iter::once("gcboard".to_string())
        .chain(args)
        .collect::<Vec<_>>();
    let cli = match Cli::try_parse_from(clap_args) {
        Ok(cli) => cli,
        // Prints help/version with exit code 0, usage errors with 2
        Err(e) => e.exit(),
    };

    handle_command(cli)
}

fn handle_command(cli: Cli) -> Result<()> {
    let overrides = Overrides {
        standings_source: cli.standings_source,
        roster_source: cli.roster_source,
        participants: cli.participants,
    };
    let config = Config::load(&overrides).context("Failed to load configuration")?;
    debug!("Configuration: {:?}", config);
    let mut board = Board::new(config);

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => handle_dashboard(&mut board),
        Commands::Standings { json } => handle_standings(&mut board, json),
        Commands::Rosters { json } => handle_rosters(&mut board, json),
        Commands::Series { view, strict_delta, json } => {
            if strict_delta {
                board.set_delta_baseline(DeltaBaseline::PreviousStageOnly);
            }
            handle_series(&mut board, view, json)
        }
        Commands::Progress { json } => handle_progress(&mut board, json),
        Commands::Watch { interval, count } => handle_watch(&mut board, interval, count),
    }
}

fn standings_json(standings: &Standings) -> serde_json::Value {
    let rows: Vec<_> = standings
        .records
        .iter()
        .map(|r| {
            json!({
                "position": r.position,
                "name": r.name,
                "time": r.time_text(),
                "time_seconds": r.latest_time,
                "latest_stage": r.latest_stage,
                "gap": r.gap.to_string(),
                "gap_seconds": r.gap.seconds(),
                "placement": standings.placement(r),
            })
        })
        .collect();
    json!({
        "current_stage": standings.current_stage,
        "count": standings.len(),
        "standings": rows,
    })
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
    Ok(())
}

fn handle_standings(board: &mut Board, json: bool) -> Result<()> {
    let standings = board.standings().context("Failed to load standings")?;
    if json {
        return print_json(&standings_json(&standings));
    }
    let opts = OutputOptions::detect();
    println!("Current standings after Stage {}\n", standings.current_stage);
    print!("{}", format_standings_table(&standings, opts));
    if let Some(summary) = standings.summary() {
        println!();
        print!("{}", format_summary(&summary));
    }
    Ok(())
}

fn handle_rosters(board: &mut Board, json: bool) -> Result<()> {
    let rosters = board.rosters().context("Failed to load rosters")?;
    if json {
        return print_json(&serde_json::to_value(&rosters)?);
    }
    print!("{}", format_rosters(&rosters, OutputOptions::detect()));
    Ok(())
}

fn handle_series(board: &mut Board, view: SeriesView, json: bool) -> Result<()> {
    let series = board.series().context("Failed to build stage series")?;
    if json {
        return print_json(&serde_json::to_value(&series)?);
    }
    print!("{}", format_series_table(&series, view, OutputOptions::detect()));
    Ok(())
}

fn handle_progress(board: &mut Board, json: bool) -> Result<()> {
    let progress = board.progress().context("Failed to load standings")?;
    if json {
        return print_json(&serde_json::to_value(&progress)?);
    }
    print!("{}", format_progress(&progress, OutputOptions::detect()));
    Ok(())
}

fn handle_dashboard(board: &mut Board) -> Result<()> {
    let dashboard = board.dashboard().context("Unable to load standings data")?;
    let ttl = board.config().cache_ttl_secs;
    print!("{}", format_dashboard(&dashboard, ttl, OutputOptions::detect()));
    Ok(())
}

enum WatchInput {
    Refresh,
    Quit,
}

fn parse_watch_input(line: &str) -> Option<WatchInput> {
    match line.trim().to_lowercase().as_str() {
        "r" | "refresh" => Some(WatchInput::Refresh),
        "q" | "quit" | "exit" => Some(WatchInput::Quit),
        _ => None,
    }
}

fn handle_watch(board: &mut Board, interval: Option<u64>, count: Option<u64>) -> Result<()> {
    let ttl = board.config().cache_ttl_secs;
    let fallback = if ttl > 0 { ttl as u64 } else { DEFAULT_TTL_SECS as u64 };
    let interval = Duration::from_secs(interval.unwrap_or(fallback));
    info!("Watching with a {}s redraw interval", interval.as_secs());

    // Keyboard commands arrive on a channel so the redraw timer keeps running
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if let Some(input) = parse_watch_input(&line) {
                if tx.send(input).is_err() {
                    break;
                }
            }
        }
    });

    let opts = OutputOptions::detect();
    let mut stdin_open = true;
    let mut redraws = 0u64;
    loop {
        if opts.color {
            print!("\x1b[2J\x1b[H");
        }
        // A failed cycle is shown, not fatal: the next redraw tries again
        match board.dashboard() {
            Ok(dashboard) => print!("{}", format_dashboard(&dashboard, ttl, opts)),
            Err(e) => println!("Error: {}", e),
        }
        println!("[r] refresh  [q] quit");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        redraws += 1;
        if count.is_some_and(|n| redraws >= n) {
            return Ok(());
        }

        if stdin_open {
            match rx.recv_timeout(interval) {
                Ok(WatchInput::Refresh) => board.refresh(),
                Ok(WatchInput::Quit) => return Ok(()),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("stdin closed, continuing on the timer only");
                    stdin_open = false;
                    std::thread::sleep(interval);
                }
            }
        } else {
            std::thread::sleep(interval);
        }
    }
}
