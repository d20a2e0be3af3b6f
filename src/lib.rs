//! gcboard - standings board for a fantasy Grand Tour league
//!
//! This library provides the core functionality for gcboard, including:
//! - Elapsed-time parsing and formatting (`H:MM:SS`)
//! - Extraction of per-stage times and the current stage from the standings sheet
//! - General classification ranking with gaps to the leader
//! - Per-stage chart series (cumulative, stage delta, gap to stage leader)
//! - Rider rosters grouped by participant
//! - Fetching and caching of the spreadsheet exports
//! - CLI command parsing and terminal output
//!
//! # Example
//!
//! ```no_run
//! use gcboard::board::Board;
//! use gcboard::config::{Config, Overrides};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load(&Overrides::default())?;
//!     let mut board = Board::new(config);
//!     for record in board.standings()?.records {
//!         println!("{}. {} {} {}", record.position, record.name, record.time_text(), record.gap);
//!     }
//!     Ok(())
//! }
//! ```

pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod roster;
pub mod source;
pub mod standings;
pub mod utils;
