// Output formatting utilities

use chrono::{DateTime, Local, Utc};
use std::io::IsTerminal;

use crate::board::Dashboard;
use crate::models::{Placement, Progress, StageStatus, TeamRoster};
use crate::standings::{ParticipantSeries, SeriesView, StageSeries, Standings, Summary};
use crate::utils::{format_duration, gap_text};

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";
const ANSI_FG_BLACK: &str = "\x1b[30m";
const ANSI_FG_RED: &str = "\x1b[31m";
const ANSI_BG_YELLOW: &str = "\x1b[43m";

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate for reliable detection, with fallback to
/// COLUMNS environment variable and a sensible default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    120
}

/// Layout knobs shared by every formatter
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub color: bool,
    pub width: usize,
}

impl OutputOptions {
    pub fn detect() -> Self {
        OutputOptions {
            color: is_tty(),
            width: get_terminal_width(),
        }
    }

    pub fn plain(width: usize) -> Self {
        OutputOptions { color: false, width }
    }
}

fn bold_if_tty(text: &str, is_tty: bool) -> String {
    if is_tty {
        format!("{}{}{}", ANSI_BOLD, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

fn paint(text: &str, codes: &[&str], is_tty: bool) -> String {
    if is_tty {
        format!("{}{}{}", codes.concat(), text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

/// Format timestamp for display
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn placement_note(placement: Placement) -> &'static str {
    match placement {
        Placement::Leader => "yellow jersey",
        Placement::Podium => "podium",
        Placement::Field => "",
        Placement::LanterneRouge => "lanterne rouge",
    }
}

/// General classification table
pub fn format_standings_table(standings: &Standings, opts: OutputOptions) -> String {
    let mut pos_width = 3;
    let mut name_width = 11;
    let mut time_width = 8;
    let mut gap_width = 8;

    for record in &standings.records {
        pos_width = pos_width.max(record.position.to_string().len());
        name_width = name_width.max(record.name.chars().count().min(30));
        time_width = time_width.max(record.time_text().len());
        gap_width = gap_width.max(record.gap.to_string().len());
    }

    let mut output = String::new();
    let header = format!(
        "{:<pos$} {:<name$} {:>time$} {:>gap$}  {}",
        "Pos", "Participant", "Time", "Gap", "",
        pos = pos_width,
        name = name_width,
        time = time_width,
        gap = gap_width,
    );
    output.push_str(&bold_if_tty(header.trim_end(), opts.color));
    output.push('\n');
    let total_width = pos_width + name_width + time_width + gap_width + 3;
    output.push_str(&format!("{}\n", "-".repeat(total_width.min(opts.width.max(1)))));

    for record in &standings.records {
        let note = placement_note(standings.placement(record));
        let line = format!(
            "{:<pos$} {:<name$} {:>time$} {:>gap$}  {}",
            record.position,
            truncate(&record.name, name_width),
            record.time_text(),
            record.gap.to_string(),
            note,
            pos = pos_width,
            name = name_width,
            time = time_width,
            gap = gap_width,
        );
        let line = line.trim_end();
        let line = if record.is_leader() {
            paint(line, &[ANSI_BOLD, ANSI_BG_YELLOW, ANSI_FG_BLACK], opts.color)
        } else {
            line.to_string()
        };
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Participant count, leader and gap to second place
pub fn format_summary(summary: &Summary) -> String {
    let gap = summary
        .gap_to_second
        .map(|g| g.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    format!(
        "Participants: {}  Leader: {} ({})  Gap to 2nd: {}\n",
        summary.participants,
        summary.leader,
        format_duration(summary.leader_time),
        gap,
    )
}

/// Stage counter, progress bar and per-stage status strip
pub fn format_progress(progress: &Progress, opts: OutputOptions) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Stage {} of {} ({:.1}% complete)\n",
        progress.current_stage, progress.total_stages, progress.percent_complete
    ));

    let bar_width = opts.width.saturating_sub(2).clamp(10, 60);
    let filled = if progress.total_stages == 0 {
        0
    } else {
        (bar_width * progress.current_stage as usize / progress.total_stages as usize).min(bar_width)
    };
    output.push_str(&format!("[{}{}]\n", "#".repeat(filled), "-".repeat(bar_width - filled)));

    output.push_str(&format!(
        "Stages completed: {}  Stages remaining: {}\n",
        progress.current_stage, progress.stages_remaining
    ));

    let strip: Vec<&str> = progress
        .stages
        .iter()
        .map(|s| match s {
            StageStatus::Completed => "#",
            StageStatus::Next => ">",
            StageStatus::Future => ".",
        })
        .collect();
    output.push_str(&format!("Stages 1-{}: {}\n", progress.total_stages, strip.join(" ")));
    output.push_str("# completed | > next | . future\n");
    output
}

/// Riders grouped by owner
pub fn format_rosters(rosters: &[TeamRoster], opts: OutputOptions) -> String {
    let mut output = String::new();
    for roster in rosters {
        let title = format!("{} ({} rider{})", roster.owner, roster.riders.len(), if roster.riders.len() == 1 { "" } else { "s" });
        output.push_str(&bold_if_tty(&title, opts.color));
        output.push('\n');
        if roster.riders.is_empty() {
            output.push_str("  (no riders)\n");
        }
        for rider in &roster.riders {
            output.push_str(&format!("  {}\n", truncate(rider, opts.width.saturating_sub(2).max(10))));
        }
    }
    output
}

/// Participants down, stages across. Only the most recent stages that fit the width are shown.
pub fn format_series_table(series: &StageSeries, view: SeriesView, opts: OutputOptions) -> String {
    let rows = series.view(view);
    let mut output = String::new();
    output.push_str(&bold_if_tty(view.title(), opts.color));
    output.push('\n');

    if rows.is_empty() {
        output.push_str(match view {
            SeriesView::Gap => "Nobody has lost time to a stage leader yet.\n",
            _ => "No stage data.\n",
        });
        return output;
    }

    let name_width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0).max(11);
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| (1..=series.through_stage).map(|stage| series_cell(r, stage, view)).collect())
        .collect();
    let col_width = cells
        .iter()
        .flatten()
        .map(|c| c.len())
        .max()
        .unwrap_or(0)
        .max(format!("S{}", series.through_stage).len());

    let fits = (opts.width.saturating_sub(name_width) / (col_width + 1)).max(1);
    let shown = (series.through_stage as usize).min(fits);
    let first = series.through_stage as usize - shown;

    let mut header = format!("{:<width$}", "Participant", width = name_width);
    for stage in first + 1..=series.through_stage as usize {
        header.push_str(&format!(" {:>width$}", format!("S{}", stage), width = col_width));
    }
    output.push_str(&header);
    output.push('\n');
    output.push_str(&format!("{}\n", "-".repeat(header.len())));

    for (row, row_cells) in rows.iter().zip(&cells) {
        let mut line = format!("{:<width$}", row.name, width = name_width);
        for cell in &row_cells[first..] {
            line.push_str(&format!(" {:>width$}", cell, width = col_width));
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

fn series_cell(series: &ParticipantSeries, stage: u32, view: SeriesView) -> String {
    match (series.at(stage), view) {
        (None, _) => "-".to_string(),
        (Some(secs), SeriesView::Gap) => gap_text(0, secs),
        (Some(secs), _) => format_duration(secs),
    }
}

/// Full board: progress, standings, summary, rosters, footer
pub fn format_dashboard(dashboard: &Dashboard, ttl_secs: i64, opts: OutputOptions) -> String {
    let mut output = String::new();

    output.push_str(&bold_if_tty("GCBOARD - GENERAL CLASSIFICATION", opts.color));
    output.push('\n');
    output.push_str(&format!("Current standings after Stage {}\n\n", dashboard.standings.current_stage));

    output.push_str("=== Tour Progress ===\n");
    output.push_str(&format_progress(&dashboard.progress, opts));
    output.push('\n');

    output.push_str("=== Standings ===\n");
    output.push_str(&format_standings_table(&dashboard.standings, opts));
    output.push('\n');
    output.push_str(&format_summary(&dashboard.summary));
    output.push('\n');

    output.push_str("=== Rosters ===\n");
    match &dashboard.rosters {
        Ok(rosters) => output.push_str(&format_rosters(rosters, opts)),
        Err(message) => {
            output.push_str(&paint(message, &[ANSI_FG_RED], opts.color));
            output.push('\n');
        }
    }
    output.push('\n');

    let updated = dashboard
        .updated_at
        .map(format_timestamp)
        .unwrap_or_else(|| "never".to_string());
    output.push_str(&format!(
        "Last updated: {} | Data refreshes every {}\n",
        updated,
        format_refresh_interval(ttl_secs)
    ));
    output
}

fn format_refresh_interval(secs: i64) -> String {
    if secs > 0 && secs % 60 == 0 {
        let minutes = secs / 60;
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    } else {
        format!("{} seconds", secs)
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(2)).collect();
        format!("{}..", kept)
    }
}
