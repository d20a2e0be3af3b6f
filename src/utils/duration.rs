// Elapsed-time codec for spreadsheet cells ("H:MM:SS" <-> seconds)

use log::debug;

/// Elapsed time in whole seconds. Zero doubles as "no time recorded".
pub type Seconds = u64;

/// Text that marks a stage with no result yet
pub const ABSENT_TIME: &str = "0:00:00";

/// Label used instead of a gap for the classification leader
pub const LEADER_LABEL: &str = "Leader";

/// Returns true when a cell carries no time: blank, whitespace or the `0:00:00` sentinel.
pub fn is_absent(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed == ABSENT_TIME
}

/// Strict parse of `H:MM:SS` into seconds.
///
/// Exactly three colon-separated unsigned fields are required. Hours are
/// unbounded; minutes and seconds are not range-checked, so `0:75:00`
/// reads as 4500 seconds.
pub fn parse_duration(text: &str) -> Option<Seconds> {
    let mut parts = text.trim().split(':');
    let hours = parse_field(parts.next()?)?;
    let minutes = parse_field(parts.next()?)?;
    let seconds = parse_field(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

fn parse_field(field: &str) -> Option<Seconds> {
    let field = field.trim();
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Lenient parse used for every spreadsheet cell.
///
/// Absent cells and malformed text both come back as 0. The two cases are
/// indistinguishable to callers; malformed text is only visible in the debug log.
pub fn parse_duration_or_absent(text: &str) -> Seconds {
    if is_absent(text) {
        return 0;
    }
    match parse_duration(text) {
        Some(secs) => secs,
        None => {
            debug!("Unreadable time value '{}', treating as absent", text.trim());
            0
        }
    }
}

/// Format seconds as `H:MM:SS` (hours unpadded and never wrapped at 24).
pub fn format_duration(secs: Seconds) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

/// Gap between the leader's time and a participant's time.
///
/// `"Leader"` when equal, otherwise `+H:MM:SS`. A participant ahead of the
/// given leader time gets a `-` prefix instead.
pub fn gap_text(leader_secs: Seconds, participant_secs: Seconds) -> String {
    if participant_secs == leader_secs {
        LEADER_LABEL.to_string()
    } else if participant_secs > leader_secs {
        format!("+{}", format_duration(participant_secs - leader_secs))
    } else {
        format!("-{}", format_duration(leader_secs - participant_secs))
    }
}
