use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::{format_duration, gap_text, Seconds};

/// Default league membership
pub const DEFAULT_PARTICIPANTS: &[&str] = &["Jeremy", "Leo", "Charles", "Aaron", "Nate"];

/// The fixed set of names the extractors recognise.
///
/// Order is significant: it is the display order for rosters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSet {
    names: Vec<String>,
}

impl ParticipantSet {
    /// Build from names; blanks are dropped, duplicates keep their first position.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if !name.is_empty() && !out.iter().any(|n| n == name) {
                out.push(name.to_string());
            }
        }
        ParticipantSet { names: out }
    }

    /// Parse a comma-separated list (`"Jeremy, Leo"`)
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Match a raw cell against the set, returning the canonical name.
    pub fn lookup(&self, cell: &str) -> Option<&str> {
        let cell = cell.trim();
        self.names.iter().find(|n| n.as_str() == cell).map(|n| n.as_str())
    }

    pub fn contains(&self, cell: &str) -> bool {
        self.lookup(cell).is_some()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ParticipantSet {
    fn default() -> Self {
        Self::new(DEFAULT_PARTICIPANTS.iter())
    }
}

/// Distance to the classification leader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gap {
    Leader,
    Behind(Seconds),
}

impl Gap {
    pub fn between(leader_secs: Seconds, participant_secs: Seconds) -> Self {
        if participant_secs <= leader_secs {
            Gap::Leader
        } else {
            Gap::Behind(participant_secs - leader_secs)
        }
    }

    pub fn seconds(&self) -> Seconds {
        match self {
            Gap::Leader => 0,
            Gap::Behind(secs) => *secs,
        }
    }
}

impl fmt::Display for Gap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gap::Leader => f.write_str(&gap_text(0, 0)),
            Gap::Behind(secs) => f.write_str(&gap_text(0, *secs)),
        }
    }
}

/// Latest recorded result for one participant, before ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestResult {
    /// Cumulative time at `stage`
    pub time: Seconds,
    /// Rightmost stage column with data for this participant
    pub stage: u32,
}

/// One line of the general classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub name: String,
    pub latest_time: Seconds,
    pub latest_stage: u32,
    /// 1-based
    pub position: usize,
    pub gap: Gap,
}

impl ParticipantRecord {
    pub fn time_text(&self) -> String {
        format_duration(self.latest_time)
    }

    pub fn is_leader(&self) -> bool {
        self.position == 1
    }
}

/// Where a position sits on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Leader,
    Podium,
    Field,
    /// Last place (only when there is more than one participant)
    LanterneRouge,
}

impl Placement {
    pub fn of(position: usize, total: usize) -> Self {
        if position == 1 {
            Placement::Leader
        } else if position == total {
            Placement::LanterneRouge
        } else if position <= 3 {
            Placement::Podium
        } else {
            Placement::Field
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_set_lookup_trims() {
        let set = ParticipantSet::default();
        assert_eq!(set.lookup("  Leo "), Some("Leo"));
        assert_eq!(set.lookup("leo"), None);
        assert_eq!(set.lookup("Stage"), None);
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_participant_set_parse_list() {
        let set = ParticipantSet::parse_list("Ann, Bob,,Ann , Cy");
        assert_eq!(set.names(), &["Ann".to_string(), "Bob".to_string(), "Cy".to_string()]);
    }

    #[test]
    fn test_gap_display() {
        assert_eq!(Gap::between(7500, 7500).to_string(), "Leader");
        assert_eq!(Gap::between(7500, 7800).to_string(), "+0:05:00");
        assert_eq!(Gap::Behind(300).seconds(), 300);
    }

    #[test]
    fn test_placement() {
        assert_eq!(Placement::of(1, 5), Placement::Leader);
        assert_eq!(Placement::of(2, 5), Placement::Podium);
        assert_eq!(Placement::of(3, 5), Placement::Podium);
        assert_eq!(Placement::of(4, 5), Placement::Field);
        assert_eq!(Placement::of(5, 5), Placement::LanterneRouge);
        assert_eq!(Placement::of(2, 2), Placement::LanterneRouge);
        assert_eq!(Placement::of(1, 1), Placement::Leader);
    }
}
