// Groups drafted riders by owning participant

use log::debug;

use crate::error::{GcError, GcResult};
use crate::models::{ParticipantSet, RosterEntry, TeamRoster};
use crate::source::Table;

pub const RIDER_COLUMN: &str = "Rider";
pub const TEAM_COLUMN: &str = "Team";

pub struct RosterExtractor<'a> {
    participants: &'a ParticipantSet,
}

impl<'a> RosterExtractor<'a> {
    pub fn new(participants: &'a ParticipantSet) -> Self {
        RosterExtractor { participants }
    }

    /// Every valid `(rider, owner)` pair in sheet order.
    ///
    /// The first row is the header. Rows with a blank rider or a team that
    /// is not a known participant are skipped.
    pub fn entries(&self, table: &Table) -> GcResult<Vec<RosterEntry>> {
        let rider_col = table
            .header_index(RIDER_COLUMN)
            .ok_or_else(|| GcError::RosterDataUnavailable(format!("missing '{}' column", RIDER_COLUMN)))?;
        let team_col = table
            .header_index(TEAM_COLUMN)
            .ok_or_else(|| GcError::RosterDataUnavailable(format!("missing '{}' column", TEAM_COLUMN)))?;

        let mut entries = Vec::new();
        for row in table.rows().iter().skip(1) {
            let rider = row.get(rider_col).map(|s| s.trim()).unwrap_or("");
            let team = row.get(team_col).map(|s| s.as_str()).unwrap_or("");
            if rider.is_empty() {
                continue;
            }
            match self.participants.lookup(team) {
                Some(owner) => entries.push(RosterEntry {
                    rider: rider.to_string(),
                    owner: owner.to_string(),
                }),
                None => debug!("Skipping rider '{}' with unknown team '{}'", rider, team.trim()),
            }
        }
        Ok(entries)
    }

    /// One roster per known participant, in participant order (possibly empty).
    pub fn extract(&self, table: &Table) -> GcResult<Vec<TeamRoster>> {
        let entries = self.entries(table)?;
        Ok(self
            .participants
            .names()
            .iter()
            .map(|owner| TeamRoster {
                owner: owner.clone(),
                riders: entries
                    .iter()
                    .filter(|e| &e.owner == owner)
                    .map(|e| e.rider.clone())
                    .collect(),
            })
            .collect())
    }
}
