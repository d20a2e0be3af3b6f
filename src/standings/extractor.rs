// Pulls participant rows and stage times out of the standings sheet

use log::{debug, info};
use serde::Serialize;

use crate::error::{GcError, GcResult};
use crate::models::{LatestResult, ParticipantSet, StageEntry};
use crate::source::Table;
use crate::utils::{is_absent, parse_duration_or_absent};

/// Recorded stages for one participant, ordered by stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantStages {
    pub name: String,
    pub entries: Vec<StageEntry>,
}

impl ParticipantStages {
    /// Rightmost recorded stage
    pub fn latest(&self) -> Option<LatestResult> {
        self.entries.last().map(|e| LatestResult {
            time: e.time,
            stage: e.stage,
        })
    }

    pub fn time_at(&self, stage: u32) -> Option<u64> {
        self.entries.iter().find(|e| e.stage == stage).map(|e| e.time)
    }
}

/// Everything read from one standings sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Participants with at least one recorded stage, in sheet order
    pub participants: Vec<ParticipantStages>,
    /// Highest stage with data for anyone
    pub current_stage: u32,
}

impl Extraction {
    /// `(name, latest)` per participant, in sheet order
    pub fn latest_results(&self) -> Vec<(String, LatestResult)> {
        self.participants
            .iter()
            .filter_map(|p| p.latest().map(|latest| (p.name.clone(), latest)))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&ParticipantStages> {
        self.participants.iter().find(|p| p.name == name)
    }
}

/// Scans column 0 for known names and columns `1..=max_stage` for times.
pub struct StandingsExtractor<'a> {
    participants: &'a ParticipantSet,
    max_stage: u32,
}

impl<'a> StandingsExtractor<'a> {
    pub fn new(participants: &'a ParticipantSet, max_stage: u32) -> Self {
        StandingsExtractor { participants, max_stage }
    }

    pub fn extract(&self, table: &Table) -> GcResult<Extraction> {
        let mut participants: Vec<ParticipantStages> = Vec::new();
        let mut current_stage = 0u32;
        let mut matched_rows = 0usize;

        for row in table.rows() {
            let Some(name) = row.first().and_then(|cell| self.participants.lookup(cell)) else {
                continue;
            };
            matched_rows += 1;

            let entries = self.scan_row(row);
            let Some(last) = entries.last() else {
                // Blank rows never overwrite an earlier row for the same name
                debug!("No recorded stages for {}", name);
                continue;
            };
            current_stage = current_stage.max(last.stage);

            // A repeated name replaces the earlier row but keeps its place
            match participants.iter_mut().find(|p| p.name == name) {
                Some(existing) => existing.entries = entries,
                None => participants.push(ParticipantStages {
                    name: name.to_string(),
                    entries,
                }),
            }
        }

        if participants.is_empty() {
            info!("{} participant rows matched, none with stage data", matched_rows);
            return Err(GcError::NoParticipantData);
        }

        info!(
            "Extracted {} participants through stage {}",
            participants.len(),
            current_stage
        );
        Ok(Extraction {
            participants,
            current_stage,
        })
    }

    fn scan_row(&self, row: &[String]) -> Vec<StageEntry> {
        let last_col = (self.max_stage as usize).min(row.len().saturating_sub(1));
        let mut entries = Vec::new();
        for col in 1..=last_col {
            let cell = &row[col];
            if is_absent(cell) {
                continue;
            }
            entries.push(StageEntry {
                stage: col as u32,
                time: parse_duration_or_absent(cell),
            });
        }
        entries
    }
}
