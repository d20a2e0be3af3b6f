// General classification: order by cumulative time, assign positions and gaps

use serde::Serialize;

use crate::error::{GcError, GcResult};
use crate::models::{Gap, LatestResult, ParticipantRecord, Placement};
use crate::utils::Seconds;

/// Ranked classification after `current_stage`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standings {
    pub records: Vec<ParticipantRecord>,
    pub current_stage: u32,
}

/// Headline numbers shown under the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub participants: usize,
    pub leader: String,
    pub leader_time: Seconds,
    /// `None` with a single participant
    pub gap_to_second: Option<Gap>,
}

impl Standings {
    pub fn leader(&self) -> Option<&ParticipantRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn placement(&self, record: &ParticipantRecord) -> Placement {
        Placement::of(record.position, self.records.len())
    }

    /// `None` for an empty classification
    pub fn summary(&self) -> Option<Summary> {
        let leader = self.leader()?;
        Some(Summary {
            participants: self.records.len(),
            leader: leader.name.clone(),
            leader_time: leader.latest_time,
            gap_to_second: self.records.get(1).map(|r| r.gap),
        })
    }
}

/// Sort ascending by latest time and compute gaps to the leader.
///
/// The sort is stable, so equal times keep their sheet order. Every record
/// tied with the leader's time reads as "Leader".
pub fn rank(latest: &[(String, LatestResult)], current_stage: u32) -> GcResult<Standings> {
    if latest.is_empty() {
        return Err(GcError::NoParticipantData);
    }

    let mut ordered: Vec<&(String, LatestResult)> = latest.iter().collect();
    ordered.sort_by_key(|(_, result)| result.time);

    let leader_time = ordered[0].1.time;
    let records = ordered
        .into_iter()
        .enumerate()
        .map(|(idx, (name, result))| ParticipantRecord {
            name: name.clone(),
            latest_time: result.time,
            latest_stage: result.stage,
            position: idx + 1,
            gap: Gap::between(leader_time, result.time),
        })
        .collect();

    Ok(Standings {
        records,
        current_stage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latest(rows: &[(&str, Seconds, u32)]) -> Vec<(String, LatestResult)> {
        rows.iter()
            .map(|(name, time, stage)| (name.to_string(), LatestResult { time: *time, stage: *stage }))
            .collect()
    }

    #[test]
    fn test_rank_orders_by_time() {
        let standings = rank(&latest(&[("Jeremy", 7800, 2), ("Leo", 7500, 2)]), 2).unwrap();
        assert_eq!(standings.records[0].name, "Leo");
        assert_eq!(standings.records[0].position, 1);
        assert_eq!(standings.records[0].gap.to_string(), "Leader");
        assert_eq!(standings.records[1].name, "Jeremy");
        assert_eq!(standings.records[1].position, 2);
        assert_eq!(standings.records[1].gap.to_string(), "+0:05:00");
        assert_eq!(standings.records[1].time_text(), "2:10:00");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let standings = rank(
            &latest(&[("Nate", 4000, 1), ("Aaron", 3600, 1), ("Charles", 3600, 1)]),
            1,
        )
        .unwrap();
        let names: Vec<_> = standings.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Aaron", "Charles", "Nate"]);
        assert_eq!(standings.records[1].gap, Gap::Leader);
        assert_eq!(standings.records[2].gap, Gap::Behind(400));
    }

    #[test]
    fn test_gap_uses_own_latest_time_regardless_of_stage() {
        let standings = rank(&latest(&[("Jeremy", 10_800, 3), ("Nate", 3660, 1)]), 3).unwrap();
        assert_eq!(standings.leader().unwrap().name, "Nate");
        assert_eq!(standings.leader().unwrap().latest_stage, 1);
    }

    #[test]
    fn test_summary() {
        let standings = rank(&latest(&[("Jeremy", 7800, 2), ("Leo", 7500, 2)]), 2).unwrap();
        let summary = standings.summary().unwrap();
        assert_eq!(summary.participants, 2);
        assert_eq!(summary.leader, "Leo");
        assert_eq!(summary.gap_to_second, Some(Gap::Behind(300)));

        let solo = rank(&latest(&[("Leo", 7500, 2)]), 2).unwrap();
        assert_eq!(solo.summary().unwrap().gap_to_second, None);
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(matches!(rank(&[], 0), Err(GcError::NoParticipantData)));
    }

    #[test]
    fn test_empty_standings_have_no_leader() {
        let standings = Standings { records: Vec::new(), current_stage: 0 };
        assert!(standings.leader().is_none());
        assert!(standings.summary().is_none());
    }
}
