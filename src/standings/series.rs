// Per-stage series for charts: cumulative time, stage deltas, gap to the stage leader

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::models::StageEntry;
use crate::standings::ParticipantStages;
use crate::utils::Seconds;

/// One plotted value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub stage: u32,
    pub seconds: Seconds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantSeries {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl ParticipantSeries {
    pub fn at(&self, stage: u32) -> Option<Seconds> {
        self.points.iter().find(|p| p.stage == stage).map(|p| p.seconds)
    }
}

/// Which chart to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SeriesView {
    Cumulative,
    Delta,
    Gap,
}

impl SeriesView {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesView::Cumulative => "cumulative",
            SeriesView::Delta => "delta",
            SeriesView::Gap => "gap",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SeriesView::Cumulative => "Cumulative Time by Stage",
            SeriesView::Delta => "Stage Time by Stage",
            SeriesView::Gap => "Gap to Stage Leader",
        }
    }
}

impl fmt::Display for SeriesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeriesView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cumulative" => Ok(SeriesView::Cumulative),
            "delta" | "stage" => Ok(SeriesView::Delta),
            "gap" => Ok(SeriesView::Gap),
            other => Err(format!("Unknown chart view: {}", other)),
        }
    }
}

/// Baseline for a stage delta when the previous stage has no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaBaseline {
    /// Subtract the last recorded cumulative time, however many stages back
    #[default]
    CarryForward,
    /// Only emit a delta when stage k-1 itself was recorded
    PreviousStageOnly,
}

/// All three series for one extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageSeries {
    pub through_stage: u32,
    pub cumulative: Vec<ParticipantSeries>,
    pub delta: Vec<ParticipantSeries>,
    pub gap: Vec<ParticipantSeries>,
}

impl StageSeries {
    pub fn view(&self, view: SeriesView) -> &[ParticipantSeries] {
        match view {
            SeriesView::Cumulative => &self.cumulative,
            SeriesView::Delta => &self.delta,
            SeriesView::Gap => &self.gap,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StageSeriesBuilder {
    baseline: DeltaBaseline,
}

impl StageSeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_baseline(baseline: DeltaBaseline) -> Self {
        StageSeriesBuilder { baseline }
    }

    pub fn build(&self, participants: &[ParticipantStages], through_stage: u32) -> StageSeries {
        StageSeries {
            through_stage,
            cumulative: self.cumulative(participants, through_stage),
            delta: self.delta(participants, through_stage),
            gap: self.gap(participants, through_stage),
        }
    }

    /// Recorded cumulative times for stages `1..=through_stage`; missing stages are left out.
    pub fn cumulative(&self, participants: &[ParticipantStages], through_stage: u32) -> Vec<ParticipantSeries> {
        participants
            .iter()
            .map(|p| ParticipantSeries {
                name: p.name.clone(),
                points: in_range(p, through_stage)
                    .map(|e| SeriesPoint { stage: e.stage, seconds: e.time })
                    .collect(),
            })
            .collect()
    }

    /// Time ridden on each stage. Never negative: a cumulative value below its
    /// baseline yields 0.
    pub fn delta(&self, participants: &[ParticipantStages], through_stage: u32) -> Vec<ParticipantSeries> {
        participants
            .iter()
            .map(|p| {
                let mut points = Vec::new();
                let mut baseline: Seconds = 0;
                let mut baseline_stage: u32 = 0;
                for entry in in_range(p, through_stage) {
                    let contiguous = baseline_stage + 1 == entry.stage;
                    if contiguous || self.baseline == DeltaBaseline::CarryForward {
                        points.push(SeriesPoint {
                            stage: entry.stage,
                            seconds: entry.time.saturating_sub(baseline),
                        });
                    }
                    baseline = entry.time;
                    baseline_stage = entry.stage;
                }
                ParticipantSeries {
                    name: p.name.clone(),
                    points,
                }
            })
            .collect()
    }

    /// Distance to the fastest cumulative time recorded at the same stage.
    ///
    /// Participants who lead every stage they appear in have nothing to plot
    /// and are dropped.
    pub fn gap(&self, participants: &[ParticipantStages], through_stage: u32) -> Vec<ParticipantSeries> {
        let mut stage_leaders: BTreeMap<u32, Seconds> = BTreeMap::new();
        for p in participants {
            for entry in in_range(p, through_stage) {
                stage_leaders
                    .entry(entry.stage)
                    .and_modify(|best| *best = (*best).min(entry.time))
                    .or_insert(entry.time);
            }
        }

        participants
            .iter()
            .map(|p| ParticipantSeries {
                name: p.name.clone(),
                points: in_range(p, through_stage)
                    .map(|e| SeriesPoint {
                        stage: e.stage,
                        seconds: e.time - stage_leaders[&e.stage],
                    })
                    .collect(),
            })
            .filter(|s| s.points.iter().any(|pt| pt.seconds > 0))
            .collect()
    }
}

fn in_range(participant: &ParticipantStages, through_stage: u32) -> impl Iterator<Item = &StageEntry> {
    participant
        .entries
        .iter()
        .filter(move |e| e.stage >= 1 && e.stage <= through_stage)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stages(name: &str, entries: &[(u32, Seconds)]) -> ParticipantStages {
        ParticipantStages {
            name: name.to_string(),
            entries: entries
                .iter()
                .map(|(stage, time)| StageEntry { stage: *stage, time: *time })
                .collect(),
        }
    }

    fn points(series: &ParticipantSeries) -> Vec<(u32, Seconds)> {
        series.points.iter().map(|p| (p.stage, p.seconds)).collect()
    }

    #[test]
    fn test_cumulative_omits_missing_stages() {
        let data = vec![stages("Leo", &[(1, 3600), (3, 11_000)])];
        let series = StageSeriesBuilder::new().cumulative(&data, 3);
        assert_eq!(points(&series[0]), vec![(1, 3600), (3, 11_000)]);
    }

    #[test]
    fn test_cumulative_stops_at_through_stage() {
        let data = vec![stages("Leo", &[(1, 3600), (2, 7000), (3, 11_000)])];
        let series = StageSeriesBuilder::new().cumulative(&data, 2);
        assert_eq!(points(&series[0]), vec![(1, 3600), (2, 7000)]);
    }

    #[test]
    fn test_delta_contiguous() {
        let data = vec![stages("Jeremy", &[(1, 3600), (2, 7800)])];
        let series = StageSeriesBuilder::new().delta(&data, 2);
        assert_eq!(points(&series[0]), vec![(1, 3600), (2, 4200)]);
    }

    #[test]
    fn test_delta_carries_baseline_over_missing_stage() {
        let data = vec![stages("Leo", &[(1, 3600), (3, 11_000)])];
        let series = StageSeriesBuilder::new().delta(&data, 3);
        assert_eq!(points(&series[0]), vec![(1, 3600), (3, 7400)]);
    }

    #[test]
    fn test_delta_previous_stage_only_skips_after_gap() {
        let data = vec![stages("Leo", &[(1, 3600), (3, 11_000), (4, 14_000)])];
        let series = StageSeriesBuilder::with_baseline(DeltaBaseline::PreviousStageOnly).delta(&data, 4);
        assert_eq!(points(&series[0]), vec![(1, 3600), (4, 3000)]);
    }

    #[test]
    fn test_delta_never_negative() {
        // Unreadable cell read as 0 in the middle of a row
        let data = vec![stages("Nate", &[(1, 3600), (2, 0), (3, 11_000)])];
        let series = StageSeriesBuilder::new().delta(&data, 3);
        assert_eq!(points(&series[0]), vec![(1, 3600), (2, 0), (3, 11_000)]);
    }

    #[test]
    fn test_gap_uses_leader_at_each_stage() {
        let data = vec![
            stages("Jeremy", &[(1, 3600), (2, 7800)]),
            stages("Leo", &[(1, 3900), (2, 7500)]),
            stages("Nate", &[(1, 4000)]),
        ];
        let series = StageSeriesBuilder::new().gap(&data, 2);
        assert_eq!(series.len(), 3);
        assert_eq!(points(&series[0]), vec![(1, 0), (2, 300)]);
        assert_eq!(points(&series[1]), vec![(1, 300), (2, 0)]);
        assert_eq!(points(&series[2]), vec![(1, 400)]);
    }

    #[test]
    fn test_gap_drops_leader_of_every_stage() {
        let data = vec![
            stages("Aaron", &[(1, 3600), (2, 7000)]),
            stages("Charles", &[(1, 3700), (2, 7100)]),
        ];
        let series = StageSeriesBuilder::new().gap(&data, 2);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "Charles");
        assert_eq!(series[0].at(2), Some(100));
    }

    #[test]
    fn test_build_exposes_all_views() {
        let data = vec![
            stages("Aaron", &[(1, 3600)]),
            stages("Charles", &[(1, 3700)]),
        ];
        let all = StageSeriesBuilder::new().build(&data, 1);
        assert_eq!(all.view(SeriesView::Cumulative).len(), 2);
        assert_eq!(all.view(SeriesView::Delta).len(), 2);
        assert_eq!(all.view(SeriesView::Gap).len(), 1);
    }

    #[test]
    fn test_series_view_from_str() {
        assert_eq!("GAP".parse::<SeriesView>(), Ok(SeriesView::Gap));
        assert_eq!("stage".parse::<SeriesView>(), Ok(SeriesView::Delta));
        assert!("pie".parse::<SeriesView>().is_err());
    }
}
