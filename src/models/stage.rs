use serde::{Deserialize, Serialize};

use crate::utils::Seconds;

/// Stages in a Grand Tour
pub const DEFAULT_TOTAL_STAGES: u32 = 21;

/// Cumulative time recorded for one participant at one stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageEntry {
    /// 1-based stage index
    pub stage: u32,
    pub time: Seconds,
}

/// Completion state of a stage relative to the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Completed,
    Next,
    Future,
}

impl StageStatus {
    pub fn of(stage: u32, current_stage: u32) -> Self {
        if stage <= current_stage {
            StageStatus::Completed
        } else if stage == current_stage + 1 {
            StageStatus::Next
        } else {
            StageStatus::Future
        }
    }
}

/// Race progress derived from the current stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub current_stage: u32,
    pub total_stages: u32,
    pub stages_remaining: u32,
    pub percent_complete: f64,
    pub stages: Vec<StageStatus>,
}

impl Progress {
    pub fn new(current_stage: u32, total_stages: u32) -> Self {
        let current_stage = current_stage.min(total_stages);
        let percent_complete = if total_stages == 0 {
            0.0
        } else {
            f64::from(current_stage) / f64::from(total_stages) * 100.0
        };
        Progress {
            current_stage,
            total_stages,
            stages_remaining: total_stages - current_stage,
            percent_complete,
            stages: (1..=total_stages).map(|s| StageStatus::of(s, current_stage)).collect(),
        }
    }
}
