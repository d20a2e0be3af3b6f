//! Error types shared by the extraction pipeline

use thiserror::Error;

/// Failures that end the current refresh cycle.
///
/// Unreadable time cells are not represented here: they are read as absent
/// (see [`crate::utils::parse_duration_or_absent`]).
#[derive(Debug, Error)]
pub enum GcError {
    /// A tabular source could not be fetched or read
    #[error("{source_name} source unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    /// No known participant row, or none with a recorded stage
    #[error("No participant data found in the standings sheet")]
    NoParticipantData,

    /// The roster table could not be fetched or understood
    #[error("Roster data unavailable: {0}")]
    RosterDataUnavailable(String),

    /// Bad rc file or command-line override
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GcError {
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        GcError::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

pub type GcResult<T> = std::result::Result<T, GcError>;
