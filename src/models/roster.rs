use serde::{Deserialize, Serialize};

/// One rider drafted by a participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub rider: String,
    pub owner: String,
}

/// A participant's riders in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub owner: String,
    pub riders: Vec<String>,
}
