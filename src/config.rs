// Configuration: ~/.gcboard/rc plus command-line overrides

use chrono::Duration;
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::error::{GcError, GcResult};
use crate::models::{ParticipantSet, DEFAULT_TOTAL_STAGES};
use crate::source::{SourceLocation, DEFAULT_STANDINGS_URL, DEFAULT_TTL_SECS};

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub standings_source: SourceLocation,
    pub roster_source: Option<SourceLocation>,
    pub participants: ParticipantSet,
    pub cache_ttl_secs: i64,
    pub total_stages: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            standings_source: SourceLocation::Url(DEFAULT_STANDINGS_URL.to_string()),
            roster_source: None,
            participants: ParticipantSet::default(),
            cache_ttl_secs: DEFAULT_TTL_SECS,
            total_stages: DEFAULT_TOTAL_STAGES,
        }
    }
}

/// Command-line values that win over the rc file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub standings_source: Option<String>,
    pub roster_source: Option<String>,
    pub participants: Option<String>,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".gcboard").join("rc")
    }

    /// Load the rc file if present, then apply overrides
    pub fn load(overrides: &Overrides) -> GcResult<Self> {
        let path = Self::config_path();
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| GcError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
            Self::parse(&text, path.parent())?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };
        config.apply(overrides)?;
        Ok(config)
    }

    /// Parse `key=value` lines. Relative file sources resolve against `base_dir`.
    pub fn parse(text: &str, base_dir: Option<&Path>) -> GcResult<Self> {
        let mut config = Config::default();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| GcError::Config(format!("line {}: expected key=value", idx + 1)))?;
            let (key, value) = (key.trim(), value.trim());

            match key {
                "standings.source" => config.standings_source = resolve_source(value, base_dir),
                "roster.source" => config.roster_source = Some(resolve_source(value, base_dir)),
                "participants" => {
                    config.participants = ParticipantSet::parse_list(value);
                    if config.participants.is_empty() {
                        return Err(GcError::Config("participants list is empty".to_string()));
                    }
                }
                "cache.ttl" => {
                    config.cache_ttl_secs = value
                        .parse::<i64>()
                        .ok()
                        .filter(|v| *v >= 0)
                        .ok_or_else(|| GcError::Config(format!("Invalid cache.ttl: '{}'", value)))?;
                }
                "stages.total" => {
                    config.total_stages = value
                        .parse::<u32>()
                        .ok()
                        .filter(|v| *v > 0)
                        .ok_or_else(|| GcError::Config(format!("Invalid stages.total: '{}'", value)))?;
                }
                other => warn!("Ignoring unknown config key '{}'", other),
            }
        }

        Ok(config)
    }

    pub fn apply(&mut self, overrides: &Overrides) -> GcResult<()> {
        if let Some(spec) = &overrides.standings_source {
            self.standings_source = SourceLocation::parse(spec);
        }
        if let Some(spec) = &overrides.roster_source {
            self.roster_source = Some(SourceLocation::parse(spec));
        }
        if let Some(list) = &overrides.participants {
            let participants = ParticipantSet::parse_list(list);
            if participants.is_empty() {
                return Err(GcError::Config(format!("Invalid participants: '{}'", list)));
            }
            self.participants = participants;
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::seconds(self.cache_ttl_secs)
    }
}

fn resolve_source(value: &str, base_dir: Option<&Path>) -> SourceLocation {
    match SourceLocation::parse(value) {
        SourceLocation::File(path) if path.is_relative() => match base_dir {
            Some(dir) => SourceLocation::File(dir.join(path)),
            None => SourceLocation::File(path),
        },
        location => location,
    }
}
