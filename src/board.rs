// Composition root: owns the config, the sources and the table cache

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;

use crate::config::Config;
use crate::error::{GcError, GcResult};
use crate::models::{Progress, TeamRoster};
use crate::roster::RosterExtractor;
use crate::source::{Table, TableSource, TtlCache};
use crate::standings::{
    rank, DeltaBaseline, Extraction, StageSeries, StageSeriesBuilder, Standings, StandingsExtractor, Summary,
};

const STANDINGS_KEY: &str = "standings";
const ROSTER_KEY: &str = "roster";

/// Everything the dashboard view shows for one refresh
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub progress: Progress,
    pub standings: Standings,
    pub summary: Summary,
    /// Roster problems are reported here instead of failing the whole board
    pub rosters: Result<Vec<TeamRoster>, String>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub struct Board {
    config: Config,
    standings_source: Box<dyn TableSource>,
    roster_source: Option<Box<dyn TableSource>>,
    cache: TtlCache<&'static str, Table>,
    baseline: DeltaBaseline,
}

impl Board {
    pub fn new(config: Config) -> Self {
        let standings_source: Box<dyn TableSource> = Box::new(config.standings_source.clone());
        let roster_source = config
            .roster_source
            .clone()
            .map(|location| Box::new(location) as Box<dyn TableSource>);
        let cache = TtlCache::new(config.cache_ttl());
        Self::with_parts(config, standings_source, roster_source, cache)
    }

    pub fn with_parts(
        config: Config,
        standings_source: Box<dyn TableSource>,
        roster_source: Option<Box<dyn TableSource>>,
        cache: TtlCache<&'static str, Table>,
    ) -> Self {
        Board {
            config,
            standings_source,
            roster_source,
            cache,
            baseline: DeltaBaseline::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_delta_baseline(&mut self, baseline: DeltaBaseline) {
        self.baseline = baseline;
    }

    /// Drop both cached tables; the next read fetches again
    pub fn refresh(&mut self) {
        info!("Manual refresh requested");
        self.cache.invalidate_all();
    }

    /// When the standings table in use was fetched
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.cache.fetched_at(&STANDINGS_KEY)
    }

    fn standings_table(&mut self) -> GcResult<Table> {
        let source = &self.standings_source;
        self.cache
            .get_or_fetch(&STANDINGS_KEY, || source.fetch_table("Standings"))
    }

    fn roster_table(&mut self) -> GcResult<Table> {
        let source = self
            .roster_source
            .as_ref()
            .ok_or_else(|| GcError::RosterDataUnavailable("no roster source configured".to_string()))?;
        self.cache
            .get_or_fetch(&ROSTER_KEY, || source.fetch_table("Roster"))
            .map_err(|e| match e {
                GcError::RosterDataUnavailable(_) => e,
                other => GcError::RosterDataUnavailable(other.to_string()),
            })
    }

    pub fn extraction(&mut self) -> GcResult<Extraction> {
        let table = self.standings_table()?;
        StandingsExtractor::new(&self.config.participants, self.config.total_stages).extract(&table)
    }

    pub fn standings(&mut self) -> GcResult<Standings> {
        let extraction = self.extraction()?;
        rank(&extraction.latest_results(), extraction.current_stage)
    }

    pub fn progress(&mut self) -> GcResult<Progress> {
        let extraction = self.extraction()?;
        Ok(Progress::new(extraction.current_stage, self.config.total_stages))
    }

    pub fn series(&mut self) -> GcResult<StageSeries> {
        let extraction = self.extraction()?;
        Ok(StageSeriesBuilder::with_baseline(self.baseline)
            .build(&extraction.participants, extraction.current_stage))
    }

    pub fn rosters(&mut self) -> GcResult<Vec<TeamRoster>> {
        let table = self.roster_table()?;
        RosterExtractor::new(&self.config.participants).extract(&table)
    }

    /// Full board. Fails only when the standings cannot be produced.
    pub fn dashboard(&mut self) -> GcResult<Dashboard> {
        let extraction = self.extraction()?;
        let standings = rank(&extraction.latest_results(), extraction.current_stage)?;
        let summary = standings.summary().ok_or(GcError::NoParticipantData)?;
        let rosters = self.rosters().map_err(|e| {
            warn!("{}", e);
            e.to_string()
        });
        Ok(Dashboard {
            progress: Progress::new(extraction.current_stage, self.config.total_stages),
            summary,
            standings,
            rosters,
            updated_at: self.updated_at(),
        })
    }
}
