// Locating and fetching the tabular exports

use log::info;
use reqwest::blocking;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{GcError, GcResult};
use crate::source::Table;

/// Published "Stage Data" worksheet, exported as CSV
pub const DEFAULT_STANDINGS_URL: &str =
    "https://docs.google.com/spreadsheets/d/1_dYs_80Xdi39_-vtZYxt6l4Mj_0jFuHSf4p79zcBI4M/export?format=csv&gid=0";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Where a table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Url(String),
    File(PathBuf),
}

impl SourceLocation {
    /// `http://` and `https://` are URLs; anything else is a file path.
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        let lower = spec.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceLocation::Url(spec.to_string())
        } else {
            SourceLocation::File(PathBuf::from(spec))
        }
    }

    /// Cache key
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Url(url) => f.write_str(url),
            SourceLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Anything that can hand back a table. `source_name` labels errors ("Standings", "Roster").
pub trait TableSource {
    fn fetch_table(&self, source_name: &str) -> GcResult<Table>;
}

impl TableSource for SourceLocation {
    fn fetch_table(&self, source_name: &str) -> GcResult<Table> {
        let text = fetch_text(self, source_name)?;
        Table::from_csv(&text).map_err(|e| GcError::source_unavailable(source_name, format!("{:#}", e)))
    }
}

/// Read the raw export text
pub fn fetch_text(location: &SourceLocation, source_name: &str) -> GcResult<String> {
    info!("Fetching {} data from {}", source_name, location);
    match location {
        SourceLocation::Url(url) => http_get(url, source_name),
        SourceLocation::File(path) => std::fs::read_to_string(path).map_err(|e| {
            GcError::source_unavailable(source_name, format!("Failed to read {}: {}", path.display(), e))
        }),
    }
}

fn http_get(url: &str, source_name: &str) -> GcResult<String> {
    // Spreadsheet exports answer with a redirect to a content host; the default policy follows it
    let client = blocking::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(concat!("gcboard/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| GcError::source_unavailable(source_name, format!("Failed to create HTTP client: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| GcError::source_unavailable(source_name, format!("Request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(GcError::source_unavailable(
            source_name,
            format!("HTTP error: {}", response.status()),
        ));
    }

    response
        .text()
        .map_err(|e| GcError::source_unavailable(source_name, format!("Failed to read response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            SourceLocation::parse("https://example.com/x.csv"),
            SourceLocation::Url("https://example.com/x.csv".to_string())
        );
        assert_eq!(
            SourceLocation::parse("HTTP://example.com"),
            SourceLocation::Url("HTTP://example.com".to_string())
        );
        assert_eq!(
            SourceLocation::parse("./stages.csv"),
            SourceLocation::File(PathBuf::from("./stages.csv"))
        );
    }

    #[test]
    fn test_fetch_table_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stages.csv");
        fs::write(&path, "Name,1\nLeo,1:00:00\n").unwrap();

        let table = SourceLocation::File(path).fetch_table("Standings").unwrap();
        assert_eq!(table.cell(1, 1), Some("1:00:00"));
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let err = SourceLocation::File(temp_dir.path().join("nope.csv"))
            .fetch_table("Standings")
            .unwrap_err();
        assert!(matches!(err, GcError::SourceUnavailable { .. }));
        assert!(err.to_string().starts_with("Standings source unavailable"));
    }
}
