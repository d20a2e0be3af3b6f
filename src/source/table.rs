// Raw spreadsheet export as rows of string cells

use anyhow::{Context, Result};

/// Rows exactly as exported; ragged rows are kept ragged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Table { rows }
    }

    /// Parse CSV text. No header row is assumed.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record.with_context(|| format!("Malformed CSV at record {}", idx + 1))?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }
        Ok(Table { rows })
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text, or `None` past the end of a short row
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(|s| s.as_str())
    }

    /// First row taken as a header; position of the column whose trimmed name matches.
    pub fn header_index(&self, name: &str) -> Option<usize> {
        self.rows.first()?.iter().position(|h| h.trim() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv_keeps_ragged_rows() {
        let table = Table::from_csv("Name,1,2\nJeremy,1:00:00\n\nLeo,1:05:00,2:05:00,extra\n").unwrap();
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.rows()[1], vec!["Jeremy", "1:00:00"]);
        assert_eq!(table.cell(2, 3), Some("extra"));
        assert_eq!(table.cell(1, 2), None);
    }

    #[test]
    fn test_from_csv_quoted_cells() {
        let table = Table::from_csv("\"Rider\",\"Team\"\n\"Pogačar, Tadej\",Leo\n").unwrap();
        assert_eq!(table.cell(1, 0), Some("Pogačar, Tadej"));
    }

    #[test]
    fn test_header_index_trims() {
        let table = Table::from_csv(" Rider , Team ,Notes\n").unwrap();
        assert_eq!(table.header_index("Rider"), Some(0));
        assert_eq!(table.header_index("Team"), Some(1));
        assert_eq!(table.header_index("Owner"), None);
    }
}
