//! Ordered country configuration.
//!
//! A [`CountryList`] maps display names to ISO3 codes and fixes the row order of
//! the resulting table. Lists come from the built-in default, a JSON array of
//! `{"name", "code"}` objects, or a CSV file with a `name,code` header.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

const DEFAULT_COUNTRIES: &str = include_str!("countries.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read country list: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse country list json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parse country list csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("duplicate country name: {0}")]
    DuplicateName(String),
    #[error("country entry {index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },
    #[error("unsupported country list format: {0} (expected .json or .csv)")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    pub name: String,
    pub code: String,
}

impl CountryEntry {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryList {
    entries: Vec<CountryEntry>,
}

impl CountryList {
    /// Build a list, rejecting duplicate or empty names and empty codes.
    pub fn new(entries: Vec<CountryEntry>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for (index, e) in entries.iter().enumerate() {
            if e.name.trim().is_empty() {
                return Err(ConfigError::EmptyField { index, field: "name" });
            }
            if e.code.trim().is_empty() {
                return Err(ConfigError::EmptyField { index, field: "code" });
            }
            if !seen.insert(e.name.as_str()) {
                return Err(ConfigError::DuplicateName(e.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The 52 countries the ranking was originally run against.
    pub fn builtin() -> Self {
        Self::from_json_str(DEFAULT_COUNTRIES).expect("embedded country list is valid")
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let entries: Vec<CountryEntry> = serde_json::from_str(s)?;
        Self::new(entries)
    }

    pub fn from_csv_reader<R: std::io::Read>(rdr: R) -> Result<Self, ConfigError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
        let entries = rdr
            .deserialize::<CountryEntry>()
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    /// Load from a `.json` or `.csv` file, chosen by extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?),
            "csv" => Self::from_csv_reader(File::open(path)?),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn entries(&self) -> &[CountryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CountryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a CountryList {
    type Item = &'a CountryEntry;
    type IntoIter = std::slice::Iter<'a, CountryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
