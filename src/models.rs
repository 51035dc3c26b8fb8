use serde::{Deserialize, Serialize};
use std::fmt;

/// The two indicator series this crate retrieves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    /// `SP.POP.TOTL`: total population.
    Population,
    /// `NY.GDP.MKTP.CD`: GDP at current prices (US$).
    Gdp,
}

impl Indicator {
    /// World Bank indicator id used in the request path.
    pub fn id(&self) -> &'static str {
        match *self {
            Indicator::Population => "SP.POP.TOTL",
            Indicator::Gdp => "NY.GDP.MKTP.CD",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeName {
    pub id: String,
    pub value: String,
}

/// Raw observation from the API (elements of the position 1 array).
///
/// Everything except `value` is only used for diagnostics, so all fields are
/// optional and unknown keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Observation {
    pub indicator: Option<CodeName>,
    pub country: Option<CodeName>,
    pub countryiso3code: Option<String>,
    pub date: Option<String>,
    pub value: Option<f64>,
}

/// Latest values fetched for one country. At least one field is present
/// whenever the fetcher hands one out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryData {
    pub population: Option<u64>,
    pub gdp: Option<f64>,
}

impl CountryData {
    pub fn is_empty(&self) -> bool {
        self.population.is_none() && self.gdp.is_none()
    }
}

/// One output row before ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Population")]
    pub population: Option<u64>,
    #[serde(rename = "GDP")]
    pub gdp: Option<f64>,
}

impl CountryRecord {
    /// Project an optional fetch result into a row; `None` yields an empty row.
    pub fn from_fetch(country: impl Into<String>, data: Option<CountryData>) -> Self {
        let data = data.unwrap_or_default();
        Self {
            country: country.into(),
            population: data.population,
            gdp: data.gdp,
        }
    }
}

/// Ordered rows, one per configured country, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryTable {
    pub rows: Vec<CountryRecord>,
}

impl CountryTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
