use crate::models::{CountryRecord, CountryTable};
use serde::{Deserialize, Serialize};

/// A table row with its derived ranks (1 = largest value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Population")]
    pub population: Option<u64>,
    #[serde(rename = "GDP")]
    pub gdp: Option<f64>,
    #[serde(rename = "GDP Rank")]
    pub gdp_rank: Option<f64>,
    #[serde(rename = "Population Rank")]
    pub population_rank: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedTable {
    pub rows: Vec<RankedRow>,
}

impl RankedTable {
    /// Row for the given display name, if configured.
    pub fn find(&self, country: &str) -> Option<&RankedRow> {
        self.rows.iter().find(|r| r.country == country)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Descending average ranks.
///
/// Present values are ordered largest first and numbered from 1. Equal values share
/// the mean of the positions they occupy. `None` entries get no rank and do not take
/// up a position. The output is aligned with the input.
pub fn average_rank_desc(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|x| (i, x)))
        .collect();
    present.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut out = vec![None; values.len()];
    let mut start = 0;
    while start < present.len() {
        let mut end = start + 1;
        while end < present.len() && present[end].1 == present[start].1 {
            end += 1;
        }
        // positions start+1 ..= end, averaged
        let rank = (start + 1 + end) as f64 / 2.0;
        for &(i, _) in &present[start..end] {
            out[i] = Some(rank);
        }
        start = end;
    }
    out
}

/// Append GDP and population ranks, computed independently per column.
pub fn rank_table(table: CountryTable) -> RankedTable {
    let gdp: Vec<Option<f64>> = table.rows.iter().map(|r| r.gdp).collect();
    let pop: Vec<Option<f64>> = table
        .rows
        .iter()
        .map(|r| r.population.map(|p| p as f64))
        .collect();
    let gdp_ranks = average_rank_desc(&gdp);
    let pop_ranks = average_rank_desc(&pop);

    let rows = table
        .rows
        .into_iter()
        .zip(gdp_ranks.into_iter().zip(pop_ranks))
        .map(
            |(
                CountryRecord {
                    country,
                    population,
                    gdp,
                },
                (gdp_rank, population_rank),
            )| RankedRow {
                country,
                population,
                gdp,
                gdp_rank,
                population_rank,
            },
        )
        .collect();
    RankedTable { rows }
}
