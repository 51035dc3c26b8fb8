//! wbi_rank
//!
//! A small Rust library for ranking countries by their latest World Bank population
//! and GDP figures. Pairs with the `wbi-rank` CLI.
//!
//! ### Features
//! - Fetch the most recent `SP.POP.TOTL` and `NY.GDP.MKTP.CD` value per country
//! - Tolerate missing or failing indicators per country without dropping rows
//! - Average ranks (ties share the mean position) for GDP and population
//! - Load the country list from JSON or CSV, or use the built-in list
//! - Save the ranked table as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use wbi_rank::{Client, CountryList};
//!
//! let client = Client::default();
//! let table = wbi_rank::collect(&client, &CountryList::builtin(), 1)?;
//! if let Some(nz) = table.find("New Zealand") {
//!     println!("{:?} {:?}", nz.gdp_rank, nz.population_rank);
//! }
//! wbi_rank::storage::save_csv(&table, "ranks.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod models;
pub mod rank;
pub mod storage;
pub mod table;

pub use api::{Client, CountryFetcher};
pub use config::{CountryEntry, CountryList};
pub use models::{CountryData, CountryRecord, CountryTable, Indicator};
pub use rank::{RankedRow, RankedTable};

/// Build the table for `countries` and rank it.
///
/// `workers` bounds concurrent per-country fetches; `1` fetches sequentially.
pub fn collect<F>(fetcher: &F, countries: &CountryList, workers: usize) -> anyhow::Result<RankedTable>
where
    F: CountryFetcher + Sync + ?Sized,
{
    log::info!("fetching {} countries", countries.len());
    let table = table::build_table_pooled(fetcher, countries, workers)?;
    let missing = table
        .rows
        .iter()
        .filter(|r| r.population.is_none() && r.gdp.is_none())
        .count();
    log::info!("{} rows collected, {} without data", table.len(), missing);
    Ok(rank::rank_table(table))
}
