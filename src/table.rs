use crate::api::CountryFetcher;
use crate::config::CountryList;
use crate::models::{CountryRecord, CountryTable};
use anyhow::{Context, Result};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

/// One row per configured country, in configuration order.
///
/// Countries are fetched one at a time. A country without data still gets a row,
/// with both values empty.
pub fn build_table<F: CountryFetcher + ?Sized>(fetcher: &F, countries: &CountryList) -> CountryTable {
    let rows: Vec<CountryRecord> = countries
        .iter()
        .map(|e| CountryRecord::from_fetch(&e.name, fetcher.fetch_country(&e.code)))
        .collect();
    CountryTable { rows }
}

/// Same as [`build_table`], with up to `workers` countries fetched at once.
///
/// `workers <= 1` stays sequential. Row order never depends on completion order.
pub fn build_table_pooled<F>(fetcher: &F, countries: &CountryList, workers: usize) -> Result<CountryTable>
where
    F: CountryFetcher + Sync + ?Sized,
{
    if workers <= 1 {
        return Ok(build_table(fetcher, countries));
    }
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("build fetch worker pool")?;
    let rows: Vec<CountryRecord> = pool.install(|| {
        countries
            .entries()
            .par_iter()
            .map(|e| CountryRecord::from_fetch(&e.name, fetcher.fetch_country(&e.code)))
            .collect()
    });
    Ok(CountryTable { rows })
}
