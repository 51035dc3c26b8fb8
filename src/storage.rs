use crate::rank::RankedTable;
use anyhow::Result;
use csv::WriterBuilder;
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const HEADER: [&str; 5] = ["Country", "Population", "GDP", "GDP Rank", "Population Rank"];

/// Prefix cells that a spreadsheet would evaluate as a formula.
fn sanitize_cell(s: &str) -> Cow<'_, str> {
    if s.starts_with(['=', '+', '-', '@']) {
        Cow::Owned(format!("'{}", s))
    } else {
        Cow::Borrowed(s)
    }
}

/// Write the ranked table as CSV with header; absent values become empty cells.
pub fn write_csv<W: Write>(table: &RankedTable, w: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(w);
    wtr.write_record(HEADER)?;
    for r in &table.rows {
        wtr.serialize((
            sanitize_cell(&r.country),
            r.population,
            r.gdp,
            r.gdp_rank,
            r.population_rank,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the ranked table as CSV with header.
pub fn save_csv<P: AsRef<Path>>(table: &RankedTable, path: P) -> Result<()> {
    write_csv(table, File::create(path)?)
}

/// Save the ranked table as a pretty JSON array of row objects.
pub fn save_json<P: AsRef<Path>>(table: &RankedTable, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(&table.rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
