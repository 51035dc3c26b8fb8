use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use num_format::{Locale, ToFormattedString};
use std::path::PathBuf;
use wbi_rank::api::DEFAULT_BASE_URL;
use wbi_rank::{Client, CountryList, RankedRow, storage};

#[derive(Parser, Debug)]
#[command(
    name = "wbi-rank",
    version,
    about = "Rank countries by their latest World Bank population and GDP figures"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch figures, rank them (and optionally save and print rows).
    Rank(RankArgs),
    /// Print the configured country list.
    Countries(CountriesArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct CountriesArgs {
    /// Country list file (.json or .csv with name,code). Defaults to the built-in list.
    #[arg(short, long)]
    countries: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RankArgs {
    /// Country list file (.json or .csv with name,code). Defaults to the built-in list.
    #[arg(short, long)]
    countries: Option<PathBuf>,
    /// API root to query.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Number of countries fetched concurrently (1 = one after the other).
    #[arg(short, long, default_value_t = 1)]
    workers: usize,
    /// Save the ranked table to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print the first N rows.
    #[arg(long, default_value_t = 5)]
    preview: usize,
    /// Print the row of a single country (by display name).
    #[arg(long)]
    show: Option<String>,
    /// Write the whole table as CSV to stdout instead of a preview.
    #[arg(long, default_value_t = false)]
    csv: bool,
}

fn fmt_count(v: Option<u64>) -> String {
    v.map(|x| x.to_formatted_string(&Locale::en))
        .unwrap_or_else(|| "NA".to_string())
}

fn fmt_money(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => (x.round() as u64).to_formatted_string(&Locale::en),
        _ => "NA".to_string(),
    }
}

fn fmt_rank(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            let s = format!("{:.1}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn print_row(r: &RankedRow) {
    println!(
        "{:<24} {:>15} {:>22} {:>8} {:>8}",
        r.country,
        fmt_count(r.population),
        fmt_money(r.gdp),
        fmt_rank(r.gdp_rank),
        fmt_rank(r.population_rank)
    );
}

fn print_header() {
    println!(
        "{:<24} {:>15} {:>22} {:>8} {:>8}",
        "Country", "Population", "GDP", "GDP#", "Pop#"
    );
}

fn load_countries(path: Option<&PathBuf>) -> Result<CountryList> {
    match path {
        Some(p) => CountryList::load(p).with_context(|| format!("load {}", p.display())),
        None => Ok(CountryList::builtin()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Rank(args) => cmd_rank(args),
        Command::Countries(args) => cmd_countries(args),
    }
}

fn cmd_countries(args: CountriesArgs) -> Result<()> {
    let countries = load_countries(args.countries.as_ref())?;
    for e in &countries {
        println!("{}\t{}", e.code, e.name);
    }
    Ok(())
}

fn cmd_rank(args: RankArgs) -> Result<()> {
    let countries = load_countries(args.countries.as_ref())?;
    let client = Client::new(&args.base_url).context("build http client")?;

    eprintln!("Fetching data...");
    let table = wbi_rank::collect(&client, &countries, args.workers)?;

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&table, path)?,
            "json" => storage::save_json(&table, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", table.len(), path.display());
    }

    if args.csv {
        storage::write_csv(&table, std::io::stdout().lock())?;
    } else if args.preview > 0 {
        print_header();
        for r in table.rows.iter().take(args.preview) {
            print_row(r);
        }
    }

    if let Some(name) = args.show.as_deref() {
        let row = table
            .find(name)
            .with_context(|| format!("country not in list: {}", name))?;
        println!();
        print_header();
        print_row(row);
    }

    Ok(())
}
