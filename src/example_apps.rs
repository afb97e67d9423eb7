use std::error::Error;

use clap::{Parser, ValueEnum, error::ErrorKind};
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::data::MarketingRecord;
use crate::pipeline::DashboardSnapshot;
use crate::store::RecordStore;
use crate::view::{FilterPatch, SortDirection, SortField, ViewState};

/// Channels used by the synthetic demo dataset.
const DEMO_CHANNELS: [&str; 6] = [
    "Email",
    "Paid Search",
    "Paid Social",
    "Display",
    "Affiliate",
    "Video",
];
/// Regions used by the synthetic demo dataset.
const DEMO_REGIONS: [&str; 4] = ["US", "EMEA", "APAC", "LATAM"];

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortFieldArg {
    Id,
    Channel,
    Region,
    Spend,
    Impressions,
    Conversions,
    Clicks,
    Ctr,
}

impl From<SortFieldArg> for SortField {
    fn from(value: SortFieldArg) -> Self {
        match value {
            SortFieldArg::Id => SortField::Id,
            SortFieldArg::Channel => SortField::Channel,
            SortFieldArg::Region => SortField::Region,
            SortFieldArg::Spend => SortField::Spend,
            SortFieldArg::Impressions => SortField::Impressions,
            SortFieldArg::Conversions => SortField::Conversions,
            SortFieldArg::Clicks => SortField::Clicks,
            SortFieldArg::Ctr => SortField::Ctr,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    Asc,
    Desc,
}

impl From<DirectionArg> for SortDirection {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Asc => SortDirection::Ascending,
            DirectionArg::Desc => SortDirection::Descending,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "dashboard_demo",
    disable_help_subcommand = true,
    about = "Derive one dashboard view over a seeded synthetic dataset",
    long_about = "Generate a deterministic synthetic marketing dataset, apply the given filter, \
                  sort, and pagination intents, and print the derived page, totals, and \
                  per-channel chart series."
)]
struct DashboardDemoCli {
    #[arg(
        long,
        default_value_t = 42,
        help = "Deterministic seed for the synthetic dataset"
    )]
    seed: u64,
    #[arg(long, default_value_t = 200, help = "Number of synthetic records")]
    records: usize,
    #[arg(long, help = "Exact channel filter (e.g. 'Email')")]
    channel: Option<String>,
    #[arg(long, help = "Exact region filter (e.g. 'EMEA')")]
    region: Option<String>,
    #[arg(long, help = "Case-insensitive search over channel and region")]
    search: Option<String>,
    #[arg(long = "min-spend", help = "Inclusive lower spend bound")]
    min_spend: Option<String>,
    #[arg(long = "max-spend", help = "Inclusive upper spend bound")]
    max_spend: Option<String>,
    #[arg(long = "min-ctr", help = "Inclusive lower CTR bound in percent")]
    min_ctr: Option<String>,
    #[arg(long = "max-ctr", help = "Inclusive upper CTR bound in percent")]
    max_ctr: Option<String>,
    #[arg(long, value_enum, default_value = "spend", help = "Sort column")]
    sort: SortFieldArg,
    #[arg(long, value_enum, help = "Sort direction; defaults to the dashboard toggle rules")]
    direction: Option<DirectionArg>,
    #[arg(long = "page-size", default_value_t = 25, help = "Rows per page")]
    page_size: usize,
    #[arg(long, default_value_t = 1, help = "1-based page to display")]
    page: i64,
}

/// Generate a deterministic synthetic dataset for demos and experiments.
pub fn synthetic_records(seed: u64, count: usize) -> Vec<MarketingRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=count as u64)
        .map(|id| {
            let channel = DEMO_CHANNELS.choose(&mut rng).copied().unwrap_or("Email");
            let region = DEMO_REGIONS.choose(&mut rng).copied().unwrap_or("US");
            let spend = (rng.random_range(50.0..5000.0_f64) * 100.0).round() / 100.0;
            let impressions = rng.random_range(1_000..250_000_u64);
            let clicks = rng.random_range(0..=impressions / 10);
            let conversions = rng.random_range(0..=clicks / 10);
            MarketingRecord {
                id,
                channel: channel.to_string(),
                region: region.to_string(),
                spend,
                impressions,
                conversions,
                clicks,
            }
        })
        .collect()
}

/// Run the dashboard demo against a seeded synthetic dataset.
///
/// Drives every intent transition and pipeline output the presentation layer
/// would touch, then prints the derived view.
pub fn run_dashboard_demo<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) = parse_cli::<DashboardDemoCli, _>(
        std::iter::once("dashboard_demo".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let store = RecordStore::from_records(synthetic_records(cli.seed, cli.records))?;

    let view = ViewState::default()
        .apply_filters(FilterPatch {
            channel: cli.channel,
            region: cli.region,
            search: cli.search,
            min_spend: cli.min_spend,
            max_spend: cli.max_spend,
            min_ctr: cli.min_ctr,
            max_ctr: cli.max_ctr,
        })
        .set_sort(cli.sort.into(), cli.direction.map(Into::into))
        .set_page_size(cli.page_size)
        .set_page(cli.page);

    let snapshot = DashboardSnapshot::derive(store.records(), &view);

    println!("=== dashboard demo ===");
    println!("seed: {}, dataset: {} records", cli.seed, store.len());
    println!("channels: {}", store.channel_options().join(", "));
    println!("regions: {}", store.region_options().join(", "));
    println!();

    println!("[PAGE]");
    if snapshot.rows.is_empty() {
        println!("  no rows on page {} (out of {} pages)", cli.page, snapshot.page_count);
    } else {
        println!(
            "  rows {}\u{2013}{} of {} (page {} of {})",
            snapshot.row_start,
            snapshot.row_end,
            snapshot.filtered_count,
            cli.page,
            snapshot.page_count
        );
        println!(
            "  {:>6} {:<12} {:<6} {:>10} {:>12} {:>8} {:>6} {:>7}",
            "id", "channel", "region", "spend", "impressions", "clicks", "conv", "ctr%"
        );
        for row in &snapshot.rows {
            println!(
                "  {:>6} {:<12} {:<6} {:>10.2} {:>12} {:>8} {:>6} {:>7.2}",
                row.id,
                row.channel,
                row.region,
                row.spend,
                row.impressions,
                row.clicks,
                row.conversions,
                row.ctr()
            );
        }
    }
    println!();

    println!("[TOTALS ACROSS FILTERED SET]");
    println!("  spend:       {:.2}", snapshot.totals.spend);
    println!("  impressions: {}", snapshot.totals.impressions);
    println!("  clicks:      {}", snapshot.totals.clicks);
    println!("  conversions: {}", snapshot.totals.conversions);
    println!("  ctr:         {:.2}%", snapshot.totals.ctr());
    println!();

    println!("[SPEND BY CHANNEL]");
    if snapshot.channels.is_empty() {
        println!("  no channels match the active filters");
    }
    for slice in &snapshot.channels {
        println!(
            "  {:<12} spend {:>12.2}  conversions {:>8}",
            slice.channel, slice.spend, slice.conversions
        );
    }

    Ok(())
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_records_are_deterministic_per_seed() {
        let first = synthetic_records(7, 25);
        let second = synthetic_records(7, 25);
        assert_eq!(first, second);
        assert_eq!(first.len(), 25);
        assert!(first.iter().all(|r| r.clicks <= r.impressions));
        assert!(first.iter().all(|r| r.conversions <= r.clicks));
    }

    #[test]
    fn synthetic_ids_are_unique_and_sequential() {
        let records = synthetic_records(1, 10);
        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u64>>());
    }
}
