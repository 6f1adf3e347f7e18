use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use item_scraper::config::Config;
use item_scraper::extractor::ItemCardExtractor;
use item_scraper::harvest::{
    check_coverage, HarvestReport, Harvester, IconSource, PageIconSource, ProbeIconSource,
};
use item_scraper::models::{Catalog, CatalogSummary};
use item_scraper::parsers::names_from_source;
use item_scraper::utils::files::{read_catalog, write_catalog, write_name_list};
use item_scraper::utils::http::create_client;

/// Unmatched names printed by the coverage report
const COVERAGE_PREVIEW: usize = 20;

/// Records echoed after an extraction
const EXTRACT_PREVIEW: usize = 3;

#[derive(Parser)]
#[command(name = "item-scraper")]
#[command(about = "Extract item catalogs from saved pages and harvest item icons")]
struct Cli {
    /// Configuration file (defaults to an optional item_scraper.* in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a saved catalog page into items JSON
    Extract {
        /// Saved HTML snapshot
        input: PathBuf,

        /// Output JSON file, overwritten on every run
        #[arg(short, long, default_value = "extracted_items.json")]
        output: PathBuf,
    },

    /// Download every icon linked from the catalog page
    HarvestPage {
        /// Page to scan (defaults to the configured page_url)
        #[arg(long)]
        url: Option<String>,

        /// Icon directory (defaults to the configured icon_dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Probe known URL patterns for each item id
    HarvestProbe {
        /// Extracted catalog whose item names become ids
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Extra item ids such as power_rod
        ids: Vec<String>,

        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Report which items have an icon on disk
    Coverage {
        /// Extracted catalog JSON
        #[arg(long, conflicts_with = "names_from", required_unless_present = "names_from")]
        catalog: Option<PathBuf>,

        /// Data source file with `name: '...'` entries
        #[arg(long)]
        names_from: Option<PathBuf>,

        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("item_scraper=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Extract { input, output } => run_extract(&input, &output),
        Command::HarvestPage { url, dir } => {
            let source = PageIconSource::new(
                url.unwrap_or_else(|| config.page_url.clone()),
                config.cdn_marker.clone(),
                config.fetch_attempts,
            );
            run_harvest(&config, &source, dir).await
        }
        Command::HarvestProbe { catalog, ids, dir } => {
            let mut names: Vec<String> = match catalog {
                Some(path) => read_catalog(&path)?
                    .items
                    .into_iter()
                    .map(|item| item.name)
                    .collect(),
                None => Vec::new(),
            };
            names.extend(ids);
            if names.is_empty() {
                anyhow::bail!("No item ids given; pass ids or --catalog");
            }

            let source = ProbeIconSource::from_names(
                names.iter().map(String::as_str),
                config.probe_patterns.clone(),
            );
            run_harvest(&config, &source, dir).await
        }
        Command::Coverage {
            catalog,
            names_from,
            dir,
        } => {
            let names = match (catalog, names_from) {
                (Some(path), _) => read_catalog(&path)?.names().map(str::to_string).collect(),
                (None, Some(path)) => {
                    let text = fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    names_from_source(&text)
                }
                (None, None) => anyhow::bail!("Pass --catalog or --names-from"),
            };
            run_coverage(&names, &dir.unwrap_or_else(|| config.icon_dir.clone()));
            Ok(())
        }
    }
}

fn run_extract(input: &Path, output: &Path) -> Result<()> {
    info!("Reading HTML file {}", input.display());
    let html = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let extraction = ItemCardExtractor::default().extract_with_report(&html);
    println!(
        "Extracted {} items ({} cards without a name, {} cards failed)",
        extraction.items.len(),
        extraction.skipped,
        extraction.faults
    );

    let catalog = Catalog::new(extraction.items);
    if catalog.is_empty() {
        warn!("No item cards found in {}", input.display());
    }
    write_catalog(output, &catalog)?;
    println!("Saved to {}", output.display());

    println!("\nFirst {} items:", EXTRACT_PREVIEW.min(catalog.len()));
    for item in catalog.items.iter().take(EXTRACT_PREVIEW) {
        println!("{}", serde_json::to_string_pretty(item)?);
    }

    print_summary(&catalog.summary())
}

fn print_summary(summary: &CatalogSummary) -> Result<()> {
    println!("\nRarity distribution:");
    println!("{}", serde_json::to_string_pretty(&summary.rarities)?);
    println!("\nCategory distribution:");
    println!("{}", serde_json::to_string_pretty(&summary.categories)?);
    Ok(())
}

async fn run_harvest(config: &Config, source: &dyn IconSource, dir: Option<PathBuf>) -> Result<()> {
    let client = create_client(config)?;
    let out_dir = dir.unwrap_or_else(|| config.icon_dir.clone());

    info!("Resolving icons from {}", source.label());
    let candidates = source.resolve(&client).await?;

    let harvester = Harvester::new(client, out_dir, config.fetch_attempts)
        .with_delay(Duration::from_millis(config.request_delay_ms));
    info!(
        "Downloading {} icons to {}",
        candidates.len(),
        harvester.out_dir().display()
    );
    let report = harvester.run(&candidates).await;

    print_harvest_report(&report);

    if !report.failed.is_empty() {
        write_name_list(&config.failed_report, &report.failed)?;
        println!("\nSaved failed items list to {}", config.failed_report.display());
    }

    Ok(())
}

fn print_harvest_report(report: &HarvestReport) {
    println!("\n--- Download Summary ---");
    println!("Success: {}/{}", report.succeeded(), report.total());
    println!("Failed: {}/{}", report.failed.len(), report.total());

    if !report.failed.is_empty() {
        println!("\nFailed items:");
        for item in &report.failed {
            println!("  - {}", item);
        }
    }
}

fn run_coverage(names: &[String], icon_dir: &Path) {
    if !icon_dir.is_dir() {
        warn!("Icon directory {} does not exist", icon_dir.display());
    }

    let report = check_coverage(names.iter().map(String::as_str), icon_dir);

    println!("Items: {}", report.total());
    println!("Matched items: {}", report.matched.len());
    println!("Unmatched items: {}", report.unmatched.len());

    if !report.unmatched.is_empty() {
        println!("\nUnmatched items (no image found):");
        for item in report.unmatched.iter().take(COVERAGE_PREVIEW) {
            println!("  - {} (expected: {})", item.name, item.expected_file);
        }
        if report.unmatched.len() > COVERAGE_PREVIEW {
            println!("  ... and {} more", report.unmatched.len() - COVERAGE_PREVIEW);
        }
    }
}
