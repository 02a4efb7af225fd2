use std::io;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use typeatlas::dataset::{Dataset, DatasetOrigin, DatasetProvider};
use typeatlas::export::{DataFormat, OutputSink, default_output_path, detect_data_format};
use typeatlas::fallback::fallback_records;
use typeatlas::{CountryTypeRecord, ScrapeConfig};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "typeatlas",
    version,
    about = "Country personality-type dataset scraper with CSV/JSON output"
)]
struct Cli {
    /// Base URL of the profile site (defaults to 16personalities.com)
    #[arg(value_name = "URL")]
    url: Option<String>,

    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    #[arg(long, value_enum, default_value_t = FileFormatArg::Csv)]
    format: FileFormatArg,

    #[arg(long, value_name = "N", default_value_t = 12)]
    fetch_concurrency: usize,

    /// Overall scrape budget; a run that exceeds it falls back to the
    /// demo dataset instead of returning a partial table.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Skip the scrape entirely and emit the demo dataset.
    #[arg(long, default_value_t = false)]
    offline: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum, PartialEq, Eq)]
enum FileFormatArg {
    Csv,
    Json,
}

impl From<FileFormatArg> for DataFormat {
    fn from(value: FileFormatArg) -> Self {
        match value {
            FileFormatArg::Csv => DataFormat::Csv,
            FileFormatArg::Json => DataFormat::Json,
        }
    }
}

fn fallback_dataset() -> Dataset {
    Dataset {
        records: fallback_records(),
        origin: DatasetOrigin::Fallback,
    }
}

async fn build_dataset(cli: &Cli) -> Dataset {
    if cli.offline {
        return fallback_dataset();
    }

    let mut config = ScrapeConfig::default().with_fetch_concurrency(cli.fetch_concurrency);
    if let Some(url) = &cli.url {
        config = config.with_base_url(url.clone());
    }

    let provider = match DatasetProvider::new(config) {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("http client setup failed ({err}); substituting fallback dataset");
            return fallback_dataset();
        }
    };

    let shutdown = AtomicBool::new(false);
    match cli.timeout {
        Some(secs) => {
            let budget = Duration::from_secs(secs.max(1));
            match tokio::time::timeout(budget, provider.load(&shutdown)).await {
                Ok(dataset) => dataset,
                Err(_) => {
                    // Dropping the load future abandons in-flight fetches;
                    // no partial table is ever emitted.
                    eprintln!("scrape exceeded {secs}s budget; substituting fallback dataset");
                    fallback_dataset()
                }
            }
        }
        None => provider.load(&shutdown).await,
    }
}

fn write_dataset(records: &[CountryTypeRecord], path: &str, format: DataFormat) -> io::Result<()> {
    let mut sink = OutputSink::create(path, format)?;
    for record in records {
        sink.write_row(record)?;
    }
    sink.finalize()
}

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let configured_format: DataFormat = cli.format.into();
    let output_format = cli
        .output
        .as_deref()
        .map(|path| detect_data_format(path, configured_format))
        .unwrap_or(configured_format);
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(output_format).to_string());

    let dataset = build_dataset(&cli).await;
    write_dataset(&dataset.records, &output_path, output_format)?;

    eprintln!(
        "wrote {} records ({}) to {}",
        dataset.records.len(),
        dataset.origin.label(),
        output_path
    );
    Ok(())
}
