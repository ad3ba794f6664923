use clap::{Parser, ValueEnum};
use color_eyre::Result;
use std::path::PathBuf;

mod catalog;
mod config;
mod error;
mod record;
mod render;
mod report;
mod source;
mod stats;

use catalog::ReportOptions;
use report::Report;
use source::load_records;

/// Descriptive statistics reports over catalog records
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Descriptive statistics reports over semi-structured catalog records"
)]
struct Args {
    /// Input JSON file (if not provided, reads from stdin)
    input: Option<PathBuf>,

    /// Which report to run
    #[arg(long, value_enum, default_value = "offers")]
    report: ReportKind,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Override the top-N cutoff for ranked sections
    #[arg(long)]
    top: Option<usize>,

    /// Override the duplicate sample size
    #[arg(long)]
    sample: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportKind {
    Offers,
    Categories,
    Products,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    init_logging();
    color_eyre::install()?;

    // Load config early so CLI overrides layer on top of it
    let config_result = config::load_config();
    if let Some(warning) = &config_result.warning {
        eprintln!("warning: {warning}");
    }

    let args = Args::parse();

    let mut options = ReportOptions {
        top_n: config_result.config.report.top_n,
        duplicate_sample_size: config_result.config.report.duplicate_sample_size,
    };
    if let Some(top) = args.top {
        options.top_n = top;
    }
    if let Some(sample) = args.sample {
        options.duplicate_sample_size = sample;
    }

    let records = load_records(args.input.as_deref())?;
    log::info!(
        "running {:?} report(s) over {} records",
        args.report,
        records.len()
    );

    let reports: Vec<Report> = match args.report {
        ReportKind::Offers => vec![catalog::offers_report(&records, &options)],
        ReportKind::Categories => vec![catalog::categories_report(&records, &options)],
        ReportKind::Products => vec![catalog::products_report(&records, &options)],
        ReportKind::All => vec![
            catalog::offers_report(&records, &options),
            catalog::categories_report(&records, &options),
            catalog::products_report(&records, &options),
        ],
    };

    match args.format {
        OutputFormat::Text => {
            for report in &reports {
                println!("{}", render::render_text(report));
            }
        }
        OutputFormat::Json => {
            if let [report] = reports.as_slice() {
                println!("{}", report.to_json()?);
            } else {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            }
        }
    }

    Ok(())
}

/// Timestamped stderr logging, controlled by RUST_LOG
fn init_logging() {
    use std::io::Write;

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let datetime: chrono::DateTime<chrono::Local> = std::time::SystemTime::now().into();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}
