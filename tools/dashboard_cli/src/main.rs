//! Compliance dashboard CLI.
//!
//! Generates a session's synthetic record set, applies the sidebar filters
//! given on the command line, and prints the resulting view.
//!
//! ```bash
//! # KPI tiles, charts data and feed for Amazon.in over the first week of October
//! dashboard_cli summary --platform Amazon.in --start 2026-10-01 --end 2026-10-07
//!
//! # Download the violations CSV for a reproducible dataset
//! dashboard_cli export --seed 7 --violation "MRP Declaration Missing" -o violations.csv
//! ```

use clap::{Args, Parser, Subcommand};
use compliance_dashboard::calendar::{now_naive_utc, parse_date};
use compliance_dashboard::config::DashboardConfig;
use compliance_dashboard::dashboard::session::DashboardSession;
use compliance_dashboard::error::CoreResult;
use compliance_dashboard::pipeline::criteria::FilterCriteria;
use compliance_dashboard::records::model::{Platform, ViolationType};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;
use time::Date;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Synthetic e-commerce compliance dashboard data
#[derive(Parser)]
#[command(name = "dashboard_cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON config file; missing fields take their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of records to generate (overrides the config)
    #[arg(long, global = true)]
    records: Option<usize>,

    /// Seed for reproducible generation
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the filter choices offered for the generated set
    Options,

    /// Print KPIs, chart series and the violations feed as JSON
    Summary {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Write the filtered violations as CSV
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output path (default: the configured export file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Platform to include; repeat for several (default: all)
    #[arg(long = "platform", value_name = "PLATFORM")]
    platforms: Vec<Platform>,

    /// Violation type to include; repeat for several (default: all)
    #[arg(long = "violation", value_name = "VIOLATION")]
    violations: Vec<ViolationType>,

    /// First day of the range, YYYY-MM-DD (default: earliest record)
    #[arg(long, value_parser = parse_date)]
    start: Option<Date>,

    /// Last day of the range, inclusive, YYYY-MM-DD (default: latest record)
    #[arg(long, value_parser = parse_date)]
    end: Option<Date>,
}

impl FilterArgs {
    fn criteria(&self, session: &DashboardSession) -> FilterCriteria {
        let mut criteria = session.default_criteria();
        if !self.platforms.is_empty() {
            criteria = criteria.with_platforms(self.platforms.iter().copied());
        }
        if !self.violations.is_empty() {
            criteria = criteria.with_violation_types(self.violations.iter().copied());
        }
        let mut range = criteria.date_range;
        if let Some(start) = self.start {
            range.start = start;
        }
        if let Some(end) = self.end {
            range.end = end;
        }
        criteria.with_date_range(range)
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("compliance_dashboard=info,dashboard_cli=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(cli: &Cli) -> CoreResult<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_json_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(records) = cli.records {
        config.record_count = records;
    }
    Ok(config)
}

fn start_session(cli: &Cli, config: DashboardConfig) -> CoreResult<DashboardSession> {
    match cli.seed {
        Some(seed) => DashboardSession::start_with(
            config,
            now_naive_utc(),
            &mut StdRng::seed_from_u64(seed),
        ),
        None => DashboardSession::start(config),
    }
}

fn run(cli: Cli) -> CoreResult<()> {
    let config = load_config(&cli)?;
    let session = start_session(&cli, config)?;
    info!(
        records = session.records().len(),
        seed = ?cli.seed,
        "dashboard session started"
    );

    match &cli.command {
        Command::Options => {
            println!("{}", serde_json::to_string_pretty(session.options())?);
        }
        Command::Summary { filters } => {
            let snapshot = session.snapshot(&filters.criteria(&session))?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::Export { filters, output } => {
            let criteria = filters.criteria(&session);
            match session.export_violations(&criteria)? {
                Some(doc) => {
                    let path = output
                        .clone()
                        .unwrap_or_else(|| PathBuf::from(&doc.file_name));
                    doc.write_to(&path)?;
                    println!("{}", path.display());
                }
                None => {
                    eprintln!("no violations match the current filters; nothing exported");
                }
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dashboard_cli error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compliance_dashboard::pipeline::criteria::DateRange;
    use compliance_dashboard::records::model::ComplianceRecord;
    use time::macros::{date, datetime};

    fn session() -> DashboardSession {
        let records = vec![
            ComplianceRecord::observe(
                1,
                "Jeans (Apparel)",
                "BrandA",
                Platform::Myntra,
                datetime!(2026-10-02 09:00:00),
                Some(ViolationType::IncorrectNetQuantity),
            ),
            ComplianceRecord::observe(
                2,
                "Laptop (Electronics)",
                "BrandB",
                Platform::Ajio,
                datetime!(2026-10-09 18:00:00),
                None,
            ),
        ];
        DashboardSession::from_records(DashboardConfig::default(), records)
    }

    fn filters(args: &[&str]) -> FilterArgs {
        let argv = ["dashboard_cli", "summary"].iter().chain(args.iter()).copied();
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Summary { filters } => filters,
            _ => panic!("expected the summary subcommand"),
        }
    }

    #[test]
    fn no_flags_keep_session_defaults() {
        let s = session();
        assert_eq!(filters(&[]).criteria(&s), s.default_criteria());
    }

    #[test]
    fn end_override_keeps_observed_start() {
        let s = session();
        let criteria = filters(&["--end", "2026-10-05"]).criteria(&s);
        assert_eq!(
            criteria.date_range,
            DateRange::new(date!(2026 - 10 - 02), date!(2026 - 10 - 05))
        );
        assert_eq!(criteria.platforms, s.default_criteria().platforms);
    }

    #[test]
    fn start_override_keeps_observed_end() {
        let s = session();
        let criteria = filters(&["--start", "2026-10-04"]).criteria(&s);
        assert_eq!(
            criteria.date_range,
            DateRange::new(date!(2026 - 10 - 04), date!(2026 - 10 - 09))
        );
    }

    #[test]
    fn repeated_platform_flags_replace_default_selection() {
        let s = session();
        let criteria = filters(&["--platform", "myntra", "--platform", "Amazon.in"]).criteria(&s);
        assert_eq!(
            criteria.platforms.into_iter().collect::<Vec<_>>(),
            vec![Platform::AmazonIn, Platform::Myntra]
        );
    }

    #[test]
    fn malformed_date_flag_is_rejected() {
        let argv = ["dashboard_cli", "summary", "--start", "2026-10-4"];
        assert!(Cli::try_parse_from(argv).is_err());
    }
}
