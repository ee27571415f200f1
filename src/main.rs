mod bench;
mod config;
mod error;
mod matching;
mod metrics;
mod report;

use anyhow::Result;
use clap::Parser;
use matching::MatchPolicy;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "scanbench",
    about = "Scores security-scanner findings against curated ground truth — precision/recall/F1 per tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Score every configured tool against the ground truth and write score CSVs
    Score {
        /// Path to config file
        #[arg(short, long, default_value = "scanbench.toml")]
        config: PathBuf,

        /// Override the filesystem root that dataset paths resolve against
        #[arg(long)]
        base_dir: Option<PathBuf>,

        /// Score only the named dataset
        #[arg(long)]
        dataset: Option<String>,
    },

    /// Check whether two raw location strings match (debugging aid)
    Check {
        /// First location, e.g. "src/sqli/app.py:24"
        loc_a: String,

        /// Second location, e.g. "sqli/app.py:25-29"
        loc_b: String,

        /// Path prefix to strip during normalization (repeatable)
        #[arg(long = "strip-prefix")]
        strip_prefixes: Vec<String>,

        /// Accepted line drift when exact line sets do not intersect
        #[arg(long, default_value_t = 0)]
        tolerance: u32,
    },
}

#[derive(Serialize)]
struct CheckReport {
    loc_a: LocationReport,
    loc_b: LocationReport,
    matched: bool,
}

#[derive(Serialize)]
struct LocationReport {
    raw: String,
    normalized: String,
    file: Option<String>,
    lines: Vec<u32>,
}

fn location_report(raw: &str, policy: &MatchPolicy) -> LocationReport {
    let normalized = matching::location::normalize(raw, &policy.strip_prefixes);
    let parsed = matching::location::parse(&normalized);
    LocationReport {
        raw: raw.to_string(),
        normalized,
        file: parsed.as_ref().map(|p| p.file.clone()),
        lines: parsed.map(|p| p.lines.into_iter().collect()).unwrap_or_default(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scanbench=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Score {
            config,
            base_dir,
            dataset,
        } => {
            let mut cfg = config::Config::load(&config)?;
            if let Some(base_dir) = base_dir {
                cfg.base_dir = base_dir;
            }
            bench::run(&cfg, dataset.as_deref())
        }
        Command::Check {
            loc_a,
            loc_b,
            strip_prefixes,
            tolerance,
        } => {
            let policy = MatchPolicy {
                strip_prefixes,
                line_tolerance: tolerance,
            };
            let report = CheckReport {
                loc_a: location_report(&loc_a, &policy),
                loc_b: location_report(&loc_b, &policy),
                matched: matching::locations_match(&loc_a, &loc_b, &policy),
            };
            let json = serde_json::to_string_pretty(&report)?;
            println!("{json}");
            Ok(())
        }
    }
}
