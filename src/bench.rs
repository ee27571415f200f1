//! Benchmark pipeline: for each dataset, score every configured tool's
//! findings against the ground truth and write one score CSV.

use crate::config::{Config, DatasetConfig};
use crate::matching::{self, MatchPolicy};
use crate::metrics::ToolScore;
use crate::report;
use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

/// Run the benchmark over every dataset in the config, or a single one when
/// `dataset_filter` names it. A missing findings file skips that tool and the
/// run continues; a missing ground-truth file fails the dataset.
pub fn run(config: &Config, dataset_filter: Option<&str>) -> Result<()> {
    config.validate()?;

    let mut ran_any = false;
    for dataset in &config.datasets {
        if let Some(filter) = dataset_filter
            && dataset.name != filter
        {
            continue;
        }
        ran_any = true;
        score_dataset(&config.base_dir, dataset, config.matching.line_tolerance)?;
    }

    if !ran_any {
        anyhow::bail!(
            "No dataset named '{}' in config",
            dataset_filter.unwrap_or_default()
        );
    }
    Ok(())
}

fn score_dataset(base_dir: &Path, dataset: &DatasetConfig, line_tolerance: u32) -> Result<()> {
    let groundtruth_path = base_dir.join(&dataset.groundtruth);
    let groundtruth = report::load_records(&groundtruth_path)?;
    info!(
        dataset = %dataset.name,
        groundtruth = groundtruth.len(),
        "loaded ground-truth vulnerabilities"
    );

    let policy = MatchPolicy {
        strip_prefixes: dataset.strip_prefixes.clone(),
        line_tolerance,
    };

    let mut scores = Vec::new();
    for tool in &dataset.tools {
        let findings_path = base_dir.join(&tool.findings);
        if !findings_path.exists() {
            warn!(tool = %tool.name, path = %findings_path.display(), "findings file not found, skipping tool");
            continue;
        }

        let findings = report::load_records(&findings_path)?;
        let counts = matching::match_findings(&findings, &groundtruth, &policy);
        info!(
            tool = %tool.name,
            findings = findings.len(),
            tp = counts.tp,
            fp = counts.fp,
            false_negatives = counts.false_negatives,
            "tool scored"
        );

        scores.push(ToolScore::from_counts(
            tool.name.clone(),
            counts,
            findings.len(),
            groundtruth.len(),
        ));
    }

    let output_path = base_dir.join(&dataset.output);
    report::write_scores(&output_path, &scores)?;
    println!(
        "Scores written: {} ({} tools, {} ground-truth entries)",
        output_path.display(),
        scores.len(),
        groundtruth.len()
    );
    Ok(())
}
