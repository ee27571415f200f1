//! Tabular input/output: findings and ground-truth CSVs in, score CSV out.
//!
//! Tools disagree on header spelling ("Location", "CWE Code", "cwe_code"),
//! so headers are matched case-insensitively with spaces folded to
//! underscores. Rows without a location value carry no usable evidence and
//! are dropped at load time.

use crate::error::Result;
use crate::matching::Finding;
use crate::metrics::ToolScore;
use std::io::Read;
use std::path::Path;

/// Load one findings or ground-truth table.
pub fn load_records(path: &Path) -> Result<Vec<Finding>> {
    let file = std::fs::File::open(path)?;
    records_from_reader(file)
}

fn records_from_reader<R: Read>(reader: R) -> Result<Vec<Finding>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    let location_idx = headers.iter().position(|h| h == "location");
    let cwe_idx = headers.iter().position(|h| h == "cwe_code");

    let Some(location_idx) = location_idx else {
        // No location column at all: every row would be dropped anyway.
        return Ok(Vec::new());
    };

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let location = row.get(location_idx).unwrap_or("").trim();
        if location.is_empty() {
            continue;
        }
        let cwe_code = cwe_idx
            .and_then(|idx| row.get(idx))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        records.push(Finding {
            location: location.to_string(),
            cwe_code,
        });
    }

    Ok(records)
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Write one score row per tool. Column order is fixed:
/// `tool,tp,fp,fn,total_findings,groundtruth_total,precision,recall,f1_score`.
pub fn write_scores(path: &Path, scores: &[ToolScore]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for score in scores {
        writer.serialize(score)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::MatchCounts;

    #[test]
    fn loads_plain_records() {
        let csv = "location,cwe_code\nsqli/app.py:24,CWE-89\nxss/app.py:7,CWE-79\n";
        let records = records_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].location, "sqli/app.py:24");
        assert_eq!(records[0].cwe_code.as_deref(), Some("CWE-89"));
    }

    #[test]
    fn headers_matched_case_insensitively_with_spaces_folded() {
        let csv = "Location,CWE Code\nsqli/app.py:24,89\n";
        let records = records_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cwe_code.as_deref(), Some("89"));
    }

    #[test]
    fn rows_without_location_are_dropped() {
        let csv = "location,cwe_code\n,CWE-89\nsqli/app.py:24,CWE-89\n";
        let records = records_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_cwe_column_yields_none() {
        let csv = "location,severity\nsqli/app.py:24,High\n";
        let records = records_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(records[0].cwe_code, None);
    }

    #[test]
    fn missing_location_column_yields_no_records() {
        let csv = "file,line\nsqli/app.py,24\n";
        let records = records_from_reader(csv.as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn short_rows_tolerated() {
        let csv = "location,cwe_code\nsqli/app.py:24\nxss/app.py:7,CWE-79\n";
        let records = records_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].cwe_code, None);
    }

    #[test]
    fn extra_columns_ignored() {
        let csv = "tool,location,cwe_code,note\nbandit,sqli/app.py:24,CWE-89,confirmed\n";
        let records = records_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location, "sqli/app.py:24");
    }

    #[test]
    fn score_roundtrip_keeps_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores/score.csv");
        let score = ToolScore::from_counts(
            "bandit",
            MatchCounts {
                tp: 6,
                fp: 2,
                false_negatives: 4,
            },
            8,
            10,
        );
        write_scores(&path, &[score]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "tool,tp,fp,fn,total_findings,groundtruth_total,precision,recall,f1_score"
        );
        assert_eq!(lines.next().unwrap(), "bandit,6,2,4,8,10,0.75,0.6,0.6667");
    }
}
