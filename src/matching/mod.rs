//! Finding-vs-ground-truth matching: decides whether a tool's reported
//! finding corresponds to a curated ground-truth vulnerability, and counts
//! true/false positives and false negatives per tool run.

pub mod cwe;
pub mod location;

use serde::{Deserialize, Serialize};

/// One vulnerability record — either a tool finding or a ground-truth entry,
/// both carry the same shape. `location` is `<path>[:<line-spec>]`;
/// `cwe_code` is free-form (`"CWE-89"`, `"89"`, `"N/A"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub location: String,
    pub cwe_code: Option<String>,
}

/// Parameters that vary per dataset: which path prefixes to strip during
/// normalization, and how much line drift to accept. Tolerance absorbs
/// off-by-a-few-lines disagreement between tool and ground-truth annotations
/// (comment lines, formatting differences); 0 requires exact line overlap.
#[derive(Debug, Clone, Default)]
pub struct MatchPolicy {
    pub strip_prefixes: Vec<String>,
    pub line_tolerance: u32,
}

/// Counts from one tool's matching run against the ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCounts {
    pub tp: u32,
    pub fp: u32,
    pub false_negatives: u32,
}

/// Check whether two raw location strings refer to the same place.
///
/// Both sides are normalized and parsed; an unparseable side or differing
/// files mean no match. With line numbers on both sides, the sets must
/// intersect or come within `line_tolerance` of each other. If either side
/// has no usable line numbers, matching degrades to file-level equality.
pub fn locations_match(a: &str, b: &str, policy: &MatchPolicy) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    let a_norm = location::normalize(a, &policy.strip_prefixes);
    let b_norm = location::normalize(b, &policy.strip_prefixes);

    let (Some(a_loc), Some(b_loc)) = (location::parse(&a_norm), location::parse(&b_norm)) else {
        return false;
    };

    if a_loc.file != b_loc.file {
        return false;
    }

    if a_loc.lines.is_empty() || b_loc.lines.is_empty() {
        return true;
    }

    if a_loc.lines.intersection(&b_loc.lines).next().is_some() {
        return true;
    }

    policy.line_tolerance > 0
        && a_loc.lines.iter().any(|la| {
            b_loc
                .lines
                .iter()
                .any(|lb| la.abs_diff(*lb) <= policy.line_tolerance)
        })
}

/// Greedy one-to-one matching of findings against ground-truth entries.
///
/// Findings are taken in input order; for each, ground-truth entries are
/// scanned in input order, skipping already-consumed indices. A pairing is
/// accepted when the locations match and the CWE codes agree (both present
/// and equal, or at least one side absent — location alone is then enough).
/// Each ground-truth entry is consumed by at most one finding, so a real
/// vulnerability never counts as multiple true positives.
///
/// Ties go to the first eligible ground-truth entry in scan order; counts are
/// deterministic for a given input order but not a global optimum matching.
pub fn match_findings(
    findings: &[Finding],
    groundtruth: &[Finding],
    policy: &MatchPolicy,
) -> MatchCounts {
    let mut tp = 0u32;
    let mut fp = 0u32;
    let mut consumed = vec![false; groundtruth.len()];

    for finding in findings {
        let finding_cwe = cwe::normalize(finding.cwe_code.as_deref().unwrap_or(""));
        let mut found = false;

        for (idx, gt) in groundtruth.iter().enumerate() {
            if consumed[idx] {
                continue;
            }
            if !locations_match(&finding.location, &gt.location, policy) {
                continue;
            }

            let gt_cwe = cwe::normalize(gt.cwe_code.as_deref().unwrap_or(""));
            if !finding_cwe.is_empty() && !gt_cwe.is_empty() && finding_cwe != gt_cwe {
                // Same place, different weakness class — keep scanning.
                continue;
            }

            tp += 1;
            consumed[idx] = true;
            found = true;
            break;
        }

        if !found {
            fp += 1;
        }
    }

    let matched = consumed.iter().filter(|c| **c).count();
    MatchCounts {
        tp,
        fp,
        false_negatives: (groundtruth.len() - matched) as u32,
    }
}
