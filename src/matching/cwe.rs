//! CWE identifier normalization.

use regex::Regex;
use std::sync::LazyLock;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Reduce a CWE annotation to its bare number: `"CWE-89"` and `"89"` both
/// become `"89"`. Absent, `"N/A"`, or digit-free input becomes the empty
/// string, which the matching engine treats as "no CWE to compare".
pub fn normalize(cwe: &str) -> String {
    let cwe = cwe.trim();
    if cwe.is_empty() || cwe == "N/A" {
        return String::new();
    }
    DIGITS
        .find(cwe)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
