//! Location normalization and parsing.
//!
//! Tools report the same vulnerability location in different shapes:
//! absolute vs repo-relative paths, a single line, an inclusive range
//! (`25-29`), or a semicolon-separated list (`42;661`). Everything funnels
//! through `normalize` + `parse` before comparison.

use std::collections::BTreeSet;

/// A location reduced to a comparable form: lower-cased file path plus the
/// set of line numbers it names. An empty set means "no known lines".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLocation {
    pub file: String,
    pub lines: BTreeSet<u32>,
}

/// Strip configured path prefixes and a leading `./`, then trim and
/// lower-case. Empty input yields empty output; there are no error cases.
pub fn normalize(raw: &str, strip_prefixes: &[String]) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut location = raw.to_string();
    for prefix in strip_prefixes {
        if !prefix.is_empty() {
            location = location.replace(prefix.as_str(), "");
        }
    }
    let location = location.strip_prefix("./").unwrap_or(&location);

    location.trim().to_lowercase()
}

/// Split a normalized location into `(file, line set)`.
///
/// Returns `None` when there is no `:` separator or no file part — the
/// location is unparseable and can never match. Numeric failures inside the
/// line-spec are swallowed: a garbled spec degrades to an empty line set
/// rather than failing the whole record.
pub fn parse(location: &str) -> Option<ParsedLocation> {
    let (file, line_spec) = location.split_once(':')?;
    // Anything past a second colon (e.g. a column number) is ignored.
    let line_spec = line_spec.split(':').next().unwrap_or(line_spec);
    if file.is_empty() {
        return None;
    }

    Some(ParsedLocation {
        file: file.to_string(),
        lines: parse_line_spec(line_spec),
    })
}

fn parse_line_spec(spec: &str) -> BTreeSet<u32> {
    let mut lines = BTreeSet::new();

    if spec.contains('-') {
        // Inclusive range like "25-29"
        let parts: Vec<&str> = spec.split('-').collect();
        if parts.len() == 2
            && let (Ok(start), Ok(end)) = (
                parts[0].trim().parse::<u32>(),
                parts[1].trim().parse::<u32>(),
            )
        {
            lines.extend(start..=end);
        }
    } else if spec.contains(';') {
        // Discrete list like "42;661"
        for part in spec.split(';') {
            if let Ok(line) = part.trim().parse::<u32>() {
                lines.insert(line);
            }
        }
    } else if let Ok(line) = spec.trim().parse::<u32>() {
        lines.insert(line);
    }

    lines
}
