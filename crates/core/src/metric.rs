// ABOUTME: View-count text parsing for localized channel listing labels.
// ABOUTME: Strips locale unit keywords, then applies K/M/B magnitude suffixes to the numeral.

use once_cell::sync::Lazy;
use regex::Regex;

/// Unit labels removed before the numeral is read (all occurrences).
static UNIT_LABELS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)views?|vues?|visualizaciones?|aufrufe?").unwrap());

/// First numeral group plus an optional magnitude letter.
static NUMERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9.,]+)\s*([kmb])?").unwrap());

/// Parses a localized view-count label into a whole number of views.
///
/// Supports:
/// - Plain numerals ("532 views")
/// - Magnitude suffixes K, M and B in any case ("1.2K views", "2M aufrufe")
/// - English, French, Spanish and German unit labels
///
/// The first comma in the numeral is read as a decimal point, so "3,4 M" is
/// 3,400,000 but a grouped "12,345" reads as 12. Anything unparseable,
/// including empty text, yields 0. Never panics.
pub fn parse_metric(text: &str) -> u64 {
    if text.is_empty() {
        return 0;
    }

    let lowered = text.to_lowercase();
    let cleaned = UNIT_LABELS_RE.replace_all(&lowered, "");
    let cleaned = cleaned.trim();

    let caps = match NUMERAL_RE.captures(cleaned) {
        Some(caps) => caps,
        None => return 0,
    };

    let numeral = caps[1].replacen(',', ".", 1);
    let value = match leading_float(&numeral) {
        Some(v) => v,
        None => return 0,
    };

    let multiplier = match caps.get(2).map(|m| m.as_str()) {
        Some("k") | Some("K") => 1_000.0,
        Some("m") | Some("M") => 1_000_000.0,
        Some("b") | Some("B") => 1_000_000_000.0,
        _ => 1.0,
    };

    // Float-to-int casts saturate and map NaN to 0.
    (value * multiplier).floor() as u64
}

/// Reads the longest decimal prefix of `s` ("1.2.3" reads as 1.2).
/// Returns None when the prefix carries no digit.
fn leading_float(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;

    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }

    let mut prefix = s[..end].trim_end_matches('.').to_string();
    if prefix.starts_with('.') {
        prefix.insert(0, '0');
    }
    prefix.parse::<f64>().ok()
}
