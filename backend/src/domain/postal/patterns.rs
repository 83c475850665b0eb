//! Per-country postal-code format patterns.
//!
//! Countries are matched by name, case-insensitively, or by their two-letter
//! code. A country without an entry is unconstrained.

use std::sync::OnceLock;

use regex::Regex;

use super::country_codes::country_name_for_code;

const PATTERNS: &[(&str, &str)] = &[
    ("Australia", r"^\d{4}$"),
    ("Austria", r"^\d{4}$"),
    ("Belgium", r"^\d{4}$"),
    ("Brazil", r"^\d{5}-?\d{3}$"),
    ("Canada", r"^[A-Za-z]\d[A-Za-z][ -]?\d[A-Za-z]\d$"),
    ("China", r"^\d{6}$"),
    ("Czech Republic", r"^\d{3}\s?\d{2}$"),
    ("Denmark", r"^\d{4}$"),
    ("Egypt", r"^\d{5}$"),
    ("Finland", r"^\d{5}$"),
    ("France", r"^\d{5}$"),
    ("Germany", r"^\d{5}$"),
    ("Greece", r"^\d{3}\s?\d{2}$"),
    ("Hungary", r"^\d{4}$"),
    ("India", r"^\d{3}\s?\d{3}$"),
    ("Indonesia", r"^\d{5}$"),
    ("Ireland", r"^[A-Za-z]\d[\dWw]\s?[A-Za-z\d]{4}$"),
    ("Israel", r"^\d{5}(\d{2})?$"),
    ("Italy", r"^\d{5}$"),
    ("Japan", r"^\d{3}-?\d{4}$"),
    ("Luxembourg", r"^(L-)?\d{4}$"),
    ("Malaysia", r"^\d{5}$"),
    ("Mexico", r"^\d{5}$"),
    ("Netherlands", r"^\d{4}\s?[A-Za-z]{2}$"),
    ("New Zealand", r"^\d{4}$"),
    ("Norway", r"^\d{4}$"),
    ("Pakistan", r"^\d{5}$"),
    ("Philippines", r"^\d{4}$"),
    ("Poland", r"^\d{2}-?\d{3}$"),
    ("Portugal", r"^\d{4}-?\d{3}$"),
    ("Russia", r"^\d{6}$"),
    ("Saudi Arabia", r"^\d{5}(-\d{4})?$"),
    ("Singapore", r"^\d{6}$"),
    ("South Africa", r"^\d{4}$"),
    ("South Korea", r"^\d{5}$"),
    ("Spain", r"^\d{5}$"),
    ("Sweden", r"^\d{3}\s?\d{2}$"),
    ("Switzerland", r"^\d{4}$"),
    ("Thailand", r"^\d{5}$"),
    ("Turkey", r"^\d{5}$"),
    ("United Kingdom", r"^[A-Za-z]{1,2}\d[A-Za-z\d]?\s?\d[A-Za-z]{2}$"),
    ("United States", r"^\d{5}(-\d{4})?$"),
    ("Vietnam", r"^\d{6}$"),
];

static COMPILED: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();

fn compiled() -> &'static [(&'static str, Regex)] {
    COMPILED.get_or_init(|| {
        PATTERNS
            .iter()
            .map(|(country, pattern)| {
                let regex = Regex::new(pattern).unwrap_or_else(|error| {
                    panic!("postal pattern for {country} failed to compile: {error}")
                });
                (*country, regex)
            })
            .collect()
    })
}

fn pattern_for(country: &str) -> Option<&'static Regex> {
    let country = country.trim();
    let name = country_name_for_code(country).unwrap_or(country);
    compiled()
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, regex)| regex)
}

/// Whether a format pattern is known for `country`.
pub fn has_pattern(country: &str) -> bool {
    pattern_for(country).is_some()
}

/// Validate `code` against the pattern for `country`.
///
/// # Examples
/// ```
/// use docketsync::domain::postal::is_valid_postal_code;
///
/// assert!(is_valid_postal_code("Australia", "2000"));
/// assert!(!is_valid_postal_code("Australia", "ABCDE"));
/// assert!(is_valid_postal_code("Atlantis", "anything"));
/// ```
pub fn is_valid_postal_code(country: &str, code: &str) -> bool {
    pattern_for(country).is_none_or(|regex| regex.is_match(code.trim()))
}
