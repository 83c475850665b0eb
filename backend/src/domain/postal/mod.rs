//! Postal-code helpers used by address forms.
//!
//! Three independent pieces live here:
//! - [`patterns`]: synchronous per-country format validation.
//! - [`country_codes`]: country name to two-letter code mapping used by the
//!   lookup fallback.
//! - [`autofill`]: merging a lookup result into partially filled address
//!   fields without clobbering user input.
//!
//! The lookup itself is orchestrated by
//! [`PostalLookupService`](crate::domain::PostalLookupService).

pub mod autofill;
pub mod country_codes;
pub mod patterns;

use std::sync::OnceLock;

use regex::Regex;

pub use self::autofill::{AddressFields, AutofillOutcome, apply_autofill};
pub use self::country_codes::country_code;
pub use self::patterns::{has_pattern, is_valid_postal_code};

/// Codes shorter than this (after trimming) are rejected without a lookup.
pub const MIN_LOOKUP_LEN: usize = 3;

pub const TOO_SHORT_MESSAGE: &str = "ZIP code too short";
pub const NOT_FOUND_MESSAGE: &str = "ZIP code not found";
pub const LOOKUP_FAILED_MESSAGE: &str = "Failed to lookup ZIP code";

/// Place data returned by a postal lookup source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalPlace {
    /// Name of the first place listed for the code.
    pub city: Option<String>,
    /// Country name reported by the source.
    pub country: Option<String>,
}

/// Outcome of a postal-code lookup.
///
/// Failures are values, not errors: the form simply shows the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostalLookup {
    Found { city: String, country: String },
    Failed { error: String },
}

impl PostalLookup {
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

static NON_WORD_RE: OnceLock<Regex> = OnceLock::new();

/// Strip everything but ASCII letters, digits, and underscores.
///
/// # Examples
/// ```
/// use docketsync::domain::postal::clean_postal_code;
///
/// assert_eq!(clean_postal_code(" SW1A 1AA "), "SW1A1AA");
/// assert_eq!(clean_postal_code("01310-100"), "01310100");
/// ```
pub fn clean_postal_code(raw: &str) -> String {
    let re = NON_WORD_RE.get_or_init(|| {
        Regex::new(r"[^A-Za-z0-9_]")
            .unwrap_or_else(|error| panic!("postal clean regex failed to compile: {error}"))
    });
    re.replace_all(raw, "").into_owned()
}

/// Whether a raw code is long enough to be worth looking up.
pub fn is_lookup_candidate(raw: &str) -> bool {
    raw.trim().chars().count() >= MIN_LOOKUP_LEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", false)]
    #[case("  12 ", false)]
    #[case("123", true)]
    #[case(" 2000 ", true)]
    fn lookup_candidates_need_three_characters(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(is_lookup_candidate(raw), expected);
    }

    #[rstest]
    fn cleaning_drops_separators_and_punctuation() {
        assert_eq!(clean_postal_code("H0H 0H0"), "H0H0H0");
        assert_eq!(clean_postal_code("100-0001"), "1000001");
        assert_eq!(clean_postal_code("a_b.c"), "a_bc");
    }
}
