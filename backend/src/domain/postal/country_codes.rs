//! Country name to two-letter code mapping for scoped postal lookups.

const COUNTRY_CODES: &[(&str, &str)] = &[
    ("United States", "us"),
    ("Canada", "ca"),
    ("United Kingdom", "gb"),
    ("Germany", "de"),
    ("France", "fr"),
    ("Italy", "it"),
    ("Spain", "es"),
    ("Australia", "au"),
    ("Japan", "jp"),
    ("Netherlands", "nl"),
    ("Sweden", "se"),
    ("Switzerland", "ch"),
    ("Austria", "at"),
    ("Belgium", "be"),
    ("Denmark", "dk"),
    ("Norway", "no"),
    ("Finland", "fi"),
    ("Pakistan", "pk"),
    ("India", "in"),
    ("China", "cn"),
    ("Brazil", "br"),
    ("Mexico", "mx"),
    ("South Korea", "kr"),
    ("Singapore", "sg"),
    ("New Zealand", "nz"),
    ("Ireland", "ie"),
    ("Portugal", "pt"),
    ("Poland", "pl"),
    ("Czech Republic", "cz"),
    ("Hungary", "hu"),
    ("Greece", "gr"),
    ("Turkey", "tr"),
    ("Russia", "ru"),
    ("South Africa", "za"),
    ("Egypt", "eg"),
    ("Israel", "il"),
    ("Saudi Arabia", "sa"),
    ("United Arab Emirates", "ae"),
    ("Thailand", "th"),
    ("Malaysia", "my"),
    ("Indonesia", "id"),
    ("Philippines", "ph"),
    ("Vietnam", "vn"),
];

/// Two-letter lower-case code for a country name, matched case-insensitively.
///
/// # Examples
/// ```
/// use docketsync::domain::postal::country_code;
///
/// assert_eq!(country_code("United Kingdom"), Some("gb"));
/// assert_eq!(country_code(" pakistan "), Some("pk"));
/// assert_eq!(country_code("Atlantis"), None);
/// ```
pub fn country_code(name: &str) -> Option<&'static str> {
    let name = name.trim();
    COUNTRY_CODES
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, code)| *code)
}

/// Country name for a two-letter code, matched case-insensitively.
pub(crate) fn country_name_for_code(code: &str) -> Option<&'static str> {
    if code.len() != 2 {
        return None;
    }
    COUNTRY_CODES
        .iter()
        .find(|(_, candidate)| candidate.eq_ignore_ascii_case(code))
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn table_has_forty_three_entries() {
        assert_eq!(COUNTRY_CODES.len(), 43);
    }

    #[rstest]
    #[case("Australia", Some("au"))]
    #[case("VIETNAM", Some("vn"))]
    #[case("", None)]
    fn maps_names(#[case] name: &str, #[case] expected: Option<&str>) {
        assert_eq!(country_code(name), expected);
    }

    #[rstest]
    fn reverse_lookup_requires_two_letters() {
        assert_eq!(country_name_for_code("JP"), Some("Japan"));
        assert_eq!(country_name_for_code("Japan"), None);
    }
}
