//! Merge a lookup result into address fields the user has not filled.

/// City and country fields of an address block as currently entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressFields {
    pub city: String,
    pub country: String,
}

/// Address fields after autofill, plus which of them were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutofillOutcome {
    pub fields: AddressFields,
    pub city_filled: bool,
    pub country_filled: bool,
}

fn fill(current: String, found: &str) -> (String, bool) {
    if current.trim().is_empty() && !found.trim().is_empty() {
        (found.trim().to_owned(), true)
    } else {
        (current, false)
    }
}

/// Populate blank fields from a lookup; non-blank fields are never touched.
///
/// # Examples
/// ```
/// use docketsync::domain::postal::{AddressFields, apply_autofill};
///
/// let current = AddressFields { city: String::new(), country: "Australia".into() };
/// let outcome = apply_autofill(current, "Sydney", "Australien");
/// assert_eq!(outcome.fields.city, "Sydney");
/// assert_eq!(outcome.fields.country, "Australia");
/// assert!(!outcome.country_filled);
/// ```
pub fn apply_autofill(current: AddressFields, city: &str, country: &str) -> AutofillOutcome {
    let (city, city_filled) = fill(current.city, city);
    let (country, country_filled) = fill(current.country, country);
    AutofillOutcome {
        fields: AddressFields { city, country },
        city_filled,
        country_filled,
    }
}
