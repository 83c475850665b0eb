//! Postal-code lookup with a country-scoped fallback.
//!
//! A direct lookup by code is tried first. When it yields nothing and the
//! caller supplied a country we can map to a two-letter code, the lookup is
//! retried scoped to that country. Lookup failures are reported as values so
//! the address form can show them inline.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::PostalCodeSource;
use crate::domain::postal::{
    AddressFields, AutofillOutcome, LOOKUP_FAILED_MESSAGE, NOT_FOUND_MESSAGE, PostalLookup,
    PostalPlace, TOO_SHORT_MESSAGE, apply_autofill, clean_postal_code, country_code,
    is_lookup_candidate,
};

/// Lookup outcome plus the address fields after autofill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutofillResult {
    pub lookup: PostalLookup,
    pub outcome: AutofillOutcome,
}

/// Resolves postal codes to a city and country.
#[derive(Clone)]
pub struct PostalLookupService {
    source: Arc<dyn PostalCodeSource>,
}

enum Attempt {
    Found(PostalPlace),
    Missing,
    Failed,
}

impl PostalLookupService {
    pub fn new(source: Arc<dyn PostalCodeSource>) -> Self {
        Self { source }
    }

    async fn attempt(&self, country: Option<&'static str>, code: &str) -> Attempt {
        match self.source.lookup(country, code).await {
            Ok(Some(place)) => Attempt::Found(place),
            Ok(None) => Attempt::Missing,
            Err(error) => {
                warn!(code, country, %error, "postal lookup failed");
                Attempt::Failed
            }
        }
    }

    /// Look up `code`, optionally hinted with a country name.
    pub async fn lookup(&self, code: &str, country_hint: Option<&str>) -> PostalLookup {
        if !is_lookup_candidate(code) {
            return PostalLookup::failed(TOO_SHORT_MESSAGE);
        }
        let cleaned = clean_postal_code(code.trim());
        let hint = country_hint.map(str::trim).filter(|hint| !hint.is_empty());

        let mut errored = false;
        match self.attempt(None, &cleaned).await {
            Attempt::Found(place) => {
                return PostalLookup::Found {
                    city: place.city.unwrap_or_default(),
                    country: place.country.unwrap_or_default(),
                };
            }
            Attempt::Missing => {}
            Attempt::Failed => errored = true,
        }

        if let Some((hint, cc)) = hint.and_then(|hint| country_code(hint).map(|cc| (hint, cc))) {
            debug!(code = %cleaned, country = cc, "retrying postal lookup scoped to country");
            match self.attempt(Some(cc), &cleaned).await {
                Attempt::Found(place) => {
                    return PostalLookup::Found {
                        city: place.city.unwrap_or_default(),
                        country: place.country.unwrap_or_else(|| hint.to_owned()),
                    };
                }
                Attempt::Missing => {}
                Attempt::Failed => errored = true,
            }
        }

        PostalLookup::failed(if errored {
            LOOKUP_FAILED_MESSAGE
        } else {
            NOT_FOUND_MESSAGE
        })
    }

    /// Look up `code` and fill whichever of `current`'s fields are blank.
    ///
    /// The current country, when present, doubles as the lookup hint.
    pub async fn autofill(&self, code: &str, current: AddressFields) -> AutofillResult {
        let hint = current.country.clone();
        let lookup = self.lookup(code, Some(&hint)).await;
        let outcome = match &lookup {
            PostalLookup::Found { city, country } => apply_autofill(current, city, country),
            PostalLookup::Failed { .. } => AutofillOutcome {
                fields: current,
                ..AutofillOutcome::default()
            },
        };
        AutofillResult { lookup, outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockPostalCodeSource, PostalCodeSourceError};
    use mockall::predicate::eq;
    use rstest::rstest;

    fn place(city: &str, country: Option<&str>) -> PostalPlace {
        PostalPlace {
            city: Some(city.into()),
            country: country.map(str::to_owned),
        }
    }

    fn service(source: MockPostalCodeSource) -> PostalLookupService {
        PostalLookupService::new(Arc::new(source))
    }

    #[rstest]
    #[case("")]
    #[case("12")]
    #[case("  1 ")]
    #[tokio::test]
    async fn short_codes_never_reach_the_source(#[case] code: &str) {
        let mut source = MockPostalCodeSource::new();
        source.expect_lookup().never();

        let result = service(source).lookup(code, Some("Australia")).await;

        assert_eq!(result, PostalLookup::failed(TOO_SHORT_MESSAGE));
    }

    #[tokio::test]
    async fn direct_hit_is_cleaned_and_returned() {
        let mut source = MockPostalCodeSource::new();
        source
            .expect_lookup()
            .with(eq(None), eq("SW1A1AA"))
            .times(1)
            .return_once(|_, _| Ok(Some(place("London", Some("United Kingdom")))));

        let result = service(source).lookup(" SW1A 1AA ", None).await;

        assert_eq!(
            result,
            PostalLookup::Found {
                city: "London".into(),
                country: "United Kingdom".into(),
            }
        );
    }

    #[tokio::test]
    async fn fallback_scopes_by_country_and_defaults_to_hint() {
        let mut source = MockPostalCodeSource::new();
        source
            .expect_lookup()
            .with(eq(None), eq("2000"))
            .times(1)
            .return_once(|_, _| Err(PostalCodeSourceError::status(404_u16, "not found")));
        source
            .expect_lookup()
            .with(eq(Some("au")), eq("2000"))
            .times(1)
            .return_once(|_, _| Ok(Some(place("Sydney", None))));

        let result = service(source).lookup("2000", Some("australia")).await;

        assert_eq!(
            result,
            PostalLookup::Found {
                city: "Sydney".into(),
                country: "australia".into(),
            }
        );
    }

    #[tokio::test]
    async fn miss_without_mappable_hint_is_not_found() {
        let mut source = MockPostalCodeSource::new();
        source
            .expect_lookup()
            .times(1)
            .return_once(|_, _| Ok(None));

        let result = service(source).lookup("99999", Some("Atlantis")).await;

        assert_eq!(result, PostalLookup::failed(NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn transport_failure_reports_lookup_failed() {
        let mut source = MockPostalCodeSource::new();
        source
            .expect_lookup()
            .with(eq(None), eq("10115"))
            .times(1)
            .return_once(|_, _| Err(PostalCodeSourceError::timeout("5s elapsed")));
        source
            .expect_lookup()
            .with(eq(Some("de")), eq("10115"))
            .times(1)
            .return_once(|_, _| Ok(None));

        let result = service(source).lookup("10115", Some("Germany")).await;

        assert_eq!(result, PostalLookup::failed(LOOKUP_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn autofill_keeps_entered_values() {
        let mut source = MockPostalCodeSource::new();
        source
            .expect_lookup()
            .times(1)
            .return_once(|_, _| Ok(Some(place("Sydney", Some("Australia")))));
        let current = AddressFields {
            city: "Sydney CBD".into(),
            country: String::new(),
        };

        let result = service(source).autofill("2000", current).await;

        assert!(result.lookup.is_success());
        assert_eq!(result.outcome.fields.city, "Sydney CBD");
        assert_eq!(result.outcome.fields.country, "Australia");
        assert!(!result.outcome.city_filled);
        assert!(result.outcome.country_filled);
    }

    #[tokio::test]
    async fn failed_autofill_leaves_fields_untouched() {
        let mut source = MockPostalCodeSource::new();
        source.expect_lookup().never();
        let current = AddressFields {
            city: String::new(),
            country: "Japan".into(),
        };

        let result = service(source).autofill("1", current.clone()).await;

        assert!(!result.lookup.is_success());
        assert_eq!(result.outcome.fields, current);
    }
}
