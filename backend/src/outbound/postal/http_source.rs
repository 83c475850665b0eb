//! Reqwest-backed postal lookup adapter.
//!
//! The adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding. Fallback policy lives in
//! `PostalLookupService`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::PostalResponseDto;
use crate::domain::ports::{PostalCodeSource, PostalCodeSourceError};
use crate::domain::postal::PostalPlace;

/// Public endpoint used when no base URL is configured.
pub const DEFAULT_POSTAL_LOOKUP_BASE_URL: &str = "https://api.zippopotam.us/";
const USER_AGENT: &str = concat!("docketsync-backend/", env!("CARGO_PKG_VERSION"));

/// Postal source that issues `GET {base}/{code}` or `GET {base}/{cc}/{code}`.
pub struct PostalHttpSource {
    client: Client,
    base_url: Url,
}

impl PostalHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn lookup_url(
        &self,
        country_code: Option<&str>,
        code: &str,
    ) -> Result<Url, PostalCodeSourceError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                PostalCodeSourceError::transport("postal lookup base URL cannot carry a path")
            })?;
            segments.pop_if_empty();
            if let Some(cc) = country_code {
                segments.push(&cc.to_ascii_lowercase());
            }
            segments.push(code);
        }
        Ok(url)
    }
}

#[async_trait]
impl PostalCodeSource for PostalHttpSource {
    async fn lookup(
        &self,
        country_code: Option<&'static str>,
        code: &str,
    ) -> Result<Option<PostalPlace>, PostalCodeSourceError> {
        let url = self.lookup_url(country_code, code)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(code, country_code, "postal code unknown to lookup service");
            return Ok(None);
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_place(body.as_ref()).map(Some)
    }
}

fn parse_place(body: &[u8]) -> Result<PostalPlace, PostalCodeSourceError> {
    let decoded: PostalResponseDto = serde_json::from_slice(body).map_err(|error| {
        PostalCodeSourceError::decode(format!("invalid postal lookup payload: {error}"))
    })?;
    Ok(decoded.into_domain_place())
}

fn map_transport_error(error: reqwest::Error) -> PostalCodeSourceError {
    if error.is_timeout() {
        PostalCodeSourceError::timeout(error.to_string())
    } else {
        PostalCodeSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PostalCodeSourceError {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            PostalCodeSourceError::timeout(format!("status {}", status.as_u16()))
        }
        _ => PostalCodeSourceError::status(status.as_u16(), preview),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network postal mapping helpers.

    use super::*;
    use rstest::rstest;

    fn source(base: &str) -> PostalHttpSource {
        let base = Url::parse(base).expect("base URL");
        PostalHttpSource::new(base, Duration::from_secs(1)).expect("client builds")
    }

    #[rstest]
    #[case("https://api.zippopotam.us/", None, "2000", "https://api.zippopotam.us/2000")]
    #[case("https://api.zippopotam.us", Some("AU"), "2000", "https://api.zippopotam.us/au/2000")]
    #[case("http://localhost:9000/postal/", Some("GB"), "SW1A1AA", "http://localhost:9000/postal/gb/SW1A1AA")]
    fn builds_direct_and_country_scoped_urls(
        #[case] base: &str,
        #[case] country_code: Option<&str>,
        #[case] code: &str,
        #[case] expected: &str,
    ) {
        let url = source(base)
            .lookup_url(country_code, code)
            .expect("url builds");
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn takes_the_first_place_name_and_reported_country() {
        let body = r#"{
            "post code": "2000",
            "country": "Australia",
            "country abbreviation": "AU",
            "places": [
                { "place name": "Sydney", "state": "New South Wales" },
                { "place name": "Barangaroo", "state": "New South Wales" }
            ]
        }"#;

        let place = parse_place(body.as_bytes()).expect("payload decodes");
        assert_eq!(place.city.as_deref(), Some("Sydney"));
        assert_eq!(place.country.as_deref(), Some("Australia"));
    }

    #[test]
    fn empty_places_yield_no_city() {
        let place = parse_place(br#"{"country": "Japan", "places": []}"#).expect("decodes");
        assert_eq!(place.city, None);
        assert_eq!(place.country.as_deref(), Some("Japan"));
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let error = parse_place(b"<html>").expect_err("decode should fail");
        assert!(matches!(error, PostalCodeSourceError::Decode { .. }));
    }

    #[rstest]
    #[case(StatusCode::GATEWAY_TIMEOUT, true)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, false)]
    #[case(StatusCode::TOO_MANY_REQUESTS, false)]
    fn maps_statuses(#[case] status: StatusCode, #[case] is_timeout: bool) {
        let error = map_status_error(status, b"  upstream \n unavailable ");
        if is_timeout {
            assert!(matches!(error, PostalCodeSourceError::Timeout { .. }));
        } else {
            assert_eq!(
                error,
                PostalCodeSourceError::status(status.as_u16(), "upstream unavailable")
            );
        }
    }
}
