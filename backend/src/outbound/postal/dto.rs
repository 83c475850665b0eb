//! DTOs for decoding postal lookup responses.

use serde::Deserialize;

use crate::domain::postal::PostalPlace;

#[derive(Debug, Deserialize)]
pub(super) struct PostalResponseDto {
    #[serde(default)]
    pub(super) country: Option<String>,
    #[serde(default)]
    pub(super) places: Vec<PostalPlaceDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PostalPlaceDto {
    #[serde(rename = "place name")]
    pub(super) place_name: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

impl PostalResponseDto {
    /// Only the first listed place is used.
    pub(super) fn into_domain_place(self) -> PostalPlace {
        let city = self
            .places
            .into_iter()
            .next()
            .and_then(|place| non_blank(place.place_name));
        PostalPlace {
            city,
            country: non_blank(self.country),
        }
    }
}
