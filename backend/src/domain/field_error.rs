//! Field-level validation failures raised while building write payloads.
//!
//! Each variant carries the offending field name so the inbound adapter can
//! report `{field, code}` details without knowing the payload shape.

use rust_decimal::Decimal;
use serde_json::json;

use super::Error;

/// Largest amount a `NUMERIC(14, 2)` money column holds.
pub const MAX_MONEY_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Largest weight a `NUMERIC(12, 2)` column holds.
pub const MAX_WEIGHT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Decimal places stored for money and weight columns.
pub const AMOUNT_SCALE: u32 = 2;

/// A single rejected field in a draft payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: &'static str, min: i64 },
    #[error("{field} must be at most {max}")]
    TooLarge { field: &'static str, max: Decimal },
    #[error("{field} allows at most {scale} decimal places")]
    TooPrecise { field: &'static str, scale: u32 },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} must be a valid email address")]
    InvalidEmail { field: &'static str },
    #[error("{field} is not a valid postal code for {country}")]
    InvalidPostalCode {
        field: &'static str,
        country: String,
    },
}

impl FieldError {
    /// Name of the rejected field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::Negative { field }
            | Self::BelowMinimum { field, .. }
            | Self::TooLarge { field, .. }
            | Self::TooPrecise { field, .. }
            | Self::TooLong { field, .. }
            | Self::InvalidEmail { field }
            | Self::InvalidPostalCode { field, .. } => field,
        }
    }

    /// Stable machine-readable code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing_field",
            Self::Negative { .. } => "negative_value",
            Self::BelowMinimum { .. } => "below_minimum",
            Self::TooLarge { .. } => "too_large",
            Self::TooPrecise { .. } => "too_many_decimals",
            Self::TooLong { .. } => "too_long",
            Self::InvalidEmail { .. } => "invalid_email",
            Self::InvalidPostalCode { .. } => "invalid_postal_code",
        }
    }
}

impl From<FieldError> for Error {
    fn from(value: FieldError) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}

/// Check a stored decimal amount: non-negative, at most two decimal places,
/// and no larger than `max`.
pub(crate) fn checked_amount(
    field: &'static str,
    value: Decimal,
    max: Decimal,
) -> Result<Decimal, FieldError> {
    if value < Decimal::ZERO {
        return Err(FieldError::Negative { field });
    }
    if value.normalize().scale() > AMOUNT_SCALE {
        return Err(FieldError::TooPrecise {
            field,
            scale: AMOUNT_SCALE,
        });
    }
    if value > max {
        return Err(FieldError::TooLarge { field, max });
    }
    Ok(value)
}

/// Trim a required text field, rejecting blank input.
pub(crate) fn required_text(field: &'static str, raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Missing { field });
    }
    Ok(trimmed.to_owned())
}

/// Trim an optional text field; blank becomes `None`.
pub(crate) fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FieldError::Missing { field: "awb_number" }, "awb_number", "missing_field")]
    #[case(FieldError::Negative { field: "weight" }, "weight", "negative_value")]
    #[case(
        FieldError::InvalidPostalCode { field: "shipper.postal_code", country: "Australia".into() },
        "shipper.postal_code",
        "invalid_postal_code"
    )]
    fn exposes_field_and_code(
        #[case] error: FieldError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        assert_eq!(error.field(), field);
        assert_eq!(error.code(), code);
    }

    #[rstest]
    fn converts_to_invalid_request_with_details() {
        let error = Error::from(FieldError::Missing { field: "carrier" });
        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "carrier is required");
        let details = error.details().expect("details present");
        assert_eq!(details["field"], "carrier");
        assert_eq!(details["code"], "missing_field");
    }

    #[rstest]
    fn amount_limits_match_column_precision() {
        assert_eq!(MAX_MONEY_AMOUNT.to_string(), "999999999999.99");
        assert_eq!(MAX_WEIGHT.to_string(), "9999999999.99");
    }

    #[rstest]
    #[case("0", Ok(()))]
    #[case("12.50", Ok(()))]
    #[case("12.500", Ok(()))]
    #[case("-0.01", Err("negative_value"))]
    #[case("0.005", Err("too_many_decimals"))]
    #[case("1000000000000", Err("too_large"))]
    fn checked_amount_enforces_column_shape(
        #[case] raw: &str,
        #[case] expected: Result<(), &str>,
    ) {
        let value: Decimal = raw.parse().expect("decimal literal");
        let outcome = checked_amount("freight_charges", value, MAX_MONEY_AMOUNT)
            .map(|_| ())
            .map_err(|err| err.code());
        assert_eq!(outcome, expected);
    }

    #[rstest]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("station", "  SYD "), Ok("SYD".to_owned()));
        assert_eq!(
            required_text("station", "   "),
            Err(FieldError::Missing { field: "station" })
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("  "), None)]
    #[case(Some(" QF1 "), Some("QF1"))]
    fn optional_text_drops_blank(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(optional_text(raw), expected.map(str::to_owned));
    }
}
