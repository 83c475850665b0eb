//! Consignment notes (connotes): one waybill per shipment.
//!
//! A connote carries shipper and consignee address blocks, shipment
//! classification, measurements, and six charge lines. The total of the
//! charge lines is computed once when the connote is created and stored with
//! it; later reads return the stored figure.
//!
//! Status is free-form within the closed [`ConnoteStatus`] set: any status can
//! be set from any other.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::field_error::{
    FieldError, MAX_MONEY_AMOUNT, MAX_WEIGHT, checked_amount, optional_text, required_text,
};
use super::postal::is_valid_postal_code;
use super::value_macros::{define_text_enum, define_uuid_id};
use super::{DocketId, EmailAddress, ProfileId};

/// Currency used when the form leaves it blank.
pub const DEFAULT_CURRENCY: &str = "USD";

define_uuid_id! {
    /// Primary key of a connote row.
    ConnoteId
}

define_text_enum! {
    /// Delivery speed purchased for the shipment.
    pub enum ServiceType ("service type") {
        Express => "express",
        Standard => "standard",
        Economy => "economy",
    }
}

define_text_enum! {
    /// Handling class of the goods.
    pub enum ShipmentType ("shipment type") {
        Documents => "documents",
        Package => "package",
        Fragile => "fragile",
        Dangerous => "dangerous",
    }
}

define_text_enum! {
    /// Where the shipment is in its journey.
    pub enum ConnoteStatus ("connote status") {
        Created => "created",
        Processing => "processing",
        InTransit => "in_transit",
        Delivered => "delivered",
        Returned => "returned",
    }
}

/// The six charge lines billed on a connote.
///
/// # Examples
/// ```
/// use docketsync::domain::Charges;
/// use rust_decimal::Decimal;
///
/// let charges = Charges {
///     freight: Decimal::new(10050, 2),
///     fuel_surcharge: Decimal::new(1225, 2),
///     ..Charges::default()
/// };
/// assert_eq!(charges.total(), Ok(Decimal::new(11275, 2)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Charges {
    pub freight: Decimal,
    pub fuel_surcharge: Decimal,
    pub security: Decimal,
    pub handling: Decimal,
    pub insurance: Decimal,
    pub other: Decimal,
}

impl Charges {
    /// Exact sum of all six lines.
    ///
    /// Fails when the sum does not fit the stored total column.
    pub fn total(&self) -> Result<Decimal, FieldError> {
        let too_large = FieldError::TooLarge {
            field: "total_charges",
            max: MAX_MONEY_AMOUNT,
        };
        let total = self
            .lines()
            .into_iter()
            .try_fold(Decimal::ZERO, |sum, (_, amount)| sum.checked_add(amount))
            .ok_or_else(|| too_large.clone())?;
        if total > MAX_MONEY_AMOUNT {
            return Err(too_large);
        }
        Ok(total)
    }

    /// Field name and amount of each line, in invoice order.
    pub fn lines(&self) -> [(&'static str, Decimal); 6] {
        [
            ("freight_charges", self.freight),
            ("fuel_surcharge", self.fuel_surcharge),
            ("security_charge", self.security),
            ("handling_charge", self.handling),
            ("insurance_fee", self.insurance),
            ("other_charges", self.other),
        ]
    }

    /// Reject lines that are negative, finer than a cent, or too large to
    /// store, and totals that overflow the total column.
    pub fn validate(&self) -> Result<(), FieldError> {
        for (field, amount) in self.lines() {
            checked_amount(field, amount, MAX_MONEY_AMOUNT)?;
        }
        self.total().map(|_| ())
    }
}

/// Address block for the shipper or the consignee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Party {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Which side of the shipment a party block describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyKind {
    Shipper,
    Consignee,
}

struct PartyFields {
    name: &'static str,
    address: &'static str,
    city: &'static str,
    country: &'static str,
    postal_code: &'static str,
    email: &'static str,
}

const SHIPPER_FIELDS: PartyFields = PartyFields {
    name: "shipper.name",
    address: "shipper.address",
    city: "shipper.city",
    country: "shipper.country",
    postal_code: "shipper.postal_code",
    email: "shipper.email",
};

const CONSIGNEE_FIELDS: PartyFields = PartyFields {
    name: "consignee.name",
    address: "consignee.address",
    city: "consignee.city",
    country: "consignee.country",
    postal_code: "consignee.postal_code",
    email: "consignee.email",
};

impl PartyKind {
    fn fields(self) -> &'static PartyFields {
        match self {
            Self::Shipper => &SHIPPER_FIELDS,
            Self::Consignee => &CONSIGNEE_FIELDS,
        }
    }
}

impl Party {
    /// Trim every field, enforce required ones, and check the postal code
    /// against the country's format.
    pub fn validated(self, kind: PartyKind) -> Result<Self, FieldError> {
        let names = kind.fields();
        let country = required_text(names.country, &self.country)?;
        let postal_code = optional_text(self.postal_code.as_deref());
        if postal_code
            .as_deref()
            .is_some_and(|code| !is_valid_postal_code(&country, code))
        {
            return Err(FieldError::InvalidPostalCode {
                field: names.postal_code,
                country,
            });
        }
        let email = optional_text(self.email.as_deref())
            .map(|raw| {
                EmailAddress::new(&raw)
                    .map(String::from)
                    .map_err(|_| FieldError::InvalidEmail { field: names.email })
            })
            .transpose()?;

        Ok(Self {
            name: required_text(names.name, &self.name)?,
            address: required_text(names.address, &self.address)?,
            city: required_text(names.city, &self.city)?,
            country,
            postal_code,
            phone: optional_text(self.phone.as_deref()),
            email,
        })
    }
}

/// Unvalidated connote form input.
///
/// Any total submitted by a client is not part of the draft; the stored total
/// is always derived from `charges`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnoteDraft {
    pub awb_number: String,
    pub shipper: Party,
    pub consignee: Party,
    pub service_type: Option<ServiceType>,
    pub shipment_type: Option<ShipmentType>,
    pub description: String,
    pub pieces: Option<i32>,
    pub weight: Option<Decimal>,
    pub dimensions: Option<String>,
    pub customs_value: Option<Decimal>,
    pub currency: Option<String>,
    pub charges: Charges,
    pub docket_id: Option<DocketId>,
}

/// Validated connote ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewConnote {
    pub awb_number: String,
    pub shipper: Party,
    pub consignee: Party,
    pub service_type: ServiceType,
    pub shipment_type: ShipmentType,
    pub description: String,
    pub pieces: i32,
    pub weight: Decimal,
    pub dimensions: Option<String>,
    pub customs_value: Option<Decimal>,
    pub currency: String,
    pub charges: Charges,
    pub total_charges: Decimal,
    pub status: ConnoteStatus,
    pub docket_id: Option<DocketId>,
    pub created_by: ProfileId,
}

impl NewConnote {
    /// Validate a draft and compute the frozen charge total.
    pub fn try_from_draft(draft: ConnoteDraft, created_by: ProfileId) -> Result<Self, FieldError> {
        let awb_number = required_text("awb_number", &draft.awb_number)?;
        let description = required_text("description", &draft.description)?;
        let shipper = draft.shipper.validated(PartyKind::Shipper)?;
        let consignee = draft.consignee.validated(PartyKind::Consignee)?;

        let pieces = draft.pieces.unwrap_or(1);
        if pieces < 1 {
            return Err(FieldError::BelowMinimum {
                field: "pieces",
                min: 1,
            });
        }
        let weight = draft.weight.ok_or(FieldError::Missing { field: "weight" })?;
        let weight = checked_amount("weight", weight, MAX_WEIGHT)?;
        let customs_value = draft
            .customs_value
            .map(|value| checked_amount("customs_value", value, MAX_MONEY_AMOUNT))
            .transpose()?;
        draft.charges.validate()?;
        let total_charges = draft.charges.total()?;

        let currency = optional_text(draft.currency.as_deref())
            .map(|code| code.to_uppercase())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned());
        if currency.chars().count() > 3 {
            return Err(FieldError::TooLong {
                field: "currency",
                max: 3,
            });
        }

        Ok(Self {
            awb_number,
            shipper,
            consignee,
            service_type: draft.service_type.unwrap_or(ServiceType::Standard),
            shipment_type: draft.shipment_type.unwrap_or(ShipmentType::Package),
            description,
            pieces,
            weight,
            dimensions: optional_text(draft.dimensions.as_deref()),
            customs_value,
            currency,
            total_charges,
            charges: draft.charges,
            status: ConnoteStatus::Created,
            docket_id: draft.docket_id,
            created_by,
        })
    }
}

/// Persisted connote.
#[derive(Debug, Clone, PartialEq)]
pub struct Connote {
    pub id: ConnoteId,
    pub awb_number: String,
    pub shipper: Party,
    pub consignee: Party,
    pub service_type: ServiceType,
    pub shipment_type: ShipmentType,
    pub description: String,
    pub pieces: i32,
    pub weight: Decimal,
    pub dimensions: Option<String>,
    pub customs_value: Option<Decimal>,
    pub currency: String,
    pub charges: Charges,
    pub total_charges: Decimal,
    pub status: ConnoteStatus,
    pub docket_id: Option<DocketId>,
    pub created_by: ProfileId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Free-text search over the connote list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnoteFilter {
    search: Option<String>,
}

impl ConnoteFilter {
    /// Build a filter; a blank term matches everything.
    pub fn new(search: Option<&str>) -> Self {
        Self {
            search: optional_text(search).map(|term| term.to_lowercase()),
        }
    }

    /// Lower-cased search term, if any.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Case-insensitive substring match on AWB, shipper name, or consignee
    /// name.
    pub fn matches(&self, connote: &Connote) -> bool {
        let Some(term) = self.search.as_deref() else {
            return true;
        };
        [
            connote.awb_number.as_str(),
            connote.shipper.name.as_str(),
            connote.consignee.name.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(term))
    }
}
