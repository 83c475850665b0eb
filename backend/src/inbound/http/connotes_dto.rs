//! Request and response payloads for the connote endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Charges, Connote, ConnoteDraft, ConnoteId, ConnoteStatus, DocketId, Error, Invoice,
    InvoiceLine, InvoiceParty, Party, ProfileId, ServiceType, ShipmentType,
};
use crate::inbound::http::validation::{FieldName, parse_text_enum, parse_uuid};

/// Shipper or consignee address block.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartyDto {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl From<PartyDto> for Party {
    fn from(dto: PartyDto) -> Self {
        Self {
            name: dto.name,
            address: dto.address,
            city: dto.city,
            country: dto.country,
            postal_code: dto.postal_code,
            phone: dto.phone,
            email: dto.email,
        }
    }
}

impl From<Party> for PartyDto {
    fn from(party: Party) -> Self {
        Self {
            name: party.name,
            address: party.address,
            city: party.city,
            country: party.country,
            postal_code: party.postal_code,
            phone: party.phone,
            email: party.email,
        }
    }
}

/// The six billed charge lines. Omitted lines are zero.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ChargesDto {
    #[schema(value_type = String, example = "100.50")]
    pub freight: Decimal,
    #[schema(value_type = String)]
    pub fuel_surcharge: Decimal,
    #[schema(value_type = String)]
    pub security: Decimal,
    #[schema(value_type = String)]
    pub handling: Decimal,
    #[schema(value_type = String)]
    pub insurance: Decimal,
    #[schema(value_type = String)]
    pub other: Decimal,
}

impl From<ChargesDto> for Charges {
    fn from(dto: ChargesDto) -> Self {
        Self {
            freight: dto.freight,
            fuel_surcharge: dto.fuel_surcharge,
            security: dto.security,
            handling: dto.handling,
            insurance: dto.insurance,
            other: dto.other,
        }
    }
}

impl From<Charges> for ChargesDto {
    fn from(charges: Charges) -> Self {
        Self {
            freight: charges.freight,
            fuel_surcharge: charges.fuel_surcharge,
            security: charges.security,
            handling: charges.handling,
            insurance: charges.insurance,
            other: charges.other,
        }
    }
}

/// Request body for `POST /api/v1/connotes`.
///
/// There is no total field: the stored total is always the sum of `charges`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateConnoteBody {
    #[schema(example = "AWB-1001")]
    pub awb_number: String,
    pub shipper: PartyDto,
    pub consignee: PartyDto,
    #[schema(example = "express")]
    pub service_type: Option<String>,
    #[schema(example = "package")]
    pub shipment_type: Option<String>,
    pub description: String,
    pub pieces: Option<i32>,
    #[schema(value_type = Option<String>, example = "12.5")]
    pub weight: Option<Decimal>,
    pub dimensions: Option<String>,
    #[schema(value_type = Option<String>)]
    pub customs_value: Option<Decimal>,
    #[schema(example = "USD")]
    pub currency: Option<String>,
    #[serde(default)]
    pub charges: ChargesDto,
    pub docket_id: Option<String>,
}

impl TryFrom<CreateConnoteBody> for ConnoteDraft {
    type Error = Error;

    fn try_from(body: CreateConnoteBody) -> Result<Self, Self::Error> {
        let service_type: Option<ServiceType> = body
            .service_type
            .as_deref()
            .map(|raw| parse_text_enum(raw, FieldName::new("serviceType")))
            .transpose()?;
        let shipment_type: Option<ShipmentType> = body
            .shipment_type
            .as_deref()
            .map(|raw| parse_text_enum(raw, FieldName::new("shipmentType")))
            .transpose()?;
        let docket_id = body
            .docket_id
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| parse_uuid(raw, FieldName::new("docketId")).map(DocketId::from_uuid))
            .transpose()?;

        Ok(Self {
            awb_number: body.awb_number,
            shipper: body.shipper.into(),
            consignee: body.consignee.into(),
            service_type,
            shipment_type,
            description: body.description,
            pieces: body.pieces,
            weight: body.weight,
            dimensions: body.dimensions,
            customs_value: body.customs_value,
            currency: body.currency,
            charges: body.charges.into(),
            docket_id,
        })
    }
}

/// Request body for `PUT /api/v1/connotes/{id}/status`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SetStatusBody {
    #[schema(example = "in_transit")]
    pub status: String,
}

/// Connote as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnoteResponse {
    #[schema(value_type = String)]
    pub id: ConnoteId,
    pub awb_number: String,
    pub shipper: PartyDto,
    pub consignee: PartyDto,
    #[schema(value_type = String, example = "express")]
    pub service_type: ServiceType,
    #[schema(value_type = String, example = "package")]
    pub shipment_type: ShipmentType,
    pub description: String,
    pub pieces: i32,
    #[schema(value_type = String)]
    pub weight: Decimal,
    pub dimensions: Option<String>,
    #[schema(value_type = Option<String>)]
    pub customs_value: Option<Decimal>,
    pub currency: String,
    pub charges: ChargesDto,
    #[schema(value_type = String, example = "117.75")]
    pub total_charges: Decimal,
    #[schema(value_type = String, example = "created")]
    pub status: ConnoteStatus,
    #[schema(value_type = Option<String>)]
    pub docket_id: Option<DocketId>,
    #[schema(value_type = String)]
    pub created_by: ProfileId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Connote> for ConnoteResponse {
    fn from(connote: Connote) -> Self {
        Self {
            id: connote.id,
            awb_number: connote.awb_number,
            shipper: connote.shipper.into(),
            consignee: connote.consignee.into(),
            service_type: connote.service_type,
            shipment_type: connote.shipment_type,
            description: connote.description,
            pieces: connote.pieces,
            weight: connote.weight,
            dimensions: connote.dimensions,
            customs_value: connote.customs_value,
            currency: connote.currency,
            charges: connote.charges.into(),
            total_charges: connote.total_charges,
            status: connote.status,
            docket_id: connote.docket_id,
            created_by: connote.created_by,
            created_at: connote.created_at,
            updated_at: connote.updated_at,
        }
    }
}

/// Upper-cased address block printed on the invoice.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePartyDto {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl From<InvoiceParty> for InvoicePartyDto {
    fn from(party: InvoiceParty) -> Self {
        Self {
            name: party.name,
            address: party.address,
            city: party.city,
            country: party.country,
            phone: party.phone,
            email: party.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceLineDto {
    #[schema(example = "Freight")]
    pub label: String,
    #[schema(value_type = String, example = "100.50")]
    pub amount: Decimal,
}

impl From<InvoiceLine> for InvoiceLineDto {
    fn from(line: InvoiceLine) -> Self {
        Self {
            label: line.label.to_owned(),
            amount: line.amount,
        }
    }
}

/// Everything the printed invoice shows, already formatted.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub awb_number: String,
    /// Digits of the AWB number.
    pub barcode: String,
    pub account_number: String,
    pub issued_on: NaiveDate,
    pub shipper: InvoicePartyDto,
    pub consignee: InvoicePartyDto,
    /// Consignee country, upper-cased.
    pub destination_code: String,
    #[schema(value_type = String)]
    pub service_type: ServiceType,
    #[schema(value_type = String)]
    pub shipment_type: ShipmentType,
    #[schema(value_type = String)]
    pub status: ConnoteStatus,
    pub description: String,
    pub pieces: String,
    #[schema(value_type = String)]
    pub weight: Decimal,
    pub currency: String,
    pub lines: Vec<InvoiceLineDto>,
    #[schema(value_type = String, example = "117.75")]
    pub total: Decimal,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            awb_number: invoice.awb_number,
            barcode: invoice.barcode,
            account_number: invoice.account_number,
            issued_on: invoice.issued_on,
            shipper: invoice.shipper.into(),
            consignee: invoice.consignee.into(),
            destination_code: invoice.destination_code,
            service_type: invoice.service_type,
            shipment_type: invoice.shipment_type,
            status: invoice.status,
            description: invoice.description,
            pieces: invoice.pieces,
            weight: invoice.weight,
            currency: invoice.currency,
            lines: invoice.lines.into_iter().map(Into::into).collect(),
            total: invoice.total,
        }
    }
}
