//! Printable invoice view of a connote.
//!
//! The view model carries everything the printed waybill shows, already
//! formatted: upper-cased address blocks, the barcode digits of the AWB, the
//! account number derived from the connote id, and the charge lines with the
//! stored total. Rendering is left to the client.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use super::{Connote, ConnoteStatus, Party, ServiceType, ShipmentType};

/// Upper-cased address block as printed on the invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceParty {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl From<&Party> for InvoiceParty {
    fn from(party: &Party) -> Self {
        Self {
            name: party.name.to_uppercase(),
            address: party.address.to_uppercase(),
            city: party.city.to_uppercase(),
            country: party.country.to_uppercase(),
            phone: party.phone.clone(),
            email: party.email.clone(),
        }
    }
}

/// One billed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLine {
    pub label: &'static str,
    pub amount: Decimal,
}

/// Invoice view model for one connote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub awb_number: String,
    pub barcode: String,
    pub account_number: String,
    pub issued_on: NaiveDate,
    pub shipper: InvoiceParty,
    pub consignee: InvoiceParty,
    pub destination_code: String,
    pub service_type: ServiceType,
    pub shipment_type: ShipmentType,
    pub status: ConnoteStatus,
    pub description: String,
    pub pieces: String,
    pub weight: Decimal,
    pub currency: String,
    pub lines: Vec<InvoiceLine>,
    pub total: Decimal,
}

fn line_label(field: &str) -> &'static str {
    match field {
        "freight_charges" => "Freight",
        "fuel_surcharge" => "Fuel surcharge",
        "security_charge" => "Security",
        "handling_charge" => "Handling",
        "insurance_fee" => "Insurance",
        _ => "Other",
    }
}

impl Invoice {
    /// Build the invoice view from a stored connote.
    ///
    /// The total is the stored `total_charges`, rounded to two places for
    /// display; it is not re-derived from the lines.
    pub fn for_connote(connote: &Connote) -> Self {
        let account_number = connote
            .id
            .to_string()
            .chars()
            .take(8)
            .collect::<String>()
            .to_uppercase();
        let barcode = connote
            .awb_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();

        Self {
            awb_number: connote.awb_number.clone(),
            barcode,
            account_number,
            issued_on: connote.created_at.date_naive(),
            shipper: InvoiceParty::from(&connote.shipper),
            consignee: InvoiceParty::from(&connote.consignee),
            destination_code: connote.consignee.country.to_uppercase(),
            service_type: connote.service_type,
            shipment_type: connote.shipment_type,
            status: connote.status,
            description: connote.description.to_uppercase(),
            pieces: format!("{:02}", connote.pieces),
            weight: connote.weight,
            currency: connote.currency.clone(),
            lines: connote
                .charges
                .lines()
                .into_iter()
                .map(|(field, amount)| InvoiceLine {
                    label: line_label(field),
                    amount,
                })
                .collect(),
            total: connote
                .total_charges
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        }
    }
}
