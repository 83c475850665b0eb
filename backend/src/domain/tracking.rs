//! Shipment tracking history.

use chrono::{DateTime, Utc};

use super::field_error::{FieldError, optional_text, required_text};
use super::value_macros::define_uuid_id;
use super::{Connote, ConnoteId, ConnoteStatus, ProfileId};

define_uuid_id! {
    /// Primary key of a tracking history row.
    TrackingEventId
}

/// One timestamped status event for a connote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingEvent {
    pub id: TrackingEventId,
    pub connote_id: ConnoteId,
    pub status: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub created_by: Option<ProfileId>,
}

/// Validated event ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrackingEvent {
    pub connote_id: ConnoteId,
    pub status: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub created_by: Option<ProfileId>,
}

impl NewTrackingEvent {
    /// Validate raw input; `status` is required, the rest optional.
    pub fn try_new(
        connote_id: ConnoteId,
        status: &str,
        location: Option<&str>,
        description: Option<&str>,
        timestamp: DateTime<Utc>,
        created_by: Option<ProfileId>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            connote_id,
            status: required_text("status", status)?,
            location: optional_text(location),
            description: optional_text(description),
            timestamp,
            created_by,
        })
    }
}

/// Tracking view of a shipment: where it is, where it is going, and what
/// happened so far.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentTrace {
    pub connote_id: ConnoteId,
    pub awb_number: String,
    pub status: ConnoteStatus,
    pub origin: String,
    pub destination: String,
    pub last_updated: DateTime<Utc>,
    /// Events, oldest first.
    pub history: Vec<TrackingEvent>,
}

impl ShipmentTrace {
    /// Combine a connote with its history.
    ///
    /// `last_updated` is the later of the connote's update time and the newest
    /// event.
    pub fn new(connote: &Connote, mut history: Vec<TrackingEvent>) -> Self {
        history.sort_by_key(|event| event.timestamp);
        let last_event = history.last().map(|event| event.timestamp);
        Self {
            connote_id: connote.id,
            awb_number: connote.awb_number.clone(),
            status: connote.status,
            origin: format!("{}, {}", connote.shipper.city, connote.shipper.country),
            destination: format!("{}, {}", connote.consignee.city, connote.consignee.country),
            last_updated: last_event.map_or(connote.updated_at, |at| at.max(connote.updated_at)),
            history,
        }
    }
}
