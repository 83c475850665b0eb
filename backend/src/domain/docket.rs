//! Manifest dockets.
//!
//! A docket groups shipments dispatched together under one carrier, flight,
//! and summary number. Dockets are created `open` (unless the caller picks
//! otherwise) and closed with a single status update; there is no path back
//! from `closed`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::ProfileId;
use super::field_error::{
    FieldError, MAX_WEIGHT, checked_amount, optional_text, required_text,
};
use super::value_macros::{define_text_enum, define_uuid_id};

define_uuid_id! {
    /// Primary key of a docket row.
    DocketId
}

define_text_enum! {
    /// Lifecycle state of a docket.
    pub enum DocketStatus ("docket status") {
        Open => "open",
        Closed => "closed",
    }
}

/// Unvalidated docket form input.
///
/// Optional numeric fields default to zero and a missing date defaults to
/// the day of submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocketDraft {
    pub summary_no: String,
    pub date: Option<NaiveDate>,
    pub docket_no: String,
    pub station: String,
    pub carrier: String,
    pub flight_no: Option<String>,
    pub load_no: Option<String>,
    pub bags: Option<i32>,
    pub weight: Option<Decimal>,
    pub country: String,
    pub status: Option<DocketStatus>,
}

/// Validated docket ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocket {
    pub summary_no: String,
    pub date: NaiveDate,
    pub docket_no: String,
    pub station: String,
    pub carrier: String,
    pub flight_no: Option<String>,
    pub load_no: Option<String>,
    pub bags: i32,
    pub weight: Decimal,
    pub country: String,
    pub status: DocketStatus,
    pub created_by: ProfileId,
}

impl NewDocket {
    /// Validate a draft, filling defaults.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use docketsync::domain::{DocketDraft, DocketStatus, NewDocket, ProfileId};
    ///
    /// let draft = DocketDraft {
    ///     summary_no: "S-1".into(),
    ///     docket_no: "D-1".into(),
    ///     station: "SYD".into(),
    ///     carrier: "QF".into(),
    ///     country: "Japan".into(),
    ///     ..DocketDraft::default()
    /// };
    /// let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    /// let docket = NewDocket::try_from_draft(draft, ProfileId::random(), today).unwrap();
    /// assert_eq!(docket.status, DocketStatus::Open);
    /// assert_eq!(docket.bags, 0);
    /// assert_eq!(docket.date, today);
    /// ```
    pub fn try_from_draft(
        draft: DocketDraft,
        created_by: ProfileId,
        today: NaiveDate,
    ) -> Result<Self, FieldError> {
        let bags = draft.bags.unwrap_or(0);
        if bags < 0 {
            return Err(FieldError::Negative { field: "bags" });
        }
        let weight = checked_amount("weight", draft.weight.unwrap_or(Decimal::ZERO), MAX_WEIGHT)?;

        Ok(Self {
            summary_no: required_text("summary_no", &draft.summary_no)?,
            date: draft.date.unwrap_or(today),
            docket_no: required_text("docket_no", &draft.docket_no)?,
            station: required_text("station", &draft.station)?,
            carrier: required_text("carrier", &draft.carrier)?,
            flight_no: optional_text(draft.flight_no.as_deref()),
            load_no: optional_text(draft.load_no.as_deref()),
            bags,
            weight,
            country: required_text("country", &draft.country)?,
            status: draft.status.unwrap_or(DocketStatus::Open),
            created_by,
        })
    }
}

/// Persisted docket.
#[derive(Debug, Clone, PartialEq)]
pub struct Docket {
    pub id: DocketId,
    pub summary_no: String,
    pub date: NaiveDate,
    pub docket_no: String,
    pub station: String,
    pub carrier: String,
    pub flight_no: Option<String>,
    pub load_no: Option<String>,
    pub bags: i32,
    pub weight: Decimal,
    pub country: String,
    pub status: DocketStatus,
    pub created_by: ProfileId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Docket {
    /// Whether the docket still accepts a close.
    pub fn is_open(&self) -> bool {
        self.status == DocketStatus::Open
    }
}

/// Order dockets the way each list screen shows them.
///
/// Open dockets are newest-created first; closed dockets are most recently
/// updated first.
pub fn sort_for_listing(status: DocketStatus, dockets: &mut [Docket]) {
    match status {
        DocketStatus::Open => dockets.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        DocketStatus::Closed => dockets.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }
}
