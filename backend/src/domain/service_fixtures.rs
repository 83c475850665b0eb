//! Shared fixtures for domain service unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rust_decimal::Decimal;

use crate::domain::{
    AccessContext, AuthUserId, Charges, Connote, ConnoteId, ConnoteStatus, Party, Profile,
    ProfileId, ResolvedPermissions, Role, ServiceType, ShipmentType,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn profile(role: Role) -> Profile {
    Profile {
        id: ProfileId::random(),
        auth_user_id: AuthUserId::random(),
        full_name: "Fixture User".into(),
        email: "fixture@example.com".into(),
        phone: None,
        role,
        is_active: true,
        avatar_url: None,
        created_by: None,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

/// Access context whose permissions are the role's fallback set.
pub(crate) fn context(role: Role) -> AccessContext {
    let permissions = match role {
        Role::MainAdmin => ResolvedPermissions::main_admin(),
        other => ResolvedPermissions::fallback(other, "fixture"),
    };
    AccessContext::new(profile(role), permissions)
}

pub(crate) fn party(name: &str, city: &str, country: &str) -> Party {
    Party {
        name: name.into(),
        address: "1 Fixture Street".into(),
        city: city.into(),
        country: country.into(),
        postal_code: None,
        phone: None,
        email: None,
    }
}

pub(crate) fn connote(awb_number: &str) -> Connote {
    let charges = Charges {
        freight: Decimal::new(10_000, 2),
        ..Charges::default()
    };
    Connote {
        id: ConnoteId::random(),
        awb_number: awb_number.into(),
        shipper: party("Acme Exports", "Sydney", "Australia"),
        consignee: party("Globex", "Osaka", "Japan"),
        service_type: ServiceType::Express,
        shipment_type: ShipmentType::Package,
        description: "Machine parts".into(),
        pieces: 2,
        weight: Decimal::new(125, 1),
        dimensions: None,
        customs_value: None,
        currency: "USD".into(),
        total_charges: charges.total().expect("fixture charges fit"),
        charges,
        status: ConnoteStatus::Created,
        docket_id: None,
        created_by: ProfileId::random(),
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}
