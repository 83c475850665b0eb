//! Finance module placeholder.
//!
//! The module is visible to roles that have it enabled but offers no
//! functionality yet; the overview lists what is planned.

/// A planned finance feature and its placeholder figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedFeature {
    pub title: &'static str,
    pub summary: &'static str,
    pub placeholder: &'static str,
}

/// Static finance overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinanceOverview {
    pub status: &'static str,
    pub notice: &'static str,
    pub features: &'static [PlannedFeature],
}

const FEATURES: &[PlannedFeature] = &[
    PlannedFeature {
        title: "Revenue Tracking",
        summary: "Monitor revenue streams from shipments, track payment status, and analyse income trends over time.",
        placeholder: "$0.00",
    },
    PlannedFeature {
        title: "Expense Management",
        summary: "Track operational expenses, fuel costs, handling charges, and other business expenses.",
        placeholder: "$0.00",
    },
    PlannedFeature {
        title: "Profit & Loss",
        summary: "Profit and loss statements per period, route, and customer.",
        placeholder: "$0.00",
    },
    PlannedFeature {
        title: "Invoice Management",
        summary: "Issue, send, and reconcile customer invoices.",
        placeholder: "0",
    },
    PlannedFeature {
        title: "Financial Analytics",
        summary: "Margin and growth analytics across the shipment book.",
        placeholder: "0%",
    },
    PlannedFeature {
        title: "Payment Gateway",
        summary: "Accept online payments against issued invoices.",
        placeholder: "$0.00",
    },
];

impl FinanceOverview {
    /// The fixed early-access overview.
    pub fn early_access() -> Self {
        Self {
            status: "early_access",
            notice: "The Finance module is in development and will be available soon.",
            features: FEATURES,
        }
    }
}
