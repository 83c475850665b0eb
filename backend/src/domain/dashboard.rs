//! Dashboard summary figures.

/// Headline counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    /// All connotes ever created.
    pub total_connotes: i64,
    /// Dockets still open.
    pub open_dockets: i64,
    /// Connotes currently `in_transit`.
    pub in_transit: i64,
    /// Connotes marked `delivered` since the start of the current UTC day.
    pub delivered_today: i64,
}
