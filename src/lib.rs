//! Work-time breakdown engine for daily reports.
//!
//! Calendar events for a single day are clipped to the work window, split
//! into slices at every event boundary, and each slice is credited to a
//! business category, break, or idle time. Per-category minute totals are
//! fractional; rounding happens only when formatting.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::breakdown::{compute_breakdown, compute_timeline, BreakdownRequest};
pub use application::commands::{
    compute_breakdown_impl, compute_timeline_impl, export_report_text_impl,
    import_calendar_events_impl, ReportState,
};
pub use application::report::{format_minutes, DurationStyle};
pub use domain::categorizer::{CategoryRule, EventCategorizer, ExportCategorizer, KeywordCategorizer};
pub use domain::models::{Category, CategoryBreakdown, EventInput, SliceAllocation};
pub use domain::time::TimeParseError;
pub use infrastructure::error::InfraError;
