#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Aggregate totals and per-channel chart series.
pub mod aggregate;
/// Centralized constants for pagination, sort defaults, and CTR scaling.
pub mod constants;
/// Marketing record type and derived measures.
pub mod data;
/// Reusable demo runner and synthetic dataset generator.
pub mod example_apps;
/// Filter, sort, and page stages plus snapshot assembly.
pub mod pipeline;
/// Immutable record store and JSON ingestion.
pub mod store;
/// Shared type aliases.
pub mod types;
/// View state and the four intent transitions.
pub mod view;

mod errors;

pub use aggregate::{ChannelSlice, Totals, channel_series, totals};
pub use data::MarketingRecord;
pub use errors::DashboardError;
pub use pipeline::{
    DashboardSnapshot, filter_records, page_count, page_range, sort_records,
};
pub use store::RecordStore;
pub use types::{BoundText, ChannelName, RecordId, RegionName};
pub use view::{
    FilterPatch, FilterState, Pagination, SortDirection, SortField, SortState, ViewState,
};
