use std::cmp::Ordering;
use std::ops::Range;

use serde::Serialize;
use tracing::debug;

use crate::aggregate::{self, ChannelSlice, Totals};
use crate::data::MarketingRecord;
use crate::view::{FilterState, Pagination, SortDirection, SortField, SortState, ViewState};

/// Keep the subsequence of records satisfying every active filter criterion.
///
/// Constraints combine with logical AND; inactive criteria (empty selectors,
/// blank or unparseable bound text) impose nothing. The stage never reorders,
/// so the output keeps the store's insertion order.
pub fn filter_records<'a>(
    records: &'a [MarketingRecord],
    filters: &FilterState,
) -> Vec<&'a MarketingRecord> {
    let search = filters.search.trim().to_lowercase();
    let (min_spend, max_spend) = filters.spend_bounds();
    let (min_ctr, max_ctr) = filters.ctr_bounds();

    records
        .iter()
        .filter(|record| {
            if !filters.channel.is_empty() && record.channel != filters.channel {
                return false;
            }
            if !filters.region.is_empty() && record.region != filters.region {
                return false;
            }
            if !search.is_empty() {
                let haystack = format!("{} {}", record.channel, record.region).to_lowercase();
                if !haystack.contains(&search) {
                    return false;
                }
            }
            if !within(record.spend, min_spend, max_spend) {
                return false;
            }
            within(record.ctr(), min_ctr, max_ctr)
        })
        .collect()
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    if let Some(min) = min {
        if value < min {
            return false;
        }
    }
    if let Some(max) = max {
        if value > max {
            return false;
        }
    }
    true
}

/// Stable-sort rows by the active criterion.
///
/// Rows comparing equal under the field keep their relative order from the
/// filter stage, which makes repeated derivations with identical inputs
/// reproduce the identical sequence page after page.
pub fn sort_records(rows: &mut [&MarketingRecord], sort: &SortState) {
    rows.sort_by(|a, b| {
        let ordering = compare_by_field(a, b, sort.field);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare_by_field(a: &MarketingRecord, b: &MarketingRecord, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Channel => compare_labels(&a.channel, &b.channel),
        SortField::Region => compare_labels(&a.region, &b.region),
        SortField::Spend => a.spend.total_cmp(&b.spend),
        SortField::Impressions => a.impressions.cmp(&b.impressions),
        SortField::Conversions => a.conversions.cmp(&b.conversions),
        SortField::Clicks => a.clicks.cmp(&b.clicks),
        SortField::Ctr => a.ctr().total_cmp(&b.ctr()),
    }
}

/// Case-insensitive label comparison with a case-sensitive tiebreak, so
/// labels differing only in case still order deterministically.
fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Index range of the requested page within a sequence of `len` rows.
///
/// A page beyond the sequence, a non-positive page, or a zero page size all
/// yield the empty range. Never an error, never a wraparound.
pub fn page_range(len: usize, pagination: &Pagination) -> Range<usize> {
    if pagination.page < 1 || pagination.page_size == 0 {
        return 0..0;
    }
    let start = (pagination.page as usize - 1).saturating_mul(pagination.page_size);
    if start >= len {
        return 0..0;
    }
    let end = start.saturating_add(pagination.page_size).min(len);
    start..end
}

/// Number of pages needed for `len` rows, never less than one.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Everything the presentation layer reads for one render pass.
///
/// Snapshots are recomputed values, not stored entities: derive a fresh one
/// after every view-state change.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Size of the filtered-sorted set before pagination.
    pub filtered_count: usize,
    /// The rows of the current page, in display order.
    pub rows: Vec<MarketingRecord>,
    /// Measure totals over the full filtered set.
    pub totals: Totals,
    /// Per-channel spend/conversion series for charting.
    pub channels: Vec<ChannelSlice>,
    /// Total pages at the current page size, at least one.
    pub page_count: usize,
    /// 1-based index of the first row on the page, 0 when the page is empty.
    pub row_start: usize,
    /// 1-based index of the last row on the page, 0 when the page is empty.
    pub row_end: usize,
}

impl DashboardSnapshot {
    /// Run the full derivation chain for the given records and view state.
    pub fn derive(records: &[MarketingRecord], view: &ViewState) -> Self {
        let mut filtered = filter_records(records, &view.filters);
        sort_records(&mut filtered, &view.sort);

        let range = page_range(filtered.len(), &view.pagination);
        let (row_start, row_end) = if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        };
        let rows: Vec<MarketingRecord> = filtered[range].iter().map(|r| (*r).clone()).collect();

        let snapshot = Self {
            filtered_count: filtered.len(),
            totals: aggregate::totals(&filtered),
            channels: aggregate::channel_series(&filtered),
            page_count: page_count(filtered.len(), view.pagination.page_size),
            rows,
            row_start,
            row_end,
        };
        debug!(
            filtered = snapshot.filtered_count,
            page = view.pagination.page,
            pages = snapshot.page_count,
            "derived dashboard snapshot"
        );
        snapshot
    }
}
