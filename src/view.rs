use serde::{Deserialize, Serialize};

use crate::constants::pagination::{DEFAULT_PAGE_SIZE, FIRST_PAGE};
use crate::constants::sort::{DEFAULT_SORT_DIRECTION, DEFAULT_SORT_FIELD};
use crate::types::{BoundText, ChannelName, RegionName};

/// Record field a dashboard column can sort by, including the derived CTR.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    /// Stable record identifier.
    Id,
    /// Channel label (case-insensitive comparison).
    Channel,
    /// Region label (case-insensitive comparison).
    Region,
    /// Spend measure.
    Spend,
    /// Impressions measure.
    Impressions,
    /// Conversions measure.
    Conversions,
    /// Clicks measure.
    Clicks,
    /// Derived click-through rate.
    Ctr,
}

/// Sort order applied to the active sort field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Natural comparator order.
    Ascending,
    /// Reversed comparator order.
    Descending,
}

impl SortDirection {
    /// The opposite direction, used when a header is clicked twice.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort criterion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Field the filtered set is ordered by.
    pub field: SortField,
    /// Direction applied to the field comparator.
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: DEFAULT_SORT_FIELD,
            direction: DEFAULT_SORT_DIRECTION,
        }
    }
}

/// User-controlled filter criteria.
///
/// Empty strings mean "unconstrained". Numeric bounds stay as the raw text
/// the user typed; blank or non-numeric text is treated as no bound rather
/// than zero or an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Exact-match channel selector.
    pub channel: ChannelName,
    /// Exact-match region selector.
    pub region: RegionName,
    /// Case-insensitive substring match against `"{channel} {region}"`.
    pub search: String,
    /// Inclusive lower spend bound, raw text.
    pub min_spend: BoundText,
    /// Inclusive upper spend bound, raw text.
    pub max_spend: BoundText,
    /// Inclusive lower CTR bound in percent, raw text.
    pub min_ctr: BoundText,
    /// Inclusive upper CTR bound in percent, raw text.
    pub max_ctr: BoundText,
}

impl FilterState {
    /// Parsed `(min, max)` spend bounds; `None` on a side means unbounded.
    pub fn spend_bounds(&self) -> (Option<f64>, Option<f64>) {
        (parse_bound(&self.min_spend), parse_bound(&self.max_spend))
    }

    /// Parsed `(min, max)` CTR bounds; `None` on a side means unbounded.
    pub fn ctr_bounds(&self) -> (Option<f64>, Option<f64>) {
        (parse_bound(&self.min_ctr), parse_bound(&self.max_ctr))
    }
}

/// Parse raw bound text into a finite number, or `None` for blank or
/// unparseable input. Soft failure only, never an error.
fn parse_bound(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Partial filter update merged into the current criteria.
///
/// Unset fields leave the corresponding criterion unchanged, so changing one
/// selector does not require resending all of them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPatch {
    /// New channel selector, if changed.
    pub channel: Option<ChannelName>,
    /// New region selector, if changed.
    pub region: Option<RegionName>,
    /// New search text, if changed.
    pub search: Option<String>,
    /// New lower spend bound text, if changed.
    pub min_spend: Option<BoundText>,
    /// New upper spend bound text, if changed.
    pub max_spend: Option<BoundText>,
    /// New lower CTR bound text, if changed.
    pub min_ctr: Option<BoundText>,
    /// New upper CTR bound text, if changed.
    pub max_ctr: Option<BoundText>,
}

impl FilterPatch {
    /// Overlay this patch on existing criteria, producing the merged state.
    pub fn merge_into(self, current: FilterState) -> FilterState {
        FilterState {
            channel: self.channel.unwrap_or(current.channel),
            region: self.region.unwrap_or(current.region),
            search: self.search.unwrap_or(current.search),
            min_spend: self.min_spend.unwrap_or(current.min_spend),
            max_spend: self.max_spend.unwrap_or(current.max_spend),
            min_ctr: self.min_ctr.unwrap_or(current.min_ctr),
            max_ctr: self.max_ctr.unwrap_or(current.max_ctr),
        }
    }
}

/// Pagination criterion.
///
/// `page` is 1-based and deliberately unclamped: the pipeline tolerates any
/// integer by producing an empty slice, and the presentation layer bounds
/// navigation using the reported page count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current 1-based page index.
    pub page: i64,
    /// Rows per page.
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: FIRST_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Combined user-controlled view state: filters, sort, and pagination.
///
/// Mutated only through the four intent transitions, each a total function
/// returning a new value. No transition touches the record store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Active filter criteria.
    pub filters: FilterState,
    /// Active sort criterion.
    pub sort: SortState,
    /// Active pagination criterion.
    pub pagination: Pagination,
}

impl ViewState {
    /// Merge a partial filter update and return to the first page.
    ///
    /// The page reset keeps the view from showing a stale page that could be
    /// empty or mismatched once the filtered set changes.
    pub fn apply_filters(&self, patch: FilterPatch) -> Self {
        Self {
            filters: patch.merge_into(self.filters.clone()),
            sort: self.sort,
            pagination: Pagination {
                page: FIRST_PAGE,
                ..self.pagination
            },
        }
    }

    /// Change the sort criterion and return to the first page.
    ///
    /// Clicking the already-active column with no explicit direction toggles
    /// the order; any other column starts ascending unless a direction is
    /// given.
    pub fn set_sort(&self, field: SortField, direction: Option<SortDirection>) -> Self {
        let sort = if self.sort.field == field && direction.is_none() {
            SortState {
                field,
                direction: self.sort.direction.toggled(),
            }
        } else {
            SortState {
                field,
                direction: direction.unwrap_or(SortDirection::Ascending),
            }
        };
        Self {
            filters: self.filters.clone(),
            sort,
            pagination: Pagination {
                page: FIRST_PAGE,
                ..self.pagination
            },
        }
    }

    /// Jump to a page unconditionally; no clamping happens here.
    pub fn set_page(&self, page: i64) -> Self {
        Self {
            filters: self.filters.clone(),
            sort: self.sort,
            pagination: Pagination {
                page,
                ..self.pagination
            },
        }
    }

    /// Change the row density and return to the first page, since the prior
    /// page index no longer means the same rows.
    pub fn set_page_size(&self, page_size: usize) -> Self {
        Self {
            filters: self.filters.clone(),
            sort: self.sort,
            pagination: Pagination {
                page: FIRST_PAGE,
                page_size,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bound_treats_blank_and_garbage_as_unbounded() {
        assert_eq!(parse_bound(""), None);
        assert_eq!(parse_bound("   "), None);
        assert_eq!(parse_bound("abc"), None);
        assert_eq!(parse_bound("NaN"), None);
        assert_eq!(parse_bound("inf"), None);
        assert_eq!(parse_bound(" 12.5 "), Some(12.5));
        assert_eq!(parse_bound("-3"), Some(-3.0));
    }

    #[test]
    fn patch_merges_only_given_fields() {
        let state = FilterState {
            channel: "Email".to_string(),
            min_spend: "100".to_string(),
            ..FilterState::default()
        };
        let merged = FilterPatch {
            region: Some("EU".to_string()),
            ..FilterPatch::default()
        }
        .merge_into(state);
        assert_eq!(merged.channel, "Email");
        assert_eq!(merged.region, "EU");
        assert_eq!(merged.min_spend, "100");
    }

    #[test]
    fn default_view_matches_initial_dashboard() {
        let view = ViewState::default();
        assert_eq!(view.sort.field, SortField::Spend);
        assert_eq!(view.sort.direction, SortDirection::Descending);
        assert_eq!(view.pagination.page, 1);
        assert_eq!(view.pagination.page_size, 25);
        assert_eq!(view.filters, FilterState::default());
    }

    #[test]
    fn set_sort_toggles_only_on_repeated_field() {
        let view = ViewState::default();
        let by_clicks = view.set_sort(SortField::Clicks, None);
        assert_eq!(by_clicks.sort.direction, SortDirection::Ascending);
        let toggled = by_clicks.set_sort(SortField::Clicks, None);
        assert_eq!(toggled.sort.direction, SortDirection::Descending);
        // Explicit direction suppresses the toggle.
        let pinned = toggled.set_sort(SortField::Clicks, Some(SortDirection::Descending));
        assert_eq!(pinned.sort.direction, SortDirection::Descending);
    }

    #[test]
    fn set_page_is_unclamped() {
        let view = ViewState::default().set_page(-4);
        assert_eq!(view.pagination.page, -4);
        let view = view.set_page(9999);
        assert_eq!(view.pagination.page, 9999);
    }

    #[test]
    fn page_resets_on_filter_sort_and_size_changes() {
        let view = ViewState::default().set_page(7);
        assert_eq!(view.apply_filters(FilterPatch::default()).pagination.page, 1);
        assert_eq!(view.set_sort(SortField::Id, None).pagination.page, 1);
        assert_eq!(view.set_page_size(10).pagination.page, 1);
        // set_page itself never resets anything else.
        assert_eq!(view.set_page(3).pagination.page_size, 25);
    }
}
