/// Constants used by pagination defaults and presentation policy.
pub mod pagination {
    /// Page sizes the presentation layer offers in its row-density selector.
    ///
    /// The `set_page_size` transition accepts any value; restricting choices
    /// to this set is a presentation policy, not a core contract.
    pub const ALLOWED_PAGE_SIZES: [usize; 3] = [10, 25, 50];
    /// Rows per page before the user picks a density.
    pub const DEFAULT_PAGE_SIZE: usize = 25;
    /// First (1-based) page index; filter and sort changes reset to it.
    pub const FIRST_PAGE: i64 = 1;
}

/// Constants used by sort defaults.
pub mod sort {
    use crate::view::{SortDirection, SortField};

    /// Sort field applied before the user clicks a column header.
    pub const DEFAULT_SORT_FIELD: SortField = SortField::Spend;
    /// Sort direction applied before the user clicks a column header.
    pub const DEFAULT_SORT_DIRECTION: SortDirection = SortDirection::Descending;
}

/// Constants used by click-through-rate computation.
pub mod ctr {
    /// Scale factor converting a clicks/impressions ratio to percent.
    pub const PERCENT_SCALE: f64 = 100.0;
}
