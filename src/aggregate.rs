use indexmap::IndexMap;
use serde::Serialize;

use crate::constants::ctr::PERCENT_SCALE;
use crate::data::MarketingRecord;
use crate::types::ChannelName;

/// Aggregate measures over the full filtered set, computed before pagination
/// so they reflect every matching row, not just the visible page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Totals {
    /// Summed spend.
    pub spend: f64,
    /// Summed conversions.
    pub conversions: u64,
    /// Summed impressions.
    pub impressions: u64,
    /// Summed clicks.
    pub clicks: u64,
}

impl Totals {
    /// Overall click-through rate in percent across the filtered set.
    pub fn ctr(&self) -> f64 {
        if self.impressions > 0 {
            self.clicks as f64 / self.impressions as f64 * PERCENT_SCALE
        } else {
            0.0
        }
    }
}

/// One chart entry: summed spend and conversions for a single channel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChannelSlice {
    /// Channel label.
    pub channel: ChannelName,
    /// Summed spend for the channel.
    pub spend: f64,
    /// Summed conversions for the channel.
    pub conversions: u64,
}

/// Sum the four measures over the given rows.
pub fn totals(rows: &[&MarketingRecord]) -> Totals {
    rows.iter().fold(Totals::default(), |mut acc, record| {
        acc.spend += record.spend;
        acc.conversions += record.conversions;
        acc.impressions += record.impressions;
        acc.clicks += record.clicks;
        acc
    })
}

/// Group rows by channel and emit one slice per channel present, ordered by
/// descending summed spend. Channels with no matching rows are absent rather
/// than zero-valued.
pub fn channel_series(rows: &[&MarketingRecord]) -> Vec<ChannelSlice> {
    let mut by_channel: IndexMap<&str, ChannelSlice> = IndexMap::new();
    for record in rows {
        let slice = by_channel
            .entry(record.channel.as_str())
            .or_insert_with(|| ChannelSlice {
                channel: record.channel.clone(),
                spend: 0.0,
                conversions: 0,
            });
        slice.spend += record.spend;
        slice.conversions += record.conversions;
    }
    let mut series: Vec<ChannelSlice> = by_channel.into_values().collect();
    // Stable sort keeps first-seen order for channels with equal spend.
    series.sort_by(|a, b| b.spend.total_cmp(&a.spend));
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, channel: &str, spend: f64, impressions: u64, clicks: u64) -> MarketingRecord {
        MarketingRecord {
            id,
            channel: channel.to_string(),
            region: "US".to_string(),
            spend,
            impressions,
            conversions: id,
            clicks,
        }
    }

    #[test]
    fn totals_sum_all_measures() {
        let a = record(1, "Email", 100.0, 1000, 50);
        let b = record(2, "Social", 200.0, 2000, 100);
        let rows = vec![&a, &b];
        let totals = totals(&rows);
        assert_eq!(totals.spend, 300.0);
        assert_eq!(totals.impressions, 3000);
        assert_eq!(totals.clicks, 150);
        assert_eq!(totals.conversions, 3);
        assert!((totals.ctr() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn empty_totals_have_zero_ctr() {
        let totals = totals(&[]);
        assert_eq!(totals.spend, 0.0);
        assert_eq!(totals.ctr(), 0.0);
    }

    #[test]
    fn channel_series_orders_by_descending_spend() {
        let a = record(1, "Email", 100.0, 1000, 50);
        let b = record(2, "Social", 150.0, 2000, 100);
        let c = record(3, "Email", 75.0, 500, 10);
        let rows = vec![&a, &b, &c];
        let series = channel_series(&rows);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].channel, "Email");
        assert_eq!(series[0].spend, 175.0);
        assert_eq!(series[0].conversions, 4);
        assert_eq!(series[1].channel, "Social");
    }

    #[test]
    fn channel_series_omits_unmatched_channels() {
        let a = record(1, "Email", 100.0, 1000, 50);
        let rows = vec![&a];
        let series = channel_series(&rows);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].channel, "Email");
    }
}
