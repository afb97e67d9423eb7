use serde::{Deserialize, Serialize};

use crate::constants::ctr::PERCENT_SCALE;
use crate::types::{ChannelName, RecordId, RegionName};

/// One observed marketing performance entry.
///
/// Records are immutable after ingestion; `id` uniquely identifies a row
/// across all derivations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketingRecord {
    /// Stable unique identifier.
    pub id: RecordId,
    /// Channel category label.
    pub channel: ChannelName,
    /// Region category label.
    pub region: RegionName,
    /// Spend in account currency.
    pub spend: f64,
    /// Ad impressions served.
    pub impressions: u64,
    /// Attributed conversions.
    pub conversions: u64,
    /// Recorded clicks.
    pub clicks: u64,
}

impl MarketingRecord {
    /// Click-through rate in percent, computed on demand and never persisted.
    ///
    /// `clicks / impressions * 100` when impressions are present, `0.0`
    /// otherwise.
    pub fn ctr(&self) -> f64 {
        if self.impressions > 0 {
            self.clicks as f64 / self.impressions as f64 * PERCENT_SCALE
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(impressions: u64, clicks: u64) -> MarketingRecord {
        MarketingRecord {
            id: 1,
            channel: "Email".to_string(),
            region: "US".to_string(),
            spend: 100.0,
            impressions,
            conversions: 0,
            clicks,
        }
    }

    #[test]
    fn ctr_scales_to_percent() {
        assert!((record(1000, 50).ctr() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn ctr_is_zero_without_impressions() {
        assert_eq!(record(0, 50).ctr(), 0.0);
    }
}
