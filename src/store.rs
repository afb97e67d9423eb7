use std::collections::BTreeSet;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::data::MarketingRecord;
use crate::errors::DashboardError;
use crate::types::{ChannelName, RegionName};

/// Immutable, insertion-ordered collection of marketing records.
///
/// Populated once at startup and never mutated; every derivation reads from
/// the same snapshot. The store also supplies the distinct channel and region
/// values used to populate filter selectors. Those option lists always come
/// from the full dataset so they never shrink as other filters are applied.
#[derive(Clone, Debug)]
pub struct RecordStore {
    records: Vec<MarketingRecord>,
}

impl RecordStore {
    /// Build a store from already-decoded records, preserving their order.
    ///
    /// Rejects duplicate record ids: identity must be unique at ingestion.
    pub fn from_records(records: Vec<MarketingRecord>) -> Result<Self, DashboardError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(DashboardError::DuplicateRecordId(record.id));
            }
        }
        Ok(Self { records })
    }

    /// Decode a JSON array of records and build a store from it.
    pub fn from_json_str(raw: &str) -> Result<Self, DashboardError> {
        let records: Vec<MarketingRecord> = serde_json::from_str(raw)?;
        let store = Self::from_records(records)?;
        debug!(records = store.len(), "loaded marketing dataset");
        Ok(store)
    }

    /// Read and decode a JSON dataset file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// The complete unfiltered dataset in insertion order.
    pub fn records(&self) -> &[MarketingRecord] {
        &self.records
    }

    /// Number of records in the full dataset.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct channel values in the full dataset, sorted lexicographically.
    pub fn channel_options(&self) -> Vec<ChannelName> {
        Self::distinct(self.records.iter().map(|record| record.channel.as_str()))
    }

    /// Distinct region values in the full dataset, sorted lexicographically.
    pub fn region_options(&self) -> Vec<RegionName> {
        Self::distinct(self.records.iter().map(|record| record.region.as_str()))
    }

    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        values
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn record(id: u64, channel: &str, region: &str) -> MarketingRecord {
        MarketingRecord {
            id,
            channel: channel.to_string(),
            region: region.to_string(),
            spend: 10.0,
            impressions: 100,
            conversions: 1,
            clicks: 5,
        }
    }

    #[test]
    fn options_are_distinct_and_sorted() {
        let store = RecordStore::from_records(vec![
            record(1, "Social", "EU"),
            record(2, "Email", "US"),
            record(3, "Email", "EU"),
        ])
        .expect("store");
        assert_eq!(store.channel_options(), vec!["Email", "Social"]);
        assert_eq!(store.region_options(), vec!["EU", "US"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = RecordStore::from_records(vec![record(7, "Email", "US"), record(7, "Social", "EU")])
            .expect_err("duplicate id must fail");
        assert!(matches!(err, DashboardError::DuplicateRecordId(7)));
    }

    #[test]
    fn json_loader_preserves_insertion_order() {
        let raw = r#"[
            {"id": 2, "channel": "Social", "region": "EU",
             "spend": 200.0, "impressions": 2000, "conversions": 20, "clicks": 100},
            {"id": 1, "channel": "Email", "region": "US",
             "spend": 100.0, "impressions": 1000, "conversions": 5, "clicks": 50}
        ]"#;
        let store = RecordStore::from_json_str(raw).expect("store");
        let ids: Vec<u64> = store.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn json_file_loader_round_trips() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[{{"id": 1, "channel": "Email", "region": "US",
                 "spend": 50.5, "impressions": 10, "conversions": 1, "clicks": 2}}]"#
        )
        .expect("write dataset");
        let store = RecordStore::from_json_file(file.path()).expect("store");
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].spend, 50.5);
    }

    #[test]
    fn malformed_json_surfaces_parse_error() {
        let err = RecordStore::from_json_str("[{").expect_err("must fail");
        assert!(matches!(err, DashboardError::ParseDataset(_)));
    }
}
