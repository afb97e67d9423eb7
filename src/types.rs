/// Unique record identifier (stable, assigned at ingestion, never reused).
/// Example: `1042`
pub type RecordId = u64;
/// Marketing channel label.
/// Examples: `Email`, `Paid Social`, `Display`
pub type ChannelName = String;
/// Sales region label.
/// Examples: `US`, `EMEA`, `APAC`
pub type RegionName = String;
/// Raw user-entered text for a numeric filter bound.
/// Blank or unparseable text means "no bound", not zero.
/// Examples: `100`, `12.5`, `` (empty)
pub type BoundText = String;
