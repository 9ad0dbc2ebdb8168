use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One scraped quote. The rate stays the raw table text; it is only parsed
/// to a number at threshold-comparison time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRecord {
    pub rate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

/// One run's currency → quote mapping.
pub type Snapshot = BTreeMap<String, RateRecord>;

/// On-disk shape of the current-rates store: currency keys at the top
/// level next to a single `timestamp` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentStore {
    pub timestamp: String,
    #[serde(flatten)]
    pub rates: Snapshot,
}

/// Accumulated observations, keyed currency → date → time → rate.
pub type History = BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>;
