use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::filter::ServiceFilter;
use crate::headsigns::{self, HeadsignRule, MergeRule};

/// Per-run adapter settings.
///
/// Stored as JSON, every field optional:
/// ```json
/// {
///   "useful_service_ids": ["JAN25SEM", "JAN25SAM"],
///   "headsign_rules": [
///     { "kind": "fixed", "route_id": 37, "labels": { "0": "Stat Incitatif Georges-Gagné" } }
///   ],
///   "merge_rules": [
///     { "route_id": 200, "direction": 1, "label": "Delson" }
///   ]
/// }
/// ```
/// Leaving out `headsign_rules` keeps the rules of the current feed
/// revision; leaving out `useful_service_ids` disables service filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    pub useful_service_ids: Option<Vec<String>>,
    pub headsign_rules: Vec<HeadsignRule>,
    pub merge_rules: Vec<MergeRule>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            useful_service_ids: None,
            headsign_rules: headsigns::default_rules(),
            merge_rules: Vec::new(),
        }
    }
}

impl AdapterConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// The service filter this config asks for.
    pub fn service_filter(&self) -> ServiceFilter {
        ServiceFilter::from(self.useful_service_ids.clone())
    }
}
