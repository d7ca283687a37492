//! Statechart configuration.

use crate::core::DEFAULT_TREE;
use serde::{Deserialize, Serialize};

/// Default number of transitions kept in the journal.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 64;

/// Settings for one statechart instance.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use statechart::StatechartConfig;
///
/// let config = StatechartConfig::from_json(r#"{ "trace": true }"#).unwrap();
/// assert!(config.trace);
/// assert_eq!(config.default_tree, "default");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatechartConfig {
    /// Tree used when no tree is named.
    pub default_tree: String,

    /// Emit a trace record for every dispatch.
    pub trace: bool,

    /// Completed transitions to retain; zero disables the journal.
    pub journal_capacity: usize,
}

impl Default for StatechartConfig {
    fn default() -> Self {
        Self {
            default_tree: DEFAULT_TREE.to_string(),
            trace: false,
            journal_capacity: DEFAULT_JOURNAL_CAPACITY,
        }
    }
}

impl StatechartConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
