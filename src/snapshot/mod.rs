//! Serializable snapshots of a statechart's topology and active states.
//!
//! A snapshot describes a statechart; it cannot be loaded back into one.
//! Behaviour lives in host objects and is never serialized.

use crate::chart::Statechart;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// One registered state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub name: String,
    /// Declared parent; `None` for states directly under the root
    pub parent: Option<String>,
}

/// One parallel tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub name: String,
    /// Name of the active state, if the tree has been entered
    pub active: Option<String>,
    /// States in registration order
    pub states: Vec<StateSnapshot>,
}

/// Point-in-time description of a statechart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Identifier of the statechart the snapshot was taken from
    pub chart_id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Trees in creation order
    pub trees: Vec<TreeSnapshot>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.check_version()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.check_version()
    }

    /// Active state of the named tree.
    pub fn active(&self, tree: &str) -> Option<&str> {
        self.trees
            .iter()
            .find(|t| t.name == tree)
            .and_then(|t| t.active.as_deref())
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}

impl<Env> Statechart<Env> {
    /// Describe every tree, its states and its active state.
    pub fn snapshot(&self) -> Snapshot {
        let registry = self.registry();
        let trees = registry
            .trees()
            .map(|tree| TreeSnapshot {
                name: registry.tree_name(tree).unwrap_or_default().to_string(),
                active: registry
                    .active(tree)
                    .and_then(|state| self.state_name(state))
                    .map(str::to_string),
                states: registry
                    .states_in(tree)
                    .filter_map(|state| registry.node(state))
                    .map(|node| StateSnapshot {
                        name: node.name().to_string(),
                        parent: node.parent_name().map(str::to_string),
                    })
                    .collect(),
            })
            .collect();

        Snapshot {
            version: SNAPSHOT_VERSION,
            chart_id: self.id(),
            taken_at: Utc::now(),
            trees,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StateDefinition, DEFAULT_TREE};

    fn chart() -> Statechart<()> {
        let mut chart = Statechart::new();
        chart.add_state("a", StateDefinition::passive()).unwrap();
        chart
            .add_state("b", StateDefinition::passive().parent("a"))
            .unwrap();
        chart
            .add_state("idle", StateDefinition::passive().tree("network"))
            .unwrap();
        chart.go_to_state("b", None).unwrap();
        chart
    }

    #[test]
    fn snapshot_describes_trees_in_order() {
        let chart = chart();

        let snapshot = chart.snapshot();

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.chart_id, chart.id());
        assert_eq!(snapshot.trees.len(), 2);
        assert_eq!(snapshot.trees[0].name, DEFAULT_TREE);
        assert_eq!(
            snapshot.trees[0].states,
            vec![
                StateSnapshot {
                    name: "a".to_string(),
                    parent: None,
                },
                StateSnapshot {
                    name: "b".to_string(),
                    parent: Some("a".to_string()),
                },
            ]
        );
        assert_eq!(snapshot.active(DEFAULT_TREE), Some("b"));
        assert_eq!(snapshot.active("network"), None);
    }

    #[test]
    fn json_roundtrip_preserves_snapshot() {
        let snapshot = chart().snapshot();

        let json = snapshot.to_json().unwrap();
        let restored = Snapshot::from_json(&json).unwrap();

        assert_eq!(restored, snapshot);
    }

    #[test]
    fn binary_roundtrip_preserves_snapshot() {
        let snapshot = chart().snapshot();

        let bytes = snapshot.to_bytes().unwrap();
        let restored = Snapshot::from_bytes(&bytes).unwrap();

        assert_eq!(restored, snapshot);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut snapshot = chart().snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;
        let json = serde_json::to_string(&snapshot).unwrap();

        let err = Snapshot::from_json(&json).unwrap_err();

        assert_eq!(
            err.to_string(),
            "snapshot format v2 cannot be read (expected v1)"
        );
        assert!(matches!(
            err,
            SnapshotError::UnsupportedVersion { found, supported }
                if found == SNAPSHOT_VERSION + 1 && supported == SNAPSHOT_VERSION
        ));
    }

    #[test]
    fn garbage_is_an_encoding_error() {
        assert!(matches!(
            Snapshot::from_json("not json"),
            Err(SnapshotError::Json(_))
        ));
        assert!(matches!(
            Snapshot::from_bytes(&[0xff]),
            Err(SnapshotError::Binary(_))
        ));
    }
}
