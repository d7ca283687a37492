//! Bounded log of completed transitions.
//!
//! The journal is observational only: nothing in the engine reads it back
//! to decide where a tree goes.

use crate::core::{StateId, TreeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single completed transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub tree: TreeId,
    /// Active state before the transition
    pub from: Option<StateId>,
    /// Active state after the transition
    pub to: StateId,
    /// States whose exit hook ran, in order
    pub exited: Vec<StateId>,
    /// States whose enter hook ran, in order
    pub entered: Vec<StateId>,
    pub timestamp: DateTime<Utc>,
}

/// Most recent transitions, oldest first.
///
/// Once `capacity` records are held, recording drops the oldest one. A
/// capacity of zero disables recording.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Journal {
    records: VecDeque<TransitionRecord>,
    capacity: usize,
}

impl Journal {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, record: TransitionRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn records(&self) -> impl DoubleEndedIterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// States `tree` has been in, in order: the first recorded origin (if
    /// any), then each target.
    pub fn path(&self, tree: TreeId) -> Vec<StateId> {
        let mut records = self.records.iter().filter(|r| r.tree == tree).peekable();
        let mut path = Vec::new();
        if let Some(from) = records.peek().and_then(|first| first.from) {
            path.push(from);
        }
        path.extend(records.map(|r| r.to));
        path
    }

    /// Time between the oldest and newest retained records.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
