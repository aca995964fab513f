//! Change notification for the configuration store.
//!
//! Observers subscribe to one or more [`Topics`] and are called once per
//! store operation, with every change that operation made. An operation
//! that leaves the state untouched notifies nobody.

use crate::models::{Axis, DecalId, DecalProperty};
use crate::state::store::ConfigurationState;
use std::ops::BitOr;

/// Set of state fields an observer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Topics(u8);

impl Topics {
    pub const NONE: Topics = Topics(0);
    pub const COLOR: Topics = Topics(1);
    pub const DECALS: Topics = Topics(1 << 1);
    pub const ACTIVE_INDEX: Topics = Topics(1 << 2);
    pub const ALL: Topics = Topics(0b111);

    pub fn intersects(self, other: Topics) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Topics {
    type Output = Topics;

    fn bitor(self, rhs: Topics) -> Topics {
        Topics(self.0 | rhs.0)
    }
}

/// A single mutation performed by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Color,
    DecalAdded(DecalId),
    DecalRemoved(DecalId),
    /// The last decal was removed.
    DecalsCleared,
    DecalUpdated {
        id: DecalId,
        property: DecalProperty,
        axis: Axis,
    },
    ActiveIndex {
        from: usize,
        to: usize,
    },
    /// Whole state replaced from persisted storage.
    Hydrated,
    /// Whole state reset to defaults after storage was cleared.
    Reset,
}

impl Change {
    pub fn topics(&self) -> Topics {
        match self {
            Change::Color => Topics::COLOR,
            // Adding or removing can change which decal the index points at.
            Change::DecalAdded(_) | Change::DecalRemoved(_) | Change::DecalsCleared => {
                Topics::DECALS | Topics::ACTIVE_INDEX
            }
            Change::DecalUpdated { .. } => Topics::DECALS,
            Change::ActiveIndex { .. } => Topics::ACTIVE_INDEX,
            Change::Hydrated | Change::Reset => Topics::ALL,
        }
    }
}

/// Changes produced by one store operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter()
    }

    pub fn contains(&self, change: &Change) -> bool {
        self.changes.contains(change)
    }

    pub fn topics(&self) -> Topics {
        self.changes
            .iter()
            .fold(Topics::NONE, |acc, c| acc | c.topics())
    }
}

pub type ObserverFn = Box<dyn FnMut(&ChangeSet, &ConfigurationState)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct Observer {
    id: ObserverId,
    topics: Topics,
    callback: ObserverFn,
}

/// Subscriber list owned by the store.
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: u64,
    observers: Vec<Observer>,
}

impl ObserverRegistry {
    pub fn subscribe(&mut self, topics: Topics, callback: ObserverFn) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push(Observer {
            id,
            topics,
            callback,
        });
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id != id);
        self.observers.len() != before
    }

    /// Calls every observer whose topics overlap the change set.
    pub fn notify(&mut self, changes: &ChangeSet, state: &ConfigurationState) {
        if changes.is_empty() {
            return;
        }
        let touched = changes.topics();
        for observer in &mut self.observers {
            if observer.topics.intersects(touched) {
                (observer.callback)(changes, state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_union_and_intersection() {
        let both = Topics::COLOR | Topics::DECALS;
        assert!(both.intersects(Topics::COLOR));
        assert!(both.intersects(Topics::DECALS));
        assert!(!both.intersects(Topics::ACTIVE_INDEX));
        assert_eq!(Topics::ALL | both, Topics::ALL);
    }

    #[test]
    fn test_change_set_topics() {
        let mut set = ChangeSet::new();
        assert_eq!(set.topics(), Topics::NONE);
        set.push(Change::Color);
        set.push(Change::ActiveIndex { from: 0, to: 1 });
        assert_eq!(set.topics(), Topics::COLOR | Topics::ACTIVE_INDEX);
    }

    #[test]
    fn test_unsubscribe_removes_observer() {
        let mut registry = ObserverRegistry::default();
        let id = registry.subscribe(Topics::ALL, Box::new(|_, _| panic!("unsubscribed")));
        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));

        let mut changes = ChangeSet::new();
        changes.push(Change::Color);
        registry.notify(&changes, &ConfigurationState::default());
    }
}
