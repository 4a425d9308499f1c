//! Observer notifications for UI bindings.
//!
//! Bindings that used to rely on reactive state subscribe here and receive a
//! [`NavigationEvent`] after each state transition has been applied.

use crate::navigation::Direction;
use crate::state::NavigationError;

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationEvent {
    RegionRegistered {
        region: String,
    },
    RegionUnregistered {
        region: String,
    },
    ZoneRegistered {
        zone: String,
        region: String,
    },
    ZoneUnregistered {
        zone: String,
    },
    ZoneMeasured {
        zone: String,
        items: usize,
    },
    ActiveRegionChanged {
        region: Option<String>,
    },
    ActiveZoneChanged {
        zone: Option<String>,
        index: usize,
    },
    Navigated {
        direction: Direction,
        moved: bool,
    },
    Selected {
        zone: String,
        index: usize,
    },
    ErrorRaised(NavigationError),
    ErrorCleared,
    StateSaved {
        path: String,
    },
    StateRestored {
        path: String,
    },
    RestoreQueued {
        path: String,
    },
    RestoreAbandoned {
        path: String,
        attempts: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Observer = Box<dyn FnMut(&NavigationEvent) + Send>;

#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&NavigationEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn emit(&mut self, event: &NavigationEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer(event);
        }
    }
}
