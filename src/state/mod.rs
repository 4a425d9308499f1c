mod history;

pub use history::{DEFAULT_HISTORY_CAPACITY, History, HistoryEntry};

use serde::Serialize;

/// Dead-end record shown to the UI until it expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationError {
    pub zone: String,
    pub index: usize,
    pub timestamp_ms: u64,
}

/// What is focused right now.
///
/// A registered `active_zone` always belongs to `active_region`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub active_region: Option<String>,
    pub active_zone: Option<String>,
    pub active_index: usize,
    pub last_error: Option<NavigationError>,
}

impl NavigationState {
    pub fn clear_zone(&mut self) {
        self.active_zone = None;
        self.active_index = 0;
    }

    pub fn clear_focus(&mut self) {
        self.active_region = None;
        self.clear_zone();
    }

    pub fn is_zone_active(&self, zone_id: &str) -> bool {
        self.active_zone.as_deref() == Some(zone_id)
    }

    pub fn is_region_active(&self, region_id: &str) -> bool {
        self.active_region.as_deref() == Some(region_id)
    }
}
