//! Focus memory: one remembered location keyed by route path.

use serde::Serialize;

use crate::timers::TimerId;

pub const DEFAULT_MAX_RESTORE_ATTEMPTS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationMemoryState {
    pub region_id: String,
    pub zone_id: String,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryPhase {
    Idle,
    Saved,
    PendingRestore,
}

/// Retry bookkeeping while the remembered zone is not mounted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRestore {
    pub path: String,
    pub attempts: u32,
    pub max_attempts: u32,
    pub(crate) timer: Option<TimerId>,
}

#[derive(Debug, Default)]
pub struct FocusMemory {
    snapshot: Option<(String, NavigationMemoryState)>,
    pending: Option<PendingRestore>,
}

impl FocusMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever was remembered before.
    pub fn remember(&mut self, path: impl Into<String>, state: NavigationMemoryState) {
        self.snapshot = Some((path.into(), state));
    }

    pub fn snapshot(&self) -> Option<&NavigationMemoryState> {
        self.snapshot.as_ref().map(|(_, state)| state)
    }

    pub fn path(&self) -> Option<&str> {
        self.snapshot.as_ref().map(|(path, _)| path.as_str())
    }

    /// The snapshot, only if it was captured for exactly `path`.
    pub fn snapshot_for(&self, path: &str) -> Option<&NavigationMemoryState> {
        match &self.snapshot {
            Some((saved, state)) if saved == path => Some(state),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<&PendingRestore> {
        self.pending.as_ref()
    }

    pub(crate) fn pending_mut(&mut self) -> Option<&mut PendingRestore> {
        self.pending.as_mut()
    }

    /// Install a new pending restore, returning the one it replaces.
    pub(crate) fn begin_pending(
        &mut self,
        path: impl Into<String>,
        max_attempts: u32,
    ) -> Option<PendingRestore> {
        self.pending.replace(PendingRestore {
            path: path.into(),
            attempts: 0,
            max_attempts,
            timer: None,
        })
    }

    pub(crate) fn take_pending(&mut self) -> Option<PendingRestore> {
        self.pending.take()
    }

    pub fn phase(&self) -> MemoryPhase {
        if self.pending.is_some() {
            MemoryPhase::PendingRestore
        } else if self.snapshot.is_some() {
            MemoryPhase::Saved
        } else {
            MemoryPhase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(index: usize) -> NavigationMemoryState {
        NavigationMemoryState {
            region_id: "main".to_string(),
            zone_id: "library".to_string(),
            index,
        }
    }

    #[test]
    fn newer_save_overwrites() {
        let mut memory = FocusMemory::new();
        memory.remember("/library", state(1));
        memory.remember("/store", state(4));
        assert!(memory.snapshot_for("/library").is_none());
        assert_eq!(memory.snapshot_for("/store"), Some(&state(4)));
        assert_eq!(memory.path(), Some("/store"));
    }

    #[test]
    fn path_must_match_exactly() {
        let mut memory = FocusMemory::new();
        memory.remember("/library", state(2));
        assert!(memory.snapshot_for("/library/").is_none());
        assert!(memory.snapshot_for("/Library").is_none());
        assert!(memory.snapshot_for("/library").is_some());
    }

    #[test]
    fn phase_tracks_snapshot_and_pending() {
        let mut memory = FocusMemory::new();
        assert_eq!(memory.phase(), MemoryPhase::Idle);
        memory.remember("/a", state(0));
        assert_eq!(memory.phase(), MemoryPhase::Saved);
        assert!(memory.begin_pending("/a", 10).is_none());
        assert_eq!(memory.phase(), MemoryPhase::PendingRestore);
        assert!(memory.begin_pending("/a", 10).is_some());
        memory.take_pending();
        assert_eq!(memory.phase(), MemoryPhase::Saved);
    }
}
