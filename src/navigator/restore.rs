use serde_json::json;

use crate::events::NavigationEvent;
use crate::logging::json_kv;
use crate::memory::NavigationMemoryState;
use crate::timers::TimerId;

use super::{MEMORY_TARGET, Navigator, TimerTask};

impl Navigator {
    /// Remember the current focus for `path`. Only zones that opted into
    /// memory are remembered; anything else returns false.
    pub fn save_state(&mut self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        let (Some(region_id), Some(zone_id)) = (
            self.state.active_region.clone(),
            self.state.active_zone.clone(),
        ) else {
            return false;
        };
        match self.registry.zone(&zone_id) {
            Some(zone) if zone.has_memory() => {}
            _ => return false,
        }

        let snapshot = NavigationMemoryState {
            region_id,
            zone_id,
            index: self.state.active_index,
        };
        self.trace(
            MEMORY_TARGET,
            "state_saved",
            [
                json_kv("path", json!(path)),
                json_kv("state", json!(snapshot)),
            ],
        );
        self.memory.remember(path, snapshot);
        self.emit(NavigationEvent::StateSaved {
            path: path.to_string(),
        });
        true
    }

    /// Restore focus remembered for exactly `path`.
    ///
    /// If the remembered zone has not mounted yet this returns false and
    /// keeps retrying on the clock until it appears or the attempt budget
    /// runs out.
    pub fn restore_state(&mut self, path: &str) -> bool {
        let Some(snapshot) = self.memory.snapshot_for(path).cloned() else {
            return false;
        };
        if !self.registry.contains_zone(&snapshot.zone_id) {
            self.queue_restore(path);
            return false;
        }
        self.apply_snapshot(path, snapshot);
        true
    }

    /// Cancel any outstanding restore retry.
    pub fn cleanup(&mut self) {
        if let Some(pending) = self.memory.take_pending() {
            if let Some(timer) = pending.timer {
                self.timers.cancel(timer);
            }
            self.trace(
                MEMORY_TARGET,
                "restore_cancelled",
                [json_kv("path", json!(pending.path))],
            );
        }
    }

    fn queue_restore(&mut self, path: &str) {
        let max_attempts = self.config.max_restore_attempts;
        if let Some(previous) = self.memory.begin_pending(path, max_attempts) {
            if let Some(timer) = previous.timer {
                self.timers.cancel(timer);
            }
        }
        self.trace(
            MEMORY_TARGET,
            "restore_queued",
            [
                json_kv("path", json!(path)),
                json_kv("max_attempts", json!(max_attempts)),
            ],
        );
        self.emit(NavigationEvent::RestoreQueued {
            path: path.to_string(),
        });
        self.attempt_restore();
    }

    pub(super) fn retry_restore(&mut self, timer: TimerId) {
        match self.memory.pending_mut() {
            Some(pending) if pending.timer == Some(timer) => pending.timer = None,
            _ => return,
        }
        self.record(|m| m.record_restore_retry());
        self.attempt_restore();
    }

    /// Completes a pending restore as soon as the zone it waits for mounts.
    pub(super) fn notify_zone_available(&mut self, zone_id: &str) {
        let waiting = self.memory.pending().is_some()
            && self
                .memory
                .snapshot()
                .is_some_and(|snapshot| snapshot.zone_id == zone_id);
        if !waiting {
            return;
        }
        let timer = self.memory.pending_mut().and_then(|pending| pending.timer.take());
        if let Some(timer) = timer {
            self.timers.cancel(timer);
        }
        self.attempt_restore();
    }

    fn attempt_restore(&mut self) {
        let Some(pending) = self.memory.pending().cloned() else {
            return;
        };
        let Some(snapshot) = self.memory.snapshot().cloned() else {
            self.memory.take_pending();
            return;
        };

        if self.registry.contains_zone(&snapshot.zone_id) {
            self.memory.take_pending();
            if self.memory.snapshot_for(&pending.path).is_some() {
                self.apply_snapshot(&pending.path, snapshot);
            }
            return;
        }

        if pending.attempts >= pending.max_attempts {
            self.memory.take_pending();
            self.record(|m| m.record_abandoned_restore());
            self.trace(
                MEMORY_TARGET,
                "restore_abandoned",
                [
                    json_kv("path", json!(pending.path)),
                    json_kv("attempts", json!(pending.attempts)),
                ],
            );
            self.emit(NavigationEvent::RestoreAbandoned {
                path: pending.path,
                attempts: pending.attempts,
            });
            return;
        }

        let timer = self
            .timers
            .schedule(self.config.restore_retry_interval, TimerTask::RetryRestore);
        if let Some(current) = self.memory.pending_mut() {
            current.attempts += 1;
            current.timer = Some(timer);
        }
    }

    fn apply_snapshot(&mut self, path: &str, snapshot: NavigationMemoryState) {
        self.cleanup();

        // A zone may have remounted under another region, or with fewer items,
        // since the save. Unmeasured zones are clamped on their first measure.
        let (region_id, index) = match self.registry.zone(&snapshot.zone_id) {
            Some(zone) => {
                let index = if zone.is_measured() {
                    snapshot.index.min(zone.item_count().saturating_sub(1))
                } else {
                    snapshot.index
                };
                (zone.region_id().to_string(), index)
            }
            None => (snapshot.region_id.clone(), snapshot.index),
        };
        let snapshot = NavigationMemoryState {
            region_id,
            index,
            ..snapshot
        };

        self.state.active_region = Some(snapshot.region_id.clone());
        self.state.active_zone = Some(snapshot.zone_id.clone());
        self.state.active_index = snapshot.index;
        self.push_history();

        self.record(|m| m.record_restore());
        self.trace(
            MEMORY_TARGET,
            "state_restored",
            [
                json_kv("path", json!(path)),
                json_kv("state", json!(snapshot)),
            ],
        );
        self.emit(NavigationEvent::ActiveRegionChanged {
            region: Some(snapshot.region_id),
        });
        self.emit(NavigationEvent::ActiveZoneChanged {
            zone: Some(snapshot.zone_id),
            index: snapshot.index,
        });
        self.emit(NavigationEvent::StateRestored {
            path: path.to_string(),
        });
    }
}
