use serde_json::json;

use crate::events::NavigationEvent;
use crate::feedback::Feedback;
use crate::logging::json_kv;
use crate::navigation::{Direction, find_adjacent_zone, step_within};
use crate::registry::{ActivationSource, RegionStep};
use crate::state::NavigationError;

use super::{NAVIGATION_TARGET, Navigator, TimerTask};

impl Navigator {
    /// Move focus to another region (or none).
    ///
    /// `on_leave` and `on_enter` run before anything changes. A declared
    /// default zone takes focus at index 0, even if it has not mounted yet;
    /// otherwise a zone from a different region is dropped. Unknown region ids
    /// are rejected.
    pub fn set_active_region(&mut self, region_id: Option<&str>) -> bool {
        if let Some(id) = region_id {
            if self.registry.region(id).is_none() {
                self.warn(
                    NAVIGATION_TARGET,
                    "unknown_region",
                    [json_kv("region", json!(id))],
                );
                return false;
            }
        }

        self.trace(
            NAVIGATION_TARGET,
            "set_active_region",
            [
                json_kv("from", json!(self.state.active_region)),
                json_kv("to", json!(region_id)),
            ],
        );

        if let Some(old) = self.state.active_region.clone() {
            if let Some(hook) = self
                .registry
                .region_mut(&old)
                .and_then(|region| region.on_leave.as_mut())
            {
                hook();
            }
        }
        if let Some(new) = region_id {
            if let Some(hook) = self
                .registry
                .region_mut(new)
                .and_then(|region| region.on_enter.as_mut())
            {
                hook();
            }
        }

        let previous_zone = self.state.active_zone.clone();
        self.state.active_region = region_id.map(str::to_string);

        let default_zone = region_id
            .and_then(|id| self.registry.region(id))
            .and_then(|region| region.default_zone())
            .map(str::to_string);
        if let Some(zone) = default_zone {
            self.state.active_zone = Some(zone);
            self.state.active_index = 0;
        } else {
            let keeps_zone = match (self.state.active_zone.as_deref(), region_id) {
                (Some(zone), Some(region)) => self
                    .registry
                    .zone(zone)
                    .is_some_and(|zone| zone.region_id() == region),
                _ => false,
            };
            if !keeps_zone {
                self.state.clear_zone();
            }
        }

        self.emit(NavigationEvent::ActiveRegionChanged {
            region: self.state.active_region.clone(),
        });
        if self.state.active_zone != previous_zone {
            self.emit(NavigationEvent::ActiveZoneChanged {
                zone: self.state.active_zone.clone(),
                index: self.state.active_index,
            });
        }
        self.push_history();
        true
    }

    /// Focus `index` of a zone (or clear the zone). Runs `on_blur` on the old
    /// zone and `on_focus` on the new one, then plays the move cue.
    ///
    /// Unregistered ids are rejected, except the active region's declared
    /// default zone, which may take focus before it mounts.
    pub fn set_active_zone(&mut self, zone_id: Option<&str>, index: usize) -> bool {
        if let Some(id) = zone_id {
            let pending_default = self
                .active_region()
                .is_some_and(|region| region.default_zone() == Some(id));
            if !self.registry.contains_zone(id) && !pending_default {
                self.warn(
                    NAVIGATION_TARGET,
                    "zone_not_found",
                    [json_kv("zone", json!(id))],
                );
                return false;
            }
        }
        self.activate_zone(zone_id, index, ActivationSource::Keyboard);
        true
    }

    /// Focus a specific item, switching region first when needed. Unknown
    /// zones and out-of-range indices are rejected without any change.
    pub fn set_active_element(&mut self, zone_id: &str, index: usize) -> bool {
        self.activate_element(zone_id, index, ActivationSource::Keyboard)
    }

    /// Pointer hover over an item of a hoverable zone. Ignored while the
    /// keyboard cooldown runs so the pointer resting over the UI does not
    /// fight arrow keys.
    pub fn hover(&mut self, zone_id: &str, index: usize) -> bool {
        if self.hover_suppressed() {
            return false;
        }
        match self.registry.zone(zone_id) {
            Some(zone) if zone.is_hoverable() => {}
            _ => return false,
        }
        self.activate_element(zone_id, index, ActivationSource::Pointer)
    }

    /// Active item the host should scroll into view. `None` when focus came
    /// from the pointer, which is already over the item.
    pub fn scroll_target(&self) -> Option<(&str, usize)> {
        let zone = self.active_zone()?;
        (zone.last_activation() == ActivationSource::Keyboard)
            .then(|| (zone.id(), self.state.active_index))
    }

    /// Record a dead end. It clears itself after the configured delay unless
    /// a newer error replaced it.
    pub fn set_error(&mut self, error: NavigationError) {
        self.trace(
            NAVIGATION_TARGET,
            "navigation_error",
            [
                json_kv("zone", json!(error.zone)),
                json_kv("index", json!(error.index)),
                json_kv("timestamp_ms", json!(error.timestamp_ms)),
            ],
        );
        self.state.last_error = Some(error.clone());
        self.play(Feedback::Error);

        self.error_generation += 1;
        let generation = self.error_generation;
        self.timers.schedule(
            self.config.error_clear_delay,
            TimerTask::ClearError { generation },
        );
        self.emit(NavigationEvent::ErrorRaised(error));
    }

    pub(super) fn expire_error(&mut self, generation: u64) {
        if generation != self.error_generation || self.state.last_error.is_none() {
            return;
        }
        self.state.last_error = None;
        self.emit(NavigationEvent::ErrorCleared);
    }

    /// Run the active zone's `on_select` with the active index.
    pub fn handle_select(&mut self) -> bool {
        let Some(zone_id) = self.state.active_zone.clone() else {
            return false;
        };
        let index = self.state.active_index;
        let feedback = self.feedback_handle();
        let Some(zone) = self.registry.zone_mut(&zone_id) else {
            return false;
        };
        if zone.is_measured() && index >= zone.item_count() {
            return false;
        }
        let Some(hook) = zone.on_select.as_mut() else {
            return false;
        };

        feedback.play(Feedback::Select);
        hook(index);

        self.record(|m| m.record_select());
        self.trace(
            NAVIGATION_TARGET,
            "selected",
            [
                json_kv("zone", json!(zone_id)),
                json_kv("index", json!(index)),
            ],
        );
        self.emit(NavigationEvent::Selected {
            zone: zone_id,
            index,
        });
        true
    }

    /// Move focus one step. Exhausts movement inside the active zone first,
    /// then jumps to the nearest zone in that direction. A dead end records
    /// a [`NavigationError`].
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let Some(current) = self.active_zone() else {
            self.trace(
                NAVIGATION_TARGET,
                "no_active_zone",
                [json_kv("direction", json!(direction))],
            );
            return false;
        };
        let zone_id = current.id().to_string();
        let index = self.state.active_index;

        self.trace(
            NAVIGATION_TARGET,
            "navigating",
            [
                json_kv("direction", json!(direction.as_str())),
                json_kv("zone", json!(zone_id)),
                json_kv("index", json!(index)),
            ],
        );

        if let Some(next) = step_within(current, index, direction) {
            self.activate_zone(Some(&zone_id), next, ActivationSource::Keyboard);
            self.record(|m| m.record_move());
            self.emit(NavigationEvent::Navigated {
                direction,
                moved: true,
            });
            return true;
        }

        let target = find_adjacent_zone(&self.registry, current, direction)
            .map(|zone| zone.id().to_string());
        if let Some(target) = target {
            self.activate_zone(Some(&target), 0, ActivationSource::Keyboard);
            self.record(|m| m.record_zone_jump());
            self.emit(NavigationEvent::Navigated {
                direction,
                moved: true,
            });
            return true;
        }

        let error = NavigationError {
            zone: zone_id,
            index,
            timestamp_ms: self.timers.now_ms(),
        };
        self.set_error(error);
        self.record(|m| m.record_dead_end());
        self.emit(NavigationEvent::Navigated {
            direction,
            moved: false,
        });
        false
    }

    /// Refocus the active region's default zone at index 0.
    pub fn activate_default_zone(&mut self) -> bool {
        let Some(default_zone) = self
            .active_region()
            .and_then(|region| region.default_zone())
            .map(str::to_string)
        else {
            return false;
        };
        if !self.registry.contains_zone(&default_zone) {
            return false;
        }
        self.set_active_zone(Some(&default_zone), 0)
    }

    /// Move to the next or previous region by priority. Persistent regions
    /// are skipped unless they are the current one.
    pub fn cycle_region(&mut self, step: RegionStep) -> bool {
        let target = match self.state.active_region.as_deref() {
            Some(current) => self
                .registry
                .next_region(current, step)
                .filter(|next| *next != current)
                .map(str::to_string),
            None => self
                .registry
                .preferred_region()
                .map(|region| region.id().to_string()),
        };
        match target {
            Some(region) => self.set_active_region(Some(&region)),
            None => false,
        }
    }

    fn activate_element(&mut self, zone_id: &str, index: usize, source: ActivationSource) -> bool {
        let Some(zone) = self.registry.zone(zone_id) else {
            self.warn(
                NAVIGATION_TARGET,
                "zone_not_found",
                [json_kv("zone", json!(zone_id))],
            );
            return false;
        };
        if index >= zone.item_count() {
            self.warn(
                NAVIGATION_TARGET,
                "invalid_index",
                [
                    json_kv("zone", json!(zone_id)),
                    json_kv("index", json!(index)),
                    json_kv("items", json!(zone.item_count())),
                ],
            );
            return false;
        }
        self.activate_zone(Some(zone_id), index, source);
        true
    }

    fn activate_zone(&mut self, zone_id: Option<&str>, index: usize, source: ActivationSource) {
        // Captured first: a region switch may drop the zone being left.
        let old_zone = self.state.active_zone.clone();
        let old_index = self.state.active_index;

        let owner = zone_id
            .and_then(|id| self.registry.zone(id))
            .map(|zone| zone.region_id().to_string());
        if let Some(owner) = owner {
            if !self.state.is_region_active(&owner) {
                self.set_active_region(Some(&owner));
            }
        }

        self.trace(
            NAVIGATION_TARGET,
            "set_active_zone",
            [
                json_kv("zone", json!(zone_id)),
                json_kv("index", json!(index)),
                json_kv(
                    "items",
                    json!(zone_id.and_then(|id| self.registry.zone(id)).map(|z| z.item_count())),
                ),
                json_kv("source", json!(source)),
            ],
        );

        if let Some(old) = old_zone {
            if let Some(hook) = self
                .registry
                .zone_mut(&old)
                .and_then(|zone| zone.on_blur.as_mut())
            {
                hook(old_index);
            }
        }
        if let Some(zone) = zone_id.and_then(|id| self.registry.zone_mut(id)) {
            zone.last_activation = source;
            if let Some(hook) = zone.on_focus.as_mut() {
                hook(index);
            }
        }

        self.play(Feedback::Move);

        self.state.active_zone = zone_id.map(str::to_string);
        self.state.active_index = index;

        if source == ActivationSource::Keyboard && zone_id.is_some() {
            self.start_hover_cooldown();
        }

        self.emit(NavigationEvent::ActiveZoneChanged {
            zone: self.state.active_zone.clone(),
            index,
        });
        self.push_history();
        if self.debug {
            self.dump_state();
        }
    }

    fn start_hover_cooldown(&mut self) {
        if let Some(timer) = self.hover_cooldown.take() {
            self.timers.cancel(timer);
        }
        let timer = self
            .timers
            .schedule(self.config.hover_cooldown, TimerTask::HoverCooldownEnd);
        self.hover_cooldown = Some(timer);
    }
}
