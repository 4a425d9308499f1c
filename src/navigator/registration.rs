use serde_json::json;

use crate::error::Result;
use crate::events::NavigationEvent;
use crate::logging::json_kv;
use crate::registry::{RegionConfig, ZoneConfig, ZoneMeasurement};

use super::{Navigator, REGISTRY_TARGET};

impl Navigator {
    /// Register a region. The only region in the registry becomes active.
    pub fn register_region(&mut self, config: RegionConfig) -> Result<()> {
        let region_id = config.id.clone();
        let priority = config.priority;
        if let Err(err) = self.registry.insert_region(config) {
            self.warn(
                REGISTRY_TARGET,
                "region_registration_failed",
                [
                    json_kv("region", json!(region_id)),
                    json_kv("error", json!(err.to_string())),
                ],
            );
            return Err(err);
        }

        self.trace(
            REGISTRY_TARGET,
            "region_registered",
            [
                json_kv("region", json!(region_id)),
                json_kv("priority", json!(priority)),
            ],
        );
        self.emit(NavigationEvent::RegionRegistered {
            region: region_id.clone(),
        });

        if self.registry.region_count() == 1 {
            self.state.active_region = Some(region_id.clone());
            self.emit(NavigationEvent::ActiveRegionChanged {
                region: Some(region_id),
            });
        }
        Ok(())
    }

    /// Register a region the way a mounting UI scope does: the only region and
    /// any persistent region are activated right away, hooks included.
    pub fn mount_region(&mut self, config: RegionConfig) -> Result<()> {
        let region_id = config.id.clone();
        let persistent = config.persistent;
        self.register_region(config)?;
        if persistent || self.registry.region_count() == 1 {
            self.activate_region(&region_id);
        }
        Ok(())
    }

    /// Activate a region and focus its default zone if that zone is mounted.
    pub fn activate_region(&mut self, region_id: &str) -> bool {
        if !self.set_active_region(Some(region_id)) {
            return false;
        }
        let default_zone = self
            .registry
            .region(region_id)
            .and_then(|region| region.default_zone())
            .filter(|zone| self.registry.contains_zone(zone))
            .map(str::to_string);
        if let Some(zone) = default_zone {
            self.set_active_zone(Some(&zone), 0);
        }
        true
    }

    /// Drop focus from a region, only if it is the active one.
    pub fn deactivate_region(&mut self, region_id: &str) -> bool {
        if !self.state.is_region_active(region_id) {
            return false;
        }
        self.set_active_region(None)
    }

    /// Remove a region and all of its zones. If it was active, focus moves to
    /// the remaining region with the lowest priority value.
    pub fn unregister_region(&mut self, region_id: &str) -> bool {
        let Some(region) = self.registry.region(region_id) else {
            return false;
        };
        let owned = region.zones().to_vec();

        self.trace(
            REGISTRY_TARGET,
            "region_unregistering",
            [
                json_kv("region", json!(region_id)),
                json_kv("zones", json!(owned.len())),
            ],
        );

        for zone_id in &owned {
            self.unregister_zone(zone_id);
        }
        self.registry.remove_region(region_id);
        self.emit(NavigationEvent::RegionUnregistered {
            region: region_id.to_string(),
        });

        if self.state.is_region_active(region_id) {
            self.state.clear_focus();
            self.emit(NavigationEvent::ActiveRegionChanged { region: None });

            let next = self
                .registry
                .preferred_region()
                .map(|region| region.id().to_string());
            if let Some(next) = next {
                self.set_active_region(Some(&next));
            }
        }
        true
    }

    /// Teardown path for a region's owning scope: persistent regions survive.
    pub fn release_region(&mut self, region_id: &str) -> bool {
        match self.registry.region(region_id) {
            Some(region) if region.is_persistent() => {
                self.trace(
                    REGISTRY_TARGET,
                    "persistent_region_kept",
                    [json_kv("region", json!(region_id))],
                );
                false
            }
            Some(_) => self.unregister_region(region_id),
            None => false,
        }
    }

    /// Register a zone inside an existing region.
    ///
    /// The first zone of the active region takes focus at index 0. A region's
    /// default zone takes focus when it mounts while nothing live is focused.
    /// A pending restore waiting on this zone completes immediately.
    pub fn register_zone(&mut self, config: ZoneConfig) -> Result<()> {
        let zone_id = config.id.clone();
        let region_id = config.region_id.clone();
        let kind = config.kind;
        if let Err(err) = self.registry.insert_zone(config) {
            self.warn(
                REGISTRY_TARGET,
                "zone_registration_failed",
                [
                    json_kv("zone", json!(zone_id)),
                    json_kv("region", json!(region_id)),
                    json_kv("error", json!(err.to_string())),
                ],
            );
            return Err(err);
        }

        self.trace(
            REGISTRY_TARGET,
            "zone_registered",
            [
                json_kv("zone", json!(zone_id)),
                json_kv("region", json!(region_id)),
                json_kv("kind", json!(kind)),
            ],
        );
        self.emit(NavigationEvent::ZoneRegistered {
            zone: zone_id.clone(),
            region: region_id.clone(),
        });

        if self.state.is_region_active(&region_id) {
            let (first_zone, is_default) = match self.registry.region(&region_id) {
                Some(region) => (
                    region.zones().len() == 1,
                    region.default_zone() == Some(zone_id.as_str()),
                ),
                None => (false, false),
            };
            let focus_is_live = self.active_zone().is_some();

            if first_zone {
                self.state.active_zone = Some(zone_id.clone());
                self.state.active_index = 0;
                self.emit(NavigationEvent::ActiveZoneChanged {
                    zone: Some(zone_id.clone()),
                    index: 0,
                });
            } else if is_default && !focus_is_live {
                self.set_active_zone(Some(&zone_id), 0);
            }
        }

        self.notify_zone_available(&zone_id);
        if self.debug {
            self.dump_state();
        }
        Ok(())
    }

    /// Remove a zone. Clears focus if it was the active zone.
    pub fn unregister_zone(&mut self, zone_id: &str) -> bool {
        if self.registry.remove_zone(zone_id).is_none() {
            return false;
        }

        self.trace(
            REGISTRY_TARGET,
            "zone_unregistered",
            [json_kv("zone", json!(zone_id))],
        );
        self.emit(NavigationEvent::ZoneUnregistered {
            zone: zone_id.to_string(),
        });

        if self.state.is_zone_active(zone_id) {
            self.state.clear_zone();
            self.emit(NavigationEvent::ActiveZoneChanged {
                zone: None,
                index: 0,
            });
        }
        true
    }

    /// Ingest a fresh layout measurement for a zone. Returns whether its
    /// bounds or items changed.
    pub fn update_zone(&mut self, zone_id: &str, measurement: ZoneMeasurement) -> Result<bool> {
        let items = measurement.items.len();
        let changed = match self.registry.measure(zone_id, measurement) {
            Ok(changed) => changed,
            Err(err) => {
                self.warn(
                    REGISTRY_TARGET,
                    "zone_measurement_rejected",
                    [
                        json_kv("zone", json!(zone_id)),
                        json_kv("error", json!(err.to_string())),
                    ],
                );
                return Err(err);
            }
        };

        if changed {
            self.trace(
                REGISTRY_TARGET,
                "zone_measured",
                [
                    json_kv("zone", json!(zone_id)),
                    json_kv("items", json!(items)),
                ],
            );
            self.emit(NavigationEvent::ZoneMeasured {
                zone: zone_id.to_string(),
                items,
            });

            // A shrinking zone must not leave focus past its last item.
            let clamped = self.state.active_index.min(items.saturating_sub(1));
            if self.state.is_zone_active(zone_id) && clamped != self.state.active_index {
                self.state.active_index = clamped;
                self.emit(NavigationEvent::ActiveZoneChanged {
                    zone: Some(zone_id.to_string()),
                    index: self.state.active_index,
                });
            }
        }
        Ok(changed)
    }
}
