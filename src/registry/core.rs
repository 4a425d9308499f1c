use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use blake3::Hash;
use serde::Serialize;

use crate::error::{NavError, Result};
use crate::geometry::Bounds;

pub type RegionId = String;
pub type ZoneId = String;

/// Hook fired when a region gains or loses focus.
pub type RegionHook = Box<dyn FnMut() + Send>;

/// Hook receiving the item index a zone is focused on, blurred from, or selecting.
pub type ZoneHook = Box<dyn FnMut(usize) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Horizontal,
    Vertical,
    Grid,
}

/// What moved focus into a zone most recently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationSource {
    #[default]
    Keyboard,
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStep {
    Next,
    Prev,
}

pub struct RegionConfig {
    pub id: RegionId,
    pub priority: i32,
    pub persistent: bool,
    pub default_zone: Option<ZoneId>,
    pub on_enter: Option<RegionHook>,
    pub on_leave: Option<RegionHook>,
}

impl RegionConfig {
    pub fn new(id: impl Into<RegionId>, priority: i32) -> Self {
        Self {
            id: id.into(),
            priority,
            persistent: false,
            default_zone: None,
            on_enter: None,
            on_leave: None,
        }
    }

    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    pub fn with_default_zone(mut self, zone: impl Into<ZoneId>) -> Self {
        self.default_zone = Some(zone.into());
        self
    }

    pub fn on_enter(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_enter = Some(Box::new(hook));
        self
    }

    pub fn on_leave(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_leave = Some(Box::new(hook));
        self
    }
}

pub struct ZoneConfig {
    pub id: ZoneId,
    pub kind: ZoneKind,
    pub region_id: RegionId,
    pub columns: Option<usize>,
    pub memory: bool,
    pub group: Option<String>,
    pub hoverable: bool,
    pub on_select: Option<ZoneHook>,
    pub on_focus: Option<ZoneHook>,
    pub on_blur: Option<ZoneHook>,
}

impl ZoneConfig {
    pub fn new(id: impl Into<ZoneId>, kind: ZoneKind, region_id: impl Into<RegionId>) -> Self {
        Self {
            id: id.into(),
            kind,
            region_id: region_id.into(),
            columns: None,
            memory: false,
            group: None,
            hoverable: false,
            on_select: None,
            on_focus: None,
            on_blur: None,
        }
    }

    pub fn horizontal(id: impl Into<ZoneId>, region_id: impl Into<RegionId>) -> Self {
        Self::new(id, ZoneKind::Horizontal, region_id)
    }

    pub fn vertical(id: impl Into<ZoneId>, region_id: impl Into<RegionId>) -> Self {
        Self::new(id, ZoneKind::Vertical, region_id)
    }

    pub fn grid(id: impl Into<ZoneId>, region_id: impl Into<RegionId>, columns: usize) -> Self {
        Self {
            columns: Some(columns),
            ..Self::new(id, ZoneKind::Grid, region_id)
        }
    }

    pub fn with_memory(mut self) -> Self {
        self.memory = true;
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn hoverable(mut self) -> Self {
        self.hoverable = true;
        self
    }

    pub fn on_select(mut self, hook: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_select = Some(Box::new(hook));
        self
    }

    pub fn on_focus(mut self, hook: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_focus = Some(Box::new(hook));
        self
    }

    pub fn on_blur(mut self, hook: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_blur = Some(Box::new(hook));
        self
    }
}

/// Layout report for a zone: its measured box and the keys of its focusable
/// items in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneMeasurement {
    pub bounds: Option<Bounds>,
    pub items: Vec<String>,
}

impl ZoneMeasurement {
    pub fn new(bounds: Bounds, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            bounds: Some(bounds),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Measurement with `count` anonymous items, for hosts that only track counts.
    pub fn with_count(bounds: Option<Bounds>, count: usize) -> Self {
        Self {
            bounds,
            items: (0..count).map(|idx| idx.to_string()).collect(),
        }
    }

    fn fingerprint(&self) -> Hash {
        let mut hasher = blake3::Hasher::new();
        match self.bounds {
            Some(b) => {
                hasher.update(&[1]);
                for edge in [b.top, b.right, b.bottom, b.left] {
                    hasher.update(&edge.to_bits().to_le_bytes());
                }
            }
            None => {
                hasher.update(&[0]);
            }
        }
        for item in &self.items {
            hasher.update(item.as_bytes());
            hasher.update(&[0]);
        }
        hasher.finalize()
    }
}

pub struct Region {
    id: RegionId,
    priority: i32,
    persistent: bool,
    default_zone: Option<ZoneId>,
    zones: Vec<ZoneId>,
    pub(crate) on_enter: Option<RegionHook>,
    pub(crate) on_leave: Option<RegionHook>,
}

impl Region {
    fn from_config(config: RegionConfig) -> Self {
        Self {
            id: config.id,
            priority: config.priority,
            persistent: config.persistent,
            default_zone: config.default_zone,
            zones: Vec::new(),
            on_enter: config.on_enter,
            on_leave: config.on_leave,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn default_zone(&self) -> Option<&str> {
        self.default_zone.as_deref()
    }

    /// Owned zone ids in registration order.
    pub fn zones(&self) -> &[ZoneId] {
        &self.zones
    }

    pub fn contains_zone(&self, zone_id: &str) -> bool {
        self.zones.iter().any(|id| id == zone_id)
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("persistent", &self.persistent)
            .field("default_zone", &self.default_zone)
            .field("zones", &self.zones)
            .finish_non_exhaustive()
    }
}

pub struct Zone {
    id: ZoneId,
    kind: ZoneKind,
    region_id: RegionId,
    columns: Option<usize>,
    memory: bool,
    group: Option<String>,
    hoverable: bool,
    bounds: Option<Bounds>,
    items: Vec<String>,
    fingerprint: Option<Hash>,
    pub(crate) last_activation: ActivationSource,
    pub(crate) on_select: Option<ZoneHook>,
    pub(crate) on_focus: Option<ZoneHook>,
    pub(crate) on_blur: Option<ZoneHook>,
}

impl Zone {
    fn from_config(config: ZoneConfig) -> Self {
        Self {
            id: config.id,
            kind: config.kind,
            region_id: config.region_id,
            columns: config.columns,
            memory: config.memory,
            group: config.group,
            hoverable: config.hoverable,
            bounds: None,
            items: Vec::new(),
            fingerprint: None,
            last_activation: ActivationSource::default(),
            on_select: config.on_select,
            on_focus: config.on_focus,
            on_blur: config.on_blur,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ZoneKind {
        self.kind
    }

    pub fn region_id(&self) -> &str {
        &self.region_id
    }

    /// Column count used for grid movement. Missing or zero means one column.
    pub fn columns(&self) -> usize {
        self.columns.filter(|&c| c > 0).unwrap_or(1)
    }

    pub fn has_memory(&self) -> bool {
        self.memory
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn is_hoverable(&self) -> bool {
        self.hoverable
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether the host has reported a measurement yet.
    pub fn is_measured(&self) -> bool {
        self.fingerprint.is_some()
    }

    pub fn last_activation(&self) -> ActivationSource {
        self.last_activation
    }

    pub fn has_select_hook(&self) -> bool {
        self.on_select.is_some()
    }

    fn apply_measurement(&mut self, measurement: ZoneMeasurement) -> bool {
        let fingerprint = measurement.fingerprint();
        if self.fingerprint == Some(fingerprint) {
            return false;
        }
        self.bounds = measurement.bounds;
        self.items = measurement.items;
        self.fingerprint = Some(fingerprint);
        true
    }
}

impl fmt::Debug for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Zone")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("region_id", &self.region_id)
            .field("columns", &self.columns)
            .field("memory", &self.memory)
            .field("group", &self.group)
            .field("bounds", &self.bounds)
            .field("items", &self.items.len())
            .field("last_activation", &self.last_activation)
            .finish_non_exhaustive()
    }
}

/// Regions and zones currently mounted by the host, with their ownership links.
///
/// The registry only stores records. Focus bookkeeping lives in
/// [`Navigator`](crate::Navigator), which wraps these operations.
#[derive(Debug, Default)]
pub struct Registry {
    regions: HashMap<RegionId, Region>,
    zones: HashMap<ZoneId, Zone>,
    region_order: Vec<RegionId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_region(&mut self, config: RegionConfig) -> Result<()> {
        match self.regions.entry(config.id.clone()) {
            Entry::Occupied(_) => Err(NavError::DuplicateRegion(config.id)),
            Entry::Vacant(vacant) => {
                self.region_order.push(config.id.clone());
                vacant.insert(Region::from_config(config));
                Ok(())
            }
        }
    }

    /// Remove a region record. Callers unregister its zones first.
    pub fn remove_region(&mut self, region_id: &str) -> Option<Region> {
        let region = self.regions.remove(region_id)?;
        self.region_order.retain(|id| id != region_id);
        Some(region)
    }

    pub fn insert_zone(&mut self, config: ZoneConfig) -> Result<()> {
        let region = self
            .regions
            .get_mut(&config.region_id)
            .ok_or_else(|| NavError::RegionNotFound(config.region_id.clone()))?;
        match self.zones.entry(config.id.clone()) {
            Entry::Occupied(_) => Err(NavError::DuplicateZone(config.id)),
            Entry::Vacant(vacant) => {
                region.zones.push(config.id.clone());
                vacant.insert(Zone::from_config(config));
                Ok(())
            }
        }
    }

    pub fn remove_zone(&mut self, zone_id: &str) -> Option<Zone> {
        let zone = self.zones.remove(zone_id)?;
        if let Some(region) = self.regions.get_mut(&zone.region_id) {
            region.zones.retain(|id| id != zone_id);
        }
        Some(zone)
    }

    /// Store a fresh measurement. Returns whether bounds or items changed.
    pub fn measure(&mut self, zone_id: &str, measurement: ZoneMeasurement) -> Result<bool> {
        let zone = self
            .zones
            .get_mut(zone_id)
            .ok_or_else(|| NavError::ZoneNotFound(zone_id.to_string()))?;
        Ok(zone.apply_measurement(measurement))
    }

    pub fn region(&self, region_id: &str) -> Option<&Region> {
        self.regions.get(region_id)
    }

    pub fn region_mut(&mut self, region_id: &str) -> Option<&mut Region> {
        self.regions.get_mut(region_id)
    }

    pub fn zone(&self, zone_id: &str) -> Option<&Zone> {
        self.zones.get(zone_id)
    }

    pub fn zone_mut(&mut self, zone_id: &str) -> Option<&mut Zone> {
        self.zones.get_mut(zone_id)
    }

    pub fn contains_zone(&self, zone_id: &str) -> bool {
        self.zones.contains_key(zone_id)
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Regions in registration order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.region_order
            .iter()
            .filter_map(|id| self.regions.get(id))
    }

    /// Zones owned by `region_id`, in registration order.
    pub fn zones_in<'a>(&'a self, region_id: &str) -> impl Iterator<Item = &'a Zone> + 'a {
        self.regions
            .get(region_id)
            .map(|region| region.zones.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.zones.get(id))
    }

    /// Lowest priority value wins; ties go to the earliest registered region.
    pub fn preferred_region(&self) -> Option<&Region> {
        self.regions().min_by_key(|region| region.priority)
    }

    /// Cycle through regions by priority, skipping persistent regions other
    /// than `from`.
    pub fn next_region(&self, from: &str, step: RegionStep) -> Option<&str> {
        let mut ordered: Vec<&Region> = self
            .regions()
            .filter(|region| !region.persistent || region.id == from)
            .collect();
        ordered.sort_by_key(|region| region.priority);

        let position = ordered.iter().position(|region| region.id == from)?;
        let len = ordered.len();
        let next = match step {
            RegionStep::Next => (position + 1) % len,
            RegionStep::Prev => (position + len - 1) % len,
        };
        Some(ordered[next].id.as_str())
    }

    /// Every zone points at a region that lists it, and every listed zone exists
    /// and points back.
    pub fn is_consistent(&self) -> bool {
        let zones_point_back = self.zones.values().all(|zone| {
            self.regions
                .get(&zone.region_id)
                .is_some_and(|region| region.contains_zone(&zone.id))
        });
        let regions_point_down = self.regions.values().all(|region| {
            region.zones.iter().all(|zone_id| {
                self.zones
                    .get(zone_id)
                    .is_some_and(|zone| zone.region_id == region.id)
            })
        });
        let order_matches = self.region_order.len() == self.regions.len();
        zones_point_back && regions_point_down && order_matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_sidebar() -> Registry {
        let mut registry = Registry::new();
        registry
            .insert_region(RegionConfig::new("sidebar", 1))
            .unwrap();
        registry
    }

    #[test]
    fn zone_requires_known_region() {
        let mut registry = Registry::new();
        let err = registry
            .insert_zone(ZoneConfig::vertical("menu", "missing"))
            .unwrap_err();
        assert_eq!(err, NavError::RegionNotFound("missing".to_string()));
        assert_eq!(registry.zone_count(), 0);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut registry = registry_with_sidebar();
        assert_eq!(
            registry.insert_region(RegionConfig::new("sidebar", 0)),
            Err(NavError::DuplicateRegion("sidebar".to_string()))
        );
        registry
            .insert_zone(ZoneConfig::vertical("menu", "sidebar"))
            .unwrap();
        assert_eq!(
            registry.insert_zone(ZoneConfig::horizontal("menu", "sidebar")),
            Err(NavError::DuplicateZone("menu".to_string()))
        );
        assert_eq!(registry.zone("menu").unwrap().kind(), ZoneKind::Vertical);
    }

    #[test]
    fn zone_links_stay_consistent() {
        let mut registry = registry_with_sidebar();
        registry
            .insert_region(RegionConfig::new("main", 0))
            .unwrap();
        registry
            .insert_zone(ZoneConfig::vertical("menu", "sidebar"))
            .unwrap();
        registry
            .insert_zone(ZoneConfig::grid("tiles", "main", 3))
            .unwrap();
        registry
            .insert_zone(ZoneConfig::horizontal("tabs", "main"))
            .unwrap();
        assert!(registry.is_consistent());

        registry.remove_zone("tiles");
        assert!(registry.is_consistent());
        let ids: Vec<_> = registry.zones_in("main").map(Zone::id).collect();
        assert_eq!(ids, vec!["tabs"]);
    }

    #[test]
    fn measurement_reports_changes_only() {
        let mut registry = registry_with_sidebar();
        registry
            .insert_zone(ZoneConfig::vertical("menu", "sidebar"))
            .unwrap();
        let measurement = ZoneMeasurement::new(Bounds::new(0.0, 10.0, 10.0, 0.0), ["a", "b"]);

        assert!(registry.measure("menu", measurement.clone()).unwrap());
        assert!(!registry.measure("menu", measurement).unwrap());
        assert_eq!(registry.zone("menu").unwrap().item_count(), 2);

        let moved = ZoneMeasurement::new(Bounds::new(5.0, 10.0, 15.0, 0.0), ["a", "b"]);
        assert!(registry.measure("menu", moved).unwrap());
        assert!(registry.measure("nope", ZoneMeasurement::default()).is_err());
    }

    #[test]
    fn preferred_region_breaks_ties_by_registration() {
        let mut registry = Registry::new();
        registry.insert_region(RegionConfig::new("b", 2)).unwrap();
        registry.insert_region(RegionConfig::new("a", 1)).unwrap();
        registry.insert_region(RegionConfig::new("c", 1)).unwrap();
        assert_eq!(registry.preferred_region().map(Region::id), Some("a"));
    }

    #[test]
    fn next_region_wraps_and_skips_persistent() {
        let mut registry = Registry::new();
        registry.insert_region(RegionConfig::new("nav", 0).persistent()).unwrap();
        registry.insert_region(RegionConfig::new("list", 1)).unwrap();
        registry.insert_region(RegionConfig::new("detail", 2)).unwrap();

        assert_eq!(registry.next_region("list", RegionStep::Next), Some("detail"));
        assert_eq!(registry.next_region("detail", RegionStep::Next), Some("list"));
        assert_eq!(registry.next_region("list", RegionStep::Prev), Some("detail"));
        assert_eq!(registry.next_region("nav", RegionStep::Next), Some("list"));
        assert_eq!(registry.next_region("ghost", RegionStep::Next), None);
    }

    #[test]
    fn grid_columns_default_to_one() {
        let mut registry = registry_with_sidebar();
        registry
            .insert_zone(ZoneConfig::grid("g", "sidebar", 0))
            .unwrap();
        registry
            .insert_zone(ZoneConfig::new("h", ZoneKind::Grid, "sidebar"))
            .unwrap();
        assert_eq!(registry.zone("g").unwrap().columns(), 1);
        assert_eq!(registry.zone("h").unwrap().columns(), 1);
    }
}
