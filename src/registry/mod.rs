mod core;

pub use self::core::{
    ActivationSource, Region, RegionConfig, RegionHook, RegionId, RegionStep, Registry, Zone,
    ZoneConfig, ZoneHook, ZoneId, ZoneKind, ZoneMeasurement,
};
