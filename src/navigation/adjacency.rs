use crate::geometry::{distance, lies_beyond, overlap};
use crate::registry::{Registry, Zone};

use super::Direction;

/// Nearest zone of the same region lying entirely in `direction` from
/// `current` and sharing a positive extent on the perpendicular axis.
///
/// Zones without measured bounds are never candidates. Equal distances go to
/// the zone registered first.
pub fn find_adjacent_zone<'a>(
    registry: &'a Registry,
    current: &Zone,
    direction: Direction,
) -> Option<&'a Zone> {
    let origin = current.bounds()?;
    let mut best: Option<(&Zone, f64)> = None;

    for candidate in registry.zones_in(current.region_id()) {
        if candidate.id() == current.id() {
            continue;
        }
        let Some(bounds) = candidate.bounds() else {
            continue;
        };
        if !lies_beyond(origin, bounds, direction) || overlap(origin, bounds, direction) <= 0.0 {
            continue;
        }

        let gap = distance(origin, bounds, direction);
        match best {
            Some((_, best_gap)) if best_gap <= gap => {}
            _ => best = Some((candidate, gap)),
        }
    }

    best.map(|(zone, _)| zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::registry::{RegionConfig, ZoneConfig, ZoneMeasurement};

    fn layout(zones: &[(&str, &str, Option<Bounds>)]) -> Registry {
        let mut registry = Registry::new();
        registry.insert_region(RegionConfig::new("main", 0)).unwrap();
        registry.insert_region(RegionConfig::new("side", 1)).unwrap();
        for (id, region, bounds) in zones {
            registry
                .insert_zone(ZoneConfig::horizontal(*id, *region))
                .unwrap();
            registry
                .measure(id, ZoneMeasurement::with_count(*bounds, 3))
                .unwrap();
        }
        registry
    }

    fn find(registry: &Registry, from: &str, direction: Direction) -> Option<String> {
        let current = registry.zone(from).unwrap();
        find_adjacent_zone(registry, current, direction).map(|zone| zone.id().to_string())
    }

    #[test]
    fn jumps_to_zone_directly_below() {
        let registry = layout(&[
            ("a", "main", Some(Bounds::new(0.0, 100.0, 50.0, 0.0))),
            ("b", "main", Some(Bounds::new(60.0, 100.0, 110.0, 0.0))),
        ]);
        assert_eq!(find(&registry, "a", Direction::Down), Some("b".to_string()));
        assert_eq!(find(&registry, "b", Direction::Up), Some("a".to_string()));
        assert_eq!(find(&registry, "a", Direction::Up), None);
        assert_eq!(find(&registry, "a", Direction::Right), None);
    }

    #[test]
    fn picks_nearest_candidate() {
        let registry = layout(&[
            ("origin", "main", Some(Bounds::new(0.0, 50.0, 50.0, 0.0))),
            ("far", "main", Some(Bounds::new(0.0, 300.0, 50.0, 200.0))),
            ("near", "main", Some(Bounds::new(10.0, 150.0, 40.0, 100.0))),
        ]);
        assert_eq!(
            find(&registry, "origin", Direction::Right),
            Some("near".to_string())
        );
    }

    #[test]
    fn ties_go_to_first_registered() {
        let registry = layout(&[
            ("origin", "main", Some(Bounds::new(0.0, 200.0, 50.0, 0.0))),
            ("left_half", "main", Some(Bounds::new(60.0, 100.0, 100.0, 0.0))),
            ("right_half", "main", Some(Bounds::new(60.0, 200.0, 100.0, 100.0))),
        ]);
        assert_eq!(
            find(&registry, "origin", Direction::Down),
            Some("left_half".to_string())
        );
    }

    #[test]
    fn ignores_other_regions_unmeasured_and_misaligned_zones() {
        let registry = layout(&[
            ("origin", "main", Some(Bounds::new(0.0, 100.0, 50.0, 0.0))),
            ("other_region", "side", Some(Bounds::new(60.0, 100.0, 110.0, 0.0))),
            ("unmeasured", "main", None),
            ("offset", "main", Some(Bounds::new(60.0, 300.0, 110.0, 100.0))),
        ]);
        assert_eq!(find(&registry, "origin", Direction::Down), None);
    }

    #[test]
    fn unmeasured_origin_has_no_neighbours() {
        let registry = layout(&[
            ("origin", "main", None),
            ("b", "main", Some(Bounds::new(60.0, 100.0, 110.0, 0.0))),
        ]);
        assert_eq!(find(&registry, "origin", Direction::Down), None);
    }
}
