use crate::registry::{Zone, ZoneKind};

use super::Direction;

/// New index after moving `direction` inside `zone`, or `None` at a boundary.
///
/// Lists only react to their own axis. Grids are laid out row-major with
/// `zone.columns()` items per row; a partial last row blocks `right` past its
/// final item and `down` into empty cells.
pub fn step_within(zone: &Zone, index: usize, direction: Direction) -> Option<usize> {
    let total = zone.item_count();
    if index >= total {
        return None;
    }
    match (zone.kind(), direction) {
        (ZoneKind::Horizontal, Direction::Left) | (ZoneKind::Vertical, Direction::Up) => {
            index.checked_sub(1)
        }
        (ZoneKind::Horizontal, Direction::Right) | (ZoneKind::Vertical, Direction::Down) => {
            (index + 1 < total).then_some(index + 1)
        }
        (ZoneKind::Horizontal, _) | (ZoneKind::Vertical, _) => None,
        (ZoneKind::Grid, direction) => {
            let columns = zone.columns();
            match direction {
                Direction::Left => (index % columns > 0).then(|| index - 1),
                Direction::Right => {
                    (index % columns < columns - 1 && index + 1 < total).then_some(index + 1)
                }
                Direction::Up => index.checked_sub(columns),
                Direction::Down => (index + columns < total).then_some(index + columns),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{RegionConfig, Registry, ZoneConfig, ZoneMeasurement};

    fn zone_with(config: ZoneConfig, items: usize) -> Registry {
        let mut registry = Registry::new();
        registry.insert_region(RegionConfig::new("r", 0)).unwrap();
        let id = config.id.clone();
        registry.insert_zone(config).unwrap();
        registry
            .measure(&id, ZoneMeasurement::with_count(None, items))
            .unwrap();
        registry
    }

    #[test]
    fn horizontal_moves_on_its_axis_only() {
        let registry = zone_with(ZoneConfig::horizontal("row", "r"), 3);
        let zone = registry.zone("row").unwrap();
        assert_eq!(step_within(zone, 0, Direction::Left), None);
        assert_eq!(step_within(zone, 0, Direction::Right), Some(1));
        assert_eq!(step_within(zone, 2, Direction::Right), None);
        assert_eq!(step_within(zone, 1, Direction::Down), None);
    }

    #[test]
    fn vertical_moves_on_its_axis_only() {
        let registry = zone_with(ZoneConfig::vertical("col", "r"), 2);
        let zone = registry.zone("col").unwrap();
        assert_eq!(step_within(zone, 0, Direction::Down), Some(1));
        assert_eq!(step_within(zone, 1, Direction::Down), None);
        assert_eq!(step_within(zone, 1, Direction::Up), Some(0));
        assert_eq!(step_within(zone, 1, Direction::Left), None);
    }

    #[test]
    fn grid_respects_columns_and_partial_rows() {
        // 3 columns, 7 items:
        // 0 1 2
        // 3 4 5
        // 6
        let registry = zone_with(ZoneConfig::grid("tiles", "r", 3), 7);
        let zone = registry.zone("tiles").unwrap();
        assert_eq!(step_within(zone, 2, Direction::Right), None);
        assert_eq!(step_within(zone, 2, Direction::Down), Some(5));
        assert_eq!(step_within(zone, 3, Direction::Left), None);
        assert_eq!(step_within(zone, 4, Direction::Up), Some(1));
        assert_eq!(step_within(zone, 1, Direction::Up), None);
        assert_eq!(step_within(zone, 5, Direction::Down), None);
        assert_eq!(step_within(zone, 3, Direction::Down), Some(6));
        assert_eq!(step_within(zone, 6, Direction::Right), None);
    }

    #[test]
    fn stale_index_past_the_last_item_never_moves() {
        let registry = zone_with(ZoneConfig::horizontal("row", "r"), 2);
        let zone = registry.zone("row").unwrap();
        assert_eq!(step_within(zone, 3, Direction::Left), None);
        assert_eq!(step_within(zone, 2, Direction::Right), None);
    }

    #[test]
    fn empty_zone_never_moves() {
        let registry = zone_with(ZoneConfig::horizontal("row", "r"), 0);
        let zone = registry.zone("row").unwrap();
        for direction in Direction::ALL {
            assert_eq!(step_within(zone, 0, direction), None);
        }
    }
}
