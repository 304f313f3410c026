//! "Best of" scans used by the planners
//!
//! All scans keep the first candidate found among equals: a later item
//! replaces the current pick only when it is strictly better. Empty input
//! yields `None`. Inputs are never reordered; random policies return a new
//! ordering instead of shuffling in place.

use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

use crate::core::types::Location;
use crate::world::fleet::AiFleet;
use crate::world::research::ResearchType;
use crate::world::snapshot::ExplorationMap;

/// Item with the strictly highest key; first wins ties
pub fn max_by_strict<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Option<T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut best: Option<(T, K)> = None;
    for item in items {
        let k = key(&item);
        let replace = match &best {
            None => true,
            Some((_, best_key)) => k > *best_key,
        };
        if replace {
            best = Some((item, k));
        }
    }
    best.map(|(item, _)| item)
}

/// Item with the strictly lowest key; first wins ties
pub fn min_by_strict<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Option<T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut best: Option<(T, K)> = None;
    for item in items {
        let k = key(&item);
        let replace = match &best {
            None => true,
            Some((_, best_key)) => k < *best_key,
        };
        if replace {
            best = Some((item, k));
        }
    }
    best.map(|(item, _)| item)
}

/// Fastest fleet that is not moving and has at least `min_radar` range
pub fn fastest_idle_fleet(fleets: &[AiFleet], min_radar: i32) -> Option<&AiFleet> {
    max_by_strict(fleets.iter().filter(|f| f.can_explore(min_radar)), |f| f.speed)
}

/// Unexplored cell whose center is nearest to the point
pub fn nearest_cell(x: f64, y: f64, map: &ExplorationMap) -> Option<Location> {
    min_by_strict(map.iter().copied(), |cell| {
        let (cx, cy) = cell.cell_center(map.cell_size);
        (x - cx).hypot(y - cy)
    })
}

/// Cheapest item passing the capability filter
pub fn cheapest<'a>(
    items: impl IntoIterator<Item = &'a Arc<ResearchType>>,
    capable: impl Fn(&ResearchType) -> bool,
) -> Option<&'a Arc<ResearchType>> {
    min_by_strict(items.into_iter().filter(|rt| capable(rt)), |rt| rt.production_cost)
}

/// Uniformly random element
pub fn pick_random<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

/// References to the items in a random order; the slice is untouched
pub fn shuffled<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Vec<&'a T> {
    let mut order: Vec<&T> = items.iter().collect();
    order.shuffle(rng);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FleetId;
    use crate::world::research::ResearchCategory;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_max_keeps_first_among_equals() {
        let items = [("a", 3), ("b", 5), ("c", 5), ("d", 1)];
        assert_eq!(max_by_strict(items.iter(), |(_, v)| *v).map(|(n, _)| *n), Some("b"));
    }

    #[test]
    fn test_min_keeps_first_among_equals() {
        let items = [("a", 3), ("b", 1), ("c", 1)];
        assert_eq!(min_by_strict(items.iter(), |(_, v)| *v).map(|(n, _)| *n), Some("b"));
    }

    #[test]
    fn test_empty_input_is_none() {
        let empty: Vec<i32> = Vec::new();
        assert_eq!(max_by_strict(empty.iter(), |v| **v), None);
        assert_eq!(min_by_strict(empty.iter(), |v| **v), None);
        assert!(nearest_cell(0.0, 0.0, &ExplorationMap::new(10)).is_none());
    }

    #[test]
    fn test_fastest_idle_fleet_skips_moving_and_blind() {
        let fleets = vec![
            AiFleet::new(FleetId(1), 0.0, 0.0).with_speed(9).with_radar(1).moving(),
            AiFleet::new(FleetId(2), 0.0, 0.0).with_speed(8).with_radar(0),
            AiFleet::new(FleetId(3), 0.0, 0.0).with_speed(4).with_radar(1),
            AiFleet::new(FleetId(4), 0.0, 0.0).with_speed(6).with_radar(2),
        ];
        assert_eq!(fastest_idle_fleet(&fleets, 1).map(|f| f.id), Some(FleetId(4)));
        assert_eq!(fastest_idle_fleet(&fleets, 3).map(|f| f.id), None);
    }

    #[test]
    fn test_nearest_cell_uses_cell_centers() {
        let map = ExplorationMap::with_cells(10, [Location::of(0, 0), Location::of(2, 3), Location::of(9, 9)]);
        assert_eq!(nearest_cell(25.0, 25.0, &map), Some(Location::of(2, 3)));
        assert_eq!(nearest_cell(4.0, 6.0, &map), Some(Location::of(0, 0)));
    }

    #[test]
    fn test_cheapest_capable() {
        let items = vec![
            Arc::new(ResearchType::new("Big", ResearchCategory::SpaceshipsCruisers, 900)),
            Arc::new(ResearchType::new("Cheap", ResearchCategory::SpaceshipsCruisers, 100)),
            Arc::new(ResearchType::new("AlsoCheap", ResearchCategory::SpaceshipsCruisers, 100)),
            Arc::new(ResearchType::new("Gun", ResearchCategory::EquipmentWeapons, 10)),
        ];
        let pick = cheapest(items.iter(), |rt| rt.is_cruiser());
        assert_eq!(pick.map(|rt| rt.id.as_str()), Some("Cheap"));
    }

    #[test]
    fn test_shuffled_leaves_input_untouched() {
        let items: Vec<u32> = (0..20).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let order = shuffled(&items, &mut rng);

        assert_eq!(items, (0..20).collect::<Vec<_>>());
        let mut sorted: Vec<u32> = order.into_iter().copied().collect();
        sorted.sort_unstable();
        assert_eq!(sorted, items);
    }

    #[test]
    fn test_random_pick_is_seed_stable() {
        let items = ["a", "b", "c", "d"];
        let first = pick_random(&items, &mut ChaCha8Rng::seed_from_u64(99));
        let second = pick_random(&items, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(first, second);
        assert!(pick_random::<u8, _>(&[], &mut ChaCha8Rng::seed_from_u64(1)).is_none());
    }
}
