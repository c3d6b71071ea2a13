//! Unit tests for bd-index.

use chrono::NaiveDate;

use bd_core::{FarmRegistry, GeoPoint, Plant, PlantRegistry};

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, n).unwrap()
}

fn plants() -> PlantRegistry {
    PlantRegistry::from_plants([
        Plant {
            name:              "STP_A".into(),
            location:          GeoPoint::new(10.0, 76.0),
            daily_output_tons: 5.0,
            storage_max_tons:  50.0,
        },
        Plant {
            name:              "STP_B".into(),
            location:          GeoPoint::new(9.0, 76.5),
            daily_output_tons: 3.0,
            storage_max_tons:  30.0,
        },
    ])
    .unwrap()
}

fn farms() -> FarmRegistry {
    let mut reg = FarmRegistry::new();
    reg.push("F_1", GeoPoint::new(10.5, 76.0), "north").unwrap();
    reg.push("F_2", GeoPoint::new(9.0, 76.5), "south").unwrap();
    reg.push("F_3", GeoPoint::new(9.1, 76.4), "east").unwrap();
    reg
}

#[cfg(test)]
mod distance_tests {
    use bd_core::{FarmId, PlantId};

    use super::*;
    use crate::DistanceIndex;

    #[test]
    fn full_matrix_from_registries() {
        let p = plants();
        let f = farms();
        let idx = DistanceIndex::build(&p, &f);
        assert_eq!(idx.known_pairs(), 6);

        for (pid, plant) in p.iter() {
            for (fid, farm) in f.iter() {
                let expected = plant.location.distance_km(farm.location);
                assert_eq!(idx.get(pid, fid), Some(expected));
            }
        }
    }

    #[test]
    fn colocated_pair_is_zero() {
        let idx = DistanceIndex::build(&plants(), &farms());
        assert!(idx.get(PlantId(1), FarmId(1)).unwrap() < 1e-9);
    }

    #[test]
    fn half_degree_north_is_about_55_km() {
        let idx = DistanceIndex::build(&plants(), &farms());
        let d = idx.get(PlantId(0), FarmId(0)).unwrap();
        assert!((d - 55.6).abs() < 0.1, "got {d}");
    }

    #[test]
    fn out_of_range_lookup_is_missing() {
        let idx = DistanceIndex::build(&plants(), &farms());
        assert_eq!(idx.get(PlantId(5), FarmId(0)), None);
        assert_eq!(idx.get(PlantId(0), FarmId::INVALID), None);
    }

    #[test]
    fn sparse_insert_and_remove() {
        let mut idx = DistanceIndex::sparse(2, 2);
        assert_eq!(idx.get(PlantId(0), FarmId(1)), None);
        idx.insert(PlantId(0), FarmId(1), 12.5).unwrap();
        assert_eq!(idx.get(PlantId(0), FarmId(1)), Some(12.5));
        idx.remove(PlantId(0), FarmId(1)).unwrap();
        assert_eq!(idx.get(PlantId(0), FarmId(1)), None);
    }

    #[test]
    fn sparse_rejects_bad_values() {
        let mut idx = DistanceIndex::sparse(1, 1);
        assert!(idx.insert(PlantId(0), FarmId(0), -1.0).is_err());
        assert!(idx.insert(PlantId(0), FarmId(0), f64::NAN).is_err());
        assert!(idx.insert(PlantId(1), FarmId(0), 1.0).is_err());
    }
}

#[cfg(test)]
mod rain_tests {
    use bd_core::ZoneId;

    use super::*;
    use crate::{RainLockIndex, RainfallTable};

    /// Zones: north, south.  Five days of rain.
    fn table() -> RainfallTable {
        RainfallTable::new(
            vec!["north".into(), "south".into()],
            vec![
                (day(1), vec![10.0, 0.0]),
                (day(2), vec![10.0, 0.0]),
                (day(3), vec![10.0, 0.0]),
                (day(4), vec![0.0, 20.0]),
                (day(5), vec![5.0, 25.0]),
            ],
        )
        .unwrap()
    }

    const NORTH: ZoneId = ZoneId(0);
    const SOUTH: ZoneId = ZoneId(1);
    const EAST: ZoneId = ZoneId(2);

    #[test]
    fn rows_are_sorted_by_date() {
        let t = RainfallTable::new(
            vec!["z".into()],
            vec![(day(3), vec![1.0]), (day(1), vec![2.0])],
        )
        .unwrap();
        assert_eq!(t.dates(), &[day(1), day(3)]);
        assert_eq!(t.value(0, 0), 2.0);
    }

    #[test]
    fn duplicate_dates_rejected() {
        let err = RainfallTable::new(
            vec!["z".into()],
            vec![(day(1), vec![1.0]), (day(1), vec![2.0])],
        );
        assert!(err.is_err());
    }

    #[test]
    fn ragged_row_rejected() {
        let err = RainfallTable::new(vec!["a".into(), "b".into()], vec![(day(1), vec![1.0])]);
        assert!(err.is_err());
    }

    #[test]
    fn negative_rainfall_rejected() {
        let err = RainfallTable::new(vec!["a".into()], vec![(day(1), vec![-1.0])]);
        assert!(err.is_err());
    }

    #[test]
    fn lock_equals_forward_window_sum_over_threshold() {
        let t = table();
        let f = farms();
        let idx = RainLockIndex::build(&t, &f, 25.0, 3).unwrap();

        // Brute-force check against the definition for every cell.
        for (row, &date) in t.dates().iter().enumerate() {
            for (col, zone) in [(0usize, NORTH), (1, SOUTH)] {
                let end = (row + 3).min(t.len());
                let sum: f64 = (row..end).map(|r| t.value(r, col)).sum();
                assert_eq!(idx.is_locked(date, zone), sum > 25.0, "{date} {zone}");
                assert_eq!(idx.forward_mm(date, zone), Some(sum));
            }
        }
    }

    #[test]
    fn window_includes_current_day() {
        let idx = RainLockIndex::build(&table(), &farms(), 25.0, 3).unwrap();
        // north day 1: 10 + 10 + 10 = 30 > 25.
        assert!(idx.is_locked(day(1), NORTH));
        // north day 2: 10 + 10 + 0 = 20.
        assert!(!idx.is_locked(day(2), NORTH));
    }

    #[test]
    fn truncated_window_at_table_end() {
        let idx = RainLockIndex::build(&table(), &farms(), 24.0, 3).unwrap();
        // south day 5: only one row remains → 25 > 24.
        assert_eq!(idx.forward_mm(day(5), SOUTH), Some(25.0));
        assert!(idx.is_locked(day(5), SOUTH));
        // south day 4: 20 + 25 = 45.
        assert!(idx.is_locked(day(4), SOUTH));
    }

    #[test]
    fn threshold_is_strict() {
        let idx = RainLockIndex::build(&table(), &farms(), 30.0, 3).unwrap();
        assert!(!idx.is_locked(day(1), NORTH));
    }

    #[test]
    fn zone_without_column_never_locked() {
        let idx = RainLockIndex::build(&table(), &farms(), 0.0, 5).unwrap();
        assert!(!idx.is_locked(day(1), EAST));
        assert_eq!(idx.forward_mm(day(1), EAST), None);
    }

    #[test]
    fn unknown_date_never_locked() {
        let idx = RainLockIndex::build(&table(), &farms(), 0.0, 5).unwrap();
        assert!(!idx.is_locked(day(20), NORTH));
    }

    #[test]
    fn locked_zones_lists_ascending() {
        let idx = RainLockIndex::build(&table(), &farms(), 1.0, 1).unwrap();
        assert_eq!(idx.locked_zones(day(5)), vec![NORTH, SOUTH]);
        assert_eq!(idx.locked_zones(day(4)), vec![SOUTH]);
    }

    #[test]
    fn zero_window_rejected() {
        assert!(RainLockIndex::build(&table(), &farms(), 1.0, 0).is_err());
    }

    #[test]
    fn unlocked_index_locks_nothing() {
        let idx = RainLockIndex::unlocked(3);
        assert!(!idx.is_locked(day(1), NORTH));
        assert!(idx.locked_zones(day(1)).is_empty());
    }
}
