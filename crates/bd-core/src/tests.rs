//! Unit tests for bd-core primitives.

#[cfg(test)]
mod ids {
    use crate::{FarmId, PlantId, ZoneId};

    #[test]
    fn index_roundtrip() {
        let id = PlantId(7);
        assert_eq!(id.index(), 7);
        assert_eq!(PlantId::from_index(7).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(PlantId::INVALID.0, u32::MAX);
        assert_eq!(FarmId::INVALID.0, u32::MAX);
        assert_eq!(ZoneId::INVALID.0, u16::MAX);
        assert!(!FarmId::INVALID.is_valid());
        assert!(FarmId(0).is_valid());
    }

    #[test]
    fn zone_id_rejects_overflow() {
        assert!(ZoneId::from_index(70_000).is_err());
        // The sentinel itself is never handed out.
        assert!(ZoneId::from_index(u16::MAX as usize).is_err());
        assert_eq!(ZoneId::from_index(u16::MAX as usize - 1).unwrap().0, u16::MAX - 1);
    }

    #[test]
    fn display() {
        assert_eq!(FarmId(3).to_string(), "F3");
        assert_eq!(PlantId::INVALID.to_string(), "P?");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(10.0, 76.3);
        assert!(p.distance_km(p) < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = GeoPoint::new(10.0, 76.0);
        let b = GeoPoint::new(11.0, 76.0);
        let d = a.distance_km(b);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(8.5, 76.9);
        let b = GeoPoint::new(11.25, 75.78);
        assert!((a.distance_km(b) - b.distance_km(a)).abs() < 1e-9);
    }

    #[test]
    fn non_finite_detected() {
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_finite());
        assert!(GeoPoint::new(0.0, 0.0).is_finite());
    }
}

#[cfg(test)]
mod calendar {
    use chrono::NaiveDate;

    use crate::{SimYear, is_monsoon};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn common_and_leap_years() {
        assert_eq!(SimYear::new(2025).unwrap().len(), 365);
        assert_eq!(SimYear::new(2024).unwrap().len(), 366);
    }

    #[test]
    fn days_cover_the_year_in_order() {
        let year = SimYear::new(2025).unwrap();
        let days: Vec<_> = year.days().collect();
        assert_eq!(days.len(), 365);
        assert_eq!(days[0], d(2025, 1, 1));
        assert_eq!(days[364], d(2025, 12, 31));
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn day_index() {
        let year = SimYear::new(2025).unwrap();
        assert_eq!(year.day_index(d(2025, 1, 1)), Some(0));
        assert_eq!(year.day_index(d(2025, 2, 1)), Some(31));
        assert_eq!(year.day_index(d(2026, 1, 1)), None);
    }

    #[test]
    fn monsoon_is_june_through_september() {
        assert!(!is_monsoon(d(2025, 5, 31)));
        assert!(is_monsoon(d(2025, 6, 1)));
        assert!(is_monsoon(d(2025, 9, 30)));
        assert!(!is_monsoon(d(2025, 10, 1)));
    }

    #[test]
    fn out_of_range_year_rejected() {
        assert!(SimYear::new(i32::MAX).is_err());
    }
}

#[cfg(test)]
mod config {
    use crate::{DispatchConfig, nitrogen_split};

    fn config() -> DispatchConfig {
        DispatchConfig {
            truck_capacity_tons:         10.0,
            nitrogen_content_kg_per_ton: 25.0,
            synthetic_offset_credit:     5.0,
            sequestration_credit:        0.2,
            transport_emission_per_km:   0.9,
            overflow_penalty_per_ton:    1_000.0,
            leaching_penalty_per_kg_n:   10.0,
            rain_lock_threshold_mm:      30.0,
            rain_lock_window_days:       5,
            year:                        2025,
        }
    }

    #[test]
    fn reference_config_is_valid() {
        config().validate().unwrap();
    }

    #[test]
    fn zero_truck_capacity_rejected() {
        let cfg = DispatchConfig { truck_capacity_tons: 0.0, ..config() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn nan_rate_rejected() {
        let cfg = DispatchConfig { leaching_penalty_per_kg_n: f64::NAN, ..config() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_window_rejected() {
        let cfg = DispatchConfig { rain_lock_window_days: 0, ..config() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unit_helpers() {
        let cfg = config();
        assert_eq!(cfg.package_nitrogen(10.0), 250.0);
        // 0.2 per kg biosolid → 200 per ton.
        assert_eq!(cfg.sequestration_gain(1.0), 200.0);
        assert_eq!(cfg.overflow_penalty(2.0), 2_000.0);
    }

    #[test]
    fn nitrogen_split_applies_buffer() {
        // 250 kg delivered against 100 kg demand: 100 useful, 250 - 110 excess.
        let (useful, excess) = nitrogen_split(250.0, 100.0);
        assert_eq!(useful, 100.0);
        assert!((excess - 140.0).abs() < 1e-9);

        // Within the 10 % buffer nothing leaches.
        let (useful, excess) = nitrogen_split(105.0, 100.0);
        assert_eq!(useful, 100.0);
        assert_eq!(excess, 0.0);
    }
}

#[cfg(test)]
mod registry {
    use crate::{CoreError, FarmRegistry, GeoPoint, Plant, PlantId, PlantRegistry, ZoneId};

    fn plant(name: &str, output: f64, max: f64) -> Plant {
        Plant {
            name:              name.into(),
            location:          GeoPoint::new(10.0, 76.0),
            daily_output_tons: output,
            storage_max_tons:  max,
        }
    }

    #[test]
    fn plants_get_dense_ids() {
        let reg = PlantRegistry::from_plants([plant("A", 1.0, 5.0), plant("B", 2.0, 5.0)]).unwrap();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.lookup("B"), Some(PlantId(1)));
        assert_eq!(reg.total_daily_output(), 3.0);
    }

    #[test]
    fn duplicate_plant_rejected() {
        let err = PlantRegistry::from_plants([plant("A", 1.0, 5.0), plant("A", 2.0, 5.0)]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId { kind: "plant", .. }));
    }

    #[test]
    fn zero_capacity_rejected() {
        assert!(PlantRegistry::from_plants([plant("A", 1.0, 0.0)]).is_err());
    }

    #[test]
    fn negative_output_rejected() {
        assert!(PlantRegistry::from_plants([plant("A", -1.0, 5.0)]).is_err());
    }

    #[test]
    fn zones_interned_in_first_seen_order() {
        let mut reg = FarmRegistry::new();
        let p = GeoPoint::new(10.0, 76.0);
        reg.push("F1", p, "north").unwrap();
        reg.push("F2", p, "south").unwrap();
        let f3 = reg.push("F3", p, "north").unwrap();
        assert_eq!(reg.zone_count(), 2);
        assert_eq!(reg.get(f3).zone, ZoneId(0));
        assert_eq!(reg.zone_id("south"), Some(ZoneId(1)));
        assert_eq!(reg.zone_name(ZoneId(1)), "south");
    }

    #[test]
    fn malformed_farm_coordinates_rejected() {
        let mut reg = FarmRegistry::new();
        assert!(reg.push("F1", GeoPoint::new(f64::INFINITY, 0.0), "z").is_err());
        assert!(reg.is_empty());
    }
}
