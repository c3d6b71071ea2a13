//! Unit tests for bd-metrics.

use chrono::NaiveDate;

use bd_core::{DispatchConfig, FarmId, FarmRegistry, GeoPoint, Plant, PlantId, PlantRegistry};
use bd_dispatch::{DeliveryEvent, DemandTable, Scenario, Solution};
use bd_index::{DistanceIndex, RainLockIndex};

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

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).unwrap()
}

fn plant(output: f64, max: f64) -> Plant {
    Plant {
        name:              "STP_A".into(),
        location:          GeoPoint::new(10.0, 76.0),
        daily_output_tons: output,
        storage_max_tons:  max,
    }
}

fn two_farms() -> FarmRegistry {
    let mut f = FarmRegistry::new();
    f.push("F_1000", GeoPoint::new(10.0, 76.1), "z0").unwrap();
    f.push("F_1001", GeoPoint::new(10.1, 76.1), "z0").unwrap();
    f
}

/// One plant, two farms, hand-set distances of 25 km and 40 km.
fn scenario(output: f64, max: f64, demand: DemandTable) -> Scenario {
    let plants = PlantRegistry::from_plants([plant(output, max)]).unwrap();
    let farms = two_farms();
    let mut distances = DistanceIndex::sparse(1, 2);
    distances.insert(PlantId(0), FarmId(0), 25.0).unwrap();
    distances.insert(PlantId(0), FarmId(1), 40.0).unwrap();
    Scenario::from_parts(config(), plants, farms, distances, RainLockIndex::unlocked(1), demand).unwrap()
}

fn event(date: NaiveDate, farm: u32, tons: f64) -> DeliveryEvent {
    DeliveryEvent { date, plant: PlantId(0), farm: FarmId(farm), tons }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ── Reconciler ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod reconciler_tests {
    use super::*;
    use crate::{MetricsError, MetricsReconciler};

    fn demand_on(day: NaiveDate, kg: [f64; 2]) -> DemandTable {
        let mut t = DemandTable::new(2);
        t.insert_day(day, kg.to_vec()).unwrap();
        t
    }

    #[test]
    fn same_day_trucks_are_scored_together() {
        // Two 10 t trucks to a farm wanting 300 kg: 500 kg N in one lump,
        // 300 useful, 500 − 330 = 170 leached.
        let s = scenario(0.0, 100.0, demand_on(date(1, 2), [300.0, 0.0]));
        let log = Solution::from_events(vec![event(date(1, 2), 0, 10.0), event(date(1, 2), 0, 10.0)]);
        let board = MetricsReconciler::new(&s).initial_inventory(vec![20.0]).reconcile(&log).unwrap();

        assert!(close(board.gains.synthetic_fertilizer_offset, 1_500.0));
        assert!(close(board.gains.soil_carbon_sequestration, 4_000.0));
        assert!(close(board.penalties.nitrogen_leaching, 1_700.0));
        assert!(close(board.penalties.transport_emissions, 2.0 * 25.0 * 0.9));
        assert_eq!(board.penalties.stp_overflow, 0.0);
    }

    #[test]
    fn delivery_without_demand_is_pure_leaching() {
        let s = scenario(0.0, 100.0, DemandTable::new(2));
        let log = Solution::from_events(vec![event(date(3, 1), 1, 4.0)]);
        let board = MetricsReconciler::new(&s).initial_inventory(vec![4.0]).reconcile(&log).unwrap();
        assert_eq!(board.gains.synthetic_fertilizer_offset, 0.0);
        assert!(close(board.penalties.nitrogen_leaching, 100.0 * 10.0));
    }

    #[test]
    fn overflow_is_replayed_from_an_empty_store() {
        // 30 t/day into 50 t: 10 t dumped on day 2, 30 t every day after.
        let s = scenario(30.0, 50.0, DemandTable::new(2));
        let board = MetricsReconciler::new(&s).reconcile(&Solution::new()).unwrap();
        let dumped = 10.0 + 363.0 * 30.0;
        assert_eq!(board.penalties.stp_overflow, dumped * 1_000.0);
        assert_eq!(board.scoreboard.net_carbon_credit_score, -dumped * 1_000.0);
    }

    #[test]
    fn deliveries_relieve_overflow() {
        let s = scenario(30.0, 50.0, DemandTable::new(2));
        let log = Solution::from_events(
            bd_core::SimYear::new(2025)
                .unwrap()
                .days()
                .flat_map(|d| [event(d, 0, 10.0), event(d, 1, 10.0), event(d, 1, 10.0)])
                .collect(),
        );
        let board = MetricsReconciler::new(&s).reconcile(&log).unwrap();
        assert_eq!(board.penalties.stp_overflow, 0.0);
    }

    #[test]
    fn headline_ratios() {
        let mut demand = DemandTable::new(2);
        demand.insert_day(date(1, 5), vec![1_000.0, 0.0]).unwrap();
        demand.insert_day(date(7, 1), vec![0.0, 1_000.0]).unwrap();
        let s = scenario(0.0, 100.0, demand);

        let log = Solution::from_events(vec![event(date(1, 5), 0, 10.0), event(date(7, 1), 1, 10.0)]);
        let board = MetricsReconciler::new(&s).initial_inventory(vec![20.0]).reconcile(&log).unwrap();

        assert_eq!(board.details.total_delivered_tons, 20.0);
        assert_eq!(board.details.total_delivered_n_kg, 500.0);
        assert_eq!(board.details.total_demand_n_kg, 2_000.0);
        assert_eq!(board.details.total_round_trip_km, 130.0);
        assert_eq!(board.scoreboard.nitrogen_precision, 0.25);
        assert!(close(board.scoreboard.logistics_efficiency, 20.0 / 130.0));
        assert_eq!(board.scoreboard.rain_lock_resilience, 0.5);
    }

    #[test]
    fn net_score_is_gains_minus_penalties() {
        let s = scenario(0.0, 100.0, demand_on(date(2, 1), [1_000.0, 0.0]));
        let log = Solution::from_events(vec![event(date(2, 1), 0, 10.0)]);
        let board = MetricsReconciler::new(&s).initial_inventory(vec![10.0]).reconcile(&log).unwrap();
        let expected = board.gains.total() - board.penalties.total();
        assert_eq!(board.scoreboard.net_carbon_credit_score, expected);
        assert!(close(expected, 1_250.0 + 2_000.0 - 22.5));
    }

    #[test]
    fn empty_log_has_zero_ratios() {
        let s = scenario(0.0, 100.0, DemandTable::new(2));
        let board = MetricsReconciler::new(&s).reconcile(&Solution::new()).unwrap();
        assert_eq!(board.scoreboard.nitrogen_precision, 0.0);
        assert_eq!(board.scoreboard.logistics_efficiency, 0.0);
        assert_eq!(board.scoreboard.rain_lock_resilience, 0.0);
        assert_eq!(board.scoreboard.net_carbon_credit_score, 0.0);
    }

    #[test]
    fn missing_distance_counts_as_zero() {
        let plants = PlantRegistry::from_plants([plant(0.0, 100.0)]).unwrap();
        let s = Scenario::from_parts(
            config(),
            plants,
            two_farms(),
            DistanceIndex::sparse(1, 2),
            RainLockIndex::unlocked(1),
            DemandTable::new(2),
        )
        .unwrap();
        let log = Solution::from_events(vec![event(date(1, 1), 0, 5.0)]);
        let board = MetricsReconciler::new(&s).initial_inventory(vec![5.0]).reconcile(&log).unwrap();
        assert_eq!(board.penalties.transport_emissions, 0.0);
        assert_eq!(board.details.total_round_trip_km, 0.0);
        assert_eq!(board.scoreboard.logistics_efficiency, 0.0);
    }

    #[test]
    fn out_of_year_events_only_count_in_totals() {
        let s = scenario(0.0, 100.0, DemandTable::new(2));
        let stray = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let log = Solution::from_events(vec![event(stray, 0, 10.0)]);
        let board = MetricsReconciler::new(&s).reconcile(&log).unwrap();
        assert_eq!(board.details.total_delivered_tons, 10.0);
        assert_eq!(board.details.total_round_trip_km, 50.0);
        assert_eq!(board.penalties.transport_emissions, 0.0);
        assert_eq!(board.gains.soil_carbon_sequestration, 0.0);
    }

    #[test]
    fn unknown_ids_are_errors() {
        let s = scenario(0.0, 100.0, DemandTable::new(2));
        let bad_farm = Solution::from_events(vec![event(date(1, 1), 7, 1.0)]);
        assert!(matches!(
            MetricsReconciler::new(&s).reconcile(&bad_farm),
            Err(MetricsError::UnknownFarm { farm: FarmId(7), .. })
        ));
        let bad_plant = Solution::from_events(vec![DeliveryEvent {
            date:  date(1, 1),
            plant: PlantId(3),
            farm:  FarmId(0),
            tons:  1.0,
        }]);
        assert!(matches!(
            MetricsReconciler::new(&s).reconcile(&bad_plant),
            Err(MetricsError::UnknownPlant { plant: PlantId(3), .. })
        ));
    }

    #[test]
    fn inventory_length_is_checked() {
        let s = scenario(0.0, 100.0, DemandTable::new(2));
        let result = MetricsReconciler::new(&s).initial_inventory(vec![1.0, 2.0]).reconcile(&Solution::new());
        assert!(matches!(result, Err(MetricsError::InventoryLength { expected: 1, got: 2 })));
    }
}

// ── Agreement with the engine ─────────────────────────────────────────────────

#[cfg(test)]
mod engine_agreement_tests {
    use bd_core::SimYear;
    use bd_dispatch::{EngineBuilder, NoopObserver};

    use super::*;
    use crate::{CheckedFigure, MetricsReconciler, cross_check};

    fn busy_scenario() -> Scenario {
        let plants = PlantRegistry::from_plants([
            Plant { name: "STP_A".into(), location: GeoPoint::new(10.0, 76.0), daily_output_tons: 18.0, storage_max_tons: 40.0 },
            Plant { name: "STP_B".into(), location: GeoPoint::new(10.4, 76.3), daily_output_tons: 9.0, storage_max_tons: 20.0 },
        ])
        .unwrap();
        let mut farms = FarmRegistry::new();
        for i in 0..4 {
            farms
                .push(&format!("F_{}", 1000 + i), GeoPoint::new(10.0 + 0.1 * i as f64, 76.1), "z0")
                .unwrap();
        }
        let distances = DistanceIndex::build(&plants, &farms);
        let mut demand = DemandTable::new(4);
        for (d, day) in SimYear::new(2025).unwrap().days().enumerate() {
            let kg = if d % 3 == 0 { 0.0 } else { 180.0 };
            demand.insert_day(day, vec![kg, kg * 0.5, kg * 2.0, 40.0]).unwrap();
        }
        Scenario::from_parts(config(), plants, farms, distances, RainLockIndex::unlocked(1), demand).unwrap()
    }

    #[test]
    fn reconciler_agrees_with_engine_on_shared_figures() {
        let s = busy_scenario();
        let run = EngineBuilder::new(&s).build().unwrap().run(&mut NoopObserver);
        let board = MetricsReconciler::new(&s).reconcile(&run.solution).unwrap();

        assert!(cross_check(&board, &run.totals, 1e-9).is_empty());
        assert!(close(board.details.total_round_trip_km, 2.0 * run.totals.one_way_km));
    }

    #[test]
    fn opening_inventory_is_honoured_on_both_sides() {
        let s = busy_scenario();
        let opening = vec![55.0, 5.0];
        let run = EngineBuilder::new(&s)
            .initial_inventory(opening.clone())
            .build()
            .unwrap()
            .run(&mut NoopObserver);
        let board = MetricsReconciler::new(&s).initial_inventory(opening).reconcile(&run.solution).unwrap();
        assert!(cross_check(&board, &run.totals, 1e-9).is_empty());
    }

    #[test]
    fn tampered_totals_are_reported() {
        let s = busy_scenario();
        let run = EngineBuilder::new(&s).build().unwrap().run(&mut NoopObserver);
        let board = MetricsReconciler::new(&s).reconcile(&run.solution).unwrap();

        let mut totals = run.totals.clone();
        totals.delivered_tons += 50.0;
        let found = cross_check(&board, &totals, 1e-9);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].figure, CheckedFigure::DeliveredTons);
        assert!(close(found[0].delta(), -50.0));
    }
}

// ── Scoreboard ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scoreboard_tests {
    use crate::{Details, Gains, KeyMetrics, Penalties, Scoreboard};

    fn board() -> Scoreboard {
        Scoreboard {
            scoreboard: KeyMetrics {
                net_carbon_credit_score: 1_234.5678,
                nitrogen_precision:      0.123_456,
                logistics_efficiency:    2.000_04,
                rain_lock_resilience:    0.333_333,
            },
            details: Details {
                total_delivered_tons: 12.345_678,
                ..Details::default()
            },
            gains:     Gains::default(),
            penalties: Penalties::default(),
        }
    }

    #[test]
    fn rounding_touches_only_the_headline() {
        let r = board().rounded();
        assert_eq!(r.scoreboard.net_carbon_credit_score, 1_234.57);
        assert_eq!(r.scoreboard.nitrogen_precision, 0.1235);
        assert_eq!(r.scoreboard.logistics_efficiency, 2.0);
        assert_eq!(r.scoreboard.rain_lock_resilience, 0.3333);
        assert_eq!(r.details.total_delivered_tons, 12.345_678);
    }

    #[test]
    fn serializes_to_report_shape() {
        let json = serde_json::to_value(board()).unwrap();
        for key in ["net_carbon_credit_score", "nitrogen_precision", "logistics_efficiency", "rain_lock_resilience"] {
            assert!(json["scoreboard"].get(key).is_some(), "missing scoreboard.{key}");
        }
        for key in ["total_delivered_tons", "total_demand_n_kg", "total_delivered_n_kg", "total_round_trip_km"] {
            assert!(json["details"].get(key).is_some(), "missing details.{key}");
        }
        assert!(json["gains"].get("synthetic_fertilizer_offset").is_some());
        assert!(json["gains"].get("soil_carbon_sequestration").is_some());
        assert!(json["penalties"].get("transport_emissions").is_some());
        assert!(json["penalties"].get("nitrogen_leaching").is_some());
        assert!(json["penalties"].get("stp_overflow").is_some());
    }
}

// ── Supply balance ────────────────────────────────────────────────────────────

#[cfg(test)]
mod supply_tests {
    use super::*;
    use crate::SupplyBalance;

    fn plants() -> PlantRegistry {
        let mut a = plant(10.0, 50.0);
        let mut b = plant(5.0, 50.0);
        a.name = "STP_A".into();
        b.name = "STP_B".into();
        PlantRegistry::from_plants([a, b]).unwrap()
    }

    #[test]
    fn surplus_means_unavoidable_leaching() {
        let mut demand = DemandTable::new(2);
        demand.insert_day(date(1, 1), vec![600.0, 400.0]).unwrap();
        let balance = SupplyBalance::compute(&plants(), &demand, &config()).unwrap();
        assert_eq!(balance.days, 365);
        assert_eq!(balance.annual_supply_tons, 15.0 * 365.0);
        assert_eq!(balance.annual_supply_n_kg, 15.0 * 365.0 * 25.0);
        assert_eq!(balance.annual_demand_n_kg, 1_000.0);
        assert!(balance.leaching_unavoidable());
        assert!(balance.to_string().contains("leaching is unavoidable"));
    }

    #[test]
    fn demand_can_cover_supply() {
        let mut demand = DemandTable::new(2);
        demand.insert_day(date(1, 1), vec![1.0e6, 0.0]).unwrap();
        let balance = SupplyBalance::compute(&plants(), &demand, &config()).unwrap();
        assert!(!balance.leaching_unavoidable());
        assert!(balance.balance_n_kg() > 0.0);
    }

    #[test]
    fn leap_years_have_an_extra_day() {
        let leap = DispatchConfig { year: 2024, ..config() };
        let balance = SupplyBalance::compute(&plants(), &DemandTable::new(2), &leap).unwrap();
        assert_eq!(balance.days, 366);
    }
}
