//! The `DispatchEngine` and its day loop.

use chrono::NaiveDate;

use bd_core::{FarmId, PlantId, nitrogen_split};

use crate::scoring::{CandidateScore, score_candidate};
use crate::{DeliveryEvent, DemandTracker, DispatchObserver, Scenario, Solution, StorageLedger};

// ── Run records ───────────────────────────────────────────────────────────────

/// What happened on one simulated day.
#[derive(Clone, Debug, PartialEq)]
pub struct DaySummary {
    pub date:             NaiveDate,
    pub valid_farms:      usize,
    pub locked_farms:     usize,
    pub dispatches:       usize,
    pub tons_shipped:     f64,
    pub dumped_tons:      f64,
    pub overflow_penalty: f64,
    /// Total inventory across plants after the overflow clamp.
    pub closing_inventory: f64,
}

impl DaySummary {
    fn new(date: NaiveDate, valid_farms: usize, locked_farms: usize) -> Self {
        Self {
            date,
            valid_farms,
            locked_farms,
            dispatches:        0,
            tons_shipped:      0.0,
            dumped_tons:       0.0,
            overflow_penalty:  0.0,
            closing_inventory: 0.0,
        }
    }
}

/// The engine's own running bookkeeping.
///
/// Gains and leaching here use the engine's sequential residual-demand
/// accounting.  The reconciler's scoreboard aggregates per farm per day
/// instead and is the authoritative figure; the two agree on tonnage,
/// distance and overflow.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineTotals {
    pub days:               usize,
    pub dispatches:         usize,
    pub delivered_tons:     f64,
    pub one_way_km:         f64,
    pub transport_emission: f64,
    pub offset_gain:        f64,
    pub sequestration_gain: f64,
    pub leaching_penalty:   f64,
    pub dumped_tons:        f64,
    pub overflow_penalty:   f64,
}

impl EngineTotals {
    pub fn net_score(&self) -> f64 {
        (self.offset_gain + self.sequestration_gain)
            - (self.transport_emission + self.leaching_penalty + self.overflow_penalty)
    }
}

/// Output of a finished run.
#[derive(Clone, Debug)]
pub struct EngineRun {
    pub solution:        Solution,
    pub totals:          EngineTotals,
    /// Per-plant inventory after the last day.
    pub final_inventory: Vec<f64>,
}

// ── Day-scoped allocation context ─────────────────────────────────────────────

/// Mutable state that lives for exactly one day: the farms open for
/// delivery, the residual demand, and the day's running summary.  Passed by
/// reference through the per-plant subroutine and dropped at day end.
struct DayContext {
    valid_farms: Vec<FarmId>,
    demand:      DemandTracker,
    summary:     DaySummary,
}

// ── DispatchEngine ────────────────────────────────────────────────────────────

/// The day-by-day greedy allocator.
///
/// Each call to [`step`][Self::step] runs one calendar day:
///
/// 1. **Replenish** every plant with its daily output.
/// 2. **Snapshot** the day's demand into a residual tracker.
/// 3. **Filter** farms whose zone is rain-locked.
/// 4. **Rank** plants by `(excess, fill_ratio)`, descending.
/// 5. **Allocate** each plant in that order: score every open farm for one
///    truckload, sort descending, and walk the list once, sending one truck
///    per farm while the plant is urgent or the score is positive.
/// 6. **Clamp** every plant to capacity and charge the dumped tons.
///
/// Days run strictly in calendar order; a run is a pure function of its
/// [`Scenario`] and initial inventory.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct DispatchEngine<'a> {
    pub(crate) scenario: &'a Scenario,
    pub(crate) ledger:   StorageLedger,
    pub(crate) solution: Solution,
    pub(crate) totals:   EngineTotals,
    /// Next day to simulate; `None` once the year is done.
    pub(crate) next_day: Option<NaiveDate>,
}

impl<'a> DispatchEngine<'a> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run every remaining day of the year and return the result.
    pub fn run<O: DispatchObserver>(mut self, observer: &mut O) -> EngineRun {
        while self.step(observer).is_some() {}
        observer.on_run_end(&self.totals);
        tracing::info!(
            year = self.scenario.year().year(),
            dispatches = self.totals.dispatches,
            delivered_tons = self.totals.delivered_tons,
            dumped_tons = self.totals.dumped_tons,
            net_score = self.totals.net_score(),
            "dispatch run complete"
        );
        self.finish()
    }

    /// Run at most `n` days from the current position.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_days<O: DispatchObserver>(&mut self, n: usize, observer: &mut O) -> usize {
        (0..n).take_while(|_| self.step(observer).is_some()).count()
    }

    /// Simulate the next day.  Returns `None` once the year is exhausted.
    pub fn step<O: DispatchObserver>(&mut self, observer: &mut O) -> Option<DaySummary> {
        let date = self.next_day?;
        let summary = self.process_day(date, observer);
        self.next_day = date
            .succ_opt()
            .filter(|d| self.scenario.year().contains(*d));
        Some(summary)
    }

    /// Consume the engine, keeping its log and bookkeeping.
    pub fn finish(self) -> EngineRun {
        EngineRun {
            final_inventory: self.ledger.inventories().to_vec(),
            solution:        self.solution,
            totals:          self.totals,
        }
    }

    pub fn ledger(&self) -> &StorageLedger {
        &self.ledger
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn totals(&self) -> &EngineTotals {
        &self.totals
    }

    /// The day the next [`step`][Self::step] will simulate.
    pub fn next_day(&self) -> Option<NaiveDate> {
        self.next_day
    }

    // ── Core day processing ───────────────────────────────────────────────

    fn process_day<O: DispatchObserver>(&mut self, date: NaiveDate, observer: &mut O) -> DaySummary {
        let scenario = self.scenario;

        // ── Phase 1: replenish ────────────────────────────────────────────
        self.ledger.replenish();

        // ── Phase 2: snapshot demand ──────────────────────────────────────
        let demand = DemandTracker::open(&scenario.demand, date);

        // ── Phase 3: farms outside rain-locked zones ──────────────────────
        let valid_farms: Vec<FarmId> = scenario
            .farms
            .iter()
            .filter(|(_, farm)| !scenario.rain_locks.is_locked(date, farm.zone))
            .map(|(id, _)| id)
            .collect();

        let mut ctx = DayContext {
            summary: DaySummary::new(
                date,
                valid_farms.len(),
                scenario.farms.len() - valid_farms.len(),
            ),
            valid_farms,
            demand,
        };
        observer.on_day_start(date, ctx.valid_farms.len());

        // ── Phase 4: urgency ranking ──────────────────────────────────────
        //
        // Stable sort, so plants with equal keys keep registry order.
        let mut ranked: Vec<(PlantId, f64, f64)> = scenario
            .plants
            .ids()
            .map(|p| (p, self.ledger.excess(p), self.ledger.fill_ratio(p)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(b.2.total_cmp(&a.2)));

        // ── Phase 5: per-plant allocation ─────────────────────────────────
        for (plant, _, _) in ranked {
            self.dispatch_plant(&mut ctx, plant, observer);
        }

        // ── Phase 6: overflow clamp ───────────────────────────────────────
        for (plant, dumped) in self.ledger.clamp_overflow() {
            let penalty = scenario.config.overflow_penalty(dumped);
            ctx.summary.dumped_tons += dumped;
            ctx.summary.overflow_penalty += penalty;
            self.totals.dumped_tons += dumped;
            self.totals.overflow_penalty += penalty;
            tracing::debug!(%date, %plant, dumped_tons = dumped, "storage overflow");
            observer.on_overflow(date, plant, dumped);
        }

        self.totals.days += 1;
        ctx.summary.closing_inventory = self.ledger.total_inventory();
        tracing::trace!(
            %date,
            dispatches = ctx.summary.dispatches,
            tons = ctx.summary.tons_shipped,
            locked_farms = ctx.summary.locked_farms,
            "day complete"
        );
        observer.on_day_end(&ctx.summary, &self.ledger);
        ctx.summary
    }

    /// Score, sort and walk the candidate farms for one plant.
    fn dispatch_plant<O: DispatchObserver>(
        &mut self,
        ctx:      &mut DayContext,
        plant:    PlantId,
        observer: &mut O,
    ) {
        let scenario = self.scenario;
        let config = &scenario.config;
        let start_inventory = self.ledger.inventory(plant);
        if start_inventory <= 0.0 {
            return;
        }

        // One truckload, scored against the residual demand as it stands
        // before this plant ships anything.
        let package_tons = config.truck_capacity_tons.min(start_inventory);
        let mut candidates: Vec<CandidateScore> = ctx
            .valid_farms
            .iter()
            .filter_map(|&farm| {
                let km = scenario.distances.get(plant, farm)?;
                Some(score_candidate(config, farm, km, package_tons, ctx.demand.residual(farm)))
            })
            .collect();
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

        // Single pass: one truck per candidate, no re-scoring as inventory
        // and demand shrink.
        for candidate in &candidates {
            let inventory = self.ledger.inventory(plant);
            if inventory <= 0.0 {
                break;
            }
            let urgent = self.ledger.is_overflowing(plant);
            if !urgent && candidate.score <= 0.0 {
                break;
            }

            let ship = self.ledger.withdraw(plant, config.truck_capacity_tons.min(inventory));
            let farm = candidate.farm;
            let shipped_n = config.package_nitrogen(ship);
            let (useful_n, excess_n) = nitrogen_split(shipped_n, ctx.demand.residual(farm));
            ctx.demand.consume(farm, shipped_n);

            let event = DeliveryEvent { date: ctx.demand.date(), plant, farm, tons: ship };
            self.solution.push(event);

            self.totals.dispatches += 1;
            self.totals.delivered_tons += ship;
            self.totals.one_way_km += candidate.distance_km;
            self.totals.transport_emission += candidate.transport_cost;
            self.totals.offset_gain += config.offset_gain(useful_n);
            self.totals.sequestration_gain += config.sequestration_gain(ship);
            self.totals.leaching_penalty += config.leaching_penalty(excess_n);

            ctx.summary.dispatches += 1;
            ctx.summary.tons_shipped += ship;

            tracing::trace!(
                date = %event.date,
                %plant,
                %farm,
                tons = ship,
                score = candidate.score,
                urgent,
                "dispatch"
            );
            observer.on_dispatch(&event, candidate);
        }
    }
}
