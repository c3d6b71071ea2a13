//! Annual supply against annual demand.
//!
//! A quick feasibility read before any dispatching: if the plants produce
//! more nitrogen in a year than the farms can take, some leaching is
//! unavoidable whatever the schedule.

use std::fmt;

use bd_core::{DispatchConfig, PlantRegistry};
use bd_dispatch::DemandTable;

use crate::MetricsResult;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SupplyBalance {
    pub days:               usize,
    pub annual_supply_tons: f64,
    pub annual_supply_n_kg: f64,
    pub annual_demand_n_kg: f64,
}

impl SupplyBalance {
    /// Output over every day of the configured year against the whole
    /// demand table.
    pub fn compute(plants: &PlantRegistry, demand: &DemandTable, config: &DispatchConfig) -> MetricsResult<Self> {
        let days = config.sim_year()?.len();
        let annual_supply_tons = plants.total_daily_output() * days as f64;
        Ok(Self {
            days,
            annual_supply_tons,
            annual_supply_n_kg: config.package_nitrogen(annual_supply_tons),
            annual_demand_n_kg: demand.annual_total(),
        })
    }

    /// Demand minus supply, kg N.  Negative means surplus nitrogen.
    pub fn balance_n_kg(&self) -> f64 {
        self.annual_demand_n_kg - self.annual_supply_n_kg
    }

    pub fn leaching_unavoidable(&self) -> bool {
        self.balance_n_kg() < 0.0
    }
}

impl fmt::Display for SupplyBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "annual biosolid supply: {:.0} t over {} days", self.annual_supply_tons, self.days)?;
        writeln!(f, "annual nitrogen supply: {:.0} kg N", self.annual_supply_n_kg)?;
        writeln!(f, "annual nitrogen demand: {:.0} kg N", self.annual_demand_n_kg)?;
        write!(f, "net balance (demand - supply): {:.0} kg N", self.balance_n_kg())?;
        if self.leaching_unavoidable() {
            write!(f, "; supply exceeds demand, leaching is unavoidable")
        } else {
            write!(f, "; demand covers supply")
        }
    }
}
