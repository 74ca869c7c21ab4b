//! 表格文字報表

use rust_decimal::Decimal;
use std::fmt;

use crate::{Instance, Solution};

const HEADERS: [&str; 6] = [
    "Period",
    "Demand",
    "Batch Size",
    "Inventory",
    "Setup Cost",
    "Holding Cost",
];

fn write_header(
    f: &mut fmt::Formatter<'_>,
    periods: usize,
    setup: Decimal,
    holding: Decimal,
) -> fmt::Result {
    writeln!(
        f,
        "Periods: {}, Setup Cost: {}, Holding Cost: {}",
        periods, setup, holding
    )?;
    writeln!(
        f,
        "{:>10} {:>10} {:>10} {:>10} {:>15} {:>15}",
        HEADERS[0], HEADERS[1], HEADERS[2], HEADERS[3], HEADERS[4], HEADERS[5]
    )
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// 超出數值範圍的成本以 `overflow` 顯示
fn checked_money(value: Option<Decimal>) -> String {
    value.map_or_else(|| "overflow".to_string(), money)
}

/// 問題實例報表
pub struct InstanceReport<'a> {
    instance: &'a Instance,
}

impl<'a> InstanceReport<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }
}

impl fmt::Display for InstanceReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instance = self.instance;
        writeln!(f, "Instance data:")?;
        write_header(
            f,
            instance.periods(),
            instance.setup_cost(),
            instance.holding_cost(),
        )?;
        for (period, demand) in instance.demand().iter().enumerate() {
            writeln!(
                f,
                "{:>10} {:>10} {:>10} {:>10} {:>15} {:>15}",
                period + 1,
                demand,
                "-",
                "-",
                "-",
                "-"
            )?;
        }
        Ok(())
    }
}

/// 批量排程解報表
pub struct SolutionReport<'a> {
    solution: &'a Solution,
}

impl<'a> SolutionReport<'a> {
    pub fn new(solution: &'a Solution) -> Self {
        Self { solution }
    }
}

impl fmt::Display for SolutionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solution = self.solution;
        writeln!(f, "Solution data:")?;
        write_header(
            f,
            solution.periods(),
            solution.setup_cost(),
            solution.holding_cost(),
        )?;
        for period in 0..solution.periods() {
            writeln!(
                f,
                "{:>10} {:>10} {:>10} {:>10} {:>15} {:>15}",
                period + 1,
                solution.demand()[period],
                solution.batch_sizes()[period],
                solution.inventory_levels()[period],
                money(solution.period_setup_cost(period)),
                checked_money(solution.period_holding_cost(period)),
            )?;
        }
        write!(
            f,
            "Total Cost: {}",
            checked_money(solution.calculate_total_costs().ok())
        )
    }
}
