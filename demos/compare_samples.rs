//! 內建範例比較示例
//!
//! 對四個內建範例分別執行 Silver-Meal 啟發式與 MIP 精確求解，列出成本差距

use lot_calc::SilverMealSolver;
use lot_core::*;
use lot_optimizer::ExactSolver;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("===== Silver-Meal vs. Exact =====\n");
    println!(
        "{:>6} {:>8} {:>14} {:>14} {:>10}",
        "Sample", "Periods", "Heuristic", "Exact", "Gap %"
    );

    for (index, instance) in sample_instances().iter().enumerate() {
        let mut heuristic = SilverMealSolver::new(instance);
        heuristic.run()?;
        let mut exact = ExactSolver::new(instance);
        exact.run()?;

        let heuristic_cost = heuristic.total_costs()?;
        let exact_cost = exact.total_costs()?;
        let gap = if exact_cost.is_zero() {
            rust_decimal::Decimal::ZERO
        } else {
            (heuristic_cost - exact_cost) / exact_cost * rust_decimal::Decimal::ONE_HUNDRED
        };

        println!(
            "{:>6} {:>8} {:>14.2} {:>14.2} {:>10.2}",
            index,
            instance.periods(),
            heuristic_cost.round_dp(2),
            exact_cost.round_dp(2),
            gap.round_dp(2)
        );
    }

    Ok(())
}
