//! 混合整數規劃精確求解器
//!
//! 模型：
//! - 整數變數 `batch[i] >= 0`、`inventory[i] >= 0`，二元變數 `setup[i]`
//! - 庫存流量 `inventory[i] = inventory[i-1] + batch[i] - demand[i]`（首期前庫存為 0）
//! - 生產指示 `batch[i] <= M * setup[i]`
//! - 目標 `min Σ setup_cost * setup[i] + holding_cost * inventory[i]`

use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, Solution as _, SolverModel, Variable,
};
use lot_core::{ExactSolverParams, Instance, LotSizingError, LotSizingSolver, Solution};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::time::Instant;

/// 模型變數
struct ModelVariables {
    batch_size: Vec<Variable>,
    inventory_level: Vec<Variable>,
    setup: Vec<Variable>,
}

impl ModelVariables {
    fn new(problem: &mut ProblemVariables, periods: usize) -> Self {
        Self {
            batch_size: (0..periods)
                .map(|_| problem.add(variable().integer().min(0)))
                .collect(),
            inventory_level: (0..periods)
                .map(|_| problem.add(variable().integer().min(0)))
                .collect(),
            setup: (0..periods)
                .map(|_| problem.add(variable().binary()))
                .collect(),
        }
    }
}

fn to_f64(value: Decimal, name: &str) -> lot_core::Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| LotSizingError::Solver(format!("{} 無法轉換為浮點數: {}", name, value)))
}

/// 精確求解器
pub struct ExactSolver<'a> {
    instance: &'a Instance,
    solution: Solution,
    params: ExactSolverParams,
}

impl<'a> ExactSolver<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self::with_params(instance, ExactSolverParams::default())
    }

    pub fn with_params(instance: &'a Instance, params: ExactSolverParams) -> Self {
        Self {
            instance,
            solution: Solution::new(instance),
            params,
        }
    }

    pub fn params(&self) -> &ExactSolverParams {
        &self.params
    }

    /// 建立並求解模型，回傳每期批量
    fn optimize(&self) -> lot_core::Result<Vec<u32>> {
        let instance = self.instance;
        let periods = instance.periods();
        let holding_cost = to_f64(instance.holding_cost(), "持有成本")?;
        let setup_cost = to_f64(instance.setup_cost(), "設置成本")?;
        let big_m = self.params.effective_big_m(instance.total_demand()) as f64;

        let mut problem = ProblemVariables::new();
        let vars = ModelVariables::new(&mut problem, periods);

        let mut objective = Expression::default();
        for period in 0..periods {
            objective += setup_cost * vars.setup[period];
            objective += holding_cost * vars.inventory_level[period];
        }

        let mut model = problem.minimise(objective).using(microlp);
        for period in 0..periods {
            let demand = f64::from(instance.demand()[period]);

            let mut flow =
                Expression::from(vars.batch_size[period]) - vars.inventory_level[period];
            if period > 0 {
                flow += vars.inventory_level[period - 1];
            }
            model = model.with(constraint!(flow == demand));

            let batch = vars.batch_size[period];
            let setup = vars.setup[period];
            model = model.with(constraint!(batch <= big_m * setup));
        }

        tracing::debug!("MIP 模型：{} 個變數，big-M = {}", periods * 3, big_m);

        let start_time = Instant::now();
        let solved = model
            .solve()
            .map_err(|e| LotSizingError::Solver(e.to_string()))?;
        let elapsed = start_time.elapsed();

        if let Some(threshold) = self.params.time_warning {
            if elapsed > threshold {
                tracing::warn!("求解耗時 {:?} 超過警告門檻 {:?}", elapsed, threshold);
            }
        }
        tracing::debug!("MIP 求解耗時 {:?}", elapsed);

        vars.batch_size
            .iter()
            .enumerate()
            .map(|(period, &var)| {
                let value = solved.value(var).round();
                value.to_u32().ok_or_else(|| {
                    LotSizingError::Solver(format!("第 {} 期批量非法: {}", period, value))
                })
            })
            .collect()
    }
}

impl LotSizingSolver for ExactSolver<'_> {
    fn name(&self) -> &'static str {
        "exact-mip"
    }

    fn instance(&self) -> &Instance {
        self.instance
    }

    fn solution(&self) -> &Solution {
        &self.solution
    }

    fn run(&mut self) -> lot_core::Result<()> {
        if self.solution.is_finalized() {
            return Err(LotSizingError::AlreadySolved);
        }

        tracing::info!("執行 MIP 精確求解：{} 期", self.instance.periods());

        let batch_sizes = self.optimize()?;
        self.solution.set_schedule(batch_sizes)?;
        self.solution.finalize()?;

        tracing::info!(
            "精確求解完成：設置 {} 次，總成本 {}",
            self.solution.setup_periods().count(),
            self.solution.calculate_total_costs()?
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lot_calc::SilverMealSolver;
    use lot_core::sample_instance;
    use rstest::rstest;
    use std::time::Duration;

    #[rstest]
    #[case(0, Decimal::from(310))]
    #[case(1, Decimal::new(30478, 2))]
    #[case(2, Decimal::new(70164, 2))]
    #[case(3, Decimal::new(765, 1))]
    fn test_samples_optimal(#[case] index: usize, #[case] cost: Decimal) {
        let instance = sample_instance(index).unwrap();
        let mut solver = ExactSolver::new(&instance);

        solver.run().unwrap();

        assert_eq!(solver.total_costs().unwrap(), cost);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    fn test_never_worse_than_heuristic(#[case] index: usize) {
        let instance = sample_instance(index).unwrap();

        let mut exact = ExactSolver::new(&instance);
        exact.run().unwrap();
        let mut heuristic = SilverMealSolver::new(&instance);
        heuristic.run().unwrap();

        assert!(exact.total_costs().unwrap() <= heuristic.total_costs().unwrap());
    }

    #[test]
    fn test_zero_demand_periods() {
        let instance =
            Instance::new(Decimal::ONE, Decimal::from(100), vec![0, 5, 0, 5]).unwrap();
        let mut solver = ExactSolver::new(&instance);

        solver.run().unwrap();

        // 一次設置 10，持有 5 * 2 期
        assert_eq!(solver.solution().batch_sizes(), &[0, 10, 0, 0]);
        assert_eq!(solver.total_costs().unwrap(), Decimal::from(110));
    }

    #[test]
    fn test_big_m_too_small_is_infeasible() {
        let instance = Instance::new(Decimal::ONE, Decimal::ONE, vec![10, 10]).unwrap();
        let params = ExactSolverParams::new().with_big_m(5);
        let mut solver = ExactSolver::with_params(&instance, params);

        assert!(matches!(solver.run(), Err(LotSizingError::Solver(_))));
        assert!(!solver.solution().is_finalized());
    }

    #[test]
    fn test_time_warning_does_not_abort() {
        let instance = sample_instance(3).unwrap();
        let params = ExactSolverParams::new().with_time_warning(Duration::ZERO);
        let mut solver = ExactSolver::with_params(&instance, params);

        solver.run().unwrap();
        assert_eq!(solver.total_costs().unwrap(), Decimal::new(765, 1));
    }

    #[test]
    fn test_run_twice_rejected() {
        let instance = sample_instance(0).unwrap();
        let mut solver = ExactSolver::new(&instance);

        solver.run().unwrap();
        assert!(matches!(solver.run(), Err(LotSizingError::AlreadySolved)));
    }
}
