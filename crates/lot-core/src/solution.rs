//! 批量排程解模型

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{Instance, LotSizingError, Result};

/// 批量排程解
///
/// 與一個問題實例一同建立（全為零），由求解器就地填入，
/// 經 [`Solution::finalize`] 驗證可行後即不再變更。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    /// 每期需求（取自實例）
    demand: Vec<u32>,

    /// 單位持有成本
    holding_cost: Decimal,

    /// 固定設置成本
    setup_cost: Decimal,

    /// 每期生產/訂購量，非零即為設置期
    batch_size: Vec<u32>,

    /// 每期期末庫存
    inventory_level: Vec<i64>,

    /// 啟發式的平均成本軌跡
    avg_holding_cost: Vec<Decimal>,

    /// 是否已完成並通過可行性驗證
    finalized: bool,
}

impl Solution {
    /// 為問題實例創建空白解
    pub fn new(instance: &Instance) -> Self {
        let periods = instance.periods();
        Self {
            demand: instance.demand().to_vec(),
            holding_cost: instance.holding_cost(),
            setup_cost: instance.setup_cost(),
            batch_size: vec![0; periods],
            inventory_level: vec![0; periods],
            avg_holding_cost: vec![Decimal::ZERO; periods],
            finalized: false,
        }
    }

    pub fn periods(&self) -> usize {
        self.demand.len()
    }

    pub fn demand(&self) -> &[u32] {
        &self.demand
    }

    pub fn holding_cost(&self) -> Decimal {
        self.holding_cost
    }

    pub fn setup_cost(&self) -> Decimal {
        self.setup_cost
    }

    pub fn batch_sizes(&self) -> &[u32] {
        &self.batch_size
    }

    pub fn inventory_levels(&self) -> &[i64] {
        &self.inventory_level
    }

    pub fn avg_costs(&self) -> &[Decimal] {
        &self.avg_holding_cost
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// 設置期索引
    pub fn setup_periods(&self) -> impl Iterator<Item = usize> + '_ {
        self.batch_size
            .iter()
            .enumerate()
            .filter(|&(_, &quantity)| quantity > 0)
            .map(|(period, _)| period)
    }

    /// 設置單期批量
    pub fn set_batch_size(&mut self, period: usize, quantity: u32) {
        debug_assert!(!self.finalized, "已完成的解不可修改");
        self.batch_size[period] = quantity;
    }

    /// 記錄單期平均成本
    pub fn set_avg_cost(&mut self, period: usize, cost: Decimal) {
        debug_assert!(!self.finalized, "已完成的解不可修改");
        self.avg_holding_cost[period] = cost;
    }

    /// 以完整批量向量取代排程，並重新計算庫存
    pub fn set_schedule(&mut self, batch_sizes: Vec<u32>) -> Result<()> {
        if self.finalized {
            return Err(LotSizingError::AlreadySolved);
        }
        if batch_sizes.len() != self.periods() {
            return Err(LotSizingError::PeriodMismatch {
                expected: self.periods(),
                actual: batch_sizes.len(),
            });
        }

        self.batch_size = batch_sizes;
        self.recompute_inventory();
        Ok(())
    }

    /// 由左至右重新計算整個時界的期末庫存
    ///
    /// 上游批量改變後必須整段重算，不可局部修補。
    pub fn recompute_inventory(&mut self) {
        let mut level = 0i64;
        for ((inventory, &batch), &demand) in self
            .inventory_level
            .iter_mut()
            .zip(&self.batch_size)
            .zip(&self.demand)
        {
            level += i64::from(batch) - i64::from(demand);
            *inventory = level;
        }
    }

    /// 驗證可行性與需求守恆，通過後鎖定解
    pub fn finalize(&mut self) -> Result<()> {
        if self.finalized {
            return Err(LotSizingError::AlreadySolved);
        }

        if let Some((period, &inventory)) = self
            .inventory_level
            .iter()
            .enumerate()
            .find(|&(_, &level)| level < 0)
        {
            return Err(LotSizingError::Infeasible { period, inventory });
        }

        let produced: u64 = self.batch_size.iter().map(|&b| u64::from(b)).sum();
        let demanded: u64 = self.demand.iter().map(|&d| u64::from(d)).sum();
        if produced != demanded {
            return Err(LotSizingError::DemandMismatch { produced, demanded });
        }
        self.calculate_total_costs()?;

        self.finalized = true;
        Ok(())
    }

    /// 單期設置成本
    pub fn period_setup_cost(&self, period: usize) -> Decimal {
        if self.batch_size[period] > 0 {
            self.setup_cost
        } else {
            Decimal::ZERO
        }
    }

    /// 單期持有成本，超出數值範圍時回傳 `None`
    pub fn period_holding_cost(&self, period: usize) -> Option<Decimal> {
        Decimal::from(self.inventory_level[period]).checked_mul(self.holding_cost)
    }

    /// 總成本 = Σ 期末庫存 × 持有成本 + 設置次數 × 設置成本
    ///
    /// 純函數，任何時刻皆可呼叫；解完成前的結果不具意義。
    /// 已完成的解保證成本可表示。
    pub fn calculate_total_costs(&self) -> Result<Decimal> {
        let overflow = || LotSizingError::CostOverflow {
            begin: 0,
            end: self.periods() - 1,
        };

        let mut total = Decimal::from(self.setup_periods().count())
            .checked_mul(self.setup_cost)
            .ok_or_else(overflow)?;
        for period in 0..self.periods() {
            total = self
                .period_holding_cost(period)
                .and_then(|cost| total.checked_add(cost))
                .ok_or_else(overflow)?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_instance() -> Instance {
        Instance::new(Decimal::from(2), Decimal::from(80), vec![18, 30, 42, 5, 20]).unwrap()
    }

    #[test]
    fn test_new_solution_is_empty() {
        let instance = sample_instance();
        let solution = Solution::new(&instance);

        assert_eq!(solution.periods(), 5);
        assert!(solution.batch_sizes().iter().all(|&b| b == 0));
        assert!(solution.inventory_levels().iter().all(|&i| i == 0));
        assert!(solution.avg_costs().iter().all(|c| c.is_zero()));
        assert!(!solution.is_finalized());
    }

    #[test]
    fn test_recompute_inventory() {
        let instance = sample_instance();
        let mut solution = Solution::new(&instance);

        solution.set_batch_size(0, 48);
        solution.set_batch_size(2, 67);
        solution.recompute_inventory();

        assert_eq!(solution.inventory_levels(), &[30, 0, 25, 20, 0]);
    }

    #[test]
    fn test_total_costs() {
        let instance = sample_instance();
        let mut solution = Solution::new(&instance);

        solution.set_schedule(vec![48, 0, 67, 0, 0]).unwrap();

        // 庫存 30 + 25 + 20 = 75，持有 150；兩次設置 160
        assert_eq!(solution.calculate_total_costs().unwrap(), Decimal::from(310));
        assert_eq!(solution.setup_periods().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(solution.period_setup_cost(1), Decimal::ZERO);
        assert_eq!(solution.period_holding_cost(0), Some(Decimal::from(60)));
    }

    #[test]
    fn test_finalize_rejects_unrepresentable_cost() {
        let holding_cost = Decimal::from_i128_with_scale(10_i128.pow(25), 0);
        let instance = Instance::new(holding_cost, Decimal::ONE, vec![0, 10_000]).unwrap();
        let mut solution = Solution::new(&instance);

        // 第 1 期期末庫存 10000，持有成本 1e29 超出 Decimal 範圍
        solution.set_schedule(vec![10_000, 0]).unwrap();

        assert!(solution.period_holding_cost(0).is_none());
        assert!(matches!(
            solution.calculate_total_costs(),
            Err(LotSizingError::CostOverflow { begin: 0, end: 1 })
        ));
        assert!(matches!(
            solution.finalize(),
            Err(LotSizingError::CostOverflow { .. })
        ));
        assert!(!solution.is_finalized());
    }

    #[test]
    fn test_set_schedule_period_mismatch() {
        let instance = sample_instance();
        let mut solution = Solution::new(&instance);

        let result = solution.set_schedule(vec![115]);
        assert!(matches!(
            result,
            Err(LotSizingError::PeriodMismatch {
                expected: 5,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_finalize_rejects_backorder() {
        let instance = sample_instance();
        let mut solution = Solution::new(&instance);

        solution.set_schedule(vec![18, 0, 72, 5, 20]).unwrap();

        let result = solution.finalize();
        assert!(matches!(
            result,
            Err(LotSizingError::Infeasible {
                period: 1,
                inventory: -30
            })
        ));
        assert!(!solution.is_finalized());
    }

    #[test]
    fn test_finalize_rejects_overproduction() {
        let instance = sample_instance();
        let mut solution = Solution::new(&instance);

        solution.set_schedule(vec![120, 0, 0, 0, 0]).unwrap();

        let result = solution.finalize();
        assert!(matches!(
            result,
            Err(LotSizingError::DemandMismatch {
                produced: 120,
                demanded: 115
            })
        ));
    }

    #[test]
    fn test_finalize_locks_solution() {
        let instance = sample_instance();
        let mut solution = Solution::new(&instance);

        solution.set_schedule(vec![18, 30, 42, 5, 20]).unwrap();
        solution.finalize().unwrap();

        assert!(solution.is_finalized());
        assert!(matches!(
            solution.set_schedule(vec![115, 0, 0, 0, 0]),
            Err(LotSizingError::AlreadySolved)
        ));
        assert!(matches!(solution.finalize(), Err(LotSizingError::AlreadySolved)));
    }
}
