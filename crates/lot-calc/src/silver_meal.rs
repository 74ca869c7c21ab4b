//! Silver-Meal 啟發式
//!
//! 由左至右掃描計劃時界，以「單次設置涵蓋 [begin, end] 的每期平均成本」
//! 判斷批次是否應繼續吸收下一期需求。平均成本開始嚴格上升的那一期
//! 即為轉折點，前一期為該批次最後一期。

use lot_core::{HeuristicConfig, Instance, LotSizingError, LotSizingSolver, ScanMode, Solution};
use rust_decimal::Decimal;

/// 從 `begin` 起逐期累加的平均成本序列
///
/// 第 k 項為 `AvgCost(begin, begin + k)`：
/// `(setup + Σ (j - begin + 1) * demand[j] * holding) / (k + 1)`。
/// 期 `begin` 本身計為持有一期。累加超出 `Decimal` 範圍時產生
/// [`LotSizingError::CostOverflow`] 並結束序列。
pub struct AverageCosts<'a> {
    instance: &'a Instance,
    begin: usize,
    next: usize,
    total: Decimal,
}

impl<'a> AverageCosts<'a> {
    pub fn new(instance: &'a Instance, begin: usize) -> Self {
        Self {
            instance,
            begin,
            next: begin,
            total: instance.setup_cost(),
        }
    }
}

impl Iterator for AverageCosts<'_> {
    type Item = lot_core::Result<Decimal>;

    fn next(&mut self) -> Option<Self::Item> {
        let demand = *self.instance.demand().get(self.next)?;
        let period = self.next;
        let held = Decimal::from(period - self.begin + 1);

        let total = held
            .checked_mul(Decimal::from(demand))
            .and_then(|units| units.checked_mul(self.instance.holding_cost()))
            .and_then(|holding| self.total.checked_add(holding));

        match total {
            Some(total) => {
                self.total = total;
                self.next += 1;
                Some(Ok(total / held))
            }
            None => {
                self.next = self.instance.periods();
                Some(Err(LotSizingError::CostOverflow {
                    begin: self.begin,
                    end: period,
                }))
            }
        }
    }
}

/// 單次設置涵蓋閉區間 [begin, end] 的每期平均成本
pub fn average_cost(instance: &Instance, begin: usize, end: usize) -> lot_core::Result<Decimal> {
    let out_of_range = || LotSizingError::PeriodOutOfRange {
        begin,
        end,
        periods: instance.periods(),
    };
    if begin > end || end >= instance.periods() {
        return Err(out_of_range());
    }

    AverageCosts::new(instance, begin)
        .nth(end - begin)
        .ok_or_else(out_of_range)?
}

/// Silver-Meal 啟發式求解器
pub struct SilverMealSolver<'a> {
    instance: &'a Instance,
    solution: Solution,
    config: HeuristicConfig,
}

impl<'a> SilverMealSolver<'a> {
    /// 使用預設配置（參考模式）創建求解器
    pub fn new(instance: &'a Instance) -> Self {
        Self::with_config(instance, HeuristicConfig::default())
    }

    pub fn with_config(instance: &'a Instance, config: HeuristicConfig) -> Self {
        Self {
            instance,
            solution: Solution::new(instance),
            config,
        }
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// 以單次設置涵蓋閉區間 [begin, end]
    ///
    /// 全部需求在 begin 期下單，其餘期批量為零，並記錄區間內每期的平均成本。
    fn commit_batch(&mut self, begin: usize, end: usize) -> lot_core::Result<()> {
        let costs = AverageCosts::new(self.instance, begin)
            .take(end - begin + 1)
            .collect::<lot_core::Result<Vec<_>>>()?;
        let quantity = self.instance.demand_between(begin, end);
        tracing::debug!("設置批次 [{}, {}]，批量 {}", begin, end, quantity);

        for (period, cost) in (begin..=end).zip(costs) {
            let batch = if period == begin { quantity } else { 0 };
            self.solution.set_batch_size(period, batch);
            self.solution.set_avg_cost(period, cost);
        }
        Ok(())
    }

    /// 參考模式
    ///
    /// 先以單一批次涵蓋全部期間取得平均成本軌跡，再依軌跡尋找轉折點；
    /// 每次切分後將新起點到期末暫設為一個批次，軌跡尾段隨之更新。
    fn run_reference(&mut self) -> lot_core::Result<()> {
        let last = self.instance.periods() - 1;

        self.commit_batch(0, last)?;
        self.solution.recompute_inventory();

        let mut floor_period = 0;
        for period in 1..=last {
            let costs = self.solution.avg_costs();
            if costs[period] > costs[period - 1] {
                tracing::debug!(
                    "第 {} 期平均成本 {} > {}，於此切分",
                    period,
                    costs[period],
                    costs[period - 1]
                );

                self.commit_batch(floor_period, period - 1)?;
                floor_period = period;
                self.commit_batch(floor_period, last)?;
                self.solution.recompute_inventory();
            }
        }
        Ok(())
    }

    /// 重新掃描模式
    ///
    /// 每個批次從起點重新累加平均成本，平均成本不再下降即結束批次。
    fn run_rescan(&mut self) -> lot_core::Result<()> {
        let periods = self.instance.periods();
        let mut begin = 0;

        while begin < periods {
            let mut costs = AverageCosts::new(self.instance, begin);
            let mut end = begin;

            if let Some(first) = costs.next() {
                let mut previous = first?;
                for cost in costs {
                    let cost = cost?;
                    if cost > previous {
                        break;
                    }
                    previous = cost;
                    end += 1;
                }
            }

            self.commit_batch(begin, end)?;
            self.solution.recompute_inventory();
            begin = end + 1;
        }
        Ok(())
    }
}

impl LotSizingSolver for SilverMealSolver<'_> {
    fn name(&self) -> &'static str {
        "silver-meal"
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

        tracing::info!(
            "執行 Silver-Meal 啟發式：{} 期，模式 {:?}",
            self.instance.periods(),
            self.config.scan_mode
        );

        match self.config.scan_mode {
            ScanMode::Reference => self.run_reference()?,
            ScanMode::Rescan => self.run_rescan()?,
        }
        self.solution.finalize()?;

        tracing::info!(
            "啟發式完成：設置 {} 次，總成本 {}",
            self.solution.setup_periods().count(),
            self.solution.calculate_total_costs()?
        );

        Ok(())
    }
}
