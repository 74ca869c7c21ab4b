//! 問題實例模型

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{LotSizingError, Result};

/// 單品項動態批量問題實例（不可變）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instance {
    /// 每期需求
    demand: Vec<u32>,

    /// 單位持有成本（每期期末庫存）
    holding_cost: Decimal,

    /// 固定設置成本（每次生產/訂購）
    setup_cost: Decimal,
}

impl Instance {
    /// 創建新的問題實例
    ///
    /// 期數由需求序列長度決定，且必須 >= 1。
    /// 總需求必須能放進單一批量（`u32`），否則單批涵蓋全期的排程無法表示。
    pub fn new(holding_cost: Decimal, setup_cost: Decimal, demand: Vec<u32>) -> Result<Self> {
        if demand.is_empty() {
            return Err(LotSizingError::EmptyHorizon);
        }
        let total: u64 = demand.iter().map(|&d| u64::from(d)).sum();
        if total > u64::from(u32::MAX) {
            return Err(LotSizingError::DemandOverflow {
                total,
                max: u32::MAX,
            });
        }
        if holding_cost < Decimal::ZERO {
            return Err(LotSizingError::NegativeCost {
                name: "持有成本",
                value: holding_cost,
            });
        }
        if setup_cost < Decimal::ZERO {
            return Err(LotSizingError::NegativeCost {
                name: "設置成本",
                value: setup_cost,
            });
        }

        Ok(Self {
            demand,
            holding_cost,
            setup_cost,
        })
    }

    /// 期數
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

    /// 閉區間 [begin, end] 的總需求
    ///
    /// 建構時已保證總需求不超過 `u32::MAX`，任何子區間加總都不會溢位。
    pub fn demand_between(&self, begin: usize, end: usize) -> u32 {
        self.demand[begin..=end].iter().sum()
    }

    /// 整個計劃時界的總需求
    pub fn total_demand(&self) -> u64 {
        self.demand.iter().map(|&d| u64::from(d)).sum()
    }
}
