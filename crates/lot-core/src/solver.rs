//! 求解器介面
//!
//! 啟發式與精確求解器共用同一組能力，呼叫端可互換使用。

use rust_decimal::Decimal;

use crate::{Instance, InstanceReport, LotSizingError, Result, Solution, SolutionReport};

/// 批量求解器
pub trait LotSizingSolver {
    /// 求解器名稱（用於日誌與報表）
    fn name(&self) -> &'static str;

    /// 求解的問題實例
    fn instance(&self) -> &Instance;

    /// 求解器擁有的解
    fn solution(&self) -> &Solution;

    /// 執行求解，完成後解即為可行且已鎖定
    fn run(&mut self) -> Result<()>;

    /// 總成本，求解完成前回傳錯誤
    fn total_costs(&self) -> Result<Decimal> {
        let solution = self.solution();
        if !solution.is_finalized() {
            return Err(LotSizingError::SolutionNotFinalized);
        }
        solution.calculate_total_costs()
    }

    fn print_instance(&self) {
        println!("{}", InstanceReport::new(self.instance()));
    }

    fn print_solution(&self) {
        println!("{}", SolutionReport::new(self.solution()));
    }
}
