//! # Lot Core
//!
//! 單品項動態批量問題的核心資料模型與類型定義

pub mod config;
pub mod instance;
pub mod parser;
pub mod report;
pub mod samples;
pub mod solution;
pub mod solver;

// Re-export 主要類型
pub use config::{ExactSolverParams, HeuristicConfig, ScanMode};
pub use instance::Instance;
pub use report::{InstanceReport, SolutionReport};
pub use samples::{sample_instance, sample_instances, SAMPLE_COUNT};
pub use solution::Solution;
pub use solver::LotSizingSolver;

/// 批量問題錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum LotSizingError {
    #[error("計劃時界不可為空（期數必須 >= 1）")]
    EmptyHorizon,

    #[error("{name} 不可為負值: {value}")]
    NegativeCost {
        name: &'static str,
        value: rust_decimal::Decimal,
    },

    #[error("總需求 {total} 超過單一批量上限 {max}")]
    DemandOverflow { total: u64, max: u32 },

    #[error("第 {begin} 至 {end} 期的成本超出數值範圍")]
    CostOverflow { begin: usize, end: usize },

    #[error("區間 [{begin}, {end}] 超出計劃時界（共 {periods} 期）")]
    PeriodOutOfRange {
        begin: usize,
        end: usize,
        periods: usize,
    },

    #[error("期數不一致：問題實例為 {expected} 期，收到 {actual} 期")]
    PeriodMismatch { expected: usize, actual: usize },

    #[error("範例索引必須介於 0 與 {max} 之間，收到 {index}")]
    SampleIndexOutOfRange { index: usize, max: usize },

    #[error("第 {line} 行解析失敗（{field}）：{reason}")]
    Parse {
        line: usize,
        field: String,
        reason: String,
    },

    #[error("讀取檔案失敗: {0}")]
    Io(#[from] std::io::Error),

    #[error("第 {period} 期庫存為負值: {inventory}（不允許缺貨）")]
    Infeasible { period: usize, inventory: i64 },

    #[error("總批量 {produced} 與總需求 {demanded} 不符")]
    DemandMismatch { produced: u64, demanded: u64 },

    #[error("解尚未完成，無法計算總成本")]
    SolutionNotFinalized,

    #[error("求解器已執行過，解不可再修改")]
    AlreadySolved,

    #[error("求解器錯誤: {0}")]
    Solver(String),
}

pub type Result<T> = std::result::Result<T, LotSizingError>;
