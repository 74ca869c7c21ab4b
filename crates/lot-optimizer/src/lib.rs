//! # Lot Optimizer
//!
//! 精確求解（混合整數規劃）

pub mod exact;

// Re-export 主要類型
pub use exact::ExactSolver;
