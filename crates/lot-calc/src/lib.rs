//! # Lot Calculation Engine
//!
//! Silver-Meal 批量啟發式

pub mod silver_meal;

// Re-export 主要類型
pub use silver_meal::{average_cost, AverageCosts, SilverMealSolver};
