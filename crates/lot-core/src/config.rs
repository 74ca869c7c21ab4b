//! 求解器配置模型

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 啟發式掃描模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanMode {
    /// 參考模式 - 以初始整段平均成本軌跡比較，每次切分後重設尾段
    #[default]
    Reference,

    /// 重新掃描 - 教科書版本，每個批次從起點重新計算平均成本
    Rescan,
}

/// Silver-Meal 啟發式配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicConfig {
    /// 掃描模式
    pub scan_mode: ScanMode,
}

impl HeuristicConfig {
    /// 創建預設配置（參考模式）
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置掃描模式
    pub fn with_scan_mode(mut self, scan_mode: ScanMode) -> Self {
        self.scan_mode = scan_mode;
        self
    }
}

/// 精確求解器參數
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactSolverParams {
    /// 生產指示變數的 big-M 值（未設置時使用總需求）
    pub big_m: Option<u32>,

    /// 求解耗時警告門檻
    ///
    /// 後端無法中途中斷求解，耗時超過門檻時於求解後記錄警告
    pub time_warning: Option<Duration>,
}

impl ExactSolverParams {
    /// 創建預設參數
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置 big-M
    pub fn with_big_m(mut self, big_m: u32) -> Self {
        self.big_m = Some(big_m);
        self
    }

    /// 建構器模式：設置耗時警告門檻
    pub fn with_time_warning(mut self, threshold: Duration) -> Self {
        self.time_warning = Some(threshold);
        self
    }

    /// 實際使用的 big-M
    ///
    /// 總需求是任何單期批量的上界，因此是最緊的合法值。
    /// 若總需求為零則回傳 1，避免產生退化約束。
    pub fn effective_big_m(&self, total_demand: u64) -> u64 {
        match self.big_m {
            Some(big_m) => u64::from(big_m),
            None => total_demand.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_heuristic_config() {
        let config = HeuristicConfig::new();
        assert_eq!(config.scan_mode, ScanMode::Reference);
    }

    #[test]
    fn test_heuristic_config_builder() {
        let config = HeuristicConfig::new().with_scan_mode(ScanMode::Rescan);
        assert_eq!(config.scan_mode, ScanMode::Rescan);
    }

    #[test]
    fn test_exact_params_builder() {
        let params = ExactSolverParams::new()
            .with_big_m(1000)
            .with_time_warning(Duration::from_secs(30));

        assert_eq!(params.big_m, Some(1000));
        assert_eq!(params.time_warning, Some(Duration::from_secs(30)));
        assert_eq!(params.effective_big_m(115), 1000);
    }

    #[test]
    fn test_effective_big_m_defaults_to_total_demand() {
        let params = ExactSolverParams::new();

        assert_eq!(params.effective_big_m(115), 115);
        // 全零需求時不可為 0
        assert_eq!(params.effective_big_m(0), 1);
    }

    #[test]
    fn test_config_serde() {
        let config = HeuristicConfig::new().with_scan_mode(ScanMode::Rescan);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"scan_mode":"Rescan"}"#);

        let back: HeuristicConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
