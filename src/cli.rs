//! 命令列參數

use clap::{Args, Parser, ValueEnum};
use lot_core::{ExactSolverParams, HeuristicConfig, ScanMode};
use std::path::PathBuf;
use std::time::Duration;

/// 單品項動態批量問題求解器（Silver-Meal 啟發式 / MIP 精確解）
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub method: MethodArgs,

    /// 啟發式掃描模式
    #[arg(long, value_enum, default_value_t = ScanArg::Reference)]
    pub scan: ScanArg,

    /// 精確求解器的 big-M（預設為總需求）
    #[arg(long, value_name = "N")]
    pub big_m: Option<u32>,

    /// 精確求解耗時超過此秒數時記錄警告（不中斷求解）
    #[arg(long, value_name = "SECONDS")]
    pub time_warning: Option<f64>,

    /// 報表格式
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    pub format: ReportFormat,

    /// 日誌等級（RUST_LOG 優先）
    #[arg(long, env = "SILVER_MEAL_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// 實例來源（擇一）
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// 實例檔路徑
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// 內建範例索引（0 到 3）
    #[arg(long, value_name = "INDEX")]
    pub sample: Option<usize>,
}

/// 求解方法（擇一）
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct MethodArgs {
    /// 使用 Silver-Meal 啟發式
    #[arg(long)]
    pub heuristic: bool,

    /// 使用 MIP 精確求解
    #[arg(long)]
    pub exact: bool,

    /// 依序執行啟發式與精確求解並比較
    #[arg(long)]
    pub compare: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Heuristic,
    Exact,
    Compare,
}

impl MethodArgs {
    pub fn method(&self) -> Option<Method> {
        match (self.heuristic, self.exact, self.compare) {
            (true, false, false) => Some(Method::Heuristic),
            (false, true, false) => Some(Method::Exact),
            (false, false, true) => Some(Method::Compare),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScanArg {
    Reference,
    Rescan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Table,
    Json,
}

impl Cli {
    pub fn heuristic_config(&self) -> HeuristicConfig {
        let scan_mode = match self.scan {
            ScanArg::Reference => ScanMode::Reference,
            ScanArg::Rescan => ScanMode::Rescan,
        };
        HeuristicConfig::new().with_scan_mode(scan_mode)
    }

    pub fn exact_params(&self) -> anyhow::Result<ExactSolverParams> {
        let mut params = ExactSolverParams::new();
        if let Some(big_m) = self.big_m {
            params = params.with_big_m(big_m);
        }
        if let Some(seconds) = self.time_warning {
            let threshold = Duration::try_from_secs_f64(seconds)
                .map_err(|e| anyhow::anyhow!("無效的耗時警告門檻 {}: {}", seconds, e))?;
            params = params.with_time_warning(threshold);
        }
        Ok(params)
    }
}
