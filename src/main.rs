//! 單品項動態批量問題求解器

mod cli;

use anyhow::Context;
use clap::Parser;
use lot_calc::SilverMealSolver;
use lot_core::{sample_instance, Instance, LotSizingSolver, Solution};
use lot_optimizer::ExactSolver;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Method, ReportFormat};

/// 單一求解器的執行結果（JSON 報表）
#[derive(Serialize)]
struct RunReport {
    solver: &'static str,
    total_cost: Decimal,
    solution: Solution,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    instance: &'a Instance,
    runs: Vec<RunReport>,
}

fn setup_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_instance(cli: &Cli) -> anyhow::Result<Instance> {
    if let Some(path) = &cli.source.file {
        tracing::info!("讀取實例檔 '{}'", path.display());
        return Instance::from_file(path)
            .with_context(|| format!("無法載入實例檔 '{}'", path.display()));
    }
    if let Some(index) = cli.source.sample {
        tracing::info!("使用內建範例 {}", index);
        return Ok(sample_instance(index)?);
    }
    anyhow::bail!("必須指定實例來源（--file 或 --sample）")
}

/// 執行單一求解器；表格模式下於求解前後輸出實例與解
fn solve(solver: &mut dyn LotSizingSolver, format: ReportFormat) -> anyhow::Result<RunReport> {
    if format == ReportFormat::Table {
        solver.print_instance();
    }

    solver
        .run()
        .with_context(|| format!("求解器 {} 執行失敗", solver.name()))?;

    if format == ReportFormat::Table {
        solver.print_solution();
    }

    Ok(RunReport {
        solver: solver.name(),
        total_cost: solver.total_costs()?,
        solution: solver.solution().clone(),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(&cli.log_level);
    execute(&cli)
}

/// 驗證輸入後依序執行所選求解器；任何設定錯誤都在求解前回報
fn execute(cli: &Cli) -> anyhow::Result<()> {
    let method = cli
        .method
        .method()
        .context("必須指定求解方法（--heuristic、--exact 或 --compare）")?;
    let instance = load_instance(cli)?;
    let heuristic_config = cli.heuristic_config();
    let exact_params = cli.exact_params()?;

    let mut runs = Vec::new();
    if matches!(method, Method::Heuristic | Method::Compare) {
        let mut solver = SilverMealSolver::with_config(&instance, heuristic_config);
        runs.push(solve(&mut solver, cli.format)?);
    }
    if matches!(method, Method::Exact | Method::Compare) {
        let mut solver = ExactSolver::with_params(&instance, exact_params);
        runs.push(solve(&mut solver, cli.format)?);
    }

    if let [heuristic, exact] = runs.as_slice() {
        let gap = heuristic.total_cost - exact.total_cost;
        tracing::info!(
            "比較：啟發式 {}，精確解 {}，差距 {}",
            heuristic.total_cost,
            exact.total_cost,
            gap
        );
    }

    if cli.format == ReportFormat::Json {
        let report = JsonReport {
            instance: &instance,
            runs,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lot_core::LotSizingError;

    #[test]
    fn test_sample_index_out_of_range_fails_before_solving() {
        let cli = Cli::try_parse_from(["silver-meal", "--sample", "4", "--compare"]).unwrap();

        let err = execute(&cli).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LotSizingError>(),
            Some(LotSizingError::SampleIndexOutOfRange { index: 4, max: 3 })
        ));
    }

    #[test]
    fn test_invalid_time_warning_fails() {
        let cli = Cli::try_parse_from([
            "silver-meal",
            "--sample",
            "0",
            "--exact",
            "--time-warning=-2",
        ])
        .unwrap();

        assert!(execute(&cli).is_err());
    }

    #[test]
    fn test_load_builtin_sample() {
        let cli = Cli::try_parse_from(["silver-meal", "--sample", "3", "--heuristic"]).unwrap();
        let instance = load_instance(&cli).unwrap();

        assert_eq!(instance, sample_instance(3).unwrap());
    }
}
