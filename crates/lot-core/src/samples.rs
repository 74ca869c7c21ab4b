//! 內建範例實例

use rust_decimal::Decimal;

use crate::{Instance, LotSizingError, Result};

/// 內建範例數量
pub const SAMPLE_COUNT: usize = 4;

/// 建立全部內建範例
///
/// 每次呼叫都重新建立，未使用時不佔資源。
pub fn sample_instances() -> Vec<Instance> {
    (0..SAMPLE_COUNT).filter_map(build_sample).collect()
}

/// 依索引取得內建範例（0..=3）
pub fn sample_instance(index: usize) -> Result<Instance> {
    build_sample(index).ok_or(LotSizingError::SampleIndexOutOfRange {
        index,
        max: SAMPLE_COUNT - 1,
    })
}

fn build_sample(index: usize) -> Option<Instance> {
    let (holding_cost, setup_cost, demand) = match index {
        0 => (Decimal::from(2), Decimal::from(80), vec![18, 30, 42, 5, 20]),
        1 => (
            Decimal::new(11, 2),
            Decimal::new(26562, 2),
            vec![32, 26, 65, 12, 41],
        ),
        2 => (
            Decimal::new(21, 2),
            Decimal::new(23469, 2),
            vec![42, 65, 44, 69, 57, 52, 92, 96, 22, 42],
        ),
        3 => (Decimal::new(5, 1), Decimal::from(25), vec![20, 32, 30, 21]),
        _ => return None,
    };

    // 範例資料皆為非空需求與非負成本
    Instance::new(holding_cost, setup_cost, demand).ok()
}
