//! 純文字實例檔解析
//!
//! 檔案格式（每行一個值）：
//! 1. 期數 N
//! 2. N 行每期需求（整數）
//! 3. 持有成本
//! 4. 設置成本
//!
//! 任何錯誤立即回報，不做部分讀取。

use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::{Instance, LotSizingError, Result};

/// 逐行讀取並記錄行號
struct LineReader<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// 讀取下一行並解析為指定類型
    fn next_value<T>(&mut self, field: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.line_no += 1;
        let line = match self.lines.next() {
            Some(line) => line?,
            None => {
                return Err(self.parse_error(field, "unexpected end of file".to_string()));
            }
        };

        line.trim()
            .parse::<T>()
            .map_err(|e| self.parse_error(field, format!("無法解析 '{}': {}", line.trim(), e)))
    }

    /// 確認剩餘內容皆為空白行
    fn expect_end(&mut self) -> Result<()> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line?;
            if !line.trim().is_empty() {
                return Err(LotSizingError::Parse {
                    line: self.line_no,
                    field: "trailing content".to_string(),
                    reason: format!("多餘的內容 '{}'", line.trim()),
                });
            }
        }
        Ok(())
    }

    fn parse_error(&self, field: &str, reason: String) -> LotSizingError {
        LotSizingError::Parse {
            line: self.line_no,
            field: field.to_string(),
            reason,
        }
    }
}

impl Instance {
    /// 從讀取器解析問題實例
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut reader = LineReader::new(reader);

        let periods: usize = reader.next_value("period count")?;
        if periods == 0 {
            return Err(LotSizingError::EmptyHorizon);
        }

        let mut demand = Vec::with_capacity(periods);
        for period in 0..periods {
            demand.push(reader.next_value::<u32>(&format!("demand[{}]", period))?);
        }

        let holding_cost: Decimal = reader.next_value("holding cost")?;
        let setup_cost: Decimal = reader.next_value("setup cost")?;
        reader.expect_end()?;

        Instance::new(holding_cost, setup_cost, demand)
    }

    /// 從檔案路徑讀取問題實例
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }
}
