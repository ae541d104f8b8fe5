//! # 特征表导出
//!
//! 将特征行写成 CSV：第一列为结构名，其后为全部特征名的并集（排序）。
//! 某结构缺少的特征留空，不填 0。
//!
//! ## 依赖关系
//! - 被 `commands/featurize.rs` 调用
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{CoordfeatError, Result};
use crate::models::FeatureRow;

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

/// 全部特征名（排序去重）
pub fn feature_columns(rows: &[FeatureRow]) -> Vec<String> {
    let columns: BTreeSet<&String> = rows.iter().flat_map(|r| r.values.keys()).collect();
    columns.into_iter().cloned().collect()
}

/// 写入任意 writer
pub fn write_rows<W: Write>(rows: &[FeatureRow], writer: W) -> Result<()> {
    let columns = feature_columns(rows);
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push("structure".to_string());
    header.extend(columns.iter().cloned());
    wtr.write_record(&header)?;

    for row in rows {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(row.structure.clone());
        for column in &columns {
            record.push(
                row.values
                    .get(column)
                    .map(|v| format!("{:.6}", v))
                    .unwrap_or_default(),
            );
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()
        .map_err(|e| CoordfeatError::Other(format!("Failed to flush CSV output: {}", e)))?;
    Ok(())
}

/// 导出特征行为 CSV 文件
pub fn to_csv(rows: &[FeatureRow], output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path).map_err(|e| CoordfeatError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    write_rows(rows, file)
}
