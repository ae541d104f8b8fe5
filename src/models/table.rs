//! # 特征中间表
//!
//! 三级归约使用的数据结构：
//! - `MetricTable`: 位点 -> 子键（通常为 CN 方法）-> 指标记录
//! - `SiteSummary`: 位点 -> 指标 -> {min, max, avg}
//! - `GlobalSummary`: 指标 -> {min, max, avg}
//!
//! ## 依赖关系
//! - 被 `features/` 使用
//! - 被 `commands/featurize.rs` 用于输出

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 指标名 -> 数值
pub type MetricRecord = BTreeMap<String, f64>;

/// 位点 -> 指标 -> 统计量
pub type SiteSummary = BTreeMap<String, BTreeMap<String, Stats>>;

/// 指标 -> 统计量
pub type GlobalSummary = BTreeMap<String, Stats>;

/// 最小值 / 最大值 / 平均值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl Stats {
    /// 从一组数值计算统计量，空输入返回 None
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = values.iter().sum::<f64>() / values.len() as f64;

        Some(Stats { min, max, avg })
    }
}

/// 位点 × 子键 的指标表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricTable {
    rows: BTreeMap<String, BTreeMap<String, MetricRecord>>,
}

impl MetricTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一条 (site, sub_key) 记录，覆盖已有记录
    pub fn insert(&mut self, site: impl Into<String>, sub_key: impl Into<String>, record: MetricRecord) {
        self.rows
            .entry(site.into())
            .or_default()
            .insert(sub_key.into(), record);
    }

    /// 单个位点的全部记录
    pub fn site(&self, site: &str) -> Option<&BTreeMap<String, MetricRecord>> {
        self.rows.get(site)
    }

    /// 按位点遍历
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, MetricRecord>)> {
        self.rows.iter()
    }

    /// 位点数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 一个结构的扁平化特征行
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// 结构名称
    pub structure: String,

    /// 特征名 -> 数值
    pub values: BTreeMap<String, f64>,
}

impl FeatureRow {
    pub fn new(structure: impl Into<String>) -> Self {
        FeatureRow {
            structure: structure.into(),
            values: BTreeMap::new(),
        }
    }

    /// 以 `CN_MIN_` / `CN_MAX_` / `CN_AVG_` 前缀展开全局统计量
    pub fn extend_with_summary(&mut self, summary: &GlobalSummary) {
        for (metric, stats) in summary {
            self.values.insert(format!("CN_MIN_{}", metric), stats.min);
            self.values.insert(format!("CN_MAX_{}", metric), stats.max);
            self.values.insert(format!("CN_AVG_{}", metric), stats.avg);
        }
    }

    /// 直接合并已命名的特征
    pub fn extend_with_values(&mut self, values: &BTreeMap<String, f64>) {
        self.values
            .extend(values.iter().map(|(k, v)| (k.clone(), *v)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_from_values() {
        let stats = Stats::from_values(&[4.0, 6.0, 8.0]).unwrap();
        assert_eq!(stats.min, 4.0);
        assert_eq!(stats.max, 8.0);
        assert!((stats.avg - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_stats_empty_is_none() {
        assert!(Stats::from_values(&[]).is_none());
    }

    #[test]
    fn test_metric_table_insert_and_get() {
        let mut table = MetricTable::new();
        let mut record = MetricRecord::new();
        record.insert("A_count".to_string(), 2.0);
        table.insert("Th1", "m1", record);

        assert_eq!(table.len(), 1);
        assert_eq!(table.site("Th1").unwrap()["m1"]["A_count"], 2.0);
        assert!(!table.site("Th1").unwrap().contains_key("m2"));
        assert!(table.site("Sb1").is_none());
    }

    #[test]
    fn test_feature_row_prefixes() {
        let mut summary = GlobalSummary::new();
        summary.insert(
            "volume_of_polyhedron".to_string(),
            Stats {
                min: 1.0,
                max: 3.0,
                avg: 2.0,
            },
        );

        let mut row = FeatureRow::new("ThSb");
        row.extend_with_summary(&summary);

        assert_eq!(row.values.len(), 3);
        assert_eq!(row.values["CN_MIN_volume_of_polyhedron"], 1.0);
        assert_eq!(row.values["CN_MAX_volume_of_polyhedron"], 3.0);
        assert_eq!(row.values["CN_AVG_volume_of_polyhedron"], 2.0);
    }
}
