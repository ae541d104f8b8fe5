//! # 多级统计归约
//!
//! - `reduce_by_site`: 位点 -> 子键 -> 指标 ==> 位点 -> 指标 -> {min, max, avg}
//! - `reduce_globally`: 位点 -> 指标 -> {min, max, avg} ==> 指标 -> {min, max, avg}
//!
//! 全局归约对三个统计量分别求位点平均（各位点 min 的平均、max 的平均、
//! avg 的平均），分母为实际报告该指标的位点数。
//!
//! ## 依赖关系
//! - 被 `features/assemble.rs` 调用
//! - 使用 `models/table.rs`

use crate::models::{GlobalSummary, MetricTable, SiteSummary, Stats};

use std::collections::BTreeMap;

/// 按位点归约：对每个指标在各子键之间求 min / max / avg
///
/// 缺失或非有限的值不参与统计；没有任何值的指标、没有任何指标的位点都不输出。
pub fn reduce_by_site(table: &MetricTable) -> SiteSummary {
    let mut summary = SiteSummary::new();

    for (site, records) in table.iter() {
        let mut values: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for record in records.values() {
            for (metric, value) in record {
                if value.is_finite() {
                    values.entry(metric.as_str()).or_default().push(*value);
                }
            }
        }

        let stats: BTreeMap<String, Stats> = values
            .into_iter()
            .filter_map(|(metric, vals)| Stats::from_values(&vals).map(|s| (metric.to_string(), s)))
            .collect();

        if !stats.is_empty() {
            summary.insert(site.clone(), stats);
        }
    }

    summary
}

/// 全局归约：对每个指标的三个统计量分别在位点之间取平均
pub fn reduce_globally(summary: &SiteSummary) -> GlobalSummary {
    let mut sums: BTreeMap<&str, ([f64; 3], usize)> = BTreeMap::new();

    for metrics in summary.values() {
        for (metric, stats) in metrics {
            let entry = sums.entry(metric.as_str()).or_insert(([0.0; 3], 0));
            entry.0[0] += stats.min;
            entry.0[1] += stats.max;
            entry.0[2] += stats.avg;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(metric, (sum, count))| {
            let n = count as f64;
            (
                metric.to_string(),
                Stats {
                    min: sum[0] / n,
                    max: sum[1] / n,
                    avg: sum[2] / n,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetricRecord;

    fn record(pairs: &[(&str, f64)]) -> MetricRecord {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn sample_table() -> MetricTable {
        let mut table = MetricTable::new();
        table.insert("Sb1", "m1", record(&[("volume", 10.0), ("faces", 8.0)]));
        table.insert("Sb1", "m2", record(&[("volume", 14.0), ("faces", 12.0)]));
        table.insert("Sb1", "m3", record(&[("volume", 12.0)]));
        table.insert("Th1", "m1", record(&[("volume", 20.0)]));
        table
    }

    #[test]
    fn test_reduce_by_site_stats() {
        let summary = reduce_by_site(&sample_table());

        let volume = summary["Sb1"]["volume"];
        assert_eq!(volume.min, 10.0);
        assert_eq!(volume.max, 14.0);
        assert!((volume.avg - 12.0).abs() < 1e-12);

        // faces 只出现在两个方法中
        let faces = summary["Sb1"]["faces"];
        assert!((faces.avg - 10.0).abs() < 1e-12);
        assert!(!summary["Th1"].contains_key("faces"));
    }

    #[test]
    fn test_reduce_by_site_omits_empty_sites_and_nan() {
        let mut table = sample_table();
        table.insert("Sb2", "m1", record(&[("volume", f64::NAN)]));
        let summary = reduce_by_site(&table);

        assert!(!summary.contains_key("Sb2"));
        for metrics in summary.values() {
            for stats in metrics.values() {
                assert!(stats.min.is_finite() && stats.max.is_finite() && stats.avg.is_finite());
            }
        }
    }

    #[test]
    fn test_reduce_by_site_is_idempotent_on_single_key() {
        let summary = reduce_by_site(&sample_table());

        let mut reshaped = MetricTable::new();
        for (site, metrics) in &summary {
            let rec = metrics
                .iter()
                .map(|(metric, stats)| (metric.clone(), stats.avg))
                .collect();
            reshaped.insert(site.as_str(), "only", rec);
        }
        let again = reduce_by_site(&reshaped);

        for (site, metrics) in &summary {
            for (metric, stats) in metrics {
                assert_eq!(
                    again[site][metric],
                    Stats {
                        min: stats.avg,
                        max: stats.avg,
                        avg: stats.avg
                    }
                );
            }
        }
    }

    #[test]
    fn test_reduce_globally_uses_contributing_sites() {
        let global = reduce_globally(&reduce_by_site(&sample_table()));

        // volume: Sb1 {10, 14, 12}, Th1 {20, 20, 20}
        let volume = global["volume"];
        assert!((volume.min - 15.0).abs() < 1e-12);
        assert!((volume.max - 17.0).abs() < 1e-12);
        assert!((volume.avg - 16.0).abs() < 1e-12);

        // faces 只来自 Sb1，分母为 1
        let faces = global["faces"];
        assert_eq!(faces.min, 8.0);
        assert_eq!(faces.max, 12.0);
        assert!((faces.avg - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_global_avg_between_min_and_max() {
        let global = reduce_globally(&reduce_by_site(&sample_table()));
        for stats in global.values() {
            assert!(stats.min <= stats.avg + 1e-12);
            assert!(stats.avg <= stats.max + 1e-12);
        }
    }

    #[test]
    fn test_every_site_metric_reaches_global() {
        let summary = reduce_by_site(&sample_table());
        let global = reduce_globally(&summary);
        for metrics in summary.values() {
            for metric in metrics.keys() {
                assert!(global.contains_key(metric));
            }
        }
        assert!(reduce_globally(&SiteSummary::new()).is_empty());
    }
}
