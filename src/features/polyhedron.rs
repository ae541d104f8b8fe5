//! # 配位多面体指标计算
//!
//! 对每个 (位点, CN 方法) 取最近的 CN 个近邻，加上中心原子（放在最后），
//! 交给几何原语计算多面体指标。
//!
//! - CN <= 3：无法构成三维凸包，记为 `TooFewPoints`，不输出提示
//! - 凸包构造失败：记为 `DegenerateHull`，输出一条警告后继续
//!
//! ## 依赖关系
//! - 被 `features/assemble.rs`, `commands/inspect.rs` 调用
//! - 使用 `geometry/` 的 `PolyhedronGeometry`
//! - 使用 `utils/output.rs` 输出警告

use super::coordination_shell;
use crate::error::{CoordfeatError, Result};
use crate::geometry::{HullError, PolyhedronGeometry, PolyhedronMetrics};
use crate::models::{CnSelector, ConnectionProvider, MetricRecord, MetricTable};
use crate::utils::output;

use std::collections::BTreeMap;

/// 单个 (位点, 方法) 的多面体结果
#[derive(Debug, Clone, PartialEq)]
pub enum PolyhedronOutcome {
    /// 指标计算成功
    Computed(PolyhedronMetrics),
    /// 壳层原子不足 4 个
    TooFewPoints,
    /// 点集退化，凸包构造失败
    DegenerateHull,
}

impl PolyhedronOutcome {
    pub fn metrics(&self) -> Option<&PolyhedronMetrics> {
        match self {
            PolyhedronOutcome::Computed(m) => Some(m),
            _ => None,
        }
    }
}

impl std::fmt::Display for PolyhedronOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolyhedronOutcome::Computed(_) => write!(f, "computed"),
            PolyhedronOutcome::TooFewPoints => write!(f, "too few points"),
            PolyhedronOutcome::DegenerateHull => write!(f, "degenerate hull"),
        }
    }
}

/// 位点 -> 方法 -> 多面体结果
pub type PolyhedronTable = BTreeMap<String, BTreeMap<String, PolyhedronOutcome>>;

/// 计算全部 (位点, 方法) 的多面体指标
pub fn compute_polyhedron_table<C, S, G>(
    connections: &C,
    selector: &S,
    geometry: &G,
) -> Result<PolyhedronTable>
where
    C: ConnectionProvider + ?Sized,
    S: CnSelector + ?Sized,
    G: PolyhedronGeometry + ?Sized,
{
    let mut table = PolyhedronTable::new();

    for label in selector.selected_sites() {
        let site = connections
            .site(label)
            .ok_or_else(|| CoordfeatError::UnknownSite(label.to_string()))?;
        let row = table.entry(label.to_string()).or_default();

        for method in selector.methods(label) {
            let cn = selector
                .coordination_number(label, method)
                .ok_or_else(|| CoordfeatError::InvalidConnections {
                    site: label.to_string(),
                    reason: format!("no CN selected for method '{}'", method),
                })?;
            let shell = coordination_shell(label, site, cn)?;

            if shell.len() <= 3 {
                row.insert(method.to_string(), PolyhedronOutcome::TooFewPoints);
                continue;
            }

            // 中心原子放在最后
            let mut points: Vec<[f64; 3]> = shell.iter().map(|n| n.position).collect();
            points.push(site.position);

            let outcome = match geometry.compute(&points) {
                Ok(metrics) => PolyhedronOutcome::Computed(metrics),
                Err(HullError::TooFewPoints(_)) => PolyhedronOutcome::TooFewPoints,
                Err(HullError::Degenerate) => {
                    output::print_warning(&format!(
                        "Error in determining polyhedron for {} using {} - skipped",
                        label, method
                    ));
                    PolyhedronOutcome::DegenerateHull
                }
            };
            row.insert(method.to_string(), outcome);
        }
    }

    Ok(table)
}

/// 只保留计算成功的记录；没有任何成功记录的位点不出现在结果中
pub fn to_metric_table(table: &PolyhedronTable) -> MetricTable {
    let mut metrics = MetricTable::new();

    for (label, methods) in table {
        for (method, outcome) in methods {
            if let Some(m) = outcome.metrics() {
                let record: MetricRecord = m
                    .named_values()
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value))
                    .collect();
                metrics.insert(label.as_str(), method.as_str(), record);
            }
        }
    }

    metrics
}
