//! # 特征组装
//!
//! 串联多面体指标、角色计数与两级归约，得到结构的全局特征。
//! 元素数不是 2、3、4 时直接失败，不输出部分结果。
//!
//! ## 依赖关系
//! - 被 `commands/featurize.rs` 调用
//! - 使用 `features/polyhedron.rs`, `features/role_count.rs`, `features/reduce.rs`

use super::polyhedron::{compute_polyhedron_table, to_metric_table};
use super::reduce::{reduce_by_site, reduce_globally};
use super::role_count::count_roles;
use crate::error::Result;
use crate::geometry::PolyhedronGeometry;
use crate::models::{CnSelector, ConnectionProvider, FeatureRow, GlobalSummary};
use crate::roles::RoleClassifier;

/// 结构的两组全局特征
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinationFeatures {
    /// 多面体指标的全局统计
    pub polyhedron: GlobalSummary,
    /// 近邻角色计数的全局统计
    pub role_counts: GlobalSummary,
}

impl CoordinationFeatures {
    /// 展开为特征行
    pub fn to_row(&self, structure: &str) -> FeatureRow {
        let mut row = FeatureRow::new(structure);
        row.extend_with_summary(&self.polyhedron);
        row.extend_with_summary(&self.role_counts);
        row
    }
}

/// 计算一个结构的配位特征
pub fn assemble<S, G, R>(
    structure: &S,
    unique_elements: &[String],
    geometry: &G,
    classifier: &R,
) -> Result<CoordinationFeatures>
where
    S: ConnectionProvider + CnSelector + ?Sized,
    G: PolyhedronGeometry + ?Sized,
    R: RoleClassifier + ?Sized,
{
    // 先确定角色，元素数不支持时不做任何几何计算
    let roles = classifier.classify(unique_elements)?;

    let polyhedra = compute_polyhedron_table(structure, structure, geometry)?;

    let polyhedron = reduce_globally(&reduce_by_site(&to_metric_table(&polyhedra)));

    let counts = count_roles(structure, &polyhedra, &roles)?;
    let role_counts = reduce_globally(&reduce_by_site(&counts));

    Ok(CoordinationFeatures {
        polyhedron,
        role_counts,
    })
}
