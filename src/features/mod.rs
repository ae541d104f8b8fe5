//! # 配位环境特征模块
//!
//! 从连接表与 CN 选择结果计算结构的定长数值特征。
//!
//! ## 流水线
//! ```text
//! 连接表 + CN 选择 ──> polyhedron (多面体指标) ──> reduce (按位点) ──> reduce (全局)
//!                          │
//!          角色集合 ──> role_count (近邻角色计数) ──> reduce (按位点) ──> reduce (全局)
//! ```
//! `assemble` 串联以上步骤；`environment` 独立计算最短距离环境特征；
//! `export` 将特征行写成 CSV。
//!
//! ## 依赖关系
//! - 被 `commands/featurize.rs`, `commands/inspect.rs` 调用
//! - 使用 `models/`, `geometry/`, `roles/`

pub mod assemble;
pub mod environment;
pub mod export;
pub mod polyhedron;
pub mod reduce;
pub mod role_count;

pub use assemble::assemble;
pub use environment::compute_environment_features;
pub use polyhedron::{compute_polyhedron_table, to_metric_table, PolyhedronOutcome, PolyhedronTable};

use crate::error::{CoordfeatError, Result};
use crate::models::{Neighbor, SiteConnections};

/// 取位点最近的 `cn` 个近邻
fn coordination_shell<'a>(label: &str, site: &'a SiteConnections, cn: usize) -> Result<&'a [Neighbor]> {
    site.neighbors
        .get(..cn)
        .ok_or_else(|| CoordfeatError::InvalidConnections {
            site: label.to_string(),
            reason: format!(
                "CN {} exceeds the {} available neighbors",
                cn,
                site.neighbors.len()
            ),
        })
}
