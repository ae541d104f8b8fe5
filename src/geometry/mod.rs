//! # 几何原语模块
//!
//! 为配位多面体提供凸包构造与形状指标计算。特征流水线只通过
//! `PolyhedronGeometry` trait 调用这里，测试里可以替换成桩实现。
//!
//! ## 子模块
//! - `vector`: 三维向量运算
//! - `hull`: 小点集凸包（三角化面片）
//! - `metrics`: 多面体形状指标
//!
//! ## 依赖关系
//! - 被 `features/polyhedron.rs` 调用

pub mod hull;
pub mod metrics;
pub mod vector;

pub use hull::ConvexHull;
pub use metrics::{compute_polyhedron_metrics, PolyhedronMetrics};

use thiserror::Error;

/// 凸包构造失败
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HullError {
    #[error("at least 4 points are required, got {0}")]
    TooFewPoints(usize),

    #[error("point set is degenerate (coplanar, collinear or coincident)")]
    Degenerate,
}

/// 几何原语：点集 -> 多面体指标
///
/// 约定点集最后一个点为中心原子。
pub trait PolyhedronGeometry {
    fn compute(&self, points: &[[f64; 3]]) -> Result<PolyhedronMetrics, HullError>;
}

/// 默认几何原语：内置凸包 + 指标计算
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvexHullGeometry;

impl PolyhedronGeometry for ConvexHullGeometry {
    fn compute(&self, points: &[[f64; 3]]) -> Result<PolyhedronMetrics, HullError> {
        let hull = ConvexHull::new(points)?;
        Ok(compute_polyhedron_metrics(points, &hull))
    }
}
