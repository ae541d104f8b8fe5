//! # 多面体形状指标
//!
//! 从凸包与中心原子计算配位多面体的形状描述符。
//! 点集约定：最后一个点为中心原子，其余为配位壳层原子。
//!
//! ## 依赖关系
//! - 被 `geometry/mod.rs` 的 `ConvexHullGeometry` 调用
//! - 使用 `geometry/hull.rs`

use super::hull::ConvexHull;
use super::vector::{centroid, distance, scale};

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// 配位多面体指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyhedronMetrics {
    /// 多面体体积 (Å³)
    pub volume_of_polyhedron: f64,
    /// 多面体表面积 (Å²)
    pub surface_area_of_polyhedron: f64,
    /// 球度 π^(1/3) (6V)^(2/3) / A
    pub sphericity: f64,
    /// 凸包顶点平均位置到中心原子的距离 (Å)
    pub distance_from_avg_point_to_center: f64,
    /// 凸包顶点数（不含中心原子）
    pub number_of_vertices: usize,
    pub number_of_edges: usize,
    pub number_of_faces: usize,
    /// 中心原子到三角面片中心的最短距离 (Å)
    pub shortest_distance_to_face: f64,
    /// 中心原子到棱中点的最短距离 (Å)
    pub shortest_distance_to_edge: f64,
    /// 内切球体积，半径取 shortest_distance_to_face (Å³)
    pub volume_of_inscribed_sphere: f64,
    /// 内切球体积 / 多面体体积
    pub packing_efficiency: f64,
}

impl PolyhedronMetrics {
    /// 以固定顺序列出全部指标，供归约使用
    pub fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("volume_of_polyhedron", self.volume_of_polyhedron),
            ("surface_area_of_polyhedron", self.surface_area_of_polyhedron),
            ("sphericity", self.sphericity),
            (
                "distance_from_avg_point_to_center",
                self.distance_from_avg_point_to_center,
            ),
            ("number_of_vertices", self.number_of_vertices as f64),
            ("number_of_edges", self.number_of_edges as f64),
            ("number_of_faces", self.number_of_faces as f64),
            ("shortest_distance_to_face", self.shortest_distance_to_face),
            ("shortest_distance_to_edge", self.shortest_distance_to_edge),
            ("volume_of_inscribed_sphere", self.volume_of_inscribed_sphere),
            ("packing_efficiency", self.packing_efficiency),
        ]
    }
}

/// 计算多面体指标
pub fn compute_polyhedron_metrics(points: &[[f64; 3]], hull: &ConvexHull) -> PolyhedronMetrics {
    let center_index = points.len() - 1;
    let center = points[center_index];

    let avg_point = centroid(hull.vertices().iter().map(|&v| &points[v]));
    let distance_to_center = distance(&avg_point, &center);

    let edges = hull.edges();
    let shortest_distance_to_edge = edges
        .iter()
        .map(|(a, b)| {
            let mid = scale(
                &[
                    points[*a][0] + points[*b][0],
                    points[*a][1] + points[*b][1],
                    points[*a][2] + points[*b][2],
                ],
                0.5,
            );
            distance(&mid, &center)
        })
        .fold(f64::INFINITY, f64::min);

    let shortest_distance_to_face = hull
        .simplices()
        .iter()
        .map(|tri| distance(&centroid(tri.iter().map(|&v| &points[v])), &center))
        .fold(f64::INFINITY, f64::min);

    let volume = hull.volume();
    let area = hull.area();

    let volume_of_inscribed_sphere = 4.0 / 3.0 * PI * shortest_distance_to_face.powi(3);
    let packing_efficiency = if volume > 0.0 {
        volume_of_inscribed_sphere / volume
    } else {
        0.0
    };
    let sphericity = if area > 0.0 {
        PI.cbrt() * (6.0 * volume).powf(2.0 / 3.0) / area
    } else {
        0.0
    };

    let number_of_vertices = hull
        .vertices()
        .iter()
        .filter(|&&v| v != center_index)
        .count();

    PolyhedronMetrics {
        volume_of_polyhedron: volume,
        surface_area_of_polyhedron: area,
        sphericity,
        distance_from_avg_point_to_center: distance_to_center,
        number_of_vertices,
        number_of_edges: edges.len(),
        number_of_faces: hull.simplices().len(),
        shortest_distance_to_face,
        shortest_distance_to_edge,
        volume_of_inscribed_sphere,
        packing_efficiency,
    }
}
