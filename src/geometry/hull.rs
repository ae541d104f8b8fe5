//! # 凸包构造
//!
//! 面向配位多面体（通常不超过 ~20 个点）的穷举式凸包算法。
//!
//! ## 算法概述
//! 1. 选出一个非退化的种子四面体，判断点集是否共面
//! 2. 枚举所有三点组成的平面，保留全部点都位于同一侧的支撑平面
//! 3. 同一平面上的点投影到二维求凸多边形，再扇形三角化
//!
//! 输出面片均为三角形，法向朝外。
//!
//! ## 依赖关系
//! - 被 `geometry/metrics.rs` 和 `geometry/mod.rs` 使用

use super::vector::{centroid, cross, distance, dot, norm, scale, sub};
use super::HullError;

use std::collections::BTreeSet;

/// 相对于点集尺度的共面判定容差
const RELATIVE_TOLERANCE: f64 = 1e-8;

/// 三维凸包
#[derive(Debug, Clone)]
pub struct ConvexHull {
    /// 凸包顶点（输入点索引，升序）
    vertices: Vec<usize>,
    /// 三角面片（输入点索引，逆时针朝外）
    simplices: Vec<[usize; 3]>,
    /// 体积 (Å³)
    volume: f64,
    /// 表面积 (Å²)
    area: f64,
}

impl ConvexHull {
    /// 构造凸包，少于 4 点或点集退化时失败
    pub fn new(points: &[[f64; 3]]) -> Result<Self, HullError> {
        let n = points.len();
        if n < 4 {
            return Err(HullError::TooFewPoints(n));
        }

        let extent = points
            .iter()
            .map(|p| distance(p, &points[0]))
            .fold(0.0, f64::max);
        if extent <= 0.0 || !extent.is_finite() {
            return Err(HullError::Degenerate);
        }
        let tol = RELATIVE_TOLERANCE * extent;

        let interior = seed_interior_point(points, tol)?;

        let mut seen: BTreeSet<Vec<usize>> = BTreeSet::new();
        let mut simplices = Vec::new();

        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    let normal = cross(&sub(&points[j], &points[i]), &sub(&points[k], &points[i]));
                    let len = norm(&normal);
                    if len <= tol * extent {
                        continue;
                    }

                    // 法向朝外：内部点必须位于负侧
                    let mut unit = scale(&normal, 1.0 / len);
                    if dot(&unit, &sub(&interior, &points[i])) > 0.0 {
                        unit = scale(&unit, -1.0);
                    }

                    let Some(members) = supporting_members(points, &points[i], &unit, tol) else {
                        continue;
                    };
                    if !seen.insert(members.clone()) {
                        continue;
                    }

                    let polygon = order_facet(points, &members, &unit, tol * extent);
                    for w in 1..polygon.len().saturating_sub(1) {
                        simplices.push([polygon[0], polygon[w], polygon[w + 1]]);
                    }
                }
            }
        }

        if simplices.is_empty() {
            return Err(HullError::Degenerate);
        }

        let vertices: BTreeSet<usize> = simplices.iter().flatten().copied().collect();
        let vertices: Vec<usize> = vertices.into_iter().collect();

        let reference = centroid(vertices.iter().map(|&v| &points[v]));
        let mut volume = 0.0;
        let mut area = 0.0;
        for [a, b, c] in &simplices {
            let (pa, pb, pc) = (&points[*a], &points[*b], &points[*c]);
            let ab = sub(pb, pa);
            let ac = sub(pc, pa);
            area += norm(&cross(&ab, &ac)) / 2.0;

            let ra = sub(pa, &reference);
            let rb = sub(pb, &reference);
            let rc = sub(pc, &reference);
            volume += dot(&ra, &cross(&rb, &rc)).abs() / 6.0;
        }

        Ok(ConvexHull {
            vertices,
            simplices,
            volume,
            area,
        })
    }

    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn simplices(&self) -> &[[usize; 3]] {
        &self.simplices
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    /// 三角面片的全部边（含三角化对角线），索引对升序
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = BTreeSet::new();
        for tri in &self.simplices {
            for e in 0..3 {
                let a = tri[e];
                let b = tri[(e + 1) % 3];
                edges.insert((a.min(b), a.max(b)));
            }
        }
        edges.into_iter().collect()
    }
}

/// 找到种子四面体并返回其质心（严格位于凸包内部）
fn seed_interior_point(points: &[[f64; 3]], tol: f64) -> Result<[f64; 3], HullError> {
    let p0 = points[0];

    let (i1, d1) = argmax(points, |p| distance(p, &p0));
    if d1 <= tol {
        return Err(HullError::Degenerate);
    }

    let axis = sub(&points[i1], &p0);
    let axis_len = norm(&axis);
    let (i2, d2) = argmax(points, |p| norm(&cross(&axis, &sub(p, &p0))) / axis_len);
    if d2 <= tol {
        return Err(HullError::Degenerate);
    }

    let normal = cross(&axis, &sub(&points[i2], &p0));
    let unit = scale(&normal, 1.0 / norm(&normal));
    let (i3, d3) = argmax(points, |p| dot(&unit, &sub(p, &p0)).abs());
    if d3 <= tol {
        return Err(HullError::Degenerate);
    }

    Ok(centroid([&p0, &points[i1], &points[i2], &points[i3]]))
}

fn argmax<F>(points: &[[f64; 3]], f: F) -> (usize, f64)
where
    F: Fn(&[f64; 3]) -> f64,
{
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, f(p)))
        .fold((0, f64::NEG_INFINITY), |best, cur| if cur.1 > best.1 { cur } else { best })
}

/// 若平面为支撑平面，返回平面上的点索引（升序）
fn supporting_members(
    points: &[[f64; 3]],
    origin: &[f64; 3],
    outward: &[f64; 3],
    tol: f64,
) -> Option<Vec<usize>> {
    let mut members = Vec::new();
    for (m, p) in points.iter().enumerate() {
        let s = dot(outward, &sub(p, origin));
        if s > tol {
            return None;
        }
        if s.abs() <= tol {
            members.push(m);
        }
    }
    Some(members)
}

/// 将共面点排成绕外法向逆时针的凸多边形，去掉共线与重合点
fn order_facet(points: &[[f64; 3]], members: &[usize], outward: &[f64; 3], tol: f64) -> Vec<usize> {
    let origin = points[members[0]];
    let far = members
        .iter()
        .copied()
        .max_by(|a, b| distance(&points[*a], &origin).total_cmp(&distance(&points[*b], &origin)))
        .unwrap_or(members[0]);

    let u_raw = sub(&points[far], &origin);
    let u_len = norm(&u_raw);
    if u_len <= 0.0 {
        return Vec::new();
    }
    let u = scale(&u_raw, 1.0 / u_len);
    // (u, v, outward) 构成右手系
    let v = cross(outward, &u);

    let mut projected: Vec<(f64, f64, usize)> = members
        .iter()
        .map(|&m| {
            let d = sub(&points[m], &origin);
            (dot(&d, &u), dot(&d, &v), m)
        })
        .collect();
    projected.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let turn = |o: &(f64, f64, usize), a: &(f64, f64, usize), b: &(f64, f64, usize)| {
        (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
    };

    let mut lower: Vec<(f64, f64, usize)> = Vec::new();
    for p in &projected {
        while lower.len() >= 2 && turn(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= tol {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<(f64, f64, usize)> = Vec::new();
    for p in projected.iter().rev() {
        while upper.len() >= 2 && turn(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= tol {
            upper.pop();
        }
        upper.push(*p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);

    if lower.len() < 3 {
        return Vec::new();
    }
    lower.into_iter().map(|(_, _, m)| m).collect()
}
