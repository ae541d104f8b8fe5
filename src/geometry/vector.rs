//! # 三维向量运算

/// 向量差 a - b
pub fn sub(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// 向量叉积
pub fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// 向量点积
pub fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// 向量模长
pub fn norm(a: &[f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

/// 数乘
pub fn scale(a: &[f64; 3], k: f64) -> [f64; 3] {
    [a[0] * k, a[1] * k, a[2] * k]
}

/// 两点距离
pub fn distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    norm(&sub(a, b))
}

/// 点集质心，空集返回原点
pub fn centroid<'a, I>(points: I) -> [f64; 3]
where
    I: IntoIterator<Item = &'a [f64; 3]>,
{
    let mut sum = [0.0; 3];
    let mut count = 0usize;
    for p in points {
        sum[0] += p[0];
        sum[1] += p[1];
        sum[2] += p[2];
        count += 1;
    }
    if count == 0 {
        return sum;
    }
    scale(&sum, 1.0 / count as f64)
}
