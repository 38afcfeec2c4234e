//! Small vector helpers used by the analyzer.

/// A point or direction in 3D space.
pub type Vec3 = [f64; 3];

/// Zero vector.
pub const ZERO: Vec3 = [0.0, 0.0, 0.0];

/// Component-wise `a - b`.
pub fn sub3(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Dot product of two 3D vectors.
pub fn dot3(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Euclidean length.
pub fn length3(v: Vec3) -> f64 {
    dot3(v, v).sqrt()
}

/// Returns `v` scaled to unit length, or the zero vector when `v` is
/// shorter than `1e-12`.
pub fn normalize3(v: Vec3) -> Vec3 {
    let len = length3(v);
    if len > 1e-12 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        ZERO
    }
}

/// Arithmetic mean of a set of positions. Empty input yields the origin.
pub fn centroid<I>(points: I) -> Vec3
where
    I: IntoIterator<Item = Vec3>,
{
    let mut sum = ZERO;
    let mut n = 0usize;
    for p in points {
        sum[0] += p[0];
        sum[1] += p[1];
        sum[2] += p[2];
        n += 1;
    }
    if n == 0 {
        return ZERO;
    }
    let n = n as f64;
    [sum[0] / n, sum[1] / n, sum[2] / n]
}

/// Unit normal of a polygon loop using Newell's method.
///
/// Stays well defined for non-planar and non-convex loops. Counter-clockwise
/// loops (seen from the side the normal points to) give a positive
/// orientation. A loop with no area yields the zero vector.
pub fn newell_normal(loop_points: &[Vec3]) -> Vec3 {
    let n = loop_points.len();
    let mut normal = ZERO;
    for i in 0..n {
        let cur = loop_points[i];
        let next = loop_points[(i + 1) % n];
        normal[0] += (cur[1] - next[1]) * (cur[2] + next[2]);
        normal[1] += (cur[2] - next[2]) * (cur[0] + next[0]);
        normal[2] += (cur[0] - next[0]) * (cur[1] + next[1]);
    }
    normalize3(normal)
}
