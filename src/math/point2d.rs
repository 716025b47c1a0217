use nalgebra::{
    Matrix2,
    Vector2
};


/// A (position, speed) sample of a speed profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn slope(lhs_pt: &Point2D, rhs_pt: &Point2D) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }

    /// Linear interpolation of `y` along the line through both points.
    ///
    /// When both points share the same `x`, the left point's value is returned.
    pub fn interpolate(lhs_pt: &Point2D, rhs_pt: &Point2D, x: f64) -> f64 {
        let dx = rhs_pt.x - lhs_pt.x;
        if dx == 0.0 {
            return lhs_pt.y;
        }
        lhs_pt.y + (rhs_pt.y - lhs_pt.y) * (x - lhs_pt.x) / dx
    }
}


/// Crossing point of segments `a0-a1` and `b0-b1`, restricted to the open interval where
/// both segments are defined. Both segments must be given with increasing `x`.
///
/// Returns `None` when the segments do not overlap in `x`, are parallel, or only touch at
/// the boundary of the common interval.
pub fn segment_intersection(a0: &Point2D,
                            a1: &Point2D,
                            b0: &Point2D,
                            b1: &Point2D) -> Option<Point2D> {
    let lo = a0.x.max(b0.x);
    let hi = a1.x.min(b1.x);
    if hi <= lo {
        return None;
    }

    let diff_lo = Point2D::interpolate(a0, a1, lo) - Point2D::interpolate(b0, b1, lo);
    let diff_hi = Point2D::interpolate(a0, a1, hi) - Point2D::interpolate(b0, b1, hi);
    if diff_lo * diff_hi >= 0.0 {
        return None;
    }

    // y - slope_a * x = a0.y - slope_a * a0.x
    // y - slope_b * x = b0.y - slope_b * b0.x
    let slope_a = Point2D::slope(a0, a1);
    let slope_b = Point2D::slope(b0, b1);
    let mat = Matrix2::new(-slope_a, 1.0,
                           -slope_b, 1.0);
    let rhs = Vector2::new(a0.y - slope_a * a0.x,
                           b0.y - slope_b * b0.x);
    let solution = mat.lu().solve(&rhs)?;
    let x = solution[0].clamp(lo, hi);
    if x <= lo || x >= hi {
        return None;
    }
    Some(Point2D::new(x, solution[1]))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_on_segment() {
        let a = Point2D::new(0.0, 1.0);
        let b = Point2D::new(2.0, 3.0);
        assert_eq!(Point2D::interpolate(&a, &b, 1.0), 2.0);
        assert_eq!(Point2D::slope(&a, &b), 1.0);
    }

    #[test]
    fn crossing_segments_intersect() {
        let p = segment_intersection(
            &Point2D::new(1.0, 1.0), &Point2D::new(3.0, 3.0),
            &Point2D::new(0.0, 2.0), &Point2D::new(5.0, 2.0),
        ).unwrap();
        assert!((p.x() - 2.0).abs() < 1e-12);
        assert!((p.y() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn parallel_or_disjoint_segments_do_not_intersect() {
        assert!(segment_intersection(
            &Point2D::new(0.0, 1.0), &Point2D::new(1.0, 1.0),
            &Point2D::new(0.0, 2.0), &Point2D::new(1.0, 2.0),
        ).is_none());
        assert!(segment_intersection(
            &Point2D::new(0.0, 0.0), &Point2D::new(1.0, 3.0),
            &Point2D::new(2.0, 3.0), &Point2D::new(4.0, 0.0),
        ).is_none());
    }

    #[test]
    fn touching_at_interval_end_is_not_a_crossing() {
        assert!(segment_intersection(
            &Point2D::new(0.0, 0.0), &Point2D::new(1.0, 1.0),
            &Point2D::new(0.0, 1.0), &Point2D::new(1.0, 1.0),
        ).is_none());
    }
}
