use crate::envelope::envelopeerror::{
    EnvelopeError,
    EnvelopeResult
};
use crate::envelope::part::constraints::envelopepartconstraint::EnvelopePartConstraint;
use crate::math::point2d::Point2D;


/// Keeps a part inside `[begin, end]`, usually the bounds of the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionConstraint {
    begin: f64,
    end: f64
}

impl PositionConstraint {
    pub fn new(begin: f64, end: f64) -> EnvelopeResult<PositionConstraint> {
        if !(begin.is_finite() && end.is_finite()) || end < begin {
            return Err(EnvelopeError::InvalidConstraint(format!(
                "position range [{}, {}] is empty", begin, end
            )));
        }
        Ok(PositionConstraint { begin, end })
    }

    pub fn begin(&self) -> f64 {
        self.begin
    }

    pub fn end(&self) -> f64 {
        self.end
    }
}

impl EnvelopePartConstraint for PositionConstraint {
    fn check_point(&self, position: f64, _speed: f64) -> bool {
        position >= self.begin && position <= self.end
    }

    fn step_check(&self, start: Point2D, end: Point2D) -> Option<Point2D> {
        let bound = if end.x() < self.begin {
            self.begin
        } else if end.x() > self.end {
            self.end
        } else {
            return None;
        };
        Some(Point2D::new(bound, Point2D::interpolate(&start, &end, bound)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_range_is_rejected() {
        assert!(PositionConstraint::new(10.0, 0.0).is_err());
        assert!(PositionConstraint::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn step_is_cut_at_range_bound() {
        let constraint = PositionConstraint::new(0.0, 100.0).unwrap();
        assert!(constraint.check_point(0.0, 3.0));
        assert!(!constraint.check_point(100.5, 3.0));
        assert_eq!(constraint.step_check(Point2D::new(50.0, 1.0), Point2D::new(60.0, 2.0)), None);
        assert_eq!(
            constraint.step_check(Point2D::new(2.0, 4.0), Point2D::new(-2.0, 6.0)),
            Some(Point2D::new(0.0, 5.0))
        );
        assert_eq!(
            constraint.step_check(Point2D::new(98.0, 1.0), Point2D::new(102.0, 3.0)),
            Some(Point2D::new(100.0, 2.0))
        );
    }
}
