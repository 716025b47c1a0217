use crate::envelope::part::constraints::envelopepartconstraint::{
    EnvelopePartConstraint,
    EnvelopePartConstraintType
};
use crate::math::point2d::Point2D;


/// A constant speed floor or ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedConstraint {
    speed: f64,
    kind: EnvelopePartConstraintType
}

impl SpeedConstraint {
    pub fn new(speed: f64, kind: EnvelopePartConstraintType) -> SpeedConstraint {
        SpeedConstraint { speed, kind }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn kind(&self) -> EnvelopePartConstraintType {
        self.kind
    }
}

impl EnvelopePartConstraint for SpeedConstraint {
    fn check_point(&self, _position: f64, speed: f64) -> bool {
        !self.kind.is_violated(speed, self.speed)
    }

    fn step_check(&self, start: Point2D, end: Point2D) -> Option<Point2D> {
        if !self.kind.is_violated(end.y(), self.speed) {
            return None;
        }
        let dy = end.y() - start.y();
        if dy == 0.0 {
            return Some(start);
        }
        let ratio = ((self.speed - start.y()) / dy).clamp(0.0, 1.0);
        let position = start.x() + ratio * (end.x() - start.x());
        Some(Point2D::new(position, self.speed))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_truncates_at_bound_speed() {
        let floor = SpeedConstraint::new(0.0, EnvelopePartConstraintType::Floor);
        assert!(floor.check_point(10.0, 0.0));
        assert!(!floor.check_point(10.0, -0.1));
        assert_eq!(floor.step_check(Point2D::new(10.0, 2.0), Point2D::new(9.0, 1.0)), None);
        let cut = floor.step_check(Point2D::new(10.0, 2.0), Point2D::new(8.0, -2.0)).unwrap();
        assert_eq!(cut, Point2D::new(9.0, 0.0));
    }

    #[test]
    fn ceiling_truncates_at_bound_speed() {
        let ceiling = SpeedConstraint::new(5.0, EnvelopePartConstraintType::Ceiling);
        assert!(ceiling.check_point(0.0, 5.0));
        assert!(!ceiling.check_point(0.0, 5.5));
        let cut = ceiling.step_check(Point2D::new(0.0, 4.0), Point2D::new(4.0, 6.0)).unwrap();
        assert_eq!(cut, Point2D::new(2.0, 5.0));
    }
}
