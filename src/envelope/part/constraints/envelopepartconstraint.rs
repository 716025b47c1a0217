use crate::math::point2d::Point2D;


/// Side of a speed bound a part must stay on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopePartConstraintType {
    /// The speed must stay at or above the bound.
    Floor,
    /// The speed must stay at or below the bound.
    Ceiling
}

impl EnvelopePartConstraintType {
    /// +1 for a ceiling and -1 for a floor, so that `sign * (speed - bound) > 0` means
    /// the bound is violated.
    pub fn sign(&self) -> f64 {
        match self {
            EnvelopePartConstraintType::Floor => -1.0,
            EnvelopePartConstraintType::Ceiling => 1.0
        }
    }

    pub fn is_violated(&self, speed: f64, bound: f64) -> bool {
        self.sign() * (speed - bound) > 0.0
    }
}


/// A limit checked by [`ConstrainedEnvelopePartBuilder`] while a part grows.
///
/// [`ConstrainedEnvelopePartBuilder`]: crate::envelope::part::constrainedenvelopepartbuilder::ConstrainedEnvelopePartBuilder
pub trait EnvelopePartConstraint: Send + Sync {
    /// Whether a part may start at this point.
    fn check_point(&self, position: f64, speed: f64) -> bool;

    /// Checks the step from `start` to `end`, where `start` is known to be valid.
    ///
    /// Returns the point where the step leaves the allowed area, or `None` when the whole
    /// step is valid. The returned point lies on the step segment, between `start` and
    /// `end`.
    fn step_check(&self, start: Point2D, end: Point2D) -> Option<Point2D>;
}
