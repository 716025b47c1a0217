use crate::envelope::envelope::Envelope;
use crate::envelope::part::constraints::envelopepartconstraint::{
    EnvelopePartConstraint,
    EnvelopePartConstraintType
};
use crate::math::point2d::Point2D;

const SPEED_TOLERANCE: f64 = 1E-9;


/// Bounds a part by the speed of another envelope. Positions the envelope does not cover
/// are left unconstrained.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeConstraint<'a> {
    envelope: &'a Envelope,
    kind: EnvelopePartConstraintType
}

impl<'a> EnvelopeConstraint<'a> {
    pub fn new(envelope: &'a Envelope, kind: EnvelopePartConstraintType) -> EnvelopeConstraint<'a> {
        EnvelopeConstraint { envelope, kind }
    }

    pub fn envelope(&self) -> &'a Envelope {
        self.envelope
    }

    pub fn kind(&self) -> EnvelopePartConstraintType {
        self.kind
    }

    /// Step start, envelope vertices strictly inside the step, and step end, ordered from
    /// `start` to `end`.
    fn breakpoints(&self, start: f64, end: f64) -> Vec<f64> {
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        let mut breakpoints: Vec<f64> = self.envelope
            .iter()
            .filter(|part| part.end_pos() > lo && part.begin_pos() < hi)
            .flat_map(|part| part.positions().iter().copied())
            .filter(|pos| *pos > lo && *pos < hi)
            .collect();
        breakpoints.push(start);
        breakpoints.push(end);
        if start <= end {
            breakpoints.sort_by(|lhs, rhs| lhs.total_cmp(rhs));
        } else {
            breakpoints.sort_by(|lhs, rhs| rhs.total_cmp(lhs));
        }
        breakpoints.dedup();
        breakpoints
    }
}

impl EnvelopePartConstraint for EnvelopeConstraint<'_> {
    fn check_point(&self, position: f64, speed: f64) -> bool {
        match self.envelope.interpolate_speed(position) {
            Some(bound) => !self.kind.is_violated(speed, bound + self.kind.sign() * SPEED_TOLERANCE),
            None => true
        }
    }

    fn step_check(&self, start: Point2D, end: Point2D) -> Option<Point2D> {
        let sign = self.kind.sign();
        let breakpoints = self.breakpoints(start.x(), end.x());
        for window in breakpoints.windows(2) {
            let (p, q) = (window[0], window[1]);
            let part = match self.envelope.find_part(0.5 * (p + q)) {
                Some(index) => self.envelope.get(index),
                None => continue
            };
            let step_p = Point2D::interpolate(&start, &end, p);
            let step_q = Point2D::interpolate(&start, &end, q);
            let bound_p = part.interpolate_speed(p);
            let bound_q = part.interpolate_speed(q);
            let d_p = sign * (step_p - bound_p);
            let d_q = sign * (step_q - bound_q);

            // the bound drops below the step at a part boundary
            if d_p > SPEED_TOLERANCE {
                return Some(Point2D::new(p, step_p));
            }
            if d_q > SPEED_TOLERANCE {
                let ratio = if d_p < 0.0 { d_p / (d_p - d_q) } else { 0.0 };
                let position = p + ratio * (q - p);
                return Some(Point2D::new(position, part.interpolate_speed(position)));
            }
        }
        None
    }
}
