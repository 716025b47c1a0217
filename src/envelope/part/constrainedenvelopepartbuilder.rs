use crate::envelope::direction::Direction;
use crate::envelope::envelopeerror::EnvelopeResult;
use crate::envelope::envelopepart::{
    interpolate_time_delta,
    EnvelopePart,
    POSITION_EPSILON
};
use crate::envelope::part::constraints::envelopepartconstraint::EnvelopePartConstraint;
use crate::envelope::part::envelopepartbuilder::EnvelopePartBuilder;
use crate::math::point2d::Point2D;


/// An [`EnvelopePartBuilder`] which refuses steps leaving the area allowed by its
/// constraints.
///
/// A step crossing a bound is truncated at the crossing point and the builder reports
/// that integration must stop.
pub struct ConstrainedEnvelopePartBuilder<'a> {
    part_builder: EnvelopePartBuilder,
    constraints: Vec<Box<dyn EnvelopePartConstraint + 'a>>,
    direction: Direction,
    last_point: Option<Point2D>
}

impl<'a> ConstrainedEnvelopePartBuilder<'a> {
    pub fn new(part_builder: EnvelopePartBuilder,
               constraints: Vec<Box<dyn EnvelopePartConstraint + 'a>>) -> ConstrainedEnvelopePartBuilder<'a> {
        let direction = part_builder.direction();
        ConstrainedEnvelopePartBuilder { part_builder, constraints, direction, last_point: None }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn point_count(&self) -> usize {
        self.part_builder.point_count()
    }

    pub fn last_pos(&self) -> Option<f64> {
        self.last_point.map(|point| point.x())
    }

    pub fn last_speed(&self) -> Option<f64> {
        self.last_point.map(|point| point.y())
    }

    /// Starts the part, unless the first point already violates a constraint.
    pub fn init_envelope_part(&mut self, position: f64, speed: f64, direction: Direction) -> bool {
        if !self.constraints.iter().all(|constraint| constraint.check_point(position, speed)) {
            return false;
        }
        self.direction = direction;
        self.part_builder.init_envelope_part(position, speed, direction);
        self.last_point = Some(Point2D::new(position, speed));
        true
    }

    /// Adds a step, returning `false` once integration must stop.
    ///
    /// When a constraint is crossed, the step is cut at the crossing point. The truncated
    /// step is kept if it still moves the part forward, with its duration recomputed from
    /// the kinematics of the shortened segment.
    pub fn add_step(&mut self, position: f64, speed: f64, time_delta: f64) -> bool {
        let start = match self.last_point {
            Some(point) => point,
            None => return false
        };
        let mut end = Point2D::new(position, speed);
        let mut truncated = false;
        for constraint in &self.constraints {
            if let Some(cut) = constraint.step_check(start, end) {
                end = cut;
                truncated = true;
            }
        }

        let progress = (end.x() - start.x()) * self.direction.sign();
        if progress <= POSITION_EPSILON {
            return false;
        }
        let time_delta = if truncated {
            interpolate_time_delta(end.x() - start.x(), start.y(), end.y())
        } else {
            time_delta
        };
        self.part_builder.add_step(end.x(), end.y(), time_delta);
        self.last_point = Some(end);
        !truncated
    }

    pub fn build(self) -> EnvelopeResult<EnvelopePart> {
        self.part_builder.build()
    }
}
