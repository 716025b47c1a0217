use crate::envelope::direction::Direction;
use crate::envelope::envelopeerror::EnvelopeResult;
use crate::envelope::envelopepart::EnvelopePart;
use crate::envelope::envelopeprofile::EnvelopeProfile;


/// Accumulates the points of a part in the order they are integrated.
///
/// A part grown backward receives its points by decreasing position; they are put back in
/// increasing order by [`EnvelopePartBuilder::build`].
#[derive(Debug, Clone)]
pub struct EnvelopePartBuilder {
    profile: EnvelopeProfile,
    direction: Direction,
    positions: Vec<f64>,
    speeds: Vec<f64>,
    time_deltas: Vec<f64>
}

impl EnvelopePartBuilder {
    pub fn new(profile: EnvelopeProfile) -> EnvelopePartBuilder {
        EnvelopePartBuilder {
            profile,
            direction: Direction::Forward,
            positions: Vec::new(),
            speeds: Vec::new(),
            time_deltas: Vec::new()
        }
    }

    /// Sets the first point and the growth direction, discarding any previous point.
    pub fn init_envelope_part(&mut self, position: f64, speed: f64, direction: Direction) {
        self.direction = direction;
        self.positions.clear();
        self.speeds.clear();
        self.time_deltas.clear();
        self.positions.push(position);
        self.speeds.push(speed);
    }

    /// Appends a point reached after `time_delta` seconds.
    pub fn add_step(&mut self, position: f64, speed: f64, time_delta: f64) {
        self.positions.push(position);
        self.speeds.push(speed);
        self.time_deltas.push(time_delta);
    }

    pub fn profile(&self) -> EnvelopeProfile {
        self.profile
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn point_count(&self) -> usize {
        self.positions.len()
    }

    pub fn last_pos(&self) -> Option<f64> {
        self.positions.last().copied()
    }

    pub fn last_speed(&self) -> Option<f64> {
        self.speeds.last().copied()
    }

    pub fn build(mut self) -> EnvelopeResult<EnvelopePart> {
        if self.direction == Direction::Backward {
            self.positions.reverse();
            self.speeds.reverse();
            self.time_deltas.reverse();
        }
        let mut times = Vec::with_capacity(self.positions.len());
        let mut total = 0.0;
        if !self.positions.is_empty() {
            times.push(total);
        }
        for time_delta in &self.time_deltas {
            total += time_delta;
            times.push(total);
        }
        EnvelopePart::new_with_times(self.profile, self.positions, self.speeds, times)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::envelopeerror::EnvelopeError;

    #[test]
    fn backward_part_is_stored_by_increasing_position() {
        let mut builder = EnvelopePartBuilder::new(EnvelopeProfile::Braking);
        builder.init_envelope_part(10.0, 0.0, Direction::Backward);
        builder.add_step(8.0, 2.0, 2.0);
        builder.add_step(4.0, 4.0, 1.5);
        assert_eq!(builder.point_count(), 3);
        assert_eq!(builder.last_pos(), Some(4.0));

        let part = builder.build().unwrap();
        assert_eq!(part.positions(), &[4.0, 8.0, 10.0]);
        assert_eq!(part.speeds(), &[4.0, 2.0, 0.0]);
        assert_eq!(part.times(), &[0.0, 1.5, 3.5]);
    }

    #[test]
    fn single_point_cannot_be_built() {
        let mut builder = EnvelopePartBuilder::new(EnvelopeProfile::Accelerating);
        builder.init_envelope_part(0.0, 0.0, Direction::Forward);
        assert_eq!(builder.build(), Err(EnvelopeError::NotEnoughPoints(1)));
    }
}
