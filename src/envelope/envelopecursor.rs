use crate::envelope::direction::Direction;
use crate::envelope::envelope::Envelope;
use crate::envelope::envelopeerror::{
    EnvelopeError,
    EnvelopeResult
};
use crate::envelope::envelopepart::EnvelopePart;

/// Transition predicate: the speed increases when entering the next part.
pub fn increase(prev_speed: f64, next_speed: f64) -> bool {
    prev_speed < next_speed
}

/// Transition predicate: the speed decreases when entering the next part.
pub fn decrease(prev_speed: f64, next_speed: f64) -> bool {
    prev_speed > next_speed
}


/// A pointer walking the parts of an envelope in one direction.
///
/// The cursor only ever moves its own pointer. It never wraps around, and once it has
/// reached the last part in its direction, transition searches stop.
pub struct EnvelopeCursor<'a> {
    envelope: &'a Envelope,
    direction: Direction,
    part_index: usize,
    position: f64,
    reached_end: bool
}

impl<'a> EnvelopeCursor<'a> {
    pub fn new(envelope: &'a Envelope, direction: Direction) -> EnvelopeCursor<'a> {
        if envelope.is_empty() {
            return EnvelopeCursor { envelope, direction, part_index: 0, position: 0.0, reached_end: true };
        }
        let part_index = match direction {
            Direction::Forward => 0,
            Direction::Backward => envelope.size() - 1
        };
        let position = envelope.get(part_index).begin_pos_toward(direction);
        EnvelopeCursor { envelope, direction, part_index, position, reached_end: false }
    }

    pub fn forward(envelope: &'a Envelope) -> EnvelopeCursor<'a> {
        EnvelopeCursor::new(envelope, Direction::Forward)
    }

    pub fn backward(envelope: &'a Envelope) -> EnvelopeCursor<'a> {
        EnvelopeCursor::new(envelope, Direction::Backward)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn part_index(&self) -> usize {
        self.part_index
    }

    pub fn has_reached_end(&self) -> bool {
        self.reached_end
    }

    /// Current part. `None` only for an empty envelope.
    pub fn part(&self) -> Option<&'a EnvelopePart> {
        self.envelope.parts().get(self.part_index)
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Speed of the current part at the current position.
    pub fn speed(&self) -> Option<f64> {
        self.part().map(|part| part.interpolate_speed(self.position))
    }

    fn neighbour_index(&self, direction: Direction) -> Option<usize> {
        if self.envelope.is_empty() {
            return None;
        }
        match direction {
            Direction::Forward if self.part_index + 1 < self.envelope.size() => Some(self.part_index + 1),
            Direction::Backward if self.part_index > 0 => Some(self.part_index - 1),
            _ => None
        }
    }

    fn move_to(&mut self, part_index: usize, direction: Direction) {
        self.part_index = part_index;
        self.position = self.envelope.get(part_index).begin_pos_toward(direction);
    }

    /// Scans part boundaries in the cursor direction, starting at the current part, for
    /// the first one where `predicate(prev_speed, next_speed)` holds.
    ///
    /// On success the cursor stays on the part being left, at the boundary position, and
    /// `true` is returned. Call [`EnvelopeCursor::next_part`] before searching again.
    pub fn find_part_transition<P>(&mut self, predicate: P) -> bool
    where
        P: Fn(f64, f64) -> bool
    {
        if self.reached_end {
            return false;
        }
        loop {
            let next_index = match self.neighbour_index(self.direction) {
                Some(index) => index,
                None => {
                    self.reached_end = true;
                    return false;
                }
            };
            let prev_part = self.envelope.get(self.part_index);
            let next_part = self.envelope.get(next_index);
            let prev_speed = prev_part.end_speed_toward(self.direction);
            let next_speed = next_part.begin_speed_toward(self.direction);
            if predicate(prev_speed, next_speed) {
                self.position = prev_part.end_pos_toward(self.direction);
                return true;
            }
            self.move_to(next_index, self.direction);
        }
    }

    /// Moves to the following part in the cursor direction.
    pub fn next_part(&mut self) -> EnvelopeResult<()> {
        let index = self.neighbour_index(self.direction).ok_or(EnvelopeError::NoMoreTransitions)?;
        self.move_to(index, self.direction);
        Ok(())
    }

    /// Moves to the preceding part, against the cursor direction.
    pub fn previous_part(&mut self) -> EnvelopeResult<()> {
        let index = self.neighbour_index(self.direction.opposite()).ok_or(EnvelopeError::NoMoreTransitions)?;
        self.move_to(index, self.direction);
        self.reached_end = false;
        Ok(())
    }
}
