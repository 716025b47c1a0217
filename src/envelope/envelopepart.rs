use crate::envelope::direction::Direction;
use crate::envelope::envelopeerror::{
    EnvelopeError,
    EnvelopeResult
};
use crate::envelope::envelopeprofile::EnvelopeProfile;
use crate::math::point2d::Point2D;

/// Positions closer than this are considered the same point.
pub const POSITION_EPSILON: f64 = 1E-9;

// ─────────────────────────────────────────────────────────────────────────────
// Kinematics helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Time needed to travel `distance` while the speed changes linearly in time from
/// `begin_speed` to `end_speed` (constant acceleration).
pub fn interpolate_time_delta(distance: f64, begin_speed: f64, end_speed: f64) -> f64 {
    let distance = distance.abs();
    if distance == 0.0 {
        return 0.0;
    }
    2.0 * distance / (begin_speed + end_speed)
}

fn generate_times(positions: &[f64], speeds: &[f64]) -> Vec<f64> {
    let mut times = Vec::with_capacity(positions.len());
    let mut total = 0.0;
    times.push(total);
    for i in 1..positions.len() {
        total += interpolate_time_delta(positions[i] - positions[i - 1], speeds[i - 1], speeds[i]);
        times.push(total);
    }
    times
}

fn validate_points(positions: &[f64], speeds: &[f64]) -> EnvelopeResult<()> {
    if positions.len() != speeds.len() {
        return Err(EnvelopeError::MismatchedLengths {
            positions: positions.len(),
            speeds: speeds.len(),
            times: positions.len()
        });
    }
    if positions.len() < 2 {
        return Err(EnvelopeError::NotEnoughPoints(positions.len()));
    }
    for (index, speed) in speeds.iter().enumerate() {
        if !speed.is_finite() || *speed < 0.0 {
            return Err(EnvelopeError::InvalidSpeed { index, speed: *speed });
        }
    }
    if !positions[0].is_finite() {
        return Err(EnvelopeError::NonMonotonicPositions(0));
    }
    for i in 1..positions.len() {
        if !positions[i].is_finite() || positions[i] <= positions[i - 1] {
            return Err(EnvelopeError::NonMonotonicPositions(i));
        }
        if speeds[i - 1] == 0.0 && speeds[i] == 0.0 {
            return Err(EnvelopeError::StationarySegment(i - 1));
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// EnvelopePart
// ─────────────────────────────────────────────────────────────────────────────

/// An immutable speed-over-position polyline.
///
/// Points are stored by increasing position, whatever the direction the part was built
/// in. Every point carries the cumulative travel time since the first point.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopePart {
    profile: EnvelopeProfile,
    positions: Vec<f64>,
    speeds: Vec<f64>,
    times: Vec<f64>
}

impl EnvelopePart {
    /// Builds a part from its points, deriving travel times from the kinematics of each
    /// segment.
    pub fn new(profile: EnvelopeProfile,
               positions: Vec<f64>,
               speeds: Vec<f64>) -> EnvelopeResult<EnvelopePart> {
        validate_points(&positions, &speeds)?;
        let times = generate_times(&positions, &speeds);
        Ok(EnvelopePart { profile, positions, speeds, times })
    }

    /// Builds a part from points with already known cumulative times.
    pub fn new_with_times(profile: EnvelopeProfile,
                          positions: Vec<f64>,
                          speeds: Vec<f64>,
                          times: Vec<f64>) -> EnvelopeResult<EnvelopePart> {
        validate_points(&positions, &speeds)?;
        if times.len() != positions.len() {
            return Err(EnvelopeError::MismatchedLengths {
                positions: positions.len(),
                speeds: speeds.len(),
                times: times.len()
            });
        }
        for (index, time) in times.iter().enumerate() {
            let previous = if index == 0 { 0.0 } else { times[index - 1] };
            if !time.is_finite() || *time < previous {
                return Err(EnvelopeError::InvalidTime { index, time: *time });
            }
        }
        Ok(EnvelopePart { profile, positions, speeds, times })
    }

    pub fn profile(&self) -> EnvelopeProfile {
        self.profile
    }

    pub fn point_count(&self) -> usize {
        self.positions.len()
    }

    pub fn point_pos(&self, i: usize) -> f64 {
        self.positions[i]
    }

    pub fn point_speed(&self, i: usize) -> f64 {
        self.speeds[i]
    }

    pub fn point_time(&self, i: usize) -> f64 {
        self.times[i]
    }

    pub fn point(&self, i: usize) -> Point2D {
        Point2D::new(self.positions[i], self.speeds[i])
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn speeds(&self) -> &[f64] {
        &self.speeds
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn begin_pos(&self) -> f64 {
        self.positions[0]
    }

    pub fn end_pos(&self) -> f64 {
        self.positions[self.positions.len() - 1]
    }

    pub fn begin_speed(&self) -> f64 {
        self.speeds[0]
    }

    pub fn end_speed(&self) -> f64 {
        self.speeds[self.speeds.len() - 1]
    }

    pub fn total_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    pub fn length(&self) -> f64 {
        self.end_pos() - self.begin_pos()
    }

    /// First position of the part when walking in `direction`.
    pub fn begin_pos_toward(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Forward => self.begin_pos(),
            Direction::Backward => self.end_pos()
        }
    }

    pub fn end_pos_toward(&self, direction: Direction) -> f64 {
        self.begin_pos_toward(direction.opposite())
    }

    pub fn begin_speed_toward(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Forward => self.begin_speed(),
            Direction::Backward => self.end_speed()
        }
    }

    pub fn end_speed_toward(&self, direction: Direction) -> f64 {
        self.begin_speed_toward(direction.opposite())
    }

    pub fn min_speed(&self) -> f64 {
        self.speeds.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max_speed(&self) -> f64 {
        self.speeds.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn contains(&self, position: f64) -> bool {
        position >= self.begin_pos() && position <= self.end_pos()
    }

    /// Index of the segment `[i, i + 1]` holding `position`, clamped to the first and
    /// last segments.
    pub fn find_segment(&self, position: f64) -> usize {
        let last_segment = self.positions.len() - 2;
        if position <= self.begin_pos() {
            0
        } else if position >= self.end_pos() {
            last_segment
        } else {
            (self.positions.partition_point(|pos| *pos <= position) - 1).min(last_segment)
        }
    }

    /// Index of a stored point at `position`, if there is one.
    fn point_index_at(&self, position: f64) -> Option<usize> {
        let i = self.find_segment(position);
        if (self.positions[i] - position).abs() <= POSITION_EPSILON {
            Some(i)
        } else if (self.positions[i + 1] - position).abs() <= POSITION_EPSILON {
            Some(i + 1)
        } else {
            None
        }
    }

    /// Speed at `position`, interpolated linearly between points. Positions outside the
    /// part are clamped to its ends.
    pub fn interpolate_speed(&self, position: f64) -> f64 {
        let position = position.clamp(self.begin_pos(), self.end_pos());
        if let Some(i) = self.point_index_at(position) {
            return self.speeds[i];
        }
        let i = self.find_segment(position);
        Point2D::interpolate(&self.point(i), &self.point(i + 1), position)
    }

    /// Cumulative time at `position`, assuming constant acceleration on each segment.
    pub fn interpolate_time(&self, position: f64) -> f64 {
        let position = position.clamp(self.begin_pos(), self.end_pos());
        if let Some(i) = self.point_index_at(position) {
            return self.times[i];
        }
        let i = self.find_segment(position);
        let speed = self.interpolate_speed(position);
        self.times[i] + interpolate_time_delta(position - self.positions[i], self.speeds[i], speed)
    }

    /// First position, scanning by increasing position, at which the part reaches `speed`.
    pub fn interpolate_position(&self, speed: f64) -> Option<f64> {
        for i in 0..(self.positions.len() - 1) {
            let (lhs, rhs) = (self.speeds[i], self.speeds[i + 1]);
            if speed == lhs {
                return Some(self.positions[i]);
            }
            if (lhs < speed && speed <= rhs) || (rhs <= speed && speed < lhs) {
                let ratio = (speed - lhs) / (rhs - lhs);
                return Some(self.positions[i] + ratio * (self.positions[i + 1] - self.positions[i]));
            }
        }
        None
    }

    /// The portion of this part between `begin` and `end` (clamped to the part), with
    /// times re-based so that the slice starts at 0.
    pub fn slice(&self, begin: f64, end: f64) -> EnvelopeResult<EnvelopePart> {
        let begin = begin.max(self.begin_pos());
        let end = end.min(self.end_pos());
        let base_time = self.interpolate_time(begin);

        let mut positions = vec![begin];
        let mut speeds = vec![self.interpolate_speed(begin)];
        let mut times = vec![0.0];
        for i in 0..self.positions.len() {
            let pos = self.positions[i];
            if pos > begin + POSITION_EPSILON && pos < end - POSITION_EPSILON {
                positions.push(pos);
                speeds.push(self.speeds[i]);
                times.push(self.times[i] - base_time);
            }
        }
        positions.push(end);
        speeds.push(self.interpolate_speed(end));
        times.push(self.interpolate_time(end) - base_time);

        EnvelopePart::new_with_times(self.profile, positions, speeds, times)
    }
}
