use crate::envelope::envelopeerror::{
    EnvelopeError,
    EnvelopeResult
};
use crate::envelope::envelopepart::EnvelopePart;

/// Tolerance used when checking that consecutive parts touch or cover a path.
pub const COVERAGE_EPSILON: f64 = 1E-6;


/// A speed profile made of position-sorted, non-overlapping parts.
///
/// Adjacent parts may share their boundary position. Gaps between parts are allowed
/// unless the envelope was built with [`Envelope::new_continuous`].
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    parts: Vec<EnvelopePart>
}

impl Envelope {
    /// Sorts `parts` by position and checks that none of them overlap.
    pub fn new(mut parts: Vec<EnvelopePart>) -> EnvelopeResult<Envelope> {
        parts.sort_by(|lhs, rhs| lhs.begin_pos().total_cmp(&rhs.begin_pos()));
        for index in 1..parts.len() {
            let previous_end_pos = parts[index - 1].end_pos();
            let begin_pos = parts[index].begin_pos();
            if begin_pos < previous_end_pos - COVERAGE_EPSILON {
                return Err(EnvelopeError::Overlap { index, begin_pos, previous_end_pos });
            }
        }
        Ok(Envelope { parts })
    }

    /// Like [`Envelope::new`], but also requires the parts to cover `[0, path_length]`
    /// exactly, without gaps.
    pub fn new_continuous(parts: Vec<EnvelopePart>, path_length: f64) -> EnvelopeResult<Envelope> {
        let envelope = Envelope::new(parts)?;
        let (first, last) = match (envelope.parts.first(), envelope.parts.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(EnvelopeError::Coverage { position: 0.0, path_length })
        };
        if first.begin_pos().abs() > COVERAGE_EPSILON {
            return Err(EnvelopeError::Coverage { position: 0.0, path_length });
        }
        for index in 1..envelope.parts.len() {
            let previous_end_pos = envelope.parts[index - 1].end_pos();
            if envelope.parts[index].begin_pos() > previous_end_pos + COVERAGE_EPSILON {
                return Err(EnvelopeError::Coverage { position: previous_end_pos, path_length });
            }
        }
        if (last.end_pos() - path_length).abs() > COVERAGE_EPSILON {
            return Err(EnvelopeError::Coverage { position: last.end_pos().min(path_length), path_length });
        }
        Ok(envelope)
    }

    pub fn get(&self, i: usize) -> &EnvelopePart {
        &self.parts[i]
    }

    pub fn size(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn parts(&self) -> &[EnvelopePart] {
        &self.parts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnvelopePart> {
        self.parts.iter()
    }

    pub fn into_parts(self) -> Vec<EnvelopePart> {
        self.parts
    }

    pub fn begin_pos(&self) -> Option<f64> {
        self.parts.first().map(|part| part.begin_pos())
    }

    pub fn end_pos(&self) -> Option<f64> {
        self.parts.last().map(|part| part.end_pos())
    }

    /// True when consecutive parts touch, with no gap between them.
    pub fn is_continuous(&self) -> bool {
        self.parts
            .windows(2)
            .all(|pair| pair[1].begin_pos() <= pair[0].end_pos() + COVERAGE_EPSILON)
    }

    pub fn total_time(&self) -> f64 {
        self.parts.iter().map(|part| part.total_time()).sum()
    }

    /// Index of the first part containing `position`.
    pub fn find_part(&self, position: f64) -> Option<usize> {
        let index = self.parts.partition_point(|part| part.end_pos() < position);
        match self.parts.get(index) {
            Some(part) if part.contains(position) => Some(index),
            _ => None
        }
    }

    /// Speed at `position`, or `None` when no part covers it.
    ///
    /// On a boundary shared by two parts, the higher of both speeds is returned.
    pub fn interpolate_speed(&self, position: f64) -> Option<f64> {
        let index = self.parts.partition_point(|part| part.end_pos() < position);
        let mut speed: Option<f64> = None;
        for part in self.parts.iter().skip(index).take(2) {
            if part.contains(position) {
                let part_speed = part.interpolate_speed(position);
                speed = Some(speed.map_or(part_speed, |s| s.max(part_speed)));
            }
        }
        speed
    }

    /// Lowest speed reached over `[begin, end]`, considering every covering part.
    pub fn min_speed_over(&self, begin: f64, end: f64) -> Option<f64> {
        let mut result: Option<f64> = None;
        for part in &self.parts {
            if part.end_pos() < begin || part.begin_pos() > end {
                continue;
            }
            let mut speeds = vec![
                part.interpolate_speed(begin.max(part.begin_pos())),
                part.interpolate_speed(end.min(part.end_pos()))
            ];
            for i in 0..part.point_count() {
                if part.point_pos(i) > begin && part.point_pos(i) < end {
                    speeds.push(part.point_speed(i));
                }
            }
            let part_min = speeds.into_iter().fold(f64::INFINITY, f64::min);
            result = Some(result.map_or(part_min, |s| s.min(part_min)));
        }
        result
    }
}
