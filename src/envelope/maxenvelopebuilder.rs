use log::debug;

use crate::envelope::envelope::Envelope;
use crate::envelope::envelopeerror::EnvelopeResult;
use crate::envelope::envelopepart::{
    EnvelopePart,
    POSITION_EPSILON
};
use crate::math::point2d::segment_intersection;

/// Speeds closer than this are considered equal when picking the highest part.
const SPEED_EPSILON: f64 = 1E-9;


/// Merges possibly overlapping parts into the envelope of their pointwise maximum.
///
/// The result is made of slices of the input parts: wherever several parts overlap, the
/// one with the highest speed is kept, and the earliest added part wins ties.
#[derive(Debug, Default)]
pub struct MaxEnvelopeBuilder {
    parts: Vec<EnvelopePart>
}

impl MaxEnvelopeBuilder {
    pub fn new() -> MaxEnvelopeBuilder {
        MaxEnvelopeBuilder::default()
    }

    pub fn add_part(&mut self, part: EnvelopePart) {
        self.parts.push(part);
    }

    pub fn add_parts<I>(&mut self, parts: I)
    where
        I: IntoIterator<Item = EnvelopePart>
    {
        self.parts.extend(parts);
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Every vertex of every part, plus every point where two parts cross.
    fn breakpoints(&self) -> Vec<f64> {
        let mut breakpoints: Vec<f64> = self.parts
            .iter()
            .flat_map(|part| part.positions().iter().copied())
            .collect();

        for (i, lhs) in self.parts.iter().enumerate() {
            for rhs in self.parts.iter().skip(i + 1) {
                if lhs.end_pos() <= rhs.begin_pos() || rhs.end_pos() <= lhs.begin_pos() {
                    continue;
                }
                for a in 0..(lhs.point_count() - 1) {
                    for b in 0..(rhs.point_count() - 1) {
                        let crossing = segment_intersection(
                            &lhs.point(a), &lhs.point(a + 1),
                            &rhs.point(b), &rhs.point(b + 1)
                        );
                        if let Some(point) = crossing {
                            breakpoints.push(point.x());
                        }
                    }
                }
            }
        }

        breakpoints.sort_by(|lhs, rhs| lhs.total_cmp(rhs));
        breakpoints.dedup_by(|next, kept| *next - *kept <= POSITION_EPSILON);
        breakpoints
    }

    /// Index of the highest part covering the whole `[begin, end]` interval.
    fn winner(&self, begin: f64, end: f64) -> Option<usize> {
        let middle = 0.5 * (begin + end);
        let mut best: Option<(usize, f64)> = None;
        for (index, part) in self.parts.iter().enumerate() {
            if part.begin_pos() > begin + POSITION_EPSILON || part.end_pos() < end - POSITION_EPSILON {
                continue;
            }
            let speed = part.interpolate_speed(middle);
            best = match best {
                Some((_, best_speed)) if speed <= best_speed + SPEED_EPSILON => best,
                _ => Some((index, speed))
            };
        }
        best.map(|(index, _)| index)
    }

    pub fn build(self) -> EnvelopeResult<Envelope> {
        let breakpoints = self.breakpoints();

        // (winner, begin, end) runs of consecutive elementary intervals
        let mut groups: Vec<(usize, f64, f64)> = Vec::new();
        for window in breakpoints.windows(2) {
            let (begin, end) = (window[0], window[1]);
            let winner = match self.winner(begin, end) {
                Some(winner) => winner,
                None => continue
            };
            match groups.last_mut() {
                Some(last) if last.0 == winner && last.2 == begin => last.2 = end,
                _ => groups.push((winner, begin, end))
            }
        }

        let mut parts = Vec::with_capacity(groups.len());
        for (winner, begin, end) in groups {
            parts.push(self.parts[winner].slice(begin, end)?);
        }
        debug!("merged {} envelope parts into {}", self.parts.len(), parts.len());
        Envelope::new(parts)
    }
}
