use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvelopeError {
    #[error("braking curve anchor out of bounds (position = {position}, path length = {path_length})")]
    InvalidAnchor { position: f64, path_length: f64 },

    #[error("envelope part {index} begins at {begin_pos} before the previous part ends at {previous_end_pos}")]
    Overlap { index: usize, begin_pos: f64, previous_end_pos: f64 },

    #[error("envelope does not cover [0, {path_length}]: missing coverage at {position}")]
    Coverage { position: f64, path_length: f64 },

    #[error("an envelope part needs at least 2 points, got {0}")]
    NotEnoughPoints(usize),

    #[error("mismatched point arrays: {positions} positions, {speeds} speeds, {times} times")]
    MismatchedLengths { positions: usize, speeds: usize, times: usize },

    #[error("positions are not strictly increasing at index {0}")]
    NonMonotonicPositions(usize),

    #[error("invalid speed {speed} at index {index}")]
    InvalidSpeed { index: usize, speed: f64 },

    #[error("invalid cumulative time {time} at index {index}")]
    InvalidTime { index: usize, time: f64 },

    #[error("segment starting at index {0} has zero speed at both ends")]
    StationarySegment(usize),

    #[error("no more envelope parts in this direction")]
    NoMoreTransitions,

    #[error("invalid constraint: {0}")]
    InvalidConstraint(String),

    #[error("invalid time step {0}, expected a finite positive value")]
    InvalidTimeStep(f64),
}

pub type EnvelopeResult<T> = Result<T, EnvelopeError>;
