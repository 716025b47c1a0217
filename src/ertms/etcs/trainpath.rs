use serde::Deserialize;


/// A detector along a track range, acting as an ETCS marker board.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Detector {
    id: String,
    /// Distance from the beginning of the range, in meters.
    offset: f64
}

impl Detector {
    pub fn new(id: String, offset: f64) -> Detector {
        Detector { id, offset }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }
}


/// A stretch of track of the path, with the detectors it holds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackRange {
    /// Position of the range start along the path, in meters.
    path_begin: f64,
    length: f64,
    #[serde(default)]
    detectors: Vec<Detector>
}

impl TrackRange {
    pub fn new(path_begin: f64, length: f64, detectors: Vec<Detector>) -> TrackRange {
        TrackRange { path_begin, length, detectors }
    }

    pub fn path_begin(&self) -> f64 {
        self.path_begin
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }
}


/// The ordered track ranges a train runs over.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TrainPath {
    ranges: Vec<TrackRange>
}

impl TrainPath {
    pub fn new(ranges: Vec<TrackRange>) -> TrainPath {
        TrainPath { ranges }
    }

    pub fn ranges(&self) -> &[TrackRange] {
        &self.ranges
    }

    pub fn length(&self) -> f64 {
        self.ranges.iter().map(|range| range.length).sum()
    }

    /// Path positions of every detector held by a non-empty range.
    pub fn marker_board_positions(&self) -> Vec<f64> {
        self.ranges
            .iter()
            .filter(|range| range.length != 0.0)
            .flat_map(|range| range.detectors.iter().map(move |detector| range.path_begin + detector.offset))
            .collect()
    }
}
