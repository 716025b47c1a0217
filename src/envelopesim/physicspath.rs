use serde::Deserialize;


/// Electrification of a `[begin, end]` range of the path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElectrificationRange {
    begin: f64,
    end: f64,
    mode: String,
    #[serde(default)]
    profile: Option<String>
}

impl ElectrificationRange {
    pub fn new(begin: f64, end: f64, mode: String, profile: Option<String>) -> ElectrificationRange {
        ElectrificationRange { begin, end, mode, profile }
    }

    pub fn begin(&self) -> f64 {
        self.begin
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }
}


/// The track a train runs on, as seen by the simulation. Positions are in meters from
/// the start of the path.
pub trait PhysicsPath: Send + Sync {
    fn length(&self) -> f64;

    /// Lowest grade over `[begin, end]`, in meters per kilometer.
    fn lowest_grade_over(&self, begin: f64, end: f64) -> f64;

    fn electrification_ranges(&self) -> Vec<ElectrificationRange> {
        Vec::new()
    }
}
