use serde::Deserialize;

use crate::envelopesim::physicspath::PhysicsPath;
use crate::math::rangemap::RangeMap;


/// Thermal comfort setting, which changes the tractive effort available to the train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Comfort {
    #[default]
    Standard,
    AirConditioning,
    Heating
}


/// How a braking deceleration is applied.
///
/// `Const` decelerations are the resulting deceleration of the train. `Max` decelerations
/// are a braking force which adds to rolling resistance and grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GammaType {
    Const,
    #[default]
    Max
}


#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TractiveEffortPoint {
    speed: f64,
    max_effort: f64
}

impl TractiveEffortPoint {
    pub fn new(speed: f64, max_effort: f64) -> TractiveEffortPoint {
        TractiveEffortPoint { speed, max_effort }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn max_effort(&self) -> f64 {
        self.max_effort
    }
}

/// Maximum effort on a curve sorted by speed, linearly interpolated from an implicit
/// `(0, 0)` point. The last effort is held past the end of the curve.
pub fn interpolate_effort(curve: &[TractiveEffortPoint], speed: f64) -> f64 {
    let speed = speed.abs();
    let mut previous_speed = 0.0;
    let mut previous_effort = 0.0;
    for point in curve {
        if previous_speed <= speed && speed < point.speed {
            let coeff = (point.max_effort - previous_effort) / (point.speed - previous_speed);
            return previous_effort + coeff * (speed - previous_speed);
        }
        previous_speed = point.speed;
        previous_effort = point.max_effort;
    }
    previous_effort
}


/// Electrification mode and electrical profile in use on a range of the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeAndProfile {
    mode: String,
    profile: Option<String>
}

impl ModeAndProfile {
    pub fn new(mode: String, profile: Option<String>) -> ModeAndProfile {
        ModeAndProfile { mode, profile }
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }
}


/// Tractive effort curves along the path, and the conditions which selected them.
#[derive(Debug, Clone, Default)]
pub struct CurvesAndConditions {
    curves: RangeMap<Vec<TractiveEffortPoint>>,
    conditions: RangeMap<ModeAndProfile>
}

impl CurvesAndConditions {
    pub fn new(curves: RangeMap<Vec<TractiveEffortPoint>>,
               conditions: RangeMap<ModeAndProfile>) -> CurvesAndConditions {
        CurvesAndConditions { curves, conditions }
    }

    pub fn curves(&self) -> &RangeMap<Vec<TractiveEffortPoint>> {
        &self.curves
    }

    pub fn conditions(&self) -> &RangeMap<ModeAndProfile> {
        &self.conditions
    }

    pub fn into_parts(self) -> (RangeMap<Vec<TractiveEffortPoint>>, RangeMap<ModeAndProfile>) {
        (self.curves, self.conditions)
    }
}


/// Brake timings used to derive the ETCS intervention curves, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EtcsBrakeParams {
    /// Time before the traction effort is cut off once the brake is commanded.
    pub t_traction_cut_off: f64,
    /// Service brake build-up time, used by the service and warning curves.
    pub t_bs1: f64,
    pub t_bs2: f64,
    /// Emergency brake build-up time.
    pub t_be: f64
}


/// Physical characteristics of a train, as seen by the simulation.
///
/// Speeds are in m/s, forces in newtons, masses in kilograms and decelerations in m/s²
/// (positive values).
pub trait PhysicsRollingStock: Send + Sync {

    // ── Static characteristics ─────────────────────────────────────────────

    fn mass(&self) -> f64;

    /// Mass including the rotating inertia of the train.
    fn inertia(&self) -> f64;

    fn length(&self) -> f64;

    fn max_speed(&self) -> f64;

    // ── Forces ─────────────────────────────────────────────────────────────

    /// Force always opposed to the movement of the train.
    fn rolling_resistance(&self, speed: f64) -> f64;

    fn rolling_resistance_deriv(&self, speed: f64) -> f64;

    fn max_tractive_effort(&self, speed: f64) -> f64;

    // ── Braking ────────────────────────────────────────────────────────────

    fn max_service_braking_deceleration(&self, speed: f64) -> f64;

    fn max_emergency_braking_deceleration(&self, speed: f64) -> f64;

    /// Deceleration used for the ETCS guidance curve.
    fn max_normal_service_braking_deceleration(&self, speed: f64) -> f64 {
        self.max_service_braking_deceleration(speed)
    }

    fn gamma_type(&self) -> GammaType {
        GammaType::Max
    }

    fn etcs_brake_params(&self) -> EtcsBrakeParams {
        EtcsBrakeParams::default()
    }

    // ── Traction along a path ──────────────────────────────────────────────

    /// Effort curves to use on each range of `path`. Positions left out fall back to
    /// [`PhysicsRollingStock::max_tractive_effort`].
    fn tractive_effort_curves(&self, _path: &dyn PhysicsPath, _comfort: Comfort) -> CurvesAndConditions {
        CurvesAndConditions::default()
    }
}
