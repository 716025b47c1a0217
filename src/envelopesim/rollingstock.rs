use serde::Deserialize;

use crate::envelopesim::physicspath::PhysicsPath;
use crate::envelopesim::physicsrollingstock::{
    interpolate_effort,
    Comfort,
    CurvesAndConditions,
    EtcsBrakeParams,
    GammaType,
    ModeAndProfile,
    PhysicsRollingStock,
    TractiveEffortPoint
};
use crate::math::rangemap::RangeMap;


/// A deceleration applying from `speed` upward, until the next entry of its table.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DecelerationStep {
    speed: f64,
    deceleration: f64
}

impl DecelerationStep {
    pub fn new(speed: f64, deceleration: f64) -> DecelerationStep {
        DecelerationStep { speed, deceleration }
    }
}

/// Step lookup in a table sorted by speed. `None` when the table is empty.
fn lookup_deceleration(table: &[DecelerationStep], speed: f64) -> Option<f64> {
    let index = table.partition_point(|step| step.speed <= speed.abs());
    match (index, table.first()) {
        (_, None) => None,
        (0, Some(first)) => Some(first.deceleration),
        (index, Some(_)) => Some(table[index - 1].deceleration)
    }
}


/// Tractive effort curve used under an electrification mode and comfort setting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConditionalEffortCurve {
    mode: String,
    #[serde(default)]
    comfort: Comfort,
    curve: Vec<TractiveEffortPoint>
}

impl ConditionalEffortCurve {
    pub fn new(mode: String, comfort: Comfort, curve: Vec<TractiveEffortPoint>) -> ConditionalEffortCurve {
        ConditionalEffortCurve { mode, comfort, curve }
    }
}


#[derive(Deserialize)]
struct RollingStockJsonProp {
    name: String,
    length: f64,
    mass: f64,
    inertia_coefficient: f64,
    rolling_resistance: [f64; 3],
    max_speed: f64,
    gamma: f64,
    #[serde(default)]
    gamma_type: GammaType,
    tractive_effort_curve: Vec<TractiveEffortPoint>,
    #[serde(default)]
    conditional_effort_curves: Vec<ConditionalEffortCurve>,
    #[serde(default)]
    gamma_brake_emergency: Vec<DecelerationStep>,
    #[serde(default)]
    gamma_brake_service: Vec<DecelerationStep>,
    #[serde(default)]
    gamma_brake_normal_service: Vec<DecelerationStep>,
    #[serde(default)]
    etcs_brake_params: EtcsBrakeParams
}

impl From<RollingStockJsonProp> for RollingStock {
    fn from(prop: RollingStockJsonProp) -> RollingStock {
        let [a, b, c] = prop.rolling_resistance;
        RollingStock {
            name: prop.name,
            length: prop.length,
            mass: prop.mass,
            inertia: prop.mass * prop.inertia_coefficient,
            a,
            b,
            c,
            max_speed: prop.max_speed,
            gamma: prop.gamma,
            gamma_type: prop.gamma_type,
            tractive_effort_curve: prop.tractive_effort_curve,
            conditional_effort_curves: prop.conditional_effort_curves,
            gamma_brake_emergency: prop.gamma_brake_emergency,
            gamma_brake_service: prop.gamma_brake_service,
            gamma_brake_normal_service: prop.gamma_brake_normal_service,
            etcs_brake_params: prop.etcs_brake_params
        }
    }
}


/// A train described by the Davis equation and a tractive effort curve.
///
/// Braking uses the ETCS deceleration tables when they are given, and the constant
/// `gamma` deceleration otherwise.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RollingStockJsonProp")]
pub struct RollingStock {
    name: String,
    length: f64,
    mass: f64,
    inertia: f64,
    a: f64,
    b: f64,
    c: f64,
    max_speed: f64,
    gamma: f64,
    gamma_type: GammaType,
    tractive_effort_curve: Vec<TractiveEffortPoint>,
    conditional_effort_curves: Vec<ConditionalEffortCurve>,
    gamma_brake_emergency: Vec<DecelerationStep>,
    gamma_brake_service: Vec<DecelerationStep>,
    gamma_brake_normal_service: Vec<DecelerationStep>,
    etcs_brake_params: EtcsBrakeParams
}

impl RollingStock {
    /// `rolling_resistance` holds the `[A, B, C]` Davis coefficients.
    pub fn new(name: String,
               length: f64,
               mass: f64,
               inertia_coefficient: f64,
               rolling_resistance: [f64; 3],
               max_speed: f64,
               gamma: f64,
               tractive_effort_curve: Vec<TractiveEffortPoint>) -> RollingStock {
        RollingStockJsonProp {
            name,
            length,
            mass,
            inertia_coefficient,
            rolling_resistance,
            max_speed,
            gamma,
            gamma_type: GammaType::default(),
            tractive_effort_curve,
            conditional_effort_curves: Vec::new(),
            gamma_brake_emergency: Vec::new(),
            gamma_brake_service: Vec::new(),
            gamma_brake_normal_service: Vec::new(),
            etcs_brake_params: EtcsBrakeParams::default()
        }.into()
    }

    pub fn with_etcs_braking(mut self,
                             emergency: Vec<DecelerationStep>,
                             service: Vec<DecelerationStep>,
                             normal_service: Vec<DecelerationStep>,
                             params: EtcsBrakeParams) -> RollingStock {
        self.gamma_brake_emergency = emergency;
        self.gamma_brake_service = service;
        self.gamma_brake_normal_service = normal_service;
        self.etcs_brake_params = params;
        self
    }

    pub fn with_gamma_type(mut self, gamma_type: GammaType) -> RollingStock {
        self.gamma_type = gamma_type;
        self
    }

    pub fn with_conditional_effort_curves(mut self, curves: Vec<ConditionalEffortCurve>) -> RollingStock {
        self.conditional_effort_curves = curves;
        self
    }

    pub fn from_json_str(json: &str) -> Result<RollingStock, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// A 400 m, 900 t high speed train with ETCS braking data.
    pub fn fast_passenger() -> RollingStock {
        RollingStock::new(
            "fast_passenger".to_string(),
            400.0,
            900_000.0,
            1.05,
            [5400.0, 200.0, 12.0],
            300.0 / 3.6,
            0.5,
            vec![
                TractiveEffortPoint::new(0.0, 400_000.0),
                TractiveEffortPoint::new(20.0, 400_000.0),
                TractiveEffortPoint::new(40.0, 200_000.0),
                TractiveEffortPoint::new(83.4, 95_000.0),
            ]
        ).with_etcs_braking(
            vec![DecelerationStep::new(0.0, 0.9), DecelerationStep::new(50.0, 0.8)],
            vec![DecelerationStep::new(0.0, 0.6), DecelerationStep::new(50.0, 0.55)],
            vec![DecelerationStep::new(0.0, 0.5)],
            EtcsBrakeParams { t_traction_cut_off: 3.0, t_bs1: 2.0, t_bs2: 2.5, t_be: 4.0 }
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    fn find_curve(&self, mode: &str, comfort: Comfort) -> Option<&Vec<TractiveEffortPoint>> {
        self.conditional_effort_curves
            .iter()
            .find(|entry| entry.mode == mode && entry.comfort == comfort)
            .map(|entry| &entry.curve)
    }

    /// Curve for `mode` and `comfort`, falling back to the standard comfort curve.
    fn conditional_curve(&self, mode: &str, comfort: Comfort) -> Option<&Vec<TractiveEffortPoint>> {
        self.find_curve(mode, comfort).or_else(|| self.find_curve(mode, Comfort::Standard))
    }
}

impl PhysicsRollingStock for RollingStock {
    fn mass(&self) -> f64 {
        self.mass
    }

    fn inertia(&self) -> f64 {
        self.inertia
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn max_speed(&self) -> f64 {
        self.max_speed
    }

    // Davis equation
    fn rolling_resistance(&self, speed: f64) -> f64 {
        let speed = speed.abs();
        self.a + self.b * speed + self.c * speed * speed
    }

    fn rolling_resistance_deriv(&self, speed: f64) -> f64 {
        self.b + 2.0 * self.c * speed.abs()
    }

    fn max_tractive_effort(&self, speed: f64) -> f64 {
        interpolate_effort(&self.tractive_effort_curve, speed)
    }

    fn max_service_braking_deceleration(&self, speed: f64) -> f64 {
        lookup_deceleration(&self.gamma_brake_service, speed).unwrap_or(self.gamma)
    }

    fn max_emergency_braking_deceleration(&self, speed: f64) -> f64 {
        lookup_deceleration(&self.gamma_brake_emergency, speed).unwrap_or(self.gamma)
    }

    fn max_normal_service_braking_deceleration(&self, speed: f64) -> f64 {
        lookup_deceleration(&self.gamma_brake_normal_service, speed)
            .unwrap_or_else(|| self.max_service_braking_deceleration(speed))
    }

    fn gamma_type(&self) -> GammaType {
        self.gamma_type
    }

    fn etcs_brake_params(&self) -> EtcsBrakeParams {
        self.etcs_brake_params
    }

    fn tractive_effort_curves(&self, path: &dyn PhysicsPath, comfort: Comfort) -> CurvesAndConditions {
        let mut curves = Vec::new();
        let mut conditions = Vec::new();
        for range in path.electrification_ranges() {
            if let Some(curve) = self.conditional_curve(range.mode(), comfort) {
                curves.push((range.begin(), range.end(), curve.clone()));
            }
            let condition = ModeAndProfile::new(range.mode().to_string(), range.profile().map(str::to_string));
            conditions.push((range.begin(), range.end(), condition));
        }
        CurvesAndConditions::new(RangeMap::from_ranges(curves), RangeMap::from_ranges(conditions))
    }
}
