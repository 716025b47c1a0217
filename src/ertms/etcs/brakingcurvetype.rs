use serde::{
    Deserialize,
    Serialize
};

use crate::envelopesim::envelopesimcontext::UseCase;
use crate::ertms::etcs::fixedvaluedata::*;
use crate::ertms::etcs::nationalvalues::NationalValues;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrakingCurveType {
    /// Emergency brake deceleration.
    EBD,
    /// Emergency brake intervention.
    EBI,
    /// Service brake deceleration.
    SBD,
    /// Service brake intervention.
    SBI,
    SBI1,
    SBI2,
    /// Guidance.
    GUI,
    WARNING,
    /// Permitted speed.
    PS,
    /// Indication.
    IND
}

impl BrakingCurveType {
    /// `(v_min, v_max, dv_min, dv_max)` of the speed offset of the supervision limits.
    pub fn speed_offset_parameters(&self) -> Option<(f64, f64, f64, f64)> {
        match self {
            BrakingCurveType::EBI => Some((V_EBI_MIN, V_EBI_MAX, DV_EBI_MIN, DV_EBI_MAX)),
            BrakingCurveType::SBI => Some((V_SBI_MIN, V_SBI_MAX, DV_SBI_MIN, DV_SBI_MAX)),
            BrakingCurveType::WARNING => Some((V_WARNING_MIN, V_WARNING_MAX, DV_WARNING_MIN, DV_WARNING_MAX)),
            _ => None
        }
    }

    /// Speed added to the MRSP to get the ceiling of this curve family.
    pub fn compute_dv(&self, speed: f64, national_values: &NationalValues) -> f64 {
        match self {
            BrakingCurveType::EBD | BrakingCurveType::SBD | BrakingCurveType::GUI => national_values.v_delta0(speed),
            _ => match self.speed_offset_parameters() {
                Some((v_min, v_max, dv_min, dv_max)) => linear_speed_offset(speed, v_min, v_max, dv_min, dv_max),
                None => 0.0
            }
        }
    }

    /// Braking model used to integrate this family, if it is integrated at all.
    pub fn use_case(&self) -> Option<UseCase> {
        match self {
            BrakingCurveType::EBD => Some(UseCase::EtcsEbd),
            BrakingCurveType::SBD => Some(UseCase::EtcsSbd),
            BrakingCurveType::GUI => Some(UseCase::EtcsGui),
            _ => None
        }
    }

    /// The family this one is derived from by shifting its points.
    pub fn reference(&self) -> Option<BrakingCurveType> {
        match self {
            BrakingCurveType::EBI => Some(BrakingCurveType::EBD),
            BrakingCurveType::SBI | BrakingCurveType::WARNING => Some(BrakingCurveType::SBD),
            _ => None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const KMH: f64 = 1.0 / 3.6;

    #[test]
    fn deceleration_curves_use_speed_accuracy() {
        let national_values = NationalValues::default();
        assert_eq!(BrakingCurveType::EBD.compute_dv(10.0, &national_values), v_ura(10.0));
        assert_eq!(BrakingCurveType::GUI.compute_dv(10.0, &NationalValues::new(true)), 0.0);
    }

    #[test]
    fn intervention_offsets() {
        let national_values = NationalValues::new(true);
        assert_eq!(BrakingCurveType::EBI.compute_dv(50.0 * KMH, &national_values), DV_EBI_MIN);
        assert!((BrakingCurveType::EBI.compute_dv(160.0 * KMH, &national_values) - 11.25 * KMH).abs() < 1e-12);
        assert_eq!(BrakingCurveType::SBI.compute_dv(300.0 * KMH, &national_values), DV_SBI_MAX);
        assert!((BrakingCurveType::WARNING.compute_dv(125.0 * KMH, &national_values) - 4.5 * KMH).abs() < 1e-12);
        assert_eq!(BrakingCurveType::PS.compute_dv(125.0 * KMH, &national_values), 0.0);
    }

    #[test]
    fn derived_families() {
        assert_eq!(BrakingCurveType::EBI.reference(), Some(BrakingCurveType::EBD));
        assert_eq!(BrakingCurveType::WARNING.reference(), Some(BrakingCurveType::SBD));
        assert_eq!(BrakingCurveType::EBD.reference(), None);
        assert_eq!(BrakingCurveType::SBI.use_case(), None);
        assert_eq!(BrakingCurveType::GUI.use_case(), Some(UseCase::EtcsGui));
    }
}
