use std::sync::Arc;

use log::{
    debug,
    trace,
    warn
};

use crate::envelope::direction::Direction;
use crate::envelope::envelope::Envelope;
use crate::envelope::envelopecursor::{
    increase,
    EnvelopeCursor
};
use crate::envelope::envelopeerror::{
    EnvelopeError,
    EnvelopeResult
};
use crate::envelope::envelopepart::EnvelopePart;
use crate::envelope::envelopeprofile::EnvelopeProfile;
use crate::envelope::maxenvelopebuilder::MaxEnvelopeBuilder;
use crate::envelope::part::constrainedenvelopepartbuilder::ConstrainedEnvelopePartBuilder;
use crate::envelope::part::constraints::envelopeconstraint::EnvelopeConstraint;
use crate::envelope::part::constraints::envelopepartconstraint::{
    EnvelopePartConstraint,
    EnvelopePartConstraintType
};
use crate::envelope::part::constraints::positionconstraint::PositionConstraint;
use crate::envelope::part::constraints::speedconstraint::SpeedConstraint;
use crate::envelope::part::envelopepartbuilder::EnvelopePartBuilder;
use crate::envelopesim::envelopesimcontext::{
    EnvelopeSimContext,
    UseCase
};
use crate::envelopesim::overlays::decelerate;
use crate::envelopesim::physicspath::PhysicsPath;
use crate::envelopesim::physicsrollingstock::{
    Comfort,
    PhysicsRollingStock
};
use crate::envelopesim::trainphysicsintegrator::{
    compute_acceleration,
    weight_force
};
use crate::ertms::etcs::brakingcurvetype::BrakingCurveType;
use crate::ertms::etcs::fixedvaluedata::{
    A_EST2,
    T_DRIVER,
    T_WARNING
};
use crate::ertms::etcs::nationalvalues::NationalValues;
use crate::ertms::etcs::trainpath::TrainPath;


/// The ETCS braking curves of a path, one list of parts per curve family.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EtcsBrakingCurves {
    ebd: Vec<EnvelopePart>,
    ebi: Vec<EnvelopePart>,
    sbd: Vec<EnvelopePart>,
    sbi: Vec<EnvelopePart>,
    gui: Vec<EnvelopePart>,
    warning: Vec<EnvelopePart>
}

impl EtcsBrakingCurves {
    /// Parts of one family. Families which are not computed have no parts.
    pub fn curves(&self, curve_type: BrakingCurveType) -> &[EnvelopePart] {
        match curve_type {
            BrakingCurveType::EBD => &self.ebd,
            BrakingCurveType::EBI => &self.ebi,
            BrakingCurveType::SBD => &self.sbd,
            BrakingCurveType::SBI => &self.sbi,
            BrakingCurveType::GUI => &self.gui,
            BrakingCurveType::WARNING => &self.warning,
            _ => &[]
        }
    }

    /// Every part, grouped by family: EBD, SBD, GUI, EBI, SBI then WARNING.
    pub fn all(&self) -> Vec<EnvelopePart> {
        [&self.ebd, &self.sbd, &self.gui, &self.ebi, &self.sbi, &self.warning]
            .into_iter()
            .flat_map(|parts| parts.iter().cloned())
            .collect()
    }

    /// The parts of one family merged into a single envelope, keeping the highest speed.
    pub fn merged(&self, curve_type: BrakingCurveType) -> EnvelopeResult<Envelope> {
        let mut builder = MaxEnvelopeBuilder::new();
        builder.add_parts(self.curves(curve_type).iter().cloned());
        builder.build()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Orchestration
// ─────────────────────────────────────────────────────────────────────────────

/// Computes the EBD, SBD and GUI curves of `train_path` below the `mrsp`, then the EBI,
/// SBI and WARNING curves derived from them.
pub fn compute_etcs_braking_curves(train_path: &TrainPath,
                                   rolling_stock: Arc<dyn PhysicsRollingStock>,
                                   path: Arc<dyn PhysicsPath>,
                                   time_step: f64,
                                   comfort: Comfort,
                                   mrsp: &Envelope,
                                   national_values: &NationalValues) -> EnvelopeResult<EtcsBrakingCurves> {
    let context = EnvelopeSimContext::new(rolling_stock, path, time_step, comfort, UseCase::RunningTime)?;
    let deceleration_curves = |curve_type: BrakingCurveType| {
        compute_deceleration_curves(curve_type, train_path, &context, mrsp, national_values)
    };

    let (ebd, (sbd, gui)) = rayon::join(
        || deceleration_curves(BrakingCurveType::EBD),
        || rayon::join(
            || deceleration_curves(BrakingCurveType::SBD),
            || deceleration_curves(BrakingCurveType::GUI)
        )
    );
    let mut curves = EtcsBrakingCurves { ebd: ebd?, sbd: sbd?, gui: gui?, ..EtcsBrakingCurves::default() };

    let (ebi, (sbi, warning)) = rayon::join(
        || derive_curves(BrakingCurveType::EBI, &curves, &context, national_values),
        || rayon::join(
            || derive_curves(BrakingCurveType::SBI, &curves, &context, national_values),
            || derive_curves(BrakingCurveType::WARNING, &curves, &context, national_values)
        )
    );
    curves.ebi = ebi;
    curves.sbi = sbi;
    curves.warning = warning;
    Ok(curves)
}

/// The ceiling of a family: every MRSP part flattened to its lowest speed, raised by the
/// speed offset of the family.
pub fn compute_ceiling_envelope(curve_type: BrakingCurveType,
                                mrsp: &Envelope,
                                national_values: &NationalValues) -> EnvelopeResult<Envelope> {
    let mut parts = Vec::with_capacity(mrsp.size());
    for part in mrsp.iter() {
        let speed = part.min_speed();
        let ceiling_speed = speed + curve_type.compute_dv(speed, national_values);
        parts.push(EnvelopePart::new(
            EnvelopeProfile::ConstantSpeed,
            vec![part.begin_pos(), part.end_pos()],
            vec![ceiling_speed, ceiling_speed]
        )?);
    }
    Envelope::new(parts)
}

fn compute_deceleration_curves(curve_type: BrakingCurveType,
                               train_path: &TrainPath,
                               context: &EnvelopeSimContext,
                               mrsp: &Envelope,
                               national_values: &NationalValues) -> EnvelopeResult<Vec<EnvelopePart>> {
    let use_case = curve_type.use_case().unwrap_or(UseCase::RunningTime);
    let context = context.with_use_case(use_case);
    let ceiling = compute_ceiling_envelope(curve_type, mrsp, national_values)?;
    let path_length = context.path().length();
    let mut curves = Vec::new();

    let marker_boards = train_path.marker_board_positions();
    for position in &marker_boards {
        if *position <= 0.0 || *position > path_length {
            trace!("{:?}: skipping marker board at {} outside of (0, {}]", curve_type, position, path_length);
            continue;
        }
        add_braking_curve(&mut curves, compute_braking_curve(&context, &ceiling, *position, 0.0))?;
    }

    let mut slowdowns = 0;
    let mut cursor = EnvelopeCursor::backward(&ceiling);
    while cursor.find_part_transition(increase) {
        let position = cursor.position();
        let Some(speed) = cursor.speed() else {
            break;
        };
        if position <= 0.0 || position > path_length {
            trace!("{:?}: skipping slowdown at {} outside of (0, {}]", curve_type, position, path_length);
        } else {
            add_braking_curve(&mut curves, compute_braking_curve(&context, &ceiling, position, speed))?;
            slowdowns += 1;
        }
        if cursor.next_part().is_err() {
            break;
        }
    }

    debug!("{:?}: {} curves from {} marker boards and {} slowdowns",
           curve_type, curves.len(), marker_boards.len(), slowdowns);
    Ok(curves)
}

fn add_braking_curve(curves: &mut Vec<EnvelopePart>,
                     curve: EnvelopeResult<EnvelopePart>) -> EnvelopeResult<()> {
    match curve {
        Ok(part) => curves.push(part),
        Err(EnvelopeError::NotEnoughPoints(count)) => {
            warn!("braking curve anchor rejected, the curve only has {} points", count);
        },
        Err(error) => return Err(error)
    }
    Ok(())
}

/// Integrates a braking curve backward from the target point, below `ceiling`.
pub fn compute_braking_curve(context: &EnvelopeSimContext,
                             ceiling: &Envelope,
                             target_position: f64,
                             target_speed: f64) -> EnvelopeResult<EnvelopePart> {
    let path_length = context.path().length();
    if target_position <= 0.0 || target_position > path_length {
        return Err(EnvelopeError::InvalidAnchor { position: target_position, path_length });
    }
    let constraints: Vec<Box<dyn EnvelopePartConstraint + '_>> = vec![
        Box::new(SpeedConstraint::new(0.0, EnvelopePartConstraintType::Floor)),
        Box::new(EnvelopeConstraint::new(ceiling, EnvelopePartConstraintType::Ceiling)),
        Box::new(PositionConstraint::new(0.0, path_length)?),
    ];
    let mut builder = ConstrainedEnvelopePartBuilder::new(
        EnvelopePartBuilder::new(EnvelopeProfile::Braking),
        constraints
    );
    decelerate(context, target_position, target_speed, &mut builder, Direction::Backward);
    builder.build()
}

// ─────────────────────────────────────────────────────────────────────────────
// Derived curves
// ─────────────────────────────────────────────────────────────────────────────

/// `(distance, speed)` offsets between a deceleration curve point and the matching
/// intervention point.
fn compute_bec(curve_type: BrakingCurveType,
               context: &EnvelopeSimContext,
               reference: &EnvelopePart,
               position: f64,
               speed: f64,
               national_values: &NationalValues) -> (f64, f64) {
    let rolling_stock = context.rolling_stock();
    let params = rolling_stock.etcs_brake_params();
    let v_delta0 = national_values.v_delta0(speed);
    match curve_type {
        BrakingCurveType::SBI => ((speed + v_delta0) * (T_DRIVER + params.t_bs1), v_delta0),
        BrakingCurveType::WARNING => ((speed + v_delta0) * (T_DRIVER + params.t_bs1 + T_WARNING), v_delta0),
        _ => {
            let target_speed = reference.end_speed();
            let position = reference.interpolate_position(speed).unwrap_or(position);
            let grade = context.path().lowest_grade_over(position - rolling_stock.length(), position);
            let weight = weight_force(rolling_stock, grade);

            // traction is still applied during t_traction, then the brake builds up
            let t_traction = (params.t_traction_cut_off - (T_WARNING + params.t_bs2)).max(0.0);
            let t_berem = (params.t_be - t_traction).max(0.0);
            let a_est1 = compute_acceleration(
                rolling_stock,
                rolling_stock.rolling_resistance(speed),
                weight,
                speed,
                rolling_stock.max_tractive_effort(speed),
                0.0,
                1.0
            );
            let v_delta1 = a_est1 * t_traction;
            let v_delta2 = A_EST2 * t_berem;

            let max_v = (speed + v_delta0 + v_delta1).max(target_speed);
            let d_bec = (speed + v_delta0 + v_delta1 / 2.0).max(target_speed) * t_traction
                + (max_v + v_delta1 / 2.0) * t_berem;
            let v_bec = max_v + v_delta2;
            (d_bec, v_bec - speed)
        }
    }
}

/// Shifts every point of a reference part toward the start of the path. Points shifted
/// before the path start or below zero speed are dropped.
fn derive_curve(curve_type: BrakingCurveType,
                reference: &EnvelopePart,
                context: &EnvelopeSimContext,
                national_values: &NationalValues) -> Option<EnvelopePart> {
    let mut positions: Vec<f64> = Vec::with_capacity(reference.point_count());
    let mut speeds: Vec<f64> = Vec::with_capacity(reference.point_count());
    for i in 0..reference.point_count() {
        let (position, speed) = (reference.point_pos(i), reference.point_speed(i));
        let (d_bec, delta) = compute_bec(curve_type, context, reference, position, speed, national_values);
        let (new_position, new_speed) = (position - d_bec, speed - delta);
        if new_position < 0.0 || new_speed < 0.0 {
            continue;
        }
        if positions.last().is_some_and(|last| new_position <= *last) {
            continue;
        }
        positions.push(new_position);
        speeds.push(new_speed);
    }
    if positions.len() < 2 {
        trace!("{:?}: dropping degenerate curve derived from [{}, {}]",
               curve_type, reference.begin_pos(), reference.end_pos());
        return None;
    }
    match EnvelopePart::new(EnvelopeProfile::Derived, positions, speeds) {
        Ok(part) => Some(part),
        Err(error) => {
            trace!("{:?}: dropping invalid derived curve: {}", curve_type, error);
            None
        }
    }
}

/// Shifts every part of the family `curve_type` is derived from. Types without a reference
/// family derive nothing.
fn derive_curves(curve_type: BrakingCurveType,
                 computed: &EtcsBrakingCurves,
                 context: &EnvelopeSimContext,
                 national_values: &NationalValues) -> Vec<EnvelopePart> {
    let references = match curve_type.reference() {
        Some(reference_type) => computed.curves(reference_type),
        None => &[]
    };
    let curves: Vec<EnvelopePart> = references
        .iter()
        .filter_map(|reference| derive_curve(curve_type, reference, context, national_values))
        .collect();
    debug!("{:?}: {} curves derived from {} references", curve_type, curves.len(), references.len());
    curves
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelopesim::gradientpath::GradientPath;
    use crate::envelopesim::rollingstock::RollingStock;

    fn flat(begin: f64, end: f64, speed: f64) -> EnvelopePart {
        EnvelopePart::new(EnvelopeProfile::ConstantSpeed, vec![begin, end], vec![speed, speed]).unwrap()
    }

    fn context() -> EnvelopeSimContext {
        EnvelopeSimContext::new(
            Arc::new(RollingStock::fast_passenger()),
            Arc::new(GradientPath::flat(5000.0)),
            1.0,
            Comfort::Standard,
            UseCase::EtcsEbd
        ).unwrap()
    }

    #[test]
    fn ceiling_is_raised_by_family_offset() {
        let mrsp = Envelope::new(vec![flat(0.0, 100.0, 30.0), flat(100.0, 200.0, 10.0)]).unwrap();
        let national_values = NationalValues::new(true);
        let ceiling = compute_ceiling_envelope(BrakingCurveType::EBD, &mrsp, &national_values).unwrap();
        assert_eq!(ceiling, mrsp);

        let ceiling = compute_ceiling_envelope(BrakingCurveType::EBI, &mrsp, &national_values).unwrap();
        assert!((ceiling.get(0).begin_speed() - (30.0 + 7.5 / 3.6)).abs() < 1e-12);
        assert_eq!(ceiling.get(1).profile(), EnvelopeProfile::ConstantSpeed);
    }

    #[test]
    fn out_of_path_anchor_is_rejected() {
        let context = context();
        let ceiling = Envelope::new(vec![flat(0.0, 5000.0, 40.0)]).unwrap();
        assert_eq!(
            compute_braking_curve(&context, &ceiling, 0.0, 0.0),
            Err(EnvelopeError::InvalidAnchor { position: 0.0, path_length: 5000.0 })
        );
        assert!(compute_braking_curve(&context, &ceiling, 5000.1, 0.0).is_err());
        assert!(compute_braking_curve(&context, &ceiling, 5000.0, 0.0).is_ok());
    }

    #[test]
    fn anchor_above_ceiling_gives_no_points() {
        let context = context();
        let ceiling = Envelope::new(vec![flat(0.0, 5000.0, 40.0)]).unwrap();
        assert_eq!(
            compute_braking_curve(&context, &ceiling, 1000.0, 50.0),
            Err(EnvelopeError::NotEnoughPoints(0))
        );
        let mut curves = Vec::new();
        add_braking_curve(&mut curves, compute_braking_curve(&context, &ceiling, 1000.0, 50.0)).unwrap();
        assert!(curves.is_empty());
    }

    #[test]
    fn service_intervention_is_a_plain_shift() {
        let context = context();
        let national_values = NationalValues::new(true);
        let reference = EnvelopePart::new(EnvelopeProfile::Braking, vec![500.0, 1000.0], vec![20.0, 0.0]).unwrap();
        let sbi = derive_curve(BrakingCurveType::SBI, &reference, &context, &national_values).unwrap();
        // T_driver + T_bs1 = 6 s
        assert_eq!(sbi.positions(), &[380.0, 1000.0]);
        assert_eq!(sbi.speeds(), &[20.0, 0.0]);
        assert_eq!(sbi.profile(), EnvelopeProfile::Derived);

        let warning = derive_curve(BrakingCurveType::WARNING, &reference, &context, &national_values).unwrap();
        assert_eq!(warning.positions(), &[340.0, 1000.0]);
    }

    #[test]
    fn each_intervention_point_is_below_and_before_its_source() {
        let context = context();
        let national_values = NationalValues::default();
        let ceiling = Envelope::new(vec![flat(0.0, 5000.0, 44.0)]).unwrap();
        let ebd = compute_braking_curve(&context, &ceiling, 2500.0, 0.0).unwrap();
        let ebi = derive_curve(BrakingCurveType::EBI, &ebd, &context, &national_values).unwrap();

        let mut matched = 0;
        for i in 0..ebd.point_count() {
            let (position, speed) = (ebd.point_pos(i), ebd.point_speed(i));
            let (d_bec, delta) = compute_bec(BrakingCurveType::EBI, &context, &ebd, position, speed, &national_values);
            let (shifted_position, shifted_speed) = (position - d_bec, speed - delta);
            if let Some(j) = ebi.positions().iter().position(|p| *p == shifted_position) {
                assert_eq!(ebi.point_speed(j), shifted_speed);
                assert!(position > shifted_position, "point {} not moved back", i);
                assert!(speed > shifted_speed, "point {} not slowed down", i);
                matched += 1;
            }
        }
        assert_eq!(matched, ebi.point_count());
    }

    #[test]
    fn derived_families_read_their_reference_family() {
        let context = context();
        let national_values = NationalValues::new(true);
        let reference = EnvelopePart::new(EnvelopeProfile::Braking, vec![500.0, 1000.0], vec![20.0, 0.0]).unwrap();
        let computed = EtcsBrakingCurves { sbd: vec![reference], ..EtcsBrakingCurves::default() };

        let sbi = derive_curves(BrakingCurveType::SBI, &computed, &context, &national_values);
        assert_eq!(sbi.len(), 1);
        assert_eq!(sbi[0].positions(), &[380.0, 1000.0]);
        assert_eq!(derive_curves(BrakingCurveType::WARNING, &computed, &context, &national_values).len(), 1);
        assert!(derive_curves(BrakingCurveType::EBI, &computed, &context, &national_values).is_empty());
        assert!(derive_curves(BrakingCurveType::EBD, &computed, &context, &national_values).is_empty());
    }

    #[test]
    fn short_derived_curves_are_dropped() {
        let context = context();
        let national_values = NationalValues::default();
        let reference = EnvelopePart::new(EnvelopeProfile::Braking, vec![10.0, 20.0], vec![1.0, 0.0]).unwrap();
        assert_eq!(derive_curve(BrakingCurveType::EBI, &reference, &context, &national_values), None);
    }
}
