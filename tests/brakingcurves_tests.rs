use std::sync::Arc;

use envelopesim::envelope::envelope::Envelope;
use envelopesim::envelope::envelopeerror::EnvelopeError;
use envelopesim::envelope::envelopepart::EnvelopePart;
use envelopesim::envelope::envelopeprofile::EnvelopeProfile;
use envelopesim::envelopesim::envelopesimcontext::{
    EnvelopeSimContext,
    UseCase
};
use envelopesim::envelopesim::gradientpath::{
    GradeSection,
    GradientPath
};
use envelopesim::envelopesim::physicsrollingstock::Comfort;
use envelopesim::envelopesim::rollingstock::RollingStock;
use envelopesim::ertms::etcs::brakingcurves::{
    compute_braking_curve,
    compute_ceiling_envelope,
    compute_etcs_braking_curves,
    EtcsBrakingCurves
};
use envelopesim::ertms::etcs::brakingcurvetype::BrakingCurveType;
use envelopesim::ertms::etcs::nationalvalues::NationalValues;
use envelopesim::ertms::etcs::trainpath::{
    Detector,
    TrackRange,
    TrainPath
};

const PATH_LENGTH: f64 = 10_000.0;

fn flat(begin: f64, end: f64, speed: f64) -> EnvelopePart {
    EnvelopePart::new(EnvelopeProfile::ConstantSpeed, vec![begin, end], vec![speed, speed]).unwrap()
}

fn mrsp() -> Envelope {
    Envelope::new_continuous(vec![
        flat(0.0, 4000.0, 44.0),
        flat(4000.0, 6000.0, 22.0),
        flat(6000.0, PATH_LENGTH, 44.0),
    ], PATH_LENGTH).unwrap()
}

fn path() -> GradientPath {
    GradientPath::new(PATH_LENGTH, vec![
        GradeSection::new(0.0, 3000.0, 5.0),
        GradeSection::new(3000.0, 7000.0, -3.0),
    ])
}

fn train_path() -> TrainPath {
    TrainPath::new(vec![
        TrackRange::new(0.0, 5000.0, vec![
            Detector::new("start".to_string(), 0.0),
            Detector::new("middle".to_string(), 2500.0),
        ]),
        TrackRange::new(5000.0, 0.0, vec![Detector::new("empty".to_string(), 0.0)]),
        TrackRange::new(5000.0, 5000.0, vec![Detector::new("end".to_string(), 5000.0)]),
    ])
}

fn compute(national_values: &NationalValues) -> EtcsBrakingCurves {
    compute_etcs_braking_curves(
        &train_path(),
        Arc::new(RollingStock::fast_passenger()),
        Arc::new(path()),
        1.0,
        Comfort::Standard,
        &mrsp(),
        national_values
    ).unwrap()
}

fn context(use_case: UseCase) -> EnvelopeSimContext {
    EnvelopeSimContext::new(
        Arc::new(RollingStock::fast_passenger()),
        Arc::new(path()),
        1.0,
        Comfort::Standard,
        use_case
    ).unwrap()
}

#[test]
fn anchors_outside_the_path_are_rejected() {
    let context = context(UseCase::EtcsEbd);
    let ceiling = mrsp();
    assert_eq!(
        compute_braking_curve(&context, &ceiling, 0.0, 0.0),
        Err(EnvelopeError::InvalidAnchor { position: 0.0, path_length: PATH_LENGTH })
    );
    assert_eq!(
        compute_braking_curve(&context, &ceiling, -5.0, 0.0),
        Err(EnvelopeError::InvalidAnchor { position: -5.0, path_length: PATH_LENGTH })
    );
    assert!(matches!(
        compute_braking_curve(&context, &ceiling, PATH_LENGTH + 1.0, 0.0),
        Err(EnvelopeError::InvalidAnchor { .. })
    ));
}

#[test]
fn braking_curve_stays_under_its_ceiling_and_inside_the_path() {
    let context = context(UseCase::EtcsEbd);
    let ceiling = compute_ceiling_envelope(BrakingCurveType::EBD, &mrsp(), &NationalValues::default()).unwrap();
    let part = compute_braking_curve(&context, &ceiling, 2500.0, 0.0).unwrap();

    assert_eq!(part.end_pos(), 2500.0);
    assert_eq!(part.end_speed(), 0.0);
    assert!(part.begin_pos() >= 0.0);
    for i in 0..part.point_count() {
        let bound = ceiling.interpolate_speed(part.point_pos(i)).unwrap();
        assert!(part.point_speed(i) >= 0.0);
        assert!(part.point_speed(i) <= bound + 1e-6);
    }
    assert!((part.begin_speed() - ceiling.interpolate_speed(part.begin_pos()).unwrap()).abs() < 1e-6);
}

#[test]
fn families_have_expected_curves() {
    let curves = compute(&NationalValues::default());

    // marker boards at 2500 and 10000, plus the slowdown at 4000
    for curve_type in [BrakingCurveType::EBD, BrakingCurveType::SBD, BrakingCurveType::GUI] {
        let parts = curves.curves(curve_type);
        assert_eq!(parts.len(), 3, "{:?}", curve_type);
        let mut ends: Vec<f64> = parts.iter().map(|part| part.end_pos()).collect();
        ends.sort_by(|lhs, rhs| lhs.total_cmp(rhs));
        assert_eq!(ends, vec![2500.0, 4000.0, PATH_LENGTH]);
    }
    assert!(curves.curves(BrakingCurveType::PS).is_empty());

    let total: usize = [
        BrakingCurveType::EBD, BrakingCurveType::SBD, BrakingCurveType::GUI,
        BrakingCurveType::EBI, BrakingCurveType::SBI, BrakingCurveType::WARNING,
    ].iter().map(|curve_type| curves.curves(*curve_type).len()).sum();
    assert_eq!(curves.all().len(), total);
    assert_eq!(curves.all()[0], curves.curves(BrakingCurveType::EBD)[0]);
}

#[test]
fn emergency_brakes_harder_than_service() {
    let curves = compute(&NationalValues::default());
    let ebd = curves.merged(BrakingCurveType::EBD).unwrap();
    let sbd = curves.merged(BrakingCurveType::SBD).unwrap();
    let gui = curves.merged(BrakingCurveType::GUI).unwrap();

    let ebd_stop = curves.curves(BrakingCurveType::EBD).iter().find(|part| part.end_pos() == 2500.0).unwrap();
    let sbd_stop = curves.curves(BrakingCurveType::SBD).iter().find(|part| part.end_pos() == 2500.0).unwrap();
    let gui_stop = curves.curves(BrakingCurveType::GUI).iter().find(|part| part.end_pos() == 2500.0).unwrap();
    assert!(ebd_stop.length() < sbd_stop.length());
    assert!(sbd_stop.length() < gui_stop.length());

    let position = 2400.0;
    assert!(ebd.interpolate_speed(position).unwrap() > sbd.interpolate_speed(position).unwrap());
    assert!(sbd.interpolate_speed(position).unwrap() > gui.interpolate_speed(position).unwrap());
}

#[test]
fn intervention_curve_is_below_and_before_its_reference() {
    let curves = compute(&NationalValues::default());
    let ebi = curves.curves(BrakingCurveType::EBI);
    assert!(!ebi.is_empty());

    let ebd = curves.curves(BrakingCurveType::EBD).iter().find(|part| part.end_pos() == 2500.0).unwrap();
    let ebi = ebi.iter().find(|part| part.end_pos() < 2500.0 && part.end_pos() > ebd.begin_pos()).unwrap();
    assert!(ebi.end_pos() < ebd.end_pos());
    assert!(ebi.begin_pos() < ebd.begin_pos());
    for i in 0..ebi.point_count() {
        let position = ebi.point_pos(i);
        if ebd.contains(position) {
            assert!(ebi.point_speed(i) < ebd.interpolate_speed(position));
        }
    }
    assert!(ebi.positions().windows(2).all(|pair| pair[0] < pair[1]));
    assert!(ebi.speeds().iter().all(|speed| *speed >= 0.0));
}

#[test]
fn service_intervention_and_warning_follow_service_curve() {
    let curves = compute(&NationalValues::new(true));
    let sbd = curves.curves(BrakingCurveType::SBD);
    let sbi = curves.curves(BrakingCurveType::SBI);
    let warning = curves.curves(BrakingCurveType::WARNING);
    assert_eq!(sbi.len(), sbd.len());
    assert_eq!(warning.len(), sbd.len());

    for ((reference, sbi), warning) in sbd.iter().zip(sbi).zip(warning) {
        // zero speed points are not shifted
        if reference.end_speed() == 0.0 {
            assert_eq!(sbi.end_pos(), reference.end_pos());
        } else {
            assert!(sbi.end_pos() < reference.end_pos());
        }
        assert!(warning.begin_pos() < sbi.begin_pos());
        assert_eq!(sbi.begin_speed(), reference.begin_speed());
    }
}

#[test]
fn marker_board_on_a_slowdown_keeps_both_curves() {
    let train_path = TrainPath::new(vec![
        TrackRange::new(0.0, PATH_LENGTH, vec![Detector::new("slowdown".to_string(), 4000.0)]),
    ]);
    let curves = compute_etcs_braking_curves(
        &train_path,
        Arc::new(RollingStock::fast_passenger()),
        Arc::new(path()),
        1.0,
        Comfort::Standard,
        &mrsp(),
        &NationalValues::default()
    ).unwrap();

    let mut end_speeds: Vec<f64> = curves
        .curves(BrakingCurveType::EBD)
        .iter()
        .filter(|part| part.end_pos() == 4000.0)
        .map(|part| part.end_speed())
        .collect();
    end_speeds.sort_by(|lhs, rhs| lhs.total_cmp(rhs));
    assert_eq!(end_speeds.len(), 2);
    assert_eq!(end_speeds[0], 0.0);
    assert!(end_speeds[1] >= 22.0);
}

#[test]
fn invalid_time_step_is_reported() {
    let result = compute_etcs_braking_curves(
        &train_path(),
        Arc::new(RollingStock::fast_passenger()),
        Arc::new(path()),
        0.0,
        Comfort::Standard,
        &mrsp(),
        &NationalValues::default()
    );
    assert_eq!(result, Err(EnvelopeError::InvalidTimeStep(0.0)));
}
