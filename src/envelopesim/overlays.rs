use log::trace;

use crate::envelope::direction::Direction;
use crate::envelope::part::constrainedenvelopepartbuilder::ConstrainedEnvelopePartBuilder;
use crate::envelopesim::envelopesimcontext::EnvelopeSimContext;
use crate::envelopesim::trainphysicsintegrator::{
    step,
    Action
};

/// Integrates a braking curve from `(position, speed)` into `builder`, until a
/// constraint or the end of the path stops it.
pub fn decelerate(context: &EnvelopeSimContext,
                  position: f64,
                  speed: f64,
                  builder: &mut ConstrainedEnvelopePartBuilder<'_>,
                  direction: Direction) {
    integrate(context, position, speed, Action::Brake, builder, direction);
}

/// Integrates an acceleration curve from `(position, speed)` into `builder`, until a
/// constraint or the end of the path stops it.
pub fn accelerate(context: &EnvelopeSimContext,
                  position: f64,
                  speed: f64,
                  builder: &mut ConstrainedEnvelopePartBuilder<'_>,
                  direction: Direction) {
    integrate(context, position, speed, Action::Accelerate, builder, direction);
}

fn integrate(context: &EnvelopeSimContext,
             position: f64,
             speed: f64,
             action: Action,
             builder: &mut ConstrainedEnvelopePartBuilder<'_>,
             direction: Direction) {
    if !builder.init_envelope_part(position, speed, direction) {
        trace!("integration start ({}, {}) violates a constraint", position, speed);
        return;
    }
    let path_length = context.path().length();
    let (mut position, mut speed) = (position, speed);
    loop {
        let integration_step = step(context, position, speed, action, direction);
        let mut new_position = position + integration_step.position_delta();
        let mut new_speed = integration_step.end_speed();
        let mut time_delta = integration_step.time_delta();

        // the last step is cut at the end of the path
        let bound = new_position.clamp(0.0, path_length);
        let reached_bound = bound != new_position;
        if reached_bound {
            let ratio = (bound - position) / (new_position - position);
            new_speed = speed + ratio * (new_speed - speed);
            time_delta *= ratio;
            new_position = bound;
        }

        if !builder.add_step(new_position, new_speed, time_delta) || reached_bound {
            break;
        }
        position = new_position;
        speed = new_speed;
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::envelope::envelopeprofile::EnvelopeProfile;
    use crate::envelope::part::constraints::envelopepartconstraint::EnvelopePartConstraintType;
    use crate::envelope::part::constraints::speedconstraint::SpeedConstraint;
    use crate::envelope::part::envelopepartbuilder::EnvelopePartBuilder;
    use crate::envelopesim::envelopesimcontext::UseCase;
    use crate::envelopesim::gradientpath::GradientPath;
    use crate::envelopesim::physicsrollingstock::Comfort;
    use crate::envelopesim::rollingstock::RollingStock;

    fn context(path_length: f64) -> EnvelopeSimContext {
        EnvelopeSimContext::new(
            Arc::new(RollingStock::fast_passenger()),
            Arc::new(GradientPath::flat(path_length)),
            2.0,
            Comfort::Standard,
            UseCase::EtcsSbd
        ).unwrap()
    }

    #[test]
    fn backward_braking_stops_at_the_ceiling() {
        let context = context(10_000.0);
        let mut builder = ConstrainedEnvelopePartBuilder::new(
            EnvelopePartBuilder::new(EnvelopeProfile::Braking),
            vec![
                Box::new(SpeedConstraint::new(0.0, EnvelopePartConstraintType::Floor)),
                Box::new(SpeedConstraint::new(30.0, EnvelopePartConstraintType::Ceiling)),
            ]
        );
        decelerate(&context, 8000.0, 0.0, &mut builder, Direction::Backward);
        let part = builder.build().unwrap();

        assert_eq!(part.end_pos(), 8000.0);
        assert_eq!(part.end_speed(), 0.0);
        assert!((part.begin_speed() - 30.0).abs() < 1e-9);
        assert!(part.begin_pos() > 0.0 && part.begin_pos() < 8000.0);
        assert!(part.speeds().windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn backward_braking_stops_at_the_path_start() {
        let context = context(10_000.0);
        let mut builder = ConstrainedEnvelopePartBuilder::new(
            EnvelopePartBuilder::new(EnvelopeProfile::Braking),
            vec![Box::new(SpeedConstraint::new(0.0, EnvelopePartConstraintType::Floor))]
        );
        decelerate(&context, 100.0, 0.0, &mut builder, Direction::Backward);
        let part = builder.build().unwrap();
        assert_eq!(part.begin_pos(), 0.0);
        assert!(part.begin_speed() > 0.0);
    }

    #[test]
    fn forward_acceleration_is_capped() {
        let context = context(10_000.0);
        let mut builder = ConstrainedEnvelopePartBuilder::new(
            EnvelopePartBuilder::new(EnvelopeProfile::Accelerating),
            vec![Box::new(SpeedConstraint::new(20.0, EnvelopePartConstraintType::Ceiling))]
        );
        accelerate(&context, 0.0, 0.0, &mut builder, Direction::Forward);
        let part = builder.build().unwrap();
        assert_eq!(part.begin_pos(), 0.0);
        assert!((part.end_speed() - 20.0).abs() < 1e-9);
        assert!(part.speeds().iter().all(|speed| *speed <= 20.0 + 1e-9));
    }
}
