use std::sync::Arc;

use crate::envelope::envelopeerror::{
    EnvelopeError,
    EnvelopeResult
};
use crate::envelopesim::physicspath::PhysicsPath;
use crate::envelopesim::physicsrollingstock::{
    interpolate_effort,
    Comfort,
    ModeAndProfile,
    PhysicsRollingStock,
    TractiveEffortPoint
};
use crate::math::rangemap::RangeMap;


/// What a simulation is run for. Selects the braking model of the train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseCase {
    RunningTime,
    EtcsEbd,
    EtcsSbd,
    EtcsGui
}


/// Everything a simulation step needs to know about the train and the path.
#[derive(Clone)]
pub struct EnvelopeSimContext {
    rolling_stock: Arc<dyn PhysicsRollingStock>,
    path: Arc<dyn PhysicsPath>,
    time_step: f64,
    use_case: UseCase,
    tractive_effort_curves: RangeMap<Vec<TractiveEffortPoint>>,
    modes_and_profiles: RangeMap<ModeAndProfile>
}

impl EnvelopeSimContext {
    pub fn new(rolling_stock: Arc<dyn PhysicsRollingStock>,
               path: Arc<dyn PhysicsPath>,
               time_step: f64,
               comfort: Comfort,
               use_case: UseCase) -> EnvelopeResult<EnvelopeSimContext> {
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(EnvelopeError::InvalidTimeStep(time_step));
        }
        let (tractive_effort_curves, modes_and_profiles) = rolling_stock
            .tractive_effort_curves(path.as_ref(), comfort)
            .into_parts();
        Ok(EnvelopeSimContext {
            rolling_stock,
            path,
            time_step,
            use_case,
            tractive_effort_curves,
            modes_and_profiles
        })
    }

    /// The same context, for another use case.
    pub fn with_use_case(&self, use_case: UseCase) -> EnvelopeSimContext {
        let mut context = self.clone();
        context.use_case = use_case;
        context
    }

    pub fn rolling_stock(&self) -> &dyn PhysicsRollingStock {
        self.rolling_stock.as_ref()
    }

    pub fn path(&self) -> &dyn PhysicsPath {
        self.path.as_ref()
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn use_case(&self) -> UseCase {
        self.use_case
    }

    pub fn modes_and_profiles(&self) -> &RangeMap<ModeAndProfile> {
        &self.modes_and_profiles
    }

    pub fn mode_and_profile_at(&self, position: f64) -> Option<&ModeAndProfile> {
        self.modes_and_profiles.get(position)
    }

    /// Tractive effort available at `position`, using the curve selected for this range of
    /// the path when there is one.
    pub fn max_tractive_effort(&self, position: f64, speed: f64) -> f64 {
        match self.tractive_effort_curves.get(position) {
            Some(curve) => interpolate_effort(curve, speed),
            None => self.rolling_stock.max_tractive_effort(speed)
        }
    }

    /// Braking deceleration of the train for this use case, as a positive value.
    pub fn braking_deceleration(&self, speed: f64) -> f64 {
        match self.use_case {
            UseCase::RunningTime | UseCase::EtcsSbd => self.rolling_stock.max_service_braking_deceleration(speed),
            UseCase::EtcsEbd => self.rolling_stock.max_emergency_braking_deceleration(speed),
            UseCase::EtcsGui => self.rolling_stock.max_normal_service_braking_deceleration(speed)
        }
    }
}
