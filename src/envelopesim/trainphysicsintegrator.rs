use crate::envelope::direction::Direction;
use crate::envelopesim::envelopesimcontext::EnvelopeSimContext;
use crate::envelopesim::physicsrollingstock::{
    GammaType,
    PhysicsRollingStock
};

/// Standard gravity, in m/s².
pub const GRAVITY: f64 = 9.81;


/// What the driver does during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Accelerate,
    Brake,
    Maintain,
    Coast
}


/// Outcome of one integration step. Deltas are signed along the integration direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationStep {
    time_delta: f64,
    position_delta: f64,
    end_speed: f64,
    acceleration: f64,
    traction_force: f64
}

impl IntegrationStep {
    pub fn time_delta(&self) -> f64 {
        self.time_delta
    }

    pub fn position_delta(&self) -> f64 {
        self.position_delta
    }

    pub fn end_speed(&self) -> f64 {
        self.end_speed
    }

    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    pub fn traction_force(&self) -> f64 {
        self.traction_force
    }
}


/// Weight force along the track for a grade in meters per kilometer. Negative uphill.
pub fn weight_force(rolling_stock: &dyn PhysicsRollingStock, grade: f64) -> f64 {
    -rolling_stock.mass() * GRAVITY * grade / 1000.0
}

/// Acceleration of the train under the given forces.
///
/// `rolling_resistance` and `braking_force` are magnitudes: both always oppose the
/// movement. A stopped train moving forward only starts when traction and weight overcome
/// them.
pub fn compute_acceleration(rolling_stock: &dyn PhysicsRollingStock,
                            rolling_resistance: f64,
                            weight_force: f64,
                            speed: f64,
                            traction_force: f64,
                            braking_force: f64,
                            direction_sign: f64) -> f64 {
    let opposite_force = rolling_resistance + braking_force;
    if speed == 0.0 && direction_sign > 0.0 && (traction_force + weight_force).abs() < opposite_force {
        return 0.0;
    }
    (traction_force + weight_force - opposite_force) / rolling_stock.inertia()
}

/// Explicit integration of a constant acceleration over `time_step`, in `direction`.
///
/// The speed is never allowed to go below zero: the step is shortened to the instant the
/// train stops.
pub fn newton_step(time_step: f64, speed: f64, acceleration: f64, direction: Direction) -> (f64, f64, f64) {
    let signed_time_step = time_step * direction.sign();
    let mut time_delta = time_step;
    let mut new_speed = speed + acceleration * signed_time_step;
    if new_speed < 0.0 {
        time_delta = if acceleration != 0.0 { (speed / acceleration).abs() } else { 0.0 };
        new_speed = 0.0;
    }
    let signed_time_delta = time_delta * direction.sign();
    let position_delta = speed * signed_time_delta + 0.5 * acceleration * signed_time_delta * signed_time_delta;
    (time_delta, position_delta, new_speed)
}

/// Integrates one time step of `context` from `(position, speed)`.
pub fn step(context: &EnvelopeSimContext,
            position: f64,
            speed: f64,
            action: Action,
            direction: Direction) -> IntegrationStep {
    let rolling_stock = context.rolling_stock();
    let tail = (position - rolling_stock.length()).max(0.0);
    let grade = context.path().lowest_grade_over(tail, position);
    let weight = weight_force(rolling_stock, grade);
    let rolling_resistance = rolling_stock.rolling_resistance(speed);
    let max_traction = context.max_tractive_effort(position, speed);

    let (traction_force, braking_force) = match action {
        Action::Accelerate => (max_traction, 0.0),
        Action::Brake => (0.0, context.braking_deceleration(speed) * rolling_stock.inertia()),
        Action::Coast => (0.0, 0.0),
        Action::Maintain => ((rolling_resistance - weight).max(0.0).min(max_traction.max(0.0)), 0.0)
    };

    let acceleration = match (action, rolling_stock.gamma_type()) {
        (Action::Brake, GammaType::Const) => -context.braking_deceleration(speed),
        _ => compute_acceleration(
            rolling_stock,
            rolling_resistance,
            weight,
            speed,
            traction_force,
            braking_force,
            direction.sign()
        )
    };
    let (time_delta, position_delta, end_speed) = newton_step(context.time_step(), speed, acceleration, direction);
    IntegrationStep { time_delta, position_delta, end_speed, acceleration, traction_force }
}
