// Fixed values of the ETCS braking model, converted to SI units.

const KMH: f64 = 1.0 / 3.6;

// ── Speed measurement accuracy ─────────────────────────────────────────────

pub const V_URA_MIN_LIMIT: f64 = 30.0 * KMH;
pub const V_URA_MAX_LIMIT: f64 = 500.0 * KMH;
pub const V_URA_MIN: f64 = 2.0 * KMH;
pub const V_URA_MAX: f64 = 12.0 * KMH;

// ── Speed offsets of the supervision limits ────────────────────────────────

pub const V_EBI_MIN: f64 = 110.0 * KMH;
pub const V_EBI_MAX: f64 = 210.0 * KMH;
pub const DV_EBI_MIN: f64 = 7.5 * KMH;
pub const DV_EBI_MAX: f64 = 15.0 * KMH;

pub const V_SBI_MIN: f64 = 110.0 * KMH;
pub const V_SBI_MAX: f64 = 210.0 * KMH;
pub const DV_SBI_MIN: f64 = 5.5 * KMH;
pub const DV_SBI_MAX: f64 = 10.0 * KMH;

pub const V_WARNING_MIN: f64 = 110.0 * KMH;
pub const V_WARNING_MAX: f64 = 140.0 * KMH;
pub const DV_WARNING_MIN: f64 = 4.0 * KMH;
pub const DV_WARNING_MAX: f64 = 5.0 * KMH;

// ── Times, in seconds ──────────────────────────────────────────────────────

pub const T_WARNING: f64 = 2.0;
pub const T_DRIVER: f64 = 4.0;

/// Upper bound of the acceleration estimated while the emergency brake builds up, in m/s².
pub const A_EST2: f64 = 0.4;

/// Offset from `dv_min` at `v_min` to `dv_max` at `v_max`, constant outside.
pub fn linear_speed_offset(speed: f64, v_min: f64, v_max: f64, dv_min: f64, dv_max: f64) -> f64 {
    if speed <= v_min {
        dv_min
    } else if speed < v_max {
        (dv_max - dv_min) / (v_max - v_min) * (speed - v_min) + dv_min
    } else {
        dv_max
    }
}

/// Accuracy of the on-board speed measurement at `speed`.
pub fn v_ura(speed: f64) -> f64 {
    linear_speed_offset(speed, V_URA_MIN_LIMIT, V_URA_MAX_LIMIT, V_URA_MIN, V_URA_MAX)
}
