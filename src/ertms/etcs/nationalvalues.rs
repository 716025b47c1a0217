use serde::Deserialize;

use crate::ertms::etcs::fixedvaluedata::v_ura;


/// National values transmitted by the trackside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct NationalValues {
    /// Q_NVINHSMICPERM: when set, the speed measurement inaccuracy is not added to the
    /// deceleration curves.
    q_nvinhsmicperm: bool
}

impl NationalValues {
    pub fn new(q_nvinhsmicperm: bool) -> NationalValues {
        NationalValues { q_nvinhsmicperm }
    }

    pub fn q_nvinhsmicperm(&self) -> bool {
        self.q_nvinhsmicperm
    }

    /// Speed inaccuracy to account for at `speed`.
    pub fn v_delta0(&self, speed: f64) -> f64 {
        if self.q_nvinhsmicperm {
            0.0
        } else {
            v_ura(speed)
        }
    }
}
