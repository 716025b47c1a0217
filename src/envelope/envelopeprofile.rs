use serde::{
    Deserialize,
    Serialize
};


/// Shape tag carried by an envelope part. Only used for merge bookkeeping and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvelopeProfile {
    Accelerating,
    ConstantSpeed,
    Braking,
    Coasting,
    Maintain,
    /// Obtained by shifting another part, such as the EBI derived from the EBD.
    Derived
}
