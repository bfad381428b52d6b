use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Easing curves, named the way motion designers write them.
///
/// `power2` is the cubic family: `power2.out` decelerates as `1 - (1-t)³`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum Ease {
    #[default]
    #[strum(to_string = "linear", serialize = "none")]
    #[serde(rename = "linear")]
    Linear,
    #[strum(serialize = "power2.in")]
    #[serde(rename = "power2.in")]
    Power2In,
    #[strum(serialize = "power2.out")]
    #[serde(rename = "power2.out")]
    Power2Out,
    #[strum(serialize = "power2.inOut")]
    #[serde(rename = "power2.inOut")]
    Power2InOut,
}

impl Ease {
    /// Eased progress for `t`, clamped to `[0, 1]` first.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Ease::Linear => t,
            Ease::Power2In => t * t * t,
            Ease::Power2Out => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}
