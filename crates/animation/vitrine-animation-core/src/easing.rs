//! Named easing curves.
//!
//! Names follow the `family.direction` convention (`"power2.out"`,
//! `"sine.inOut"`). A bare family name means `.out`. Every curve maps 0 to 0
//! and 1 to 1; elastic and back overshoot in between.

use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

const BACK_OVERSHOOT: f32 = 1.70158;
const ELASTIC_PERIOD: f32 = 0.3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EaseFamily {
    Linear,
    Power1,
    Power2,
    Power3,
    Power4,
    Sine,
    Expo,
    Circ,
    Back,
    Elastic,
    Bounce,
}

impl EaseFamily {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "none" | "linear" | "power0" => EaseFamily::Linear,
            "power1" | "quad" => EaseFamily::Power1,
            "power2" | "cubic" => EaseFamily::Power2,
            "power3" | "quart" => EaseFamily::Power3,
            "power4" | "quint" | "strong" => EaseFamily::Power4,
            "sine" => EaseFamily::Sine,
            "expo" => EaseFamily::Expo,
            "circ" => EaseFamily::Circ,
            "back" => EaseFamily::Back,
            "elastic" => EaseFamily::Elastic,
            "bounce" => EaseFamily::Bounce,
            _ => return None,
        })
    }

    fn as_str(self) -> &'static str {
        match self {
            EaseFamily::Linear => "none",
            EaseFamily::Power1 => "power1",
            EaseFamily::Power2 => "power2",
            EaseFamily::Power3 => "power3",
            EaseFamily::Power4 => "power4",
            EaseFamily::Sine => "sine",
            EaseFamily::Expo => "expo",
            EaseFamily::Circ => "circ",
            EaseFamily::Back => "back",
            EaseFamily::Elastic => "elastic",
            EaseFamily::Bounce => "bounce",
        }
    }

    /// The `.in` form of the curve.
    fn ease_in(self, t: f32) -> f32 {
        match self {
            EaseFamily::Linear => t,
            EaseFamily::Power1 => t * t,
            EaseFamily::Power2 => t * t * t,
            EaseFamily::Power3 => t.powi(4),
            EaseFamily::Power4 => t.powi(5),
            EaseFamily::Sine => 1.0 - (t * FRAC_PI_2).cos(),
            EaseFamily::Expo => 2f32.powf(10.0 * (t - 1.0)),
            EaseFamily::Circ => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            EaseFamily::Back => t * t * ((BACK_OVERSHOOT + 1.0) * t - BACK_OVERSHOOT),
            EaseFamily::Elastic => 1.0 - elastic_out(1.0 - t),
            EaseFamily::Bounce => 1.0 - bounce_out(1.0 - t),
        }
    }
}

fn elastic_out(t: f32) -> f32 {
    let s = ELASTIC_PERIOD / 4.0;
    2f32.powf(-10.0 * t) * ((t - s) * (2.0 * PI) / ELASTIC_PERIOD).sin() + 1.0
}

fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EaseDirection {
    In,
    Out,
    InOut,
}

impl EaseDirection {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "in" => Some(EaseDirection::In),
            "out" => Some(EaseDirection::Out),
            "inOut" => Some(EaseDirection::InOut),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            EaseDirection::In => "in",
            EaseDirection::Out => "out",
            EaseDirection::InOut => "inOut",
        }
    }
}

/// An easing curve: family plus direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ease {
    pub family: EaseFamily,
    pub direction: EaseDirection,
}

impl Default for Ease {
    /// `power2.out`
    fn default() -> Self {
        Self::new(EaseFamily::Power2, EaseDirection::Out)
    }
}

impl Ease {
    pub const LINEAR: Ease = Ease::new(EaseFamily::Linear, EaseDirection::Out);

    pub const fn new(family: EaseFamily, direction: EaseDirection) -> Self {
        Self { family, direction }
    }

    /// Map normalized time to normalized progress. Input is clamped to [0, 1].
    pub fn apply(&self, t: f32) -> f32 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let f = self.family;
        match self.direction {
            EaseDirection::In => f.ease_in(t),
            EaseDirection::Out => 1.0 - f.ease_in(1.0 - t),
            EaseDirection::InOut => {
                if t < 0.5 {
                    f.ease_in(2.0 * t) / 2.0
                } else {
                    1.0 - f.ease_in(2.0 * (1.0 - t)) / 2.0
                }
            }
        }
    }
}

impl FromStr for Ease {
    type Err = AnimationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let unknown = || AnimationError::UnknownEasing {
            name: name.to_string(),
        };
        let (family, direction) = match name.trim().split_once('.') {
            Some((family, direction)) => (
                EaseFamily::parse(family).ok_or_else(unknown)?,
                EaseDirection::parse(direction).ok_or_else(unknown)?,
            ),
            None => (
                EaseFamily::parse(name.trim()).ok_or_else(unknown)?,
                EaseDirection::Out,
            ),
        };
        Ok(Ease::new(family, direction))
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.family == EaseFamily::Linear {
            return f.write_str("none");
        }
        write!(f, "{}.{}", self.family.as_str(), self.direction.as_str())
    }
}

impl TryFrom<String> for Ease {
    type Error = AnimationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [&str; 11] = [
        "none", "power1", "power2", "power3", "power4", "sine", "expo", "circ", "back",
        "elastic", "bounce",
    ];

    #[test]
    fn endpoints_are_exact_for_every_curve() {
        for family in ALL {
            for dir in ["in", "out", "inOut"] {
                let ease: Ease = format!("{family}.{dir}").parse().unwrap();
                assert_eq!(ease.apply(0.0), 0.0, "{ease}");
                assert_eq!(ease.apply(1.0), 1.0, "{ease}");
            }
        }
    }

    #[test]
    fn bare_family_means_out() {
        let ease: Ease = "power2".parse().unwrap();
        assert_eq!(ease, Ease::default());
        assert_eq!(ease.to_string(), "power2.out");
    }

    #[test]
    fn aliases_resolve_to_power_families() {
        assert_eq!("cubic.in".parse::<Ease>().unwrap().family, EaseFamily::Power2);
        assert_eq!("strong.out".parse::<Ease>().unwrap().family, EaseFamily::Power4);
        assert_eq!("linear".parse::<Ease>().unwrap(), Ease::LINEAR);
    }

    #[test]
    fn unknown_names_are_rejected() {
        for bad in ["wobble", "power2.sideways", "", "power9.in"] {
            assert!(matches!(
                bad.parse::<Ease>(),
                Err(AnimationError::UnknownEasing { .. })
            ));
        }
    }

    #[test]
    fn power_curves_match_closed_forms() {
        let p2_out: Ease = "power2.out".parse().unwrap();
        let expected = 1.0 - 0.5f32.powi(3);
        assert!((p2_out.apply(0.5) - expected).abs() < 1e-6);

        let p1_in_out: Ease = "power1.inOut".parse().unwrap();
        assert!((p1_in_out.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((p1_in_out.apply(0.25) - 0.125).abs() < 1e-6);
    }

    #[test]
    fn back_overshoots_below_zero_when_easing_in() {
        let back_in: Ease = "back.in".parse().unwrap();
        assert!(back_in.apply(0.2) < 0.0);
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&"sine.inOut".parse::<Ease>().unwrap()).unwrap();
        assert_eq!(json, "\"sine.inOut\"");
        assert!(serde_json::from_str::<Ease>("\"nope\"").is_err());
    }
}
