//! The closed set of animatable properties.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// Which transform channel a property lives in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Position,
    Rotation,
    Scale,
}

/// One scalar component of a node transform. Rotation components are Euler
/// angles in radians.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnimProp {
    #[serde(rename = "position.x")]
    PositionX,
    #[serde(rename = "position.y")]
    PositionY,
    #[serde(rename = "position.z")]
    PositionZ,
    #[serde(rename = "rotation.x")]
    RotationX,
    #[serde(rename = "rotation.y")]
    RotationY,
    #[serde(rename = "rotation.z")]
    RotationZ,
    #[serde(rename = "scale.x")]
    ScaleX,
    #[serde(rename = "scale.y")]
    ScaleY,
    #[serde(rename = "scale.z")]
    ScaleZ,
}

impl AnimProp {
    pub const ALL: [AnimProp; 9] = [
        AnimProp::PositionX,
        AnimProp::PositionY,
        AnimProp::PositionZ,
        AnimProp::RotationX,
        AnimProp::RotationY,
        AnimProp::RotationZ,
        AnimProp::ScaleX,
        AnimProp::ScaleY,
        AnimProp::ScaleZ,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnimProp::PositionX => "position.x",
            AnimProp::PositionY => "position.y",
            AnimProp::PositionZ => "position.z",
            AnimProp::RotationX => "rotation.x",
            AnimProp::RotationY => "rotation.y",
            AnimProp::RotationZ => "rotation.z",
            AnimProp::ScaleX => "scale.x",
            AnimProp::ScaleY => "scale.y",
            AnimProp::ScaleZ => "scale.z",
        }
    }

    #[inline]
    pub fn channel(self) -> Channel {
        match self {
            AnimProp::PositionX | AnimProp::PositionY | AnimProp::PositionZ => Channel::Position,
            AnimProp::RotationX | AnimProp::RotationY | AnimProp::RotationZ => Channel::Rotation,
            AnimProp::ScaleX | AnimProp::ScaleY | AnimProp::ScaleZ => Channel::Scale,
        }
    }

    /// Component index within the channel (x = 0, y = 1, z = 2).
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            AnimProp::PositionX | AnimProp::RotationX | AnimProp::ScaleX => 0,
            AnimProp::PositionY | AnimProp::RotationY | AnimProp::ScaleY => 1,
            AnimProp::PositionZ | AnimProp::RotationZ | AnimProp::ScaleZ => 2,
        }
    }
}

impl FromStr for AnimProp {
    type Err = AnimationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        AnimProp::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| AnimationError::UnknownProperty {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for AnimProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_and_print() {
        for prop in AnimProp::ALL {
            assert_eq!(prop.as_str().parse::<AnimProp>().unwrap(), prop);
        }
        assert_eq!(AnimProp::RotationY.channel(), Channel::Rotation);
        assert_eq!(AnimProp::RotationY.axis(), 1);
    }

    #[test]
    fn unknown_property_is_an_error() {
        let err = "opacity".parse::<AnimProp>().unwrap_err();
        assert_eq!(
            err,
            AnimationError::UnknownProperty {
                name: "opacity".into()
            }
        );
    }

    #[test]
    fn serde_names_match_display() {
        let json = serde_json::to_string(&AnimProp::ScaleZ).unwrap();
        assert_eq!(json, "\"scale.z\"");
    }
}
