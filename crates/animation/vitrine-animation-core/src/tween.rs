//! Single-property tween.

use crate::access::{PropertyAccess, TargetHandle};
use crate::props::AnimProp;

/// Interpolates one property from its captured start value to `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub target: TargetHandle,
    pub prop: AnimProp,
    pub to: f32,
    from: Option<f32>,
}

impl Tween {
    pub fn new(target: TargetHandle, prop: AnimProp, to: f32) -> Self {
        Self {
            target,
            prop,
            to,
            from: None,
        }
    }

    /// Start value, once captured.
    #[inline]
    pub fn start_value(&self) -> Option<f32> {
        self.from
    }

    /// Read the start value from the host. Returns false if the target is gone.
    pub(crate) fn capture(&mut self, host: &dyn PropertyAccess) -> bool {
        match host.get(self.target, self.prop) {
            Some(v) => {
                self.from = Some(v);
                true
            }
            None => false,
        }
    }

    /// Value at eased progress `e` (may leave [0, 1] for overshooting curves).
    #[inline]
    pub fn value_at(&self, e: f32) -> f32 {
        // The final frame lands exactly on the end value.
        if e == 1.0 {
            return self.to;
        }
        let from = self.from.unwrap_or(self.to);
        from + (self.to - from) * e
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncaptured_tween_holds_its_end_value() {
        let t = Tween::new(TargetHandle(1), AnimProp::PositionX, 10.0);
        assert_eq!(t.value_at(0.0), 10.0);
        assert_eq!(t.start_value(), None);
    }

    #[test]
    fn interpolates_between_captured_and_target() {
        let mut t = Tween::new(TargetHandle(1), AnimProp::PositionX, 10.0);
        t.from = Some(2.0);
        assert_eq!(t.value_at(0.0), 2.0);
        assert_eq!(t.value_at(0.5), 6.0);
        assert_eq!(t.value_at(1.0), 10.0);
    }
}
