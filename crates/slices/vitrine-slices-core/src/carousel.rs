//! Carousel slice: a row of items slid into view one at a time.

use serde::{Deserialize, Serialize};
use vitrine_animation_core::{
    AnimProp, AnimationRequest, Ease, EaseDirection, EaseFamily, TickOutputs, TimelineController,
};
use vitrine_scene_core::{Node, NodeId, Scene, Transform};

use crate::error::SliceError;

pub const TRANSITION_EASE: Ease = Ease::new(EaseFamily::Power2, EaseDirection::InOut);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarouselItem {
    pub key: String,
    #[serde(default)]
    pub title: String,
}

fn default_true() -> bool {
    true
}

fn default_transition() -> f32 {
    0.5
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarouselProps {
    pub items: Vec<CarouselItem>,
    /// Seconds between automatic advances; `None` disables auto-rotate.
    #[serde(default)]
    pub auto_rotate_interval: Option<f32>,
    #[serde(default = "default_true")]
    pub enable_controls: bool,
    pub item_width: f32,
    /// Seconds per slide transition.
    #[serde(default = "default_transition")]
    pub transition_duration: f32,
}

impl CarouselProps {
    pub fn from_json(json: &str) -> Result<Self, SliceError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Carousel state plus the scene subtree it slides.
#[derive(Debug)]
pub struct Carousel {
    props: CarouselProps,
    scene: Scene,
    group: NodeId,
    item_nodes: Vec<NodeId>,
    active_index: usize,
    controller: TimelineController,
    auto_rotate: bool,
    since_advance: f32,
}

impl Carousel {
    /// Build the carousel group with one child per item and animate to the
    /// first item.
    pub fn new(props: CarouselProps) -> Result<Self, SliceError> {
        if !props.item_width.is_finite() {
            return Err(SliceError::InvalidConfig {
                reason: format!("item_width must be finite, got {}", props.item_width),
            });
        }

        let mut scene = Scene::new();
        let group = scene.add_root(Node::group("carousel"));
        let item_nodes = props
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let x = i as f32 * props.item_width;
                scene.add(
                    Node::group(item.key.clone()).with_transform(Transform::from_position(x, 0.0, 0.0)),
                    Some(group),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let auto_rotate = props.auto_rotate_interval.is_some_and(|s| s > 0.0);
        let mut carousel = Self {
            props,
            scene,
            group,
            item_nodes,
            active_index: 0,
            controller: TimelineController::default(),
            auto_rotate,
            since_advance: 0.0,
        };
        carousel.animate_to_active();
        Ok(carousel)
    }

    pub fn props(&self) -> &CarouselProps {
        &self.props
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn group(&self) -> NodeId {
        self.group
    }

    pub fn item_nodes(&self) -> &[NodeId] {
        &self.item_nodes
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn controller(&self) -> &TimelineController {
        &self.controller
    }

    /// Whether previous/next buttons are shown.
    #[inline]
    pub fn controls_visible(&self) -> bool {
        self.props.enable_controls
    }

    /// Resting x offset of each item inside the group.
    pub fn item_positions(&self) -> Vec<f32> {
        (0..self.props.items.len())
            .map(|i| i as f32 * self.props.item_width)
            .collect()
    }

    /// Current x of the sliding group.
    pub fn group_x(&self) -> f32 {
        self.scene
            .get(self.group)
            .map_or(0.0, |node| node.transform.position.x)
    }

    pub fn next(&mut self) {
        self.select(self.active_index.saturating_add(1));
    }

    pub fn previous(&mut self) {
        self.select(self.active_index.saturating_sub(1));
    }

    /// Make `index` (clamped to the item range) active. Animates only when
    /// the active index changes.
    pub fn select(&mut self, index: usize) {
        let last = self.props.items.len().saturating_sub(1);
        let index = index.min(last);
        if index == self.active_index {
            return;
        }
        self.active_index = index;
        self.since_advance = 0.0;
        self.animate_to_active();
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled && self.props.auto_rotate_interval.is_some_and(|s| s > 0.0);
        self.since_advance = 0.0;
    }

    #[inline]
    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate
    }

    fn animate_to_active(&mut self) {
        let x = -(self.active_index as f32) * self.props.item_width;
        self.controller.create_timeline(
            AnimationRequest::new(self.group)
                .to(AnimProp::PositionX, x)
                .duration(self.props.transition_duration)
                .easing(TRANSITION_EASE),
        );
    }

    /// Advance auto-rotation and the slide transition by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> &TickOutputs {
        if let (true, Some(interval)) = (self.auto_rotate, self.props.auto_rotate_interval) {
            self.since_advance += dt.max(0.0);
            if self.since_advance >= interval {
                self.since_advance = 0.0;
                self.next();
            }
        }
        self.controller.tick(dt, &mut self.scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(n: usize) -> CarouselProps {
        CarouselProps {
            items: (0..n)
                .map(|i| CarouselItem {
                    key: format!("item-{i}"),
                    title: String::new(),
                })
                .collect(),
            auto_rotate_interval: None,
            enable_controls: true,
            item_width: 2.0,
            transition_duration: 0.5,
        }
    }

    #[test]
    fn index_clamps_at_both_ends() {
        let mut c = Carousel::new(props(3)).unwrap();
        c.previous();
        assert_eq!(c.active_index(), 0);
        c.next();
        c.next();
        c.next();
        assert_eq!(c.active_index(), 2);
    }

    #[test]
    fn empty_carousel_stays_at_zero() {
        let mut c = Carousel::new(props(0)).unwrap();
        c.next();
        c.previous();
        assert_eq!(c.active_index(), 0);
        assert!(c.item_positions().is_empty());
    }

    #[test]
    fn items_are_laid_out_by_width() {
        let c = Carousel::new(props(3)).unwrap();
        assert_eq!(c.item_positions(), vec![0.0, 2.0, 4.0]);
        let second = c.scene().get(c.item_nodes()[1]).unwrap();
        assert_eq!(second.transform.position.x, 2.0);
    }

    #[test]
    fn non_finite_width_is_rejected() {
        let mut p = props(2);
        p.item_width = f32::NAN;
        assert!(matches!(
            Carousel::new(p),
            Err(SliceError::InvalidConfig { .. })
        ));
    }
}
