//! Bounded regions: axis-aligned volumes that constrain object placement.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::math::{Aabb, Transform};
use crate::resources::{Geometry, Material};
use crate::scene::{Node, NodeId, NodeKind, Scene};

fn default_boundary_color() -> String {
    "red".to_string()
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size3 {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Size3 {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    fn has_nan(&self) -> bool {
        self.width.is_nan() || self.height.is_nan() || self.depth.is_nan()
    }

    fn has_infinite(&self) -> bool {
        self.width.is_infinite() || self.height.is_infinite() || self.depth.is_infinite()
    }
}

/// Center plus non-negative finite extents.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundedVolume {
    pub center: Point3<f32>,
    pub extents: Vector3<f32>,
}

impl BoundedVolume {
    /// Zero-size volume at the origin.
    pub fn degenerate() -> Self {
        Self {
            center: Point3::origin(),
            extents: Vector3::zeros(),
        }
    }

    /// Validate inputs. NaN or infinite sizes (or a non-finite center)
    /// collapse the volume to [`BoundedVolume::degenerate`]; negative extents
    /// are clamped to zero.
    pub fn new(size: Size3, center: Point3<f32>) -> Self {
        if size.has_nan() {
            log::warn!("Bounded: invalid size provided (NaN): {size:?}");
            return Self::degenerate();
        }
        if size.has_infinite() || !center.iter().all(|c| c.is_finite()) {
            log::warn!("Bounded: non-finite size or center: {size:?} at {center:?}");
            return Self::degenerate();
        }
        let extents = Vector3::new(size.width, size.height, size.depth);
        if extents.iter().any(|e| *e < 0.0) {
            log::warn!("Bounded: negative extents clamped to zero: {size:?}");
        }
        Self {
            center,
            extents: extents.map(|e| e.max(0.0)),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_and_size(self.center, self.extents)
    }

    pub fn volume(&self) -> f32 {
        self.extents.x * self.extents.y * self.extents.z
    }
}

/// Pure projection of a point into a volume; cheap to copy into per-frame code.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClampFn {
    aabb: Aabb,
}

impl ClampFn {
    #[inline]
    pub fn apply(&self, point: &Point3<f32>) -> Point3<f32> {
        self.aabb.clamp_point(point)
    }
}

/// Outline of a region for debug rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct Wireframe {
    pub color: String,
    pub segments: [(Point3<f32>, Point3<f32>); 12],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundedRegionProps {
    pub size: Size3,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default = "default_boundary_color")]
    pub boundary_color: String,
    #[serde(default)]
    pub visible_helper: bool,
}

impl BoundedRegionProps {
    pub fn new(size: Size3) -> Self {
        Self {
            size,
            position: [0.0; 3],
            boundary_color: default_boundary_color(),
            visible_helper: false,
        }
    }
}

/// Axis-aligned region with memoized volume and clamp function.
///
/// The volume is recomputed only when size or center actually change;
/// `revision()` counts recomputations.
#[derive(Clone, Debug)]
pub struct BoundedRegion {
    size: Size3,
    center: Point3<f32>,
    boundary_color: String,
    visible_helper: bool,
    volume: BoundedVolume,
    aabb: Aabb,
    revision: u64,
}

impl BoundedRegion {
    pub fn new(size: Size3, center: Point3<f32>) -> Self {
        let volume = BoundedVolume::new(size, center);
        Self {
            size,
            center,
            boundary_color: default_boundary_color(),
            visible_helper: false,
            aabb: volume.aabb(),
            volume,
            revision: 1,
        }
    }

    pub fn from_props(props: &BoundedRegionProps) -> Self {
        let [x, y, z] = props.position;
        let mut region = Self::new(props.size, Point3::new(x, y, z));
        region.boundary_color = props.boundary_color.clone();
        region.visible_helper = props.visible_helper;
        region
    }

    fn recompute(&mut self) {
        self.volume = BoundedVolume::new(self.size, self.center);
        self.aabb = self.volume.aabb();
        self.revision += 1;
    }

    /// Returns true when the volume was recomputed.
    pub fn set_size(&mut self, size: Size3) -> bool {
        // NaN never compares equal, so a NaN size is re-validated every call.
        if size == self.size {
            return false;
        }
        self.size = size;
        self.recompute();
        true
    }

    /// Returns true when the volume was recomputed.
    pub fn set_center(&mut self, center: Point3<f32>) -> bool {
        if center == self.center {
            return false;
        }
        self.center = center;
        self.recompute();
        true
    }

    pub fn set_boundary_color(&mut self, color: impl Into<String>) {
        self.boundary_color = color.into();
    }

    pub fn set_helper_visible(&mut self, visible: bool) {
        self.visible_helper = visible;
    }

    #[inline]
    pub fn volume(&self) -> &BoundedVolume {
        &self.volume
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_degenerate(&self) -> bool {
        self.volume.extents == Vector3::zeros()
    }

    pub fn contains(&self, point: &Point3<f32>) -> bool {
        self.aabb.contains_point(point)
    }

    /// Closest point inside the region; points already inside come back unchanged.
    #[inline]
    pub fn clamp(&self, point: &Point3<f32>) -> Point3<f32> {
        self.aabb.clamp_point(point)
    }

    pub fn clamp_fn(&self) -> ClampFn {
        ClampFn { aabb: self.aabb }
    }

    /// Outline segments when the helper is enabled.
    pub fn wireframe(&self) -> Option<Wireframe> {
        if !self.visible_helper {
            return None;
        }
        Some(Wireframe {
            color: self.boundary_color.clone(),
            segments: self.aabb.edges(),
        })
    }

    /// Add a group at the region's center to `scene`, plus a line-segment
    /// helper child when the helper is visible. Returns the group id.
    pub fn mount(&self, scene: &mut Scene, parent: Option<NodeId>) -> Result<NodeId, SceneError> {
        let c = self.volume.center;
        let group = scene.add(
            Node::group("Bounded 3D Area").with_transform(Transform::from_position(c.x, c.y, c.z)),
            parent,
        )?;
        if self.visible_helper {
            let local = Aabb::from_center_and_size(Point3::origin(), self.volume.extents);
            let positions = local
                .edges()
                .iter()
                .flat_map(|(a, b)| [*a, *b])
                .collect();
            scene.add(
                Node::new(
                    "boundary",
                    NodeKind::LineSegments {
                        geometry: Geometry::new(positions),
                        material: Material::line_basic(self.boundary_color.clone()),
                    },
                ),
                Some(group),
            )?;
        }
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_size_degenerates_to_origin() {
        let r = BoundedRegion::new(Size3::new(f32::NAN, 1.0, 1.0), Point3::new(4.0, 4.0, 4.0));
        assert!(r.is_degenerate());
        assert_eq!(r.volume().center, Point3::origin());
        assert_eq!(r.clamp(&Point3::new(3.0, -2.0, 1.0)), Point3::origin());
    }

    #[test]
    fn negative_extents_clamp_to_zero() {
        let v = BoundedVolume::new(Size3::new(-2.0, 1.0, 1.0), Point3::origin());
        assert_eq!(v.extents, Vector3::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn setters_only_recompute_on_change() {
        let mut r = BoundedRegion::new(Size3::new(2.0, 2.0, 2.0), Point3::origin());
        assert_eq!(r.revision(), 1);
        assert!(!r.set_size(Size3::new(2.0, 2.0, 2.0)));
        assert!(!r.set_center(Point3::origin()));
        assert_eq!(r.revision(), 1);
        assert!(r.set_center(Point3::new(1.0, 0.0, 0.0)));
        assert_eq!(r.revision(), 2);
        assert!(r.contains(&Point3::new(1.9, 0.0, 0.0)));
    }

    #[test]
    fn wireframe_follows_helper_flag_and_color() {
        let mut props = BoundedRegionProps::new(Size3::new(1.0, 1.0, 1.0));
        assert!(BoundedRegion::from_props(&props).wireframe().is_none());
        props.visible_helper = true;
        props.boundary_color = "#00ff00".into();
        let wf = BoundedRegion::from_props(&props).wireframe().unwrap();
        assert_eq!(wf.color, "#00ff00");
        assert_eq!(wf.segments.len(), 12);
    }

    #[test]
    fn mount_adds_helper_only_when_visible() {
        let mut scene = Scene::new();
        let mut props = BoundedRegionProps::new(Size3::new(1.0, 2.0, 3.0));
        props.position = [0.0, 1.0, 0.0];
        let hidden = BoundedRegion::from_props(&props).mount(&mut scene, None).unwrap();
        assert!(scene.get(hidden).unwrap().children().is_empty());
        assert_eq!(scene.get(hidden).unwrap().transform.position.y, 1.0);

        props.visible_helper = true;
        let shown = BoundedRegion::from_props(&props).mount(&mut scene, None).unwrap();
        assert_eq!(scene.get(shown).unwrap().children().len(), 1);
    }

    #[test]
    fn props_parse_with_defaults() {
        let props: BoundedRegionProps =
            serde_json::from_str(r#"{ "size": { "width": 4, "height": 2, "depth": 1 } }"#).unwrap();
        assert_eq!(props.boundary_color, "red");
        assert!(!props.visible_helper);
        assert_eq!(props.position, [0.0; 3]);
    }
}
