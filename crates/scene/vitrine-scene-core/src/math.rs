//! Axis-aligned boxes and node transforms.

use nalgebra::{Matrix4, Point3, Rotation3, Vector3};

/// Axis-aligned bounding box.
///
/// An empty box has `min > max` on every axis; its size is the zero vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    /// Create an empty bounding box
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// Box of the given size centered on `center`.
    pub fn from_center_and_size(center: Point3<f32>, size: Vector3<f32>) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f32>>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.expand_to_include(p);
        }
        aabb
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn expand_to_include(&mut self, point: &Point3<f32>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Grow this box to cover `other`. Empty boxes contribute nothing.
    pub fn union(&mut self, other: &Aabb) {
        if other.is_empty() {
            return;
        }
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    pub fn size(&self) -> Vector3<f32> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    pub fn center(&self) -> Point3<f32> {
        if self.is_empty() {
            return Point3::origin();
        }
        nalgebra::center(&self.min, &self.max)
    }

    pub fn contains_point(&self, point: &Point3<f32>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Closest point inside the box (component-wise clamp).
    pub fn clamp_point(&self, point: &Point3<f32>) -> Point3<f32> {
        Point3::new(
            self.min.x.max(self.max.x.min(point.x)),
            self.min.y.max(self.max.y.min(point.y)),
            self.min.z.max(self.max.z.min(point.z)),
        )
    }

    pub fn corners(&self) -> [Point3<f32>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    /// The 12 edges of the box as line segments.
    pub fn edges(&self) -> [(Point3<f32>, Point3<f32>); 12] {
        let c = self.corners();
        [
            (c[0], c[1]),
            (c[2], c[3]),
            (c[4], c[5]),
            (c[6], c[7]),
            (c[0], c[2]),
            (c[1], c[3]),
            (c[4], c[6]),
            (c[5], c[7]),
            (c[0], c[4]),
            (c[1], c[5]),
            (c[2], c[6]),
            (c[3], c[7]),
        ]
    }

    /// Box enclosing this box's corners after applying `m`.
    pub fn transformed(&self, m: &Matrix4<f32>) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        let mut out = Aabb::empty();
        for corner in self.corners() {
            out.expand_to_include(&m.transform_point(&corner));
        }
        out
    }
}

/// Local transform of a scene node. Rotation is Euler angles in radians
/// applied in XYZ order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_position(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            ..Self::identity()
        }
    }

    pub fn rotation_matrix(&self) -> Rotation3<f32> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.rotation.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.rotation.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.rotation.z);
        rx * ry * rz
    }

    /// translation * rotation * scale
    pub fn local_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.position)
            * self.rotation_matrix().to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_box_has_zero_size_and_origin_center() {
        let b = Aabb::empty();
        assert!(b.is_empty());
        assert_eq!(b.size(), Vector3::zeros());
        assert_eq!(b.center(), Point3::origin());
    }

    #[test]
    fn clamp_point_projects_onto_faces() {
        let b = Aabb::from_center_and_size(Point3::origin(), Vector3::new(2.0, 2.0, 2.0));
        let p = b.clamp_point(&Point3::new(5.0, -0.5, -9.0));
        assert_eq!(p, Point3::new(1.0, -0.5, -1.0));
    }

    #[test]
    fn transformed_box_follows_rotation() {
        let b = Aabb::from_center_and_size(Point3::origin(), Vector3::new(2.0, 4.0, 2.0));
        let t = Transform {
            rotation: Vector3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2),
            ..Transform::identity()
        };
        let size = b.transformed(&t.local_matrix()).size();
        assert!((size.x - 4.0).abs() < 1e-4);
        assert!((size.y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn box_has_twelve_distinct_edges() {
        let b = Aabb::from_center_and_size(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
        for (a, c) in b.edges() {
            assert!(((a - c).norm() - 1.0).abs() < 1e-6);
        }
    }
}
