//! vitrine-scene-core: scene graph, bounded regions and geometry utilities.
//!
//! The scene graph is a small arena of nodes (groups, meshes, line segments,
//! lights, cameras) addressed by [`NodeId`]. Geometry utilities operate on it
//! the way a showcase page prepares loaded models: sizing, centering, mesh
//! extraction and resource disposal. Failures inside utilities are absorbed
//! and logged; only misuse (bad descriptors, unknown tags) surfaces as
//! [`SceneError`].

pub mod bounded;
pub mod error;
pub mod math;
pub mod model;
pub mod resources;
pub mod scene;
pub mod utils;

pub use bounded::{BoundedRegion, BoundedRegionProps, BoundedVolume, ClampFn, Size3, Wireframe};
pub use error::SceneError;
pub use math::{Aabb, Transform};
pub use model::{Model, ModelDesc};
pub use resources::{
    ColorEncoding, Geometry, ImageInfo, Material, MaterialKind, MaterialSet, Texture, TextureMaps,
    TextureSlot,
};
pub use scene::{Camera, Light, LightKind, Mesh, Node, NodeId, NodeKind, Scene};
pub use utils::{
    bounding_box_size, center_object, clamp, correct_gamma_for_texture, degrees_to_radians,
    dispose_geometry, dispose_material, extract_first_mesh, is_mobile, is_power_of_two, lerp,
    MOBILE_BREAKPOINT,
};

pub use nalgebra::{Point3, Vector3};

/// Scene result type
pub type Result<T> = core::result::Result<T, SceneError>;
