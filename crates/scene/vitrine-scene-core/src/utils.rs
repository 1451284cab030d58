//! Geometry and resource helpers used when preparing loaded models.
//!
//! None of these return errors: failures are logged and degrade to a neutral
//! value (zero vector, `None`, no-op).

use nalgebra::Vector3;

use crate::error::SceneError;
use crate::model::Model;
use crate::resources::{ColorEncoding, Geometry, MaterialSet, Texture};
use crate::scene::{NodeId, Scene};

/// Viewport widths below this are treated as mobile.
pub const MOBILE_BREAKPOINT: u32 = 768;

/// World-space size of the bounding box of `node` and its descendants.
/// Returns the zero vector when the box cannot be computed.
pub fn bounding_box_size(scene: &Scene, node: NodeId) -> Vector3<f32> {
    match scene.compute_bounding_box(node) {
        Ok(aabb) => aabb.size(),
        Err(err) => {
            log::error!("Error calculating bounding box size ({}): {err}", err.category());
            Vector3::zeros()
        }
    }
}

/// Move `node` so the center of its world bounding box sits at the origin.
pub fn center_object(scene: &mut Scene, node: Option<NodeId>) {
    let Some(id) = node else {
        log::warn!("center_object called without an object");
        return;
    };
    if let Err(err) = try_center(scene, id) {
        log::error!("Error centering object ({}): {err}", err.category());
    }
}

fn try_center(scene: &mut Scene, id: NodeId) -> Result<(), SceneError> {
    let aabb = scene.compute_bounding_box(id)?;
    if aabb.is_empty() {
        return Ok(());
    }
    let world_offset = -aabb.center().coords;
    let parent = scene
        .get(id)
        .ok_or(SceneError::NodeNotFound { id })?
        .parent();
    let local_offset = match parent {
        Some(pid) => {
            let inverse = scene.world_matrix(pid)?.try_inverse().ok_or_else(|| {
                SceneError::SingularTransform {
                    node: scene.get(pid).map(|n| n.name.clone()).unwrap_or_default(),
                }
            })?;
            inverse.transform_vector(&world_offset)
        }
        None => world_offset,
    };
    if let Some(n) = scene.get_mut(id) {
        n.transform.position += local_offset;
    }
    Ok(())
}

/// Release every texture slot of each material, then the materials themselves.
pub fn dispose_material(material: &mut MaterialSet) {
    for m in material.iter_mut() {
        for texture in m.maps.iter_mut() {
            texture.dispose();
        }
        m.dispose();
    }
}

pub fn dispose_geometry(geometry: &mut Geometry) {
    geometry.dispose();
}

/// First mesh node of `model` in depth-first pre-order.
pub fn extract_first_mesh(model: &Model) -> Option<NodeId> {
    let found = model
        .scene
        .traverse(model.root)
        .into_iter()
        .find(|id| model.scene.get(*id).is_some_and(|n| n.kind.is_mesh()));
    if found.is_none() {
        log::debug!("model '{}' has no mesh nodes", model.name);
    }
    found
}

/// Power-of-two test used for texture sizes. Zero counts as a power of two.
#[inline]
pub fn is_power_of_two(value: u32) -> bool {
    value & value.wrapping_sub(1) == 0
}

/// Mark a power-of-two texture as sRGB and request re-upload.
/// Textures without image data or with other sizes are left untouched.
pub fn correct_gamma_for_texture(texture: &mut Texture) {
    let Some(image) = texture.image else {
        return;
    };
    if is_power_of_two(image.width) && is_power_of_two(image.height) {
        texture.encoding = ColorEncoding::Srgb;
        texture.needs_update = true;
    }
}

#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}

#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

#[inline]
pub fn is_mobile(viewport_width: u32) -> bool {
    viewport_width < MOBILE_BREAKPOINT
}
