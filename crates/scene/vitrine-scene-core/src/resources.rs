//! GPU-backed resources: geometries, materials and textures.
//!
//! Disposal releases the GPU-side storage a resource represents. Disposing
//! twice is harmless here, but callers should not rely on more than that.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::math::Aabb;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorEncoding {
    #[default]
    Linear,
    Srgb,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub image: Option<ImageInfo>,
    pub encoding: ColorEncoding,
    pub needs_update: bool,
    disposed: bool,
}

impl Texture {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: None,
            encoding: ColorEncoding::Linear,
            needs_update: false,
            disposed: false,
        }
    }

    pub fn with_image(mut self, width: u32, height: u32) -> Self {
        self.image = Some(ImageInfo { width, height });
        self
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Named texture slots a material can sample from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureSlot {
    Map,
    AoMap,
    BumpMap,
    NormalMap,
    RoughnessMap,
    MetalnessMap,
    EmissiveMap,
    EnvMap,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 8] = [
        TextureSlot::Map,
        TextureSlot::AoMap,
        TextureSlot::BumpMap,
        TextureSlot::NormalMap,
        TextureSlot::RoughnessMap,
        TextureSlot::MetalnessMap,
        TextureSlot::EmissiveMap,
        TextureSlot::EnvMap,
    ];
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextureMaps {
    pub map: Option<Texture>,
    pub ao_map: Option<Texture>,
    pub bump_map: Option<Texture>,
    pub normal_map: Option<Texture>,
    pub roughness_map: Option<Texture>,
    pub metalness_map: Option<Texture>,
    pub emissive_map: Option<Texture>,
    pub env_map: Option<Texture>,
}

impl TextureMaps {
    pub fn slot(&self, slot: TextureSlot) -> Option<&Texture> {
        match slot {
            TextureSlot::Map => self.map.as_ref(),
            TextureSlot::AoMap => self.ao_map.as_ref(),
            TextureSlot::BumpMap => self.bump_map.as_ref(),
            TextureSlot::NormalMap => self.normal_map.as_ref(),
            TextureSlot::RoughnessMap => self.roughness_map.as_ref(),
            TextureSlot::MetalnessMap => self.metalness_map.as_ref(),
            TextureSlot::EmissiveMap => self.emissive_map.as_ref(),
            TextureSlot::EnvMap => self.env_map.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: TextureSlot) -> &mut Option<Texture> {
        match slot {
            TextureSlot::Map => &mut self.map,
            TextureSlot::AoMap => &mut self.ao_map,
            TextureSlot::BumpMap => &mut self.bump_map,
            TextureSlot::NormalMap => &mut self.normal_map,
            TextureSlot::RoughnessMap => &mut self.roughness_map,
            TextureSlot::MetalnessMap => &mut self.metalness_map,
            TextureSlot::EmissiveMap => &mut self.emissive_map,
            TextureSlot::EnvMap => &mut self.env_map,
        }
    }

    /// Every populated slot.
    pub fn iter(&self) -> impl Iterator<Item = &Texture> {
        TextureSlot::ALL.into_iter().filter_map(|slot| self.slot(slot))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Texture> {
        [
            &mut self.map,
            &mut self.ao_map,
            &mut self.bump_map,
            &mut self.normal_map,
            &mut self.roughness_map,
            &mut self.metalness_map,
            &mut self.emissive_map,
            &mut self.env_map,
        ]
        .into_iter()
        .filter_map(Option::as_mut)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialKind {
    Standard,
    Basic,
    LineBasic { color: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub kind: MaterialKind,
    pub maps: TextureMaps,
    disposed: bool,
}

impl Material {
    pub fn new(name: impl Into<String>, kind: MaterialKind) -> Self {
        Self {
            name: name.into(),
            kind,
            maps: TextureMaps::default(),
            disposed: false,
        }
    }

    pub fn standard(name: impl Into<String>) -> Self {
        Self::new(name, MaterialKind::Standard)
    }

    pub fn line_basic(color: impl Into<String>) -> Self {
        Self::new(
            "line",
            MaterialKind::LineBasic {
                color: color.into(),
            },
        )
    }

    pub fn with_texture(mut self, slot: TextureSlot, texture: Texture) -> Self {
        *self.maps.slot_mut(slot) = Some(texture);
        self
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// A mesh's material slot: one material or a list (multi-material meshes).
#[derive(Clone, Debug, PartialEq)]
pub enum MaterialSet {
    Single(Material),
    Multi(Vec<Material>),
}

impl MaterialSet {
    pub fn iter(&self) -> std::slice::Iter<'_, Material> {
        match self {
            MaterialSet::Single(m) => std::slice::from_ref(m).iter(),
            MaterialSet::Multi(ms) => ms.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Material> {
        match self {
            MaterialSet::Single(m) => std::slice::from_mut(m).iter_mut(),
            MaterialSet::Multi(ms) => ms.iter_mut(),
        }
    }

    /// Name of the first material, used for lookups by name.
    pub fn primary_name(&self) -> Option<&str> {
        self.iter().next().map(|m| m.name.as_str())
    }
}

impl From<Material> for MaterialSet {
    fn from(m: Material) -> Self {
        MaterialSet::Single(m)
    }
}

impl From<Vec<Material>> for MaterialSet {
    fn from(ms: Vec<Material>) -> Self {
        MaterialSet::Multi(ms)
    }
}

/// Vertex positions in local space.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    positions: Vec<Point3<f32>>,
    disposed: bool,
}

impl Geometry {
    pub fn new(positions: Vec<Point3<f32>>) -> Self {
        Self {
            positions,
            disposed: false,
        }
    }

    /// Axis-aligned box centered on the origin (corner vertices only).
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let aabb = Aabb::from_center_and_size(Point3::origin(), Vector3::new(width, height, depth));
        Self::new(aabb.corners().to_vec())
    }

    #[inline]
    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    /// Release buffer storage. The vertex data is gone afterwards.
    pub fn dispose(&mut self) {
        self.positions = Vec::new();
        self.disposed = true;
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
