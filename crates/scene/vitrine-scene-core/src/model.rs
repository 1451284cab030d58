//! Loaded model representation (GLTF-style named nodes and materials).
//!
//! Fetching and decoding model files is the host's job; this module takes an
//! already-decoded [`ModelDesc`] and builds a self-contained scene from it.

use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::math::Transform;
use crate::resources::{Geometry, Material, MaterialKind, MaterialSet, Texture, TextureSlot};
use crate::scene::{Camera, Light, LightKind, Mesh, Node, NodeId, NodeKind, Scene};

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelDesc {
    pub name: String,
    #[serde(default)]
    pub materials: Vec<MaterialDesc>,
    #[serde(default)]
    pub nodes: Vec<NodeDesc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialDesc {
    pub name: String,
    #[serde(flatten)]
    pub kind: MaterialKind,
    #[serde(default)]
    pub textures: Vec<TextureDesc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextureDesc {
    pub slot: TextureSlot,
    pub name: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeDesc {
    pub name: String,
    #[serde(flatten)]
    pub kind: NodeKindDesc,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    /// Indices into `ModelDesc::nodes`.
    #[serde(default)]
    pub children: Vec<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKindDesc {
    Group,
    Mesh {
        geometry: GeometryDesc,
        /// Material names; more than one makes a multi-material mesh.
        #[serde(default)]
        materials: Vec<String>,
    },
    Light {
        light: LightKind,
        intensity: f32,
    },
    Camera {
        fov: f32,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum GeometryDesc {
    Cuboid { width: f32, height: f32, depth: f32 },
    Vertices { positions: Vec<[f32; 3]> },
}

impl GeometryDesc {
    fn build(&self) -> Geometry {
        match self {
            GeometryDesc::Cuboid {
                width,
                height,
                depth,
            } => Geometry::cuboid(*width, *height, *depth),
            GeometryDesc::Vertices { positions } => Geometry::new(
                positions
                    .iter()
                    .map(|p| Point3::new(p[0], p[1], p[2]))
                    .collect(),
            ),
        }
    }
}

impl MaterialDesc {
    fn build(&self) -> Material {
        let mut material = Material::new(self.name.clone(), self.kind.clone());
        for tex in &self.textures {
            let mut texture = Texture::new(tex.name.clone());
            if let (Some(w), Some(h)) = (tex.width, tex.height) {
                texture = texture.with_image(w, h);
            }
            *material.maps.slot_mut(tex.slot) = Some(texture);
        }
        material
    }
}

/// A loaded model: its own scene graph under a synthetic root group named
/// after the model, plus name lookups for nodes and materials.
#[derive(Clone, Debug)]
pub struct Model {
    pub name: String,
    pub scene: Scene,
    pub root: NodeId,
    pub nodes: HashMap<String, NodeId>,
    pub materials: HashMap<String, Material>,
}

impl Model {
    pub fn from_json(json: &str) -> Result<Model, SceneError> {
        let desc: ModelDesc = serde_json::from_str(json)?;
        Model::from_desc(&desc)
    }

    pub fn from_desc(desc: &ModelDesc) -> Result<Model, SceneError> {
        let materials: HashMap<String, Material> = desc
            .materials
            .iter()
            .map(|m| (m.name.clone(), m.build()))
            .collect();

        // Each node may have at most one parent; unreferenced nodes hang off the root.
        let mut parent_of: Vec<Option<usize>> = vec![None; desc.nodes.len()];
        for (i, node) in desc.nodes.iter().enumerate() {
            for &c in &node.children {
                if c >= desc.nodes.len() {
                    return Err(SceneError::InvalidModel {
                        reason: format!("node '{}' references missing child {c}", node.name),
                    });
                }
                if parent_of[c].is_some() || c == i {
                    return Err(SceneError::InvalidModel {
                        reason: format!("node '{}' has more than one parent", desc.nodes[c].name),
                    });
                }
                parent_of[c] = Some(i);
            }
        }

        let mut scene = Scene::new();
        let root = scene.add_root(Node::group(desc.name.clone()));
        let mut nodes = HashMap::new();
        let mut placed = 0usize;

        let mut stack: Vec<(usize, NodeId)> = parent_of
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_none())
            .map(|(i, _)| (i, root))
            .rev()
            .collect();

        while let Some((idx, parent)) = stack.pop() {
            let nd = &desc.nodes[idx];
            let kind = Self::build_kind(nd, &materials)?;
            let node = Node::new(nd.name.clone(), kind).with_transform(Transform {
                position: Vector3::from(nd.position),
                rotation: Vector3::from(nd.rotation),
                scale: Vector3::from(nd.scale),
            });
            let id = scene.add(node, Some(parent))?;
            nodes.insert(nd.name.clone(), id);
            placed += 1;
            stack.extend(nd.children.iter().rev().map(|&c| (c, id)));
        }

        if placed != desc.nodes.len() {
            return Err(SceneError::InvalidModel {
                reason: "node hierarchy contains a cycle".to_string(),
            });
        }

        Ok(Model {
            name: desc.name.clone(),
            scene,
            root,
            nodes,
            materials,
        })
    }

    fn build_kind(
        nd: &NodeDesc,
        materials: &HashMap<String, Material>,
    ) -> Result<NodeKind, SceneError> {
        Ok(match &nd.kind {
            NodeKindDesc::Group => NodeKind::Group,
            NodeKindDesc::Mesh {
                geometry,
                materials: names,
            } => {
                let mut resolved = Vec::with_capacity(names.len());
                for name in names {
                    let m = materials.get(name).ok_or_else(|| SceneError::InvalidModel {
                        reason: format!("mesh '{}' uses unknown material '{name}'", nd.name),
                    })?;
                    resolved.push(m.clone());
                }
                let material = match resolved.len() {
                    0 => MaterialSet::Single(Material::standard("default")),
                    1 => MaterialSet::Single(resolved.remove(0)),
                    _ => MaterialSet::Multi(resolved),
                };
                NodeKind::Mesh(Mesh::new(geometry.build(), material))
            }
            NodeKindDesc::Light { light, intensity } => NodeKind::Light(Light {
                kind: *light,
                intensity: *intensity,
            }),
            NodeKindDesc::Camera { fov } => NodeKind::Camera(Camera {
                fov: *fov,
                ..Camera::default()
            }),
        })
    }

    /// True once the model carries both node and material tables.
    pub fn is_loaded(&self) -> bool {
        !self.nodes.is_empty() && !self.materials.is_empty()
    }

    /// Mesh nodes in scene order.
    pub fn mesh_nodes(&self) -> Vec<NodeId> {
        self.scene
            .traverse(self.root)
            .into_iter()
            .filter(|id| self.scene.get(*id).is_some_and(|n| n.kind.is_mesh()))
            .collect()
    }
}
