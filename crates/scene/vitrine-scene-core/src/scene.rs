//! Scene graph arena.

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::math::{Aabb, Transform};
use crate::resources::{Geometry, Material, MaterialSet};

/// Dense node index. Ids of removed nodes are never reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: MaterialSet,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: impl Into<MaterialSet>) -> Self {
        Self {
            geometry,
            material: material.into(),
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    Ambient,
    Directional,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub intensity: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 50.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh(Mesh),
    /// Line list drawn with a line material (helpers, outlines).
    LineSegments {
        geometry: Geometry,
        material: Material,
    },
    Light(Light),
    Camera(Camera),
}

impl NodeKind {
    #[inline]
    pub fn is_mesh(&self) -> bool {
        matches!(self, NodeKind::Mesh(_))
    }

    fn geometry(&self) -> Option<&Geometry> {
        match self {
            NodeKind::Mesh(mesh) => Some(&mesh.geometry),
            NodeKind::LineSegments { geometry, .. } => Some(geometry),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    pub visible: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            kind,
            visible: true,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Vec<Option<Node>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` under `parent` (or as a root). Fails if the parent is gone.
    pub fn add(&mut self, node: Node, parent: Option<NodeId>) -> Result<NodeId, SceneError> {
        if let Some(pid) = parent {
            if self.get(pid).is_none() {
                return Err(SceneError::NodeNotFound { id: pid });
            }
        }
        let id = NodeId(self.nodes.len() as u32);
        let mut node = node;
        node.parent = parent;
        node.children.clear();
        self.nodes.push(Some(node));
        if let Some(pid) = parent {
            if let Some(p) = self.get_mut(pid) {
                p.children.push(id);
            }
        }
        Ok(id)
    }

    pub fn add_root(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(Node {
            parent: None,
            children: Vec::new(),
            ..node
        }));
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| match n {
                Some(node) if node.parent.is_none() => Some(NodeId(i as u32)),
                _ => None,
            })
            .collect()
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().enumerate().find_map(|(i, n)| match n {
            Some(node) if node.name == name => Some(NodeId(i as u32)),
            _ => None,
        })
    }

    /// Remove `id` and its whole subtree. Returns the removed subtree root.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let subtree = self.traverse(id);
        let parent = self.get(id)?.parent;
        if let Some(pid) = parent {
            if let Some(p) = self.get_mut(pid) {
                p.children.retain(|c| *c != id);
            }
        }
        let mut root = None;
        for nid in subtree {
            let taken = self.nodes.get_mut(nid.0 as usize).and_then(Option::take);
            if nid == id {
                root = taken;
            }
        }
        root
    }

    /// Depth-first pre-order walk starting at (and including) `root`.
    pub fn traverse(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Composed parent chain transform of `id`.
    pub fn world_matrix(&self, id: NodeId) -> Result<Matrix4<f32>, SceneError> {
        let mut m = Matrix4::identity();
        let mut cursor = Some(id);
        while let Some(cid) = cursor {
            let node = self.get(cid).ok_or(SceneError::NodeNotFound { id: cid })?;
            m = node.transform.local_matrix() * m;
            cursor = node.parent;
        }
        Ok(m)
    }

    /// World-space bounding box of every geometry in the subtree rooted at `id`.
    pub fn compute_bounding_box(&self, id: NodeId) -> Result<Aabb, SceneError> {
        if !self.contains(id) {
            return Err(SceneError::NodeNotFound { id });
        }
        let mut aabb = Aabb::empty();
        for nid in self.traverse(id) {
            let Some(node) = self.get(nid) else {
                continue;
            };
            let Some(geometry) = node.kind.geometry() else {
                continue;
            };
            if geometry.is_disposed() {
                return Err(SceneError::GeometryDisposed {
                    node: node.name.clone(),
                });
            }
            if let Some(index) = geometry
                .positions()
                .iter()
                .position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
            {
                return Err(SceneError::NonFiniteVertex {
                    node: node.name.clone(),
                    index,
                });
            }
            let local = Aabb::from_points(geometry.positions());
            aabb.union(&local.transformed(&self.world_matrix(nid)?));
        }
        Ok(aabb)
    }
}
