//! Host objects as seen by the checker.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mesh::{Mesh, MeshSource, PolygonSoup};

/// The type of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Mesh,
    Curve,
    Camera,
    Light,
    Empty,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjectKind::Mesh => "MESH",
            ObjectKind::Curve => "CURVE",
            ObjectKind::Camera => "CAMERA",
            ObjectKind::Light => "LIGHT",
            ObjectKind::Empty => "EMPTY",
        };
        f.write_str(s)
    }
}

/// Mesh data attached to a mesh object.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshData {
    /// Stored polygon lists, linked when analyzed.
    Stored(PolygonSoup),
    /// An already-linked edit buffer.
    Edit(Mesh),
}

impl MeshSource for MeshData {
    fn mesh(&self) -> Cow<'_, Mesh> {
        match self {
            MeshData::Stored(soup) => soup.mesh(),
            MeshData::Edit(mesh) => mesh.mesh(),
        }
    }
}

/// A named object in a loaded scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    name: String,
    kind: ObjectKind,
    data: Option<MeshData>,
}

impl SceneObject {
    /// Creates a mesh object over stored polygon data.
    pub fn stored_mesh(name: impl Into<String>, soup: PolygonSoup) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Mesh,
            data: Some(MeshData::Stored(soup)),
        }
    }

    /// Creates a mesh object over a linked mesh.
    pub fn edit_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Mesh,
            data: Some(MeshData::Edit(mesh)),
        }
    }

    /// Creates an object that carries no mesh data.
    pub fn without_mesh(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            data: None,
        }
    }

    /// Object name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Object type.
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Mesh data when the object is a mesh.
    pub fn mesh_data(&self) -> Option<&MeshData> {
        match self.kind {
            ObjectKind::Mesh => self.data.as_ref(),
            _ => None,
        }
    }

    /// True for mesh objects that carry data.
    pub fn is_mesh(&self) -> bool {
        self.mesh_data().is_some()
    }
}
