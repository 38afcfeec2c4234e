//! glTF 2.0 reader (`.gltf` and `.glb`).
//!
//! Every node becomes one scene object. Mesh nodes collect all of their
//! primitives into a single polygon soup in node-local space.

use std::collections::HashMap;
use std::path::Path;

use ::gltf::mesh::Mode;

use super::default_object_name;
use crate::error::LoadError;
use crate::geometry::Vec3;
use crate::mesh::PolygonSoup;
use crate::scene::{ObjectKind, SceneObject};

/// UV layer name given to meshes with a `TEXCOORD_0` attribute.
pub const GLTF_UV_LAYER: &str = "TEXCOORD_0";

/// Options for the glTF reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GltfOptions {
    /// Merge vertices whose positions are bit-identical.
    ///
    /// glTF duplicates vertices along normal and UV seams; without welding
    /// every seam reads as a boundary.
    pub weld_vertices: bool,
}

impl Default for GltfOptions {
    fn default() -> Self {
        Self {
            weld_vertices: true,
        }
    }
}

/// Loads a glTF or GLB file from disk.
pub fn load_gltf(path: &Path, options: &GltfOptions) -> Result<Vec<SceneObject>, LoadError> {
    let (document, buffers, _images) = ::gltf::import(path)
        .map_err(|e| LoadError::Gltf(format!("{}: {}", path.display(), e)))?;
    objects_from_document(&document, &buffers, &default_object_name(path), options)
}

/// Loads a self-contained glTF or GLB document from memory.
pub fn load_gltf_slice(
    bytes: &[u8],
    default_name: &str,
    options: &GltfOptions,
) -> Result<Vec<SceneObject>, LoadError> {
    let (document, buffers, _images) =
        ::gltf::import_slice(bytes).map_err(|e| LoadError::Gltf(e.to_string()))?;
    objects_from_document(&document, &buffers, default_name, options)
}

fn objects_from_document(
    document: &::gltf::Document,
    buffers: &[::gltf::buffer::Data],
    default_name: &str,
    options: &GltfOptions,
) -> Result<Vec<SceneObject>, LoadError> {
    let mut objects = Vec::new();

    for node in document.nodes() {
        let name = node_name(&node, default_name);

        let object = if let Some(mesh) = node.mesh() {
            let mut builder = SoupBuilder::new(options.weld_vertices);
            for primitive in mesh.primitives() {
                builder.add_primitive(&primitive, buffers)?;
            }
            let soup = builder
                .finish()
                .map_err(|source| LoadError::Mesh {
                    object: name.clone(),
                    source,
                })?;
            SceneObject::stored_mesh(name, soup)
        } else if node.camera().is_some() {
            SceneObject::without_mesh(name, ObjectKind::Camera)
        } else {
            SceneObject::without_mesh(name, ObjectKind::Empty)
        };

        objects.push(object);
    }

    Ok(objects)
}

fn node_name(node: &::gltf::Node<'_>, default_name: &str) -> String {
    if let Some(name) = node.name() {
        return name.to_string();
    }
    if let Some(name) = node.mesh().as_ref().and_then(|m| m.name()) {
        return name.to_string();
    }
    format!("{}.{:03}", default_name, node.index())
}

struct SoupBuilder {
    weld: Option<HashMap<[u32; 3], usize>>,
    vertices: Vec<Vec3>,
    polygons: Vec<Vec<usize>>,
    loose_edges: Vec<[usize; 2]>,
    has_uv: bool,
}

impl SoupBuilder {
    fn new(weld_vertices: bool) -> Self {
        Self {
            weld: weld_vertices.then(HashMap::new),
            vertices: Vec::new(),
            polygons: Vec::new(),
            loose_edges: Vec::new(),
            has_uv: false,
        }
    }

    fn add_primitive(
        &mut self,
        primitive: &::gltf::Primitive<'_>,
        buffers: &[::gltf::buffer::Data],
    ) -> Result<(), LoadError> {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let Some(positions) = reader.read_positions() else {
            return Ok(());
        };
        let vertex_map: Vec<usize> = positions.map(|p| self.insert_vertex(p)).collect();

        if reader.read_tex_coords(0).is_some() {
            self.has_uv = true;
        }

        let raw: Vec<usize> = match reader.read_indices() {
            Some(indices) => indices.into_u32().map(|i| i as usize).collect(),
            None => (0..vertex_map.len()).collect(),
        };
        if let Some(&bad) = raw.iter().find(|&&i| i >= vertex_map.len()) {
            return Err(LoadError::Gltf(format!(
                "primitive index {} out of range ({} vertices)",
                bad,
                vertex_map.len()
            )));
        }
        let idx: Vec<usize> = raw.iter().map(|&i| vertex_map[i]).collect();

        match primitive.mode() {
            Mode::Triangles => {
                for tri in idx.chunks_exact(3) {
                    self.add_triangle(tri[0], tri[1], tri[2]);
                }
            }
            Mode::TriangleStrip => {
                for i in 0..idx.len().saturating_sub(2) {
                    if i % 2 == 0 {
                        self.add_triangle(idx[i], idx[i + 1], idx[i + 2]);
                    } else {
                        // odd strip triangles flip winding
                        self.add_triangle(idx[i], idx[i + 2], idx[i + 1]);
                    }
                }
            }
            Mode::TriangleFan => {
                for i in 1..idx.len().saturating_sub(1) {
                    self.add_triangle(idx[0], idx[i], idx[i + 1]);
                }
            }
            Mode::Lines => {
                for pair in idx.chunks_exact(2) {
                    self.add_edge(pair[0], pair[1]);
                }
            }
            Mode::LineStrip => {
                for pair in idx.windows(2) {
                    self.add_edge(pair[0], pair[1]);
                }
            }
            Mode::LineLoop => {
                for pair in idx.windows(2) {
                    self.add_edge(pair[0], pair[1]);
                }
                if idx.len() > 2 {
                    self.add_edge(idx[idx.len() - 1], idx[0]);
                }
            }
            Mode::Points => {}
        }

        Ok(())
    }

    fn insert_vertex(&mut self, p: [f32; 3]) -> usize {
        let position = [p[0] as f64, p[1] as f64, p[2] as f64];
        match self.weld.as_mut() {
            Some(weld) => {
                let key = [p[0].to_bits(), p[1].to_bits(), p[2].to_bits()];
                let vertices = &mut self.vertices;
                *weld.entry(key).or_insert_with(|| {
                    vertices.push(position);
                    vertices.len() - 1
                })
            }
            None => {
                self.vertices.push(position);
                self.vertices.len() - 1
            }
        }
    }

    fn add_triangle(&mut self, a: usize, b: usize, c: usize) {
        // collapsed by welding or by repeated indices
        if a == b || b == c || a == c {
            return;
        }
        self.polygons.push(vec![a, b, c]);
    }

    fn add_edge(&mut self, a: usize, b: usize) {
        if a != b {
            self.loose_edges.push([a, b]);
        }
    }

    fn finish(self) -> Result<PolygonSoup, crate::error::MeshError> {
        let uv_layers = if self.has_uv {
            vec![GLTF_UV_LAYER.to_string()]
        } else {
            Vec::new()
        };
        PolygonSoup::new(self.vertices, self.polygons, self.loose_edges, uv_layers)
    }
}
