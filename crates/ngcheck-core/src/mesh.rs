//! Polygon mesh snapshot and the sources that produce it.
//!
//! A [`Mesh`] is the linked representation the analyzer walks: vertices,
//! edges with their incident faces, and faces with their vertex loops and
//! side edges. Hosts hand meshes over through the [`MeshSource`] trait, which
//! has two implementations here:
//!
//! - [`Mesh`] itself, for data that is already linked (an edit buffer),
//! - [`PolygonSoup`], for stored polygon lists that are linked on demand.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::MeshError;
use crate::geometry::{centroid, newell_normal, Vec3};

/// Anything that can hand the analyzer a linked mesh snapshot.
pub trait MeshSource {
    /// Returns the mesh to analyze, borrowing when no linking work is needed.
    fn mesh(&self) -> Cow<'_, Mesh>;
}

/// An edge between two vertices and the faces that use it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    /// Endpoint vertex indices, smaller index first.
    pub verts: [usize; 2],
    /// Indices of the faces whose loop contains this edge.
    pub link_faces: Vec<usize>,
}

/// A polygon face.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Face {
    /// Vertex loop in winding order.
    pub verts: Vec<usize>,
    /// Edge index of each loop side; side `i` joins `verts[i]` and `verts[i + 1]`.
    pub edges: Vec<usize>,
}

impl Face {
    /// Number of vertices in the loop.
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    /// True for a face without vertices (never produced by the builders).
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }
}

/// A linked polygon mesh.
///
/// Only serialized: the edge and face links are derived data, so a mesh is
/// always built through [`Mesh::from_polygons`] or a [`PolygonSoup`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    uv_layers: Vec<String>,
}

impl Mesh {
    /// Creates a mesh with no geometry and no UV layers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a linked mesh from polygon loops.
    ///
    /// Edges are created in first-seen order while walking the faces, then
    /// `loose_edges` that are not already part of a face are appended.
    pub fn from_polygons(
        vertices: Vec<Vec3>,
        polygons: &[Vec<usize>],
        loose_edges: &[[usize; 2]],
        uv_layers: Vec<String>,
    ) -> Result<Self, MeshError> {
        validate_polygons(vertices.len(), polygons, loose_edges)?;
        Ok(Self::link(vertices, polygons, loose_edges, uv_layers))
    }

    /// Links polygon data that has already passed `validate_polygons`.
    fn link(
        vertices: Vec<Vec3>,
        polygons: &[Vec<usize>],
        loose_edges: &[[usize; 2]],
        uv_layers: Vec<String>,
    ) -> Self {
        let mut edge_lookup: HashMap<(usize, usize), usize> = HashMap::new();
        let mut edges: Vec<Edge> = Vec::new();
        let mut faces: Vec<Face> = Vec::with_capacity(polygons.len());

        for (face_index, poly) in polygons.iter().enumerate() {
            let n = poly.len();
            let mut face_edges = Vec::with_capacity(n);
            for i in 0..n {
                let key = edge_key(poly[i], poly[(i + 1) % n]);
                let edge_index = *edge_lookup.entry(key).or_insert_with(|| {
                    edges.push(Edge {
                        verts: [key.0, key.1],
                        link_faces: Vec::new(),
                    });
                    edges.len() - 1
                });
                edges[edge_index].link_faces.push(face_index);
                face_edges.push(edge_index);
            }
            faces.push(Face {
                verts: poly.clone(),
                edges: face_edges,
            });
        }

        for &[a, b] in loose_edges {
            let key = edge_key(a, b);
            edge_lookup.entry(key).or_insert_with(|| {
                edges.push(Edge {
                    verts: [key.0, key.1],
                    link_faces: Vec::new(),
                });
                edges.len() - 1
            });
        }

        Self {
            vertices,
            edges,
            faces,
            uv_layers,
        }
    }

    /// Vertex positions.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Edges in index order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Faces in index order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// True when at least one UV layer exists.
    pub fn has_uv(&self) -> bool {
        !self.uv_layers.is_empty()
    }

    /// Mean of all vertex positions, or the origin for a mesh without vertices.
    pub fn origin(&self) -> Vec3 {
        centroid(self.vertices.iter().copied())
    }

    /// Arithmetic mean of the face's loop vertices.
    pub fn face_center(&self, face: &Face) -> Vec3 {
        centroid(face.verts.iter().map(|&v| self.vertices[v]))
    }

    /// Unit face normal (Newell's method), zero for a loop without area.
    pub fn face_normal(&self, face: &Face) -> Vec3 {
        let points: Vec<Vec3> = face.verts.iter().map(|&v| self.vertices[v]).collect();
        newell_normal(&points)
    }
}

impl MeshSource for Mesh {
    fn mesh(&self) -> Cow<'_, Mesh> {
        Cow::Borrowed(self)
    }
}

/// Unlinked polygon data as stored on disk or in an object's mesh datablock.
///
/// Input is validated on construction and on deserialization, so linking
/// never sees an out-of-range or repeated vertex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SoupParts")]
pub struct PolygonSoup {
    vertices: Vec<Vec3>,
    polygons: Vec<Vec<usize>>,
    loose_edges: Vec<[usize; 2]>,
    uv_layers: Vec<String>,
}

impl PolygonSoup {
    /// Validates and stores polygon data.
    pub fn new(
        vertices: Vec<Vec3>,
        polygons: Vec<Vec<usize>>,
        loose_edges: Vec<[usize; 2]>,
        uv_layers: Vec<String>,
    ) -> Result<Self, MeshError> {
        validate_polygons(vertices.len(), &polygons, &loose_edges)?;
        Ok(Self {
            vertices,
            polygons,
            loose_edges,
            uv_layers,
        })
    }
}

/// Unchecked serialized form of a [`PolygonSoup`].
#[derive(Deserialize)]
struct SoupParts {
    vertices: Vec<Vec3>,
    polygons: Vec<Vec<usize>>,
    #[serde(default)]
    loose_edges: Vec<[usize; 2]>,
    #[serde(default)]
    uv_layers: Vec<String>,
}

impl TryFrom<SoupParts> for PolygonSoup {
    type Error = MeshError;

    fn try_from(parts: SoupParts) -> Result<Self, Self::Error> {
        Self::new(
            parts.vertices,
            parts.polygons,
            parts.loose_edges,
            parts.uv_layers,
        )
    }
}

impl MeshSource for PolygonSoup {
    fn mesh(&self) -> Cow<'_, Mesh> {
        Cow::Owned(Mesh::link(
            self.vertices.clone(),
            &self.polygons,
            &self.loose_edges,
            self.uv_layers.clone(),
        ))
    }
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

fn validate_polygons(
    vertex_count: usize,
    polygons: &[Vec<usize>],
    loose_edges: &[[usize; 2]],
) -> Result<(), MeshError> {
    for (face, poly) in polygons.iter().enumerate() {
        if poly.len() < 3 {
            return Err(MeshError::FaceTooSmall {
                face,
                count: poly.len(),
            });
        }
        for (i, &vertex) in poly.iter().enumerate() {
            if vertex >= vertex_count {
                return Err(MeshError::InvalidVertexIndex { face, vertex });
            }
            if poly[..i].contains(&vertex) {
                return Err(MeshError::DuplicateVertex { face, vertex });
            }
        }
    }

    for (edge, &[a, b]) in loose_edges.iter().enumerate() {
        for vertex in [a, b] {
            if vertex >= vertex_count {
                return Err(MeshError::InvalidEdgeVertex { edge, vertex });
            }
        }
        if a == b {
            return Err(MeshError::DegenerateEdge { edge, vertex: a });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn quad_positions() -> Vec<Vec3> {
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]
    }

    #[test]
    fn test_edges_are_shared_between_faces() {
        let mesh = Mesh::from_polygons(
            quad_positions(),
            &[vec![0, 1, 2], vec![0, 2, 3]],
            &[],
            vec![],
        )
        .unwrap();

        assert_eq!(mesh.edges().len(), 5);
        let diagonal = mesh
            .edges()
            .iter()
            .find(|e| e.verts == [0, 2])
            .unwrap();
        assert_eq!(diagonal.link_faces, vec![0, 1]);
    }

    #[test]
    fn test_face_sides_follow_loop_order() {
        let mesh = Mesh::from_polygons(quad_positions(), &[vec![0, 1, 2, 3]], &[], vec![]).unwrap();
        let face = &mesh.faces()[0];
        let sides: Vec<[usize; 2]> = face.edges.iter().map(|&e| mesh.edges()[e].verts).collect();
        assert_eq!(sides, vec![[0, 1], [1, 2], [2, 3], [0, 3]]);
    }

    #[test]
    fn test_loose_edges_are_appended_once() {
        let mesh = Mesh::from_polygons(
            quad_positions(),
            &[vec![0, 1, 2]],
            &[[2, 3], [1, 0], [3, 2]],
            vec![],
        )
        .unwrap();
        // three face sides plus one new loose edge; [1, 0] already exists
        assert_eq!(mesh.edges().len(), 4);
        assert!(mesh.edges()[3].link_faces.is_empty());
        assert_eq!(mesh.edges()[3].verts, [2, 3]);
    }

    #[test]
    fn test_rejects_small_face() {
        let err = Mesh::from_polygons(quad_positions(), &[vec![0, 1]], &[], vec![]).unwrap_err();
        assert_eq!(err, MeshError::FaceTooSmall { face: 0, count: 2 });
    }

    #[test]
    fn test_rejects_out_of_range_vertex() {
        let err =
            Mesh::from_polygons(quad_positions(), &[vec![0, 1, 9]], &[], vec![]).unwrap_err();
        assert_eq!(err, MeshError::InvalidVertexIndex { face: 0, vertex: 9 });
    }

    #[test]
    fn test_rejects_repeated_vertex() {
        let err = PolygonSoup::new(quad_positions(), vec![vec![0, 1, 2, 1]], vec![], vec![])
            .unwrap_err();
        assert_eq!(err, MeshError::DuplicateVertex { face: 0, vertex: 1 });
    }

    #[test]
    fn test_rejects_degenerate_loose_edge() {
        let err = PolygonSoup::new(quad_positions(), vec![], vec![[2, 2]], vec![]).unwrap_err();
        assert_eq!(err, MeshError::DegenerateEdge { edge: 0, vertex: 2 });
    }

    #[test]
    fn test_soup_links_to_same_mesh() {
        let soup = PolygonSoup::new(
            quad_positions(),
            vec![vec![0, 1, 2, 3]],
            vec![],
            vec!["UVMap".to_string()],
        )
        .unwrap();
        let direct = Mesh::from_polygons(
            quad_positions(),
            &[vec![0, 1, 2, 3]],
            &[],
            vec!["UVMap".to_string()],
        )
        .unwrap();
        assert_eq!(soup.mesh().into_owned(), direct);
        assert!(matches!(direct.mesh(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_deserialize_validates_soup() {
        let soup: PolygonSoup = serde_json::from_str(
            r#"{"vertices": [[0,0,0],[1,0,0],[0,1,0]], "polygons": [[0,1,2]], "uv_layers": ["UVMap"]}"#,
        )
        .unwrap();
        assert_eq!(soup.mesh().faces().len(), 1);
        assert_eq!(soup.mesh().edges().len(), 3);
        assert!(soup.mesh().has_uv());

        let err = serde_json::from_str::<PolygonSoup>(
            r#"{"vertices": [[0,0,0],[1,0,0],[0,1,0]], "polygons": [[0,1,9]]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid vertex index 9"), "{err}");

        let err = serde_json::from_str::<PolygonSoup>(
            r#"{"vertices": [[0,0,0],[1,0,0],[0,1,0]], "polygons": [], "loose_edges": [[1,1]]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("connects vertex 1 to itself"), "{err}");
    }

    #[test]
    fn test_soup_serializes_to_its_parts() {
        let soup = PolygonSoup::new(quad_positions(), vec![vec![0, 1, 2, 3]], vec![], vec![]).unwrap();
        let back: PolygonSoup = serde_json::from_str(&serde_json::to_string(&soup).unwrap()).unwrap();
        assert_eq!(back, soup);
    }

    #[test]
    fn test_face_center_and_normal() {
        let mesh = Mesh::from_polygons(quad_positions(), &[vec![0, 1, 2, 3]], &[], vec![]).unwrap();
        let face = &mesh.faces()[0];
        assert_eq!(mesh.face_center(face), [0.5, 0.5, 0.0]);
        assert_eq!(mesh.face_normal(face), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_empty_mesh_origin() {
        let mesh = Mesh::empty();
        assert_eq!(mesh.origin(), [0.0, 0.0, 0.0]);
        assert!(!mesh.has_uv());
    }
}
