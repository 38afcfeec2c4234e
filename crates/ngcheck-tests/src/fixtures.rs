//! Reference meshes and scene file fixtures.

use ngcheck_core::geometry::Vec3;
use ngcheck_core::{Mesh, PolygonSoup};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Corners of the cube spanning `[-1, 1]` on every axis.
pub fn cube_vertices() -> Vec<Vec3> {
    vec![
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ]
}

/// Quad loops of the cube, all wound outward.
pub fn cube_loops() -> Vec<Vec<usize>> {
    vec![
        vec![0, 3, 2, 1],
        vec![4, 5, 6, 7],
        vec![0, 1, 5, 4],
        vec![2, 3, 7, 6],
        vec![1, 2, 6, 5],
        vec![3, 0, 4, 7],
    ]
}

fn uv_layers(with_uv: bool) -> Vec<String> {
    if with_uv {
        vec!["UVMap".to_string()]
    } else {
        Vec::new()
    }
}

/// Closed cube with outward normals.
pub fn cube(with_uv: bool) -> Mesh {
    Mesh::from_polygons(cube_vertices(), &cube_loops(), &[], uv_layers(with_uv))
        .expect("cube fixture is valid")
}

/// Closed cube whose second face (the top) is wound inward.
pub fn reversed_cube(with_uv: bool) -> Mesh {
    let mut loops = cube_loops();
    loops[1].reverse();
    Mesh::from_polygons(cube_vertices(), &loops, &[], uv_layers(with_uv))
        .expect("reversed cube fixture is valid")
}

/// Cube as stored polygon data.
pub fn cube_soup(with_uv: bool) -> PolygonSoup {
    PolygonSoup::new(cube_vertices(), cube_loops(), vec![], uv_layers(with_uv))
        .expect("cube fixture is valid")
}

/// A single open quad in the XY plane.
pub fn open_quad() -> Mesh {
    Mesh::from_polygons(
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        &[vec![0, 1, 2, 3]],
        &[],
        Vec::new(),
    )
    .expect("quad fixture is valid")
}

/// A single regular pentagon in the XY plane.
pub fn pentagon() -> Mesh {
    let vertices: Vec<Vec3> = (0..5)
        .map(|i| {
            let a = i as f64 * std::f64::consts::TAU / 5.0;
            [a.cos(), a.sin(), 0.0]
        })
        .collect();
    Mesh::from_polygons(vertices, &[vec![0, 1, 2, 3, 4]], &[], Vec::new())
        .expect("pentagon fixture is valid")
}

/// Three triangles sharing the edge between vertices 0 and 1.
pub fn fin() -> Mesh {
    Mesh::from_polygons(
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.5, 1.0, 0.0],
            [0.5, -1.0, 0.0],
            [0.5, 0.0, 1.0],
        ],
        &[vec![0, 1, 2], vec![1, 0, 3], vec![0, 1, 4]],
        &[],
        Vec::new(),
    )
    .expect("fin fixture is valid")
}

/// Writes a mesh as OBJ text under object name `name`.
pub fn mesh_to_obj(name: &str, mesh: &Mesh) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "o {}", name);
    for v in mesh.vertices() {
        let _ = writeln!(out, "v {} {} {}", v[0], v[1], v[2]);
    }
    if mesh.has_uv() {
        let _ = writeln!(out, "vt 0 0");
    }
    for face in mesh.faces() {
        let corners: Vec<String> = face
            .verts
            .iter()
            .map(|&v| {
                if mesh.has_uv() {
                    format!("{}/1", v + 1)
                } else {
                    (v + 1).to_string()
                }
            })
            .collect();
        let _ = writeln!(out, "f {}", corners.join(" "));
    }
    out
}

/// Concatenates several meshes into one OBJ file with global vertex indices.
pub fn scene_to_obj(objects: &[(&str, &Mesh)]) -> String {
    let mut out = String::new();
    let mut offset = 0;
    let any_uv = objects.iter().any(|(_, m)| m.has_uv());
    if any_uv {
        let _ = writeln!(out, "vt 0 0");
    }
    for (name, mesh) in objects {
        let _ = writeln!(out, "o {}", name);
        for v in mesh.vertices() {
            let _ = writeln!(out, "v {} {} {}", v[0], v[1], v[2]);
        }
        for face in mesh.faces() {
            let corners: Vec<String> = face
                .verts
                .iter()
                .map(|&v| {
                    if mesh.has_uv() {
                        format!("{}/1", v + 1 + offset)
                    } else {
                        (v + 1 + offset).to_string()
                    }
                })
                .collect();
            let _ = writeln!(out, "f {}", corners.join(" "));
        }
        offset += mesh.vertices().len();
    }
    out
}

/// A temporary directory holding scene files.
pub struct SceneDir {
    pub root: TempDir,
}

impl SceneDir {
    /// Create a new empty scene directory.
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Get the directory path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write a file relative to the directory and return its path.
    pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write scene file");
        path
    }
}

impl Default for SceneDir {
    fn default() -> Self {
        Self::new()
    }
}
