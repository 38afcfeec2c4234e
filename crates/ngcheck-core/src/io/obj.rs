//! Wavefront OBJ reader.
//!
//! Supported statements:
//! - `v x y z`      vertex position
//! - `vt u v`       texture coordinate
//! - `f a b c ...`  face, corners as `v`, `v/vt`, `v//vn` or `v/vt/vn`
//! - `l a b ...`    polyline, stored as loose edges
//! - `o name`       starts a new object
//!
//! Indices are 1-based; negative indices count back from the most recent
//! element. Other statements (`vn`, `g`, `s`, `usemtl`, `mtllib`, ...) are
//! ignored.

use std::collections::HashMap;

use crate::error::LoadError;
use crate::geometry::Vec3;
use crate::mesh::PolygonSoup;
use crate::scene::SceneObject;

/// UV layer name given to objects whose faces reference texture coordinates.
pub const OBJ_UV_LAYER: &str = "UVMap";

/// Parses OBJ text into mesh objects.
///
/// Geometry before the first `o` statement belongs to an object named
/// `default_name`; that object is dropped when it has no elements. Objects
/// started with `o` are kept even when empty.
pub fn parse_obj(text: &str, default_name: &str) -> Result<Vec<SceneObject>, LoadError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut texcoord_count = 0usize;
    let mut objects = Vec::new();
    let mut current = ObjectBuilder::new(default_name.to_string(), false);

    for (line_index, raw) in text.lines().enumerate() {
        let line_no = line_index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();

        match keyword {
            "v" => positions.push(parse_position(&args, line_no)?),
            "vt" => {
                if args.is_empty() {
                    return Err(parse_error(line_no, "texture coordinate needs at least 1 value"));
                }
                texcoord_count += 1;
            }
            "f" => {
                if args.len() < 3 {
                    return Err(parse_error(
                        line_no,
                        format!("face needs at least 3 vertices, got {}", args.len()),
                    ));
                }
                let mut poly = Vec::with_capacity(args.len());
                for token in &args {
                    let corner = parse_corner(token, positions.len(), texcoord_count, line_no)?;
                    if corner.has_texcoord {
                        current.has_uv = true;
                    }
                    poly.push(current.local_vertex(corner.vertex, &positions));
                }
                current.polygons.push(poly);
            }
            "l" => {
                if args.len() < 2 {
                    return Err(parse_error(line_no, "line needs at least 2 vertices"));
                }
                let mut prev: Option<usize> = None;
                for token in &args {
                    let corner = parse_corner(token, positions.len(), texcoord_count, line_no)?;
                    let v = current.local_vertex(corner.vertex, &positions);
                    if let Some(p) = prev {
                        current.loose_edges.push([p, v]);
                    }
                    prev = Some(v);
                }
            }
            "o" => {
                let name = if args.is_empty() {
                    default_name.to_string()
                } else {
                    args.join(" ")
                };
                let finished = std::mem::replace(&mut current, ObjectBuilder::new(name, true));
                if let Some(object) = finished.finish()? {
                    objects.push(object);
                }
            }
            _ => {}
        }
    }

    if let Some(object) = current.finish()? {
        objects.push(object);
    }

    Ok(objects)
}

struct ObjectBuilder {
    name: String,
    named: bool,
    local_index: HashMap<usize, usize>,
    vertices: Vec<Vec3>,
    polygons: Vec<Vec<usize>>,
    loose_edges: Vec<[usize; 2]>,
    has_uv: bool,
}

impl ObjectBuilder {
    fn new(name: String, named: bool) -> Self {
        Self {
            name,
            named,
            local_index: HashMap::new(),
            vertices: Vec::new(),
            polygons: Vec::new(),
            loose_edges: Vec::new(),
            has_uv: false,
        }
    }

    /// Maps a file-wide vertex index to this object's numbering.
    fn local_vertex(&mut self, global: usize, positions: &[Vec3]) -> usize {
        if let Some(&local) = self.local_index.get(&global) {
            return local;
        }
        let local = self.vertices.len();
        self.vertices.push(positions[global]);
        self.local_index.insert(global, local);
        local
    }

    fn finish(self) -> Result<Option<SceneObject>, LoadError> {
        if !self.named && self.polygons.is_empty() && self.loose_edges.is_empty() {
            return Ok(None);
        }
        let uv_layers = if self.has_uv {
            vec![OBJ_UV_LAYER.to_string()]
        } else {
            Vec::new()
        };
        let soup = PolygonSoup::new(self.vertices, self.polygons, self.loose_edges, uv_layers)
            .map_err(|source| LoadError::Mesh {
                object: self.name.clone(),
                source,
            })?;
        Ok(Some(SceneObject::stored_mesh(self.name, soup)))
    }
}

struct Corner {
    vertex: usize,
    has_texcoord: bool,
}

fn parse_error(line: usize, message: impl Into<String>) -> LoadError {
    LoadError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_position(args: &[&str], line: usize) -> Result<Vec3, LoadError> {
    if args.len() < 3 {
        return Err(parse_error(
            line,
            format!("vertex needs 3 coordinates, got {}", args.len()),
        ));
    }
    let mut p = [0.0; 3];
    for (slot, token) in p.iter_mut().zip(args) {
        *slot = token
            .parse::<f64>()
            .map_err(|_| parse_error(line, format!("invalid coordinate '{}'", token)))?;
    }
    Ok(p)
}

fn parse_corner(
    token: &str,
    vertex_count: usize,
    texcoord_count: usize,
    line: usize,
) -> Result<Corner, LoadError> {
    let mut fields = token.split('/');
    let vertex_field = fields.next().unwrap_or("");
    let vertex = resolve_index(vertex_field, vertex_count, line)?;

    let has_texcoord = match fields.next() {
        Some(vt) if !vt.is_empty() => {
            resolve_index(vt, texcoord_count, line)?;
            true
        }
        _ => false,
    };

    Ok(Corner {
        vertex,
        has_texcoord,
    })
}

/// Converts a 1-based or negative OBJ index into a 0-based index.
fn resolve_index(field: &str, count: usize, line: usize) -> Result<usize, LoadError> {
    let raw: i64 = field
        .parse()
        .map_err(|_| parse_error(line, format!("invalid index '{}'", field)))?;
    let resolved = if raw > 0 {
        raw - 1
    } else if raw < 0 {
        count as i64 + raw
    } else {
        return Err(parse_error(line, "index 0 is not valid in OBJ"));
    };
    if resolved < 0 || resolved >= count as i64 {
        return Err(parse_error(
            line,
            format!("index {} out of range ({} defined)", raw, count),
        ));
    }
    Ok(resolved as usize)
}
