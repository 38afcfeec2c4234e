//! Minimal GLB writer for loader tests.

use serde_json::json;

/// Wraps a glTF JSON document and a binary chunk into a GLB container.
pub fn build_glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let json_bytes = json.as_bytes();
    let json_padding = (4 - (json_bytes.len() % 4)) % 4;
    let padded_json_len = json_bytes.len() + json_padding;

    let mut bin_data = bin.to_vec();
    while bin_data.len() % 4 != 0 {
        bin_data.push(0);
    }

    let bin_chunk_len = if bin_data.is_empty() { 0 } else { 8 + bin_data.len() };
    let total_len = 12 + 8 + padded_json_len + bin_chunk_len;

    let mut glb = Vec::with_capacity(total_len);
    // Header
    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&(total_len as u32).to_le_bytes());

    // JSON chunk
    glb.extend_from_slice(&(padded_json_len as u32).to_le_bytes());
    glb.extend_from_slice(&0x4E4F534Au32.to_le_bytes());
    glb.extend_from_slice(json_bytes);
    glb.extend(std::iter::repeat(b' ').take(json_padding));

    // Binary chunk, omitted when there is no buffer data
    if !bin_data.is_empty() {
        glb.extend_from_slice(&(bin_data.len() as u32).to_le_bytes());
        glb.extend_from_slice(&0x004E4942u32.to_le_bytes());
        glb.extend_from_slice(&bin_data);
    }

    glb
}

/// One mesh node for [`scene_glb`].
pub struct GlbMesh<'a> {
    pub name: &'a str,
    pub positions: &'a [[f32; 3]],
    /// Triangle list indices.
    pub indices: &'a [u32],
    pub with_uv: bool,
}

/// Builds a GLB with one node per mesh, followed by one empty node per
/// entry of `empties`.
pub fn scene_glb(meshes: &[GlbMesh<'_>], empties: &[&str]) -> Vec<u8> {
    let mut bin: Vec<u8> = Vec::new();
    let mut accessors = Vec::new();
    let mut views = Vec::new();
    let mut gltf_meshes = Vec::new();
    let mut nodes = Vec::new();

    let mut push_view = |bin: &mut Vec<u8>, bytes: Vec<u8>| -> usize {
        let offset = bin.len();
        bin.extend_from_slice(&bytes);
        views.push(json!({"buffer": 0, "byteOffset": offset, "byteLength": bytes.len()}));
        views.len() - 1
    };

    for (mesh_index, mesh) in meshes.iter().enumerate() {
        let (min, max) = bounds(mesh.positions);

        let pos_bytes: Vec<u8> = mesh
            .positions
            .iter()
            .flat_map(|p| p.iter().flat_map(|c| c.to_le_bytes()))
            .collect();
        let pos_view = push_view(&mut bin, pos_bytes);
        accessors.push(json!({
            "bufferView": pos_view, "componentType": 5126, "count": mesh.positions.len(),
            "type": "VEC3", "min": min, "max": max
        }));
        let pos_accessor = accessors.len() - 1;

        let idx_bytes: Vec<u8> = mesh.indices.iter().flat_map(|i| i.to_le_bytes()).collect();
        let idx_view = push_view(&mut bin, idx_bytes);
        accessors.push(json!({
            "bufferView": idx_view, "componentType": 5125, "count": mesh.indices.len(),
            "type": "SCALAR"
        }));
        let idx_accessor = accessors.len() - 1;

        let mut attributes = json!({"POSITION": pos_accessor});
        if mesh.with_uv {
            let uv_bytes: Vec<u8> = mesh
                .positions
                .iter()
                .flat_map(|p| [p[0], p[1]].into_iter().flat_map(|c| c.to_le_bytes()))
                .collect();
            let uv_view = push_view(&mut bin, uv_bytes);
            accessors.push(json!({
                "bufferView": uv_view, "componentType": 5126, "count": mesh.positions.len(),
                "type": "VEC2"
            }));
            attributes["TEXCOORD_0"] = json!(accessors.len() - 1);
        }

        gltf_meshes.push(json!({
            "primitives": [{"attributes": attributes, "indices": idx_accessor}]
        }));
        nodes.push(json!({"name": mesh.name, "mesh": mesh_index}));
    }

    for name in empties {
        nodes.push(json!({"name": name}));
    }

    let node_ids: Vec<usize> = (0..nodes.len()).collect();
    let mut document = json!({
        "asset": {"version": "2.0", "generator": "ngcheck-tests"},
        "scene": 0,
        "scenes": [{"nodes": node_ids}],
        "nodes": nodes
    });
    if !gltf_meshes.is_empty() {
        document["meshes"] = json!(gltf_meshes);
        document["accessors"] = json!(accessors);
        document["bufferViews"] = json!(views);
        document["buffers"] = json!([{"byteLength": bin.len()}]);
    }

    build_glb(&document.to_string(), &bin)
}

fn bounds(positions: &[[f32; 3]]) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for p in positions {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    if positions.is_empty() {
        return ([0.0; 3], [0.0; 3]);
    }
    (min, max)
}

/// Splits quad loops into a triangle index list (fan from the first corner).
pub fn triangulate(loops: &[Vec<usize>]) -> Vec<u32> {
    let mut out = Vec::new();
    for l in loops {
        for i in 1..l.len().saturating_sub(1) {
            out.extend([l[0] as u32, l[i] as u32, l[i + 1] as u32]);
        }
    }
    out
}

/// Converts `f64` positions to the `f32` layout glTF stores.
pub fn to_f32(positions: &[[f64; 3]]) -> Vec<[f32; 3]> {
    positions
        .iter()
        .map(|p| [p[0] as f32, p[1] as f32, p[2] as f32])
        .collect()
}
