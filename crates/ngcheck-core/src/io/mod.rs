//! Scene loaders.
//!
//! Each loader turns a file into [`SceneObject`]s. Mesh objects carry stored
//! polygon data in object-local space.

pub mod gltf;
pub mod obj;

use std::path::Path;

use crate::error::LoadError;
use crate::scene::SceneObject;

pub use self::gltf::GltfOptions;

/// Supported scene file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneFormat {
    Obj,
    Gltf,
    Glb,
}

impl SceneFormat {
    /// Determines the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "obj" => Some(SceneFormat::Obj),
            "gltf" => Some(SceneFormat::Gltf),
            "glb" => Some(SceneFormat::Glb),
            _ => None,
        }
    }
}

/// Returns true if `path` has a supported scene extension.
pub fn is_scene_file(path: &Path) -> bool {
    SceneFormat::from_path(path).is_some()
}

/// Loads every object of a scene file.
pub fn load_scene(path: &Path) -> Result<Vec<SceneObject>, LoadError> {
    let format = SceneFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string(),
    })?;

    match format {
        SceneFormat::Obj => {
            let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            obj::parse_obj(&text, &default_object_name(path))
        }
        SceneFormat::Gltf | SceneFormat::Glb => gltf::load_gltf(path, &GltfOptions::default()),
    }
}

/// File stem used for objects that have no name of their own.
pub fn default_object_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Object")
        .to_string()
}
