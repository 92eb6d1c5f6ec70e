//! Mesh loading.
//!
//! Wavefront `.obj` is always available; `.stl` (ASCII or binary) is behind the
//! `stl-io` feature.

mod obj;

#[cfg(feature = "stl-io")]
mod stl;

use crate::mesh::TriMesh;
use std::path::{Path, PathBuf};

pub use obj::parse_obj;

#[cfg(feature = "stl-io")]
pub use stl::parse_stl;

/// Mesh loading and format errors.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("std::io::Error: {0}")]
    StdIo(#[from] std::io::Error),

    #[error("input is malformed at line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("face index {index} is out of range (vertices = {vertex_count})")]
    IndexOutOfRange { index: i64, vertex_count: usize },

    #[error("mesh contains no triangles")]
    Empty,

    #[error("unknown mesh format: {0:?}")]
    UnknownFormat(String),
}

/// The mesh formats [`load_mesh`] understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    #[cfg(feature = "stl-io")]
    Stl,
}

impl MeshFormat {
    /// Detects the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "obj" => Some(Self::Obj),
            #[cfg(feature = "stl-io")]
            "stl" => Some(Self::Stl),
            _ => None,
        }
    }
}

/// Loads a triangle mesh from `path`, picking the parser from the file extension.
///
/// ```no_run
/// # fn main() -> Result<(), ctslice::io::IoError> {
/// let mesh = ctslice::io::load_mesh("dataset/chair/0001/model.obj")?;
/// println!("{} triangles", mesh.triangle_count());
/// # Ok(())
/// # }
/// ```
pub fn load_mesh(path: impl AsRef<Path>) -> Result<TriMesh, IoError> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path)
        .ok_or_else(|| IoError::UnknownFormat(path.display().to_string()))?;

    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::StdIo(e)
        }
    })?;

    let mesh = match format {
        MeshFormat::Obj => {
            let text = String::from_utf8_lossy(&bytes);
            parse_obj(&text)?
        },
        #[cfg(feature = "stl-io")]
        MeshFormat::Stl => parse_stl(&bytes)?,
    };

    if mesh.triangle_count() == 0 {
        return Err(IoError::Empty);
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(MeshFormat::from_path(Path::new("a/model.obj")), Some(MeshFormat::Obj));
        assert_eq!(MeshFormat::from_path(Path::new("MODEL.OBJ")), Some(MeshFormat::Obj));
        assert_eq!(MeshFormat::from_path(Path::new("model.ply")), None);
        assert_eq!(MeshFormat::from_path(Path::new("model")), None);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_mesh("definitely/not/here/model.obj").unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_mesh("model.ply").unwrap_err();
        assert!(matches!(err, IoError::UnknownFormat(_)));
    }
}
