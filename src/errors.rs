//! Slicing, rasterization and batch errors

use crate::float_types::Real;
use crate::io::IoError;
use std::fmt::Display;
use std::path::PathBuf;

/// Axis of a 2D slice polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// All the failures the slicing pipeline can report.
///
/// Only [`SliceError::DatasetUnreadable`], [`SliceError::OutputRootInaccessible`] and
/// [`SliceError::InvalidConfig`] abort a batch; everything else is recorded for the
/// model or height it belongs to and processing continues.
#[derive(Debug, thiserror::Error)]
pub enum SliceError {
    /// (MeshLoad) The mesh file is missing, unreadable or malformed
    #[error("(MeshLoad) could not load mesh {}: {source}", .path.display())]
    MeshLoad {
        path: PathBuf,
        #[source]
        source: IoError,
    },
    /// (DegeneratePolygon) The slice polygon has a zero-width coordinate range
    #[error("(DegeneratePolygon) slice polygon has zero extent along {axis}")]
    DegeneratePolygon { axis: Axis },
    /// (OutputWrite) A directory or image could not be written
    #[error("(OutputWrite) could not write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// (OutputRootInaccessible) The output root itself cannot be created
    #[error("(OutputRootInaccessible) output root {} is not usable: {source}", .path.display())]
    OutputRootInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// (DatasetUnreadable) The dataset root cannot be enumerated
    #[error("(DatasetUnreadable) could not read dataset {}: {source}", .path.display())]
    DatasetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// (TooManyHeights) The step size is too small for the mesh's vertical range
    #[error("(TooManyHeights) step {step} over a range of {span} needs more than {limit} heights")]
    TooManyHeights { step: Real, span: Real, limit: usize },
    /// (InvalidConfig) A configuration value is out of range
    #[error("(InvalidConfig) {0}")]
    InvalidConfig(String),
}

impl SliceError {
    /// Wraps a plain I/O failure (e.g. directory creation) as an output write error.
    pub fn output_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SliceError::OutputWrite {
            path: path.into(),
            source: image::ImageError::IoError(source),
        }
    }

    /// Returns true if this error must stop the whole run.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            SliceError::OutputRootInaccessible { .. }
                | SliceError::DatasetUnreadable { .. }
                | SliceError::InvalidConfig(_)
        )
    }
}
