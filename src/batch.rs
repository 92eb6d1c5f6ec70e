//! Dataset traversal and the per-model slicing pipeline.
//!
//! A dataset is laid out as `<root>/<category>/<model_id>/<mesh file>`, and the output
//! tree mirrors it as `<output>/<category>/<model_id>/<index>.png`. Models are visited in
//! file-name order so repeated runs produce identical logs and reports.
//!
//! Failures are contained at the smallest unit that produced them: a height that cannot
//! be rasterized or written is recorded in its [`ModelReport`], a mesh that cannot be
//! loaded is recorded in the [`BatchReport`], and only an unusable dataset root, output
//! root or configuration stops the run.

use crate::config::SliceConfig;
use crate::errors::SliceError;
use crate::extract::{SliceOutcome, extract_slice};
use crate::float_types::Real;
use crate::io::load_mesh;
use crate::raster::{montage, rasterize, save_png};
use crate::traits::Sliceable;
use image::GrayImage;
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name of the optional side-by-side overview image
pub const MONTAGE_FILE: &str = "montage.png";

/// One model directory found in the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    pub category: String,
    pub model_id: String,
    /// Expected mesh file; it may not exist.
    pub mesh_path: PathBuf,
}

impl ModelEntry {
    /// `<output_root>/<category>/<model_id>`
    pub fn output_dir(&self, output_root: &Path) -> PathBuf {
        output_root.join(&self.category).join(&self.model_id)
    }
}

/// What happened to each height of one model.
#[derive(Debug, Default)]
pub struct ModelReport {
    /// Sampled heights, top to bottom; image `i` belongs to `heights[i]`.
    pub heights: Vec<Real>,
    /// Indices whose image was written.
    pub written: Vec<usize>,
    /// Indices where the plane missed the mesh.
    pub no_intersection: Vec<usize>,
    /// Indices whose polygon had no extent along one axis.
    pub degenerate: Vec<usize>,
    /// Indices whose image could not be saved.
    pub write_failures: Vec<(usize, SliceError)>,
}

impl ModelReport {
    pub fn images_written(&self) -> usize {
        self.written.len()
    }
}

/// A model that could not be processed at all.
#[derive(Debug)]
pub struct ModelFailure {
    pub entry: ModelEntry,
    pub error: SliceError,
}

/// Outcome of a whole dataset run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub models: Vec<(ModelEntry, ModelReport)>,
    pub failures: Vec<ModelFailure>,
}

impl BatchReport {
    pub fn images_written(&self) -> usize {
        self.models.iter().map(|(_, r)| r.images_written()).sum()
    }

    /// True if no model failed and no image failed to write.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
            && self
                .models
                .iter()
                .all(|(_, r)| r.write_failures.is_empty())
    }
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Lists every `<category>/<model_id>` directory under `dataset_root`, sorted by name.
///
/// An unreadable root is fatal; an unreadable category directory is logged and skipped.
pub fn discover_models(
    dataset_root: &Path,
    mesh_file_name: &str,
) -> Result<Vec<ModelEntry>, SliceError> {
    std::fs::read_dir(dataset_root).map_err(|source| SliceError::DatasetUnreadable {
        path: dataset_root.to_path_buf(),
        source,
    })?;

    let mut models = Vec::new();
    let walker = WalkDir::new(dataset_root)
        .min_depth(2)
        .max_depth(2)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(SliceError::DatasetUnreadable {
                    path: dataset_root.to_path_buf(),
                    source: e.into(),
                });
            },
            Err(e) => {
                warn!("skipping unreadable dataset entry: {e}");
                continue;
            },
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let model_dir = entry.path();
        let category = model_dir.parent().map(name_of).unwrap_or_default();
        models.push(ModelEntry {
            category,
            model_id: name_of(model_dir),
            mesh_path: model_dir.join(mesh_file_name),
        });
    }

    Ok(models)
}

/// Slices `mesh` at every sampled height and writes `<index>.png` into `out_dir`.
///
/// `out_dir` must already exist. Once the heights are sampled nothing aborts early:
/// every height is tried and its outcome recorded in the returned report.
pub fn process_model<M: Sliceable + ?Sized>(
    mesh: &M,
    out_dir: &Path,
    config: &SliceConfig,
) -> Result<ModelReport, SliceError> {
    let bb = mesh.bounding_box();
    let heights = config.sampling_strategy().heights(bb.mins.z, bb.maxs.z)?;
    let mut report = ModelReport::default();
    let mut tiles: Vec<Option<GrayImage>> = Vec::new();

    for (index, &z) in heights.iter().enumerate() {
        let polygon = match extract_slice(mesh, z) {
            SliceOutcome::Polygon(polygon) => polygon,
            SliceOutcome::NoIntersection => {
                debug!("slice {index} at z={z:.4}: no intersection");
                report.no_intersection.push(index);
                if config.montage {
                    tiles.push(None);
                }
                continue;
            },
        };

        let img = match rasterize(&polygon, config.resolution) {
            Ok(img) => img,
            Err(e) => {
                warn!("slice {index} at z={z:.4} skipped: {e}");
                report.degenerate.push(index);
                if config.montage {
                    tiles.push(None);
                }
                continue;
            },
        };

        let path = out_dir.join(format!("{index}.png"));
        match save_png(&img, &path) {
            Ok(()) => {
                debug!(
                    "slice {index} at z={z:.4}: {} points -> {}",
                    polygon.len(),
                    path.display()
                );
                report.written.push(index);
            },
            Err(e) => {
                warn!("{e}");
                report.write_failures.push((index, e));
            },
        }
        if config.montage {
            tiles.push(Some(img));
        }
    }

    if config.montage && !heights.is_empty() {
        match montage(&tiles, config.resolution) {
            Some(strip) => {
                if let Err(e) = save_png(&strip, out_dir.join(MONTAGE_FILE)) {
                    warn!("{e}");
                }
            },
            None => warn!(
                "montage of {} slices at {} px each is too wide, skipped",
                tiles.len(),
                config.resolution.width
            ),
        }
    }

    report.heights = heights;
    Ok(report)
}

/// Creates `out_dir`, loads the mesh at `mesh_path` and runs [`process_model`] on it.
pub fn slice_model_file(
    mesh_path: &Path,
    out_dir: &Path,
    config: &SliceConfig,
) -> Result<ModelReport, SliceError> {
    std::fs::create_dir_all(out_dir).map_err(|e| SliceError::output_io(out_dir, e))?;

    let mesh = load_mesh(mesh_path).map_err(|source| SliceError::MeshLoad {
        path: mesh_path.to_path_buf(),
        source,
    })?;
    debug!(
        "loaded {}: {} vertices, {} triangles, centroid {:?}",
        mesh_path.display(),
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.centroid().map(|c| (c.x, c.y, c.z)),
    );

    process_model(&mesh, out_dir, config)
}

/// Slices every model of the dataset described by `config`.
pub fn run_batch(config: &SliceConfig) -> Result<BatchReport, SliceError> {
    config.validate()?;

    std::fs::create_dir_all(&config.output_root).map_err(|source| {
        SliceError::OutputRootInaccessible {
            path: config.output_root.clone(),
            source,
        }
    })?;

    let entries = discover_models(&config.dataset_root, &config.mesh_file_name)?;
    info!(
        "found {} models under {}",
        entries.len(),
        config.dataset_root.display()
    );

    let mut report = BatchReport::default();
    for entry in entries {
        let out_dir = entry.output_dir(&config.output_root);
        info!("{} -> {}", entry.mesh_path.display(), out_dir.display());

        match slice_model_file(&entry.mesh_path, &out_dir, config) {
            Ok(model) => {
                info!(
                    "{}/{}: {} of {} slices written",
                    entry.category,
                    entry.model_id,
                    model.images_written(),
                    model.heights.len()
                );
                report.models.push((entry, model));
            },
            Err(error) => {
                error!("{}/{}: {error}", entry.category, entry.model_id);
                report.failures.push(ModelFailure { entry, error });
            },
        }
    }

    Ok(report)
}
