//! Run configuration

use crate::errors::SliceError;
use crate::float_types::Real;
use crate::heights::SamplingStrategy;
use crate::raster::Resolution;
use std::path::PathBuf;

/// Default number of heights per model
pub const DEFAULT_NUM_SLICES: usize = 10;
/// Mesh file expected inside every model directory
pub const DEFAULT_MESH_FILE: &str = "model.obj";

/// Everything a batch run needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceConfig {
    /// `<dataset_root>/<category>/<model_id>/<mesh_file_name>`
    pub dataset_root: PathBuf,
    /// `<output_root>/<category>/<model_id>/<index>.png`
    pub output_root: PathBuf,
    pub mesh_file_name: String,
    /// Heights per model when `step_size` is not set.
    pub num_slices: usize,
    /// When set, heights are spaced by this distance instead of by count.
    pub step_size: Option<Real>,
    pub resolution: Resolution,
    /// Also write `montage.png`, all slices side by side.
    pub montage: bool,
}

impl Default for SliceConfig {
    fn default() -> Self {
        SliceConfig {
            dataset_root: PathBuf::from("dataset"),
            output_root: PathBuf::from("slices"),
            mesh_file_name: DEFAULT_MESH_FILE.to_string(),
            num_slices: DEFAULT_NUM_SLICES,
            step_size: None,
            resolution: Resolution::default(),
            montage: false,
        }
    }
}

impl SliceConfig {
    pub fn new(dataset_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        SliceConfig {
            dataset_root: dataset_root.into(),
            output_root: output_root.into(),
            ..Default::default()
        }
    }

    /// Rejects values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), SliceError> {
        match self.step_size {
            Some(step) if !(step.is_finite() && step > 0.0) => {
                return Err(SliceError::InvalidConfig(format!(
                    "step size must be a positive number, got {step}"
                )));
            },
            None if self.num_slices == 0 => {
                return Err(SliceError::InvalidConfig(
                    "number of slices must be at least 1".to_string(),
                ));
            },
            _ => {},
        }
        if self.resolution.width == 0 || self.resolution.height == 0 {
            return Err(SliceError::InvalidConfig(format!(
                "image resolution must be at least 1x1, got {}x{}",
                self.resolution.width, self.resolution.height
            )));
        }
        if self.mesh_file_name.is_empty() {
            return Err(SliceError::InvalidConfig(
                "mesh file name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sampling_strategy(&self) -> SamplingStrategy {
        match self.step_size {
            Some(step) => SamplingStrategy::Step(step),
            None => SamplingStrategy::Count(self.num_slices),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SliceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_slices, 10);
        assert_eq!(config.resolution, Resolution::new(100, 100));
        assert_eq!(config.sampling_strategy(), SamplingStrategy::Count(10));
    }

    #[test]
    fn step_size_overrides_count() {
        let config = SliceConfig {
            step_size: Some(0.5),
            num_slices: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.sampling_strategy(), SamplingStrategy::Step(0.5));
    }

    #[test]
    fn rejects_bad_values() {
        let zero_slices = SliceConfig {
            num_slices: 0,
            ..Default::default()
        };
        assert!(zero_slices.validate().is_err());

        let negative_step = SliceConfig {
            step_size: Some(-1.0),
            ..Default::default()
        };
        assert!(negative_step.validate().is_err());

        let empty_image = SliceConfig {
            resolution: Resolution::new(0, 100),
            ..Default::default()
        };
        assert!(matches!(
            empty_image.validate(),
            Err(SliceError::InvalidConfig(_))
        ));
    }
}
