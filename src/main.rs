// main.rs
//
// Command-line front end: slice a whole dataset, or a single mesh file.

use clap::{Args, Parser, Subcommand};
use ctslice::batch::{run_batch, slice_model_file};
use ctslice::config::{DEFAULT_MESH_FILE, DEFAULT_NUM_SLICES, SliceConfig};
use ctslice::SliceError;
use ctslice::float_types::Real;
use ctslice::raster::Resolution;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

/// Slice OBJ/STL meshes into stacks of CT-like PNG cross-sections
#[derive(Parser, Debug)]
#[command(name = "ctslice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every slice, not just every model
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Slice every `<category>/<model_id>/<mesh file>` under a dataset root
    Batch {
        /// Dataset root directory
        #[arg(long, env = "CTSLICE_DATASET", value_name = "DIR")]
        dataset: PathBuf,

        /// Output root; the category/model tree is mirrored here
        #[arg(long, env = "CTSLICE_OUTPUT", value_name = "DIR")]
        output: PathBuf,

        /// Mesh file name inside each model directory
        #[arg(long, env = "CTSLICE_MESH_FILE", default_value = DEFAULT_MESH_FILE)]
        mesh_file: String,

        #[command(flatten)]
        slicing: SlicingArgs,
    },
    /// Slice one mesh file into an output directory
    Single {
        /// Input mesh (.obj or .stl)
        #[arg(value_name = "MESH")]
        mesh: PathBuf,

        /// Output directory for `<index>.png`
        #[arg(value_name = "OUT_DIR")]
        output: PathBuf,

        #[command(flatten)]
        slicing: SlicingArgs,
    },
}

#[derive(Args, Debug)]
struct SlicingArgs {
    /// Number of evenly spaced heights per model, top and bottom included
    #[arg(short = 'n', long, env = "CTSLICE_NUM_SLICES", default_value_t = DEFAULT_NUM_SLICES)]
    num_slices: usize,

    /// Space heights by this distance instead of by count
    #[arg(long, env = "CTSLICE_STEP_SIZE")]
    step_size: Option<Real>,

    /// Image width in pixels
    #[arg(long, env = "CTSLICE_WIDTH", default_value_t = 100)]
    width: u32,

    /// Image height in pixels
    #[arg(long, env = "CTSLICE_HEIGHT", default_value_t = 100)]
    height: u32,

    /// Also write montage.png with all slices side by side
    #[arg(long)]
    montage: bool,
}

impl SlicingArgs {
    fn apply(&self, config: &mut SliceConfig) {
        config.num_slices = self.num_slices;
        config.step_size = self.step_size;
        config.resolution = Resolution::new(self.width, self.height);
        config.montage = self.montage;
    }
}

/// Exit status for a run that stopped on `e`: 2 when the run itself could not proceed
/// (configuration, dataset or output root), 1 when only the model failed.
fn exit_code(e: &SliceError) -> ExitCode {
    error!("{e}");
    if e.is_fatal() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Command::Batch {
            dataset,
            output,
            mesh_file,
            slicing,
        } => {
            let mut config = SliceConfig::new(dataset, output);
            config.mesh_file_name = mesh_file;
            slicing.apply(&mut config);

            let report = match run_batch(&config) {
                Ok(report) => report,
                Err(e) => return exit_code(&e),
            };

            info!(
                "done: {} models, {} images, {} failed models",
                report.models.len() + report.failures.len(),
                report.images_written(),
                report.failures.len()
            );
            for failure in &report.failures {
                warn!(
                    "failed: {}/{}: {}",
                    failure.entry.category, failure.entry.model_id, failure.error
                );
            }
            ExitCode::SUCCESS
        },
        Command::Single {
            mesh,
            output,
            slicing,
        } => {
            let mut config = SliceConfig::default();
            slicing.apply(&mut config);
            if let Err(e) = config.validate() {
                return exit_code(&e);
            }

            match slice_model_file(&mesh, &output, &config) {
                Ok(report) => {
                    info!(
                        "{} of {} slices written to {}",
                        report.images_written(),
                        report.heights.len(),
                        output.display()
                    );
                    ExitCode::SUCCESS
                },
                Err(e) => exit_code(&e),
            }
        },
    }
}
