//! Slice triangle meshes into stacks of **CT-like cross-section images**.
//!
//! A mesh is cut by evenly spaced horizontal planes from the top of its bounding box to
//! the bottom. Each cut yields the boundary vertices of the cross-section, which are
//! stretched over a fixed-size grayscale image and marked as single white pixels.
//!
//! ```
//! use ctslice::{TriMesh, extract::extract_slice, heights::sample_heights};
//! use ctslice::raster::{rasterize, Resolution};
//!
//! let cube = TriMesh::cube(1.0);
//! let heights = sample_heights(0.0, 1.0, 3);
//! assert_eq!(heights, vec![1.0, 0.5, 0.0]);
//!
//! let section = extract_slice(&cube, heights[1]).into_polygon().unwrap();
//! let img = rasterize(&section, Resolution::default()).unwrap();
//! assert_eq!(img.get_pixel(0, 0)[0], 255);
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` input besides `.obj`
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod batch;
pub mod config;
pub mod errors;
pub mod extract;
pub mod float_types;
pub mod heights;
pub mod io;
pub mod mesh;
pub mod plane;
pub mod polygon;
pub mod raster;
pub mod traits;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use config::SliceConfig;
pub use errors::SliceError;
pub use mesh::TriMesh;
pub use polygon::SlicePolygon;
pub use traits::Sliceable;
