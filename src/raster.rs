//! Turning slice polygons into grayscale images.
//!
//! Pixel convention: origin at the top-left corner, row = remapped x (spread over the
//! image height), column = remapped y (spread over the image width). The x axis runs
//! down the image the way a row-major `[x][y]` array is laid out. Marked pixels are
//! 255, everything else 0.

use crate::errors::{Axis, SliceError};
use crate::float_types::Real;
use crate::polygon::SlicePolygon;
use image::{GrayImage, ImageFormat, Luma, imageops};
use std::path::Path;

/// Intensity of a boundary pixel
pub const MARK: u8 = 255;
/// Intensity of everything else
pub const BACKGROUND: u8 = 0;

/// Output image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Resolution { width, height }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::new(100, 100)
    }
}

/// Linearly maps `value` from `[lo, hi]` onto pixel indices `0..size`, truncating.
#[inline]
fn remap(value: Real, lo: Real, hi: Real, size: u32) -> u32 {
    if size <= 1 {
        return 0;
    }
    let last = (size - 1) as Real;
    let scaled = ((value - lo) / (hi - lo) * last).floor();
    scaled.clamp(0.0, last) as u32
}

/// False for zero-width and NaN ranges.
#[inline]
fn has_extent(lo: Real, hi: Real) -> bool {
    hi - lo > 0.0
}

/// Marks each polygon vertex as one pixel on a blank `resolution`-sized image.
///
/// The polygon's own extent is stretched over the whole image independently per axis.
/// Only the vertices are drawn; edges between them are not. A polygon with no extent
/// along x or y returns [`SliceError::DegeneratePolygon`].
///
/// ```
/// # use ctslice::polygon::SlicePolygon;
/// # use ctslice::raster::{rasterize, Resolution};
/// let square = SlicePolygon::from_points([(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]);
/// let img = rasterize(&square, Resolution::default()).unwrap();
/// assert_eq!(img.get_pixel(99, 99)[0], 255);
/// assert_eq!(img.get_pixel(50, 50)[0], 0);
/// ```
pub fn rasterize(polygon: &SlicePolygon, resolution: Resolution) -> Result<GrayImage, SliceError> {
    if resolution.width == 0 || resolution.height == 0 {
        return Err(SliceError::InvalidConfig(format!(
            "image resolution must be at least 1x1, got {}x{}",
            resolution.width, resolution.height
        )));
    }
    let rect = polygon
        .bounding_rect()
        .ok_or(SliceError::DegeneratePolygon { axis: Axis::X })?;
    let (min, max) = (rect.min(), rect.max());

    if !has_extent(min.x, max.x) {
        return Err(SliceError::DegeneratePolygon { axis: Axis::X });
    }
    if !has_extent(min.y, max.y) {
        return Err(SliceError::DegeneratePolygon { axis: Axis::Y });
    }

    let mut img = GrayImage::from_pixel(resolution.width, resolution.height, Luma([BACKGROUND]));
    for (x, y) in polygon.iter() {
        let row = remap(x, min.x, max.x, resolution.height);
        let col = remap(y, min.y, max.y, resolution.width);
        img.put_pixel(col, row, Luma([MARK]));
    }
    Ok(img)
}

/// Writes `img` as an 8-bit single-channel PNG.
pub fn save_png(img: &GrayImage, path: impl AsRef<Path>) -> Result<(), SliceError> {
    let path = path.as_ref();
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| SliceError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })
}

/// Lays slice images side by side, left to right in height order.
///
/// Heights that produced no image leave a blank tile. Returns `None` when the strip
/// would be wider than `u32::MAX` pixels.
pub fn montage(slices: &[Option<GrayImage>], resolution: Resolution) -> Option<GrayImage> {
    let tiles = u32::try_from(slices.len().max(1)).ok()?;
    let mut strip = GrayImage::from_pixel(
        resolution.width.checked_mul(tiles)?,
        resolution.height,
        Luma([BACKGROUND]),
    );
    for (i, slice) in slices.iter().enumerate() {
        if let Some(img) = slice {
            imageops::replace(&mut strip, img, i as i64 * resolution.width as i64, 0);
        }
    }
    Some(strip)
}
