//! This crate partitions a rectangular image into non-overlapping tiles.
//! Users place split points, give them horizontal and/or vertical cut lines and
//! priorities, and the [`PartitionModel`] turns those lines into a gap-free
//! tiling that can be exported with [`export::export_tiles`].
//! It uses the `image` and `imageproc` crates for cropping and drawing and `insta` for snapshot testing.
//!
//! # Example
//! ```
//! use splitter::{Canvas, PartitionModel, Point, Rect};
//!
//! let canvas = Canvas::new(100, 100).unwrap();
//! let mut model = PartitionModel::new(canvas, 5);
//!
//! // A full-width horizontal line at y=50...
//! model.place_or_select(Point::new(50, 50));
//! model.toggle_horizontal();
//!
//! // ...and a vertical line below it, blocked by the horizontal one.
//! model.place_or_select(Point::new(50, 80));
//! model.toggle_vertical();
//! model.increment_priority();
//!
//! assert_eq!(
//!     model.calculate_boxes(),
//!     vec![
//!         Rect::new(0, 0, 100, 50),
//!         Rect::new(0, 50, 50, 50),
//!         Rect::new(50, 50, 50, 50),
//!     ]
//! );
//! ```

pub mod config;
/// Debug helpers for saving an image with the current layout drawn on it.
///
/// # Example
/// ```
/// use splitter::{debug::save_image_with_overlay, drawing::OverlayConfig, Canvas, PartitionModel};
/// use image::{DynamicImage, RgbImage};
///
/// let img = DynamicImage::ImageRgb8(RgbImage::new(20, 20));
/// let model = PartitionModel::new(Canvas::new(20, 20).unwrap(), 5);
/// let path = std::env::temp_dir().join("splitter_doc_overlay.png");
/// save_image_with_overlay(&img, &model, &path, &OverlayConfig::default()).unwrap();
/// # std::fs::remove_file(&path).unwrap();
/// ```
#[cfg(feature = "drawing")]
pub mod debug;
/// Drawing of split points, cut lines and tiles onto an image.
#[cfg(feature = "drawing")]
pub mod drawing;
pub mod export;
pub mod geometry;
pub mod partition;
pub mod shell;
pub mod split_point;

pub use config::*;
pub use geometry::{Canvas, Point, Rect, Span};
pub use partition::{PartitionModel, Placement, PointGroup};
pub use split_point::{PointId, SplitPoint};

use smallvec::SmallVec;
use thiserror::Error;

// Layouts rarely hold more than a handful of points per group
const DEFAULT_SMALLVEC_SIZE: usize = 16;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Invalid canvas dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Failed to read image: {0}")]
    ImageReadError(String),
}

/// A type alias for SmallVec with an optimized stack-allocated buffer size.
pub type SmallVecCuts<T> = SmallVec<[T; DEFAULT_SMALLVEC_SIZE]>;

/// Builds a canvas matching the dimensions of the image at `path`.
///
/// Only the image header is read.
pub fn canvas_for_image(path: impl AsRef<std::path::Path>) -> Result<Canvas, SplitError> {
    let path = path.as_ref();
    let (width, height) = image::image_dimensions(path)
        .map_err(|e| SplitError::ImageReadError(format!("{}: {}", path.display(), e)))?;
    tracing::debug!("Loaded {} ({}x{})", path.display(), width, height);
    Canvas::new(width, height)
}
