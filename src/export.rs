//! Writes each tile of a layout to its own image file.
//!
//! Tiles are cropped from the source image and saved as `im0.<ext>`,
//! `im1.<ext>`, ... in tiling order, keeping the source file's extension.

use crate::geometry::Rect;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::*;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(
        "Source image {} not found: make sure it was not moved or deleted",
        .0.display()
    )]
    SourceMissing(PathBuf),

    #[error(
        "Output directory {} does not exist: create it before exporting",
        .0.display()
    )]
    OutputDirMissing(PathBuf),

    #[error("Tile {index} ({tile:?}) lies outside the {width}x{height} source image")]
    TileOutOfBounds {
        index: usize,
        tile: Rect,
        width: u32,
        height: u32,
    },

    #[error("Failed to process image: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ExportError {
    /// `true` for errors caused by a missing file or directory rather than a
    /// failure while reading or writing.
    pub fn is_missing_resource(&self) -> bool {
        matches!(
            self,
            ExportError::SourceMissing(_) | ExportError::OutputDirMissing(_)
        )
    }
}

/// Files written by a successful export, in tile order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportReport {
    pub files: Vec<PathBuf>,
}

impl ExportReport {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// File name of the tile at `index`.
///
/// # Example
/// ```
/// use splitter::export::tile_file_name;
///
/// assert_eq!(tile_file_name(3, "png"), "im3.png");
/// ```
pub fn tile_file_name(index: usize, extension: &str) -> String {
    format!("im{index}.{extension}")
}

/// Extension for exported tiles: the source's own, or the primary extension of
/// the detected format when the source has none.
fn output_extension(source: &Path, format: Option<ImageFormat>) -> String {
    source
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_owned)
        .or_else(|| {
            format
                .and_then(|f| f.extensions_str().first())
                .map(|ext| ext.to_string())
        })
        .unwrap_or_else(|| "png".to_string())
}

fn open_source(source: &Path) -> Result<(DynamicImage, Option<ImageFormat>), ExportError> {
    let reader = ImageReader::open(source)
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ExportError::SourceMissing(source.to_path_buf()),
            _ => ExportError::Io(e),
        })?
        .with_guessed_format()?;
    let format = reader.format();
    Ok((reader.decode()?, format))
}

/// Crops `source` to every tile and writes the crops into `output_dir`.
///
/// The output directory must already exist. Tiles are numbered by their
/// position in `tiles`, so parallel and sequential exports produce identical
/// files.
///
/// # Errors
/// Returns [`ExportError::SourceMissing`] or [`ExportError::OutputDirMissing`]
/// when a resource is absent, and the remaining variants when decoding,
/// cropping or encoding fails.
pub fn export_tiles(
    source: &Path,
    tiles: &[Rect],
    output_dir: &Path,
    enable_parallel: bool,
) -> Result<ExportReport, ExportError> {
    if !source.is_file() {
        return Err(ExportError::SourceMissing(source.to_path_buf()));
    }
    if !output_dir.is_dir() {
        return Err(ExportError::OutputDirMissing(output_dir.to_path_buf()));
    }

    let (image, format) = open_source(source)?;
    let (width, height) = image.dimensions();
    if let Some((index, tile)) = tiles
        .iter()
        .enumerate()
        .find(|(_, t)| t.right() > width || t.bottom() > height)
    {
        return Err(ExportError::TileOutOfBounds {
            index,
            tile: *tile,
            width,
            height,
        });
    }

    let extension = output_extension(source, format);
    debug!(
        "Exporting {} tiles from {} as .{}",
        tiles.len(),
        source.display(),
        extension
    );

    let save = |(index, tile): (usize, &Rect)| -> Result<PathBuf, ExportError> {
        let path = output_dir.join(tile_file_name(index, &extension));
        image
            .crop_imm(tile.left, tile.top, tile.width, tile.height)
            .save(&path)?;
        trace!("Wrote {}", path.display());
        Ok(path)
    };

    let files = if enable_parallel {
        tiles
            .par_iter()
            .enumerate()
            .map(save)
            .collect::<Result<Vec<_>, _>>()?
    } else {
        tiles
            .iter()
            .enumerate()
            .map(save)
            .collect::<Result<Vec<_>, _>>()?
    };

    info!("Exported {} tiles to {}", files.len(), output_dir.display());
    Ok(ExportReport { files })
}
