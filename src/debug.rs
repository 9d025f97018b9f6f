use crate::drawing::*;
use crate::PartitionModel;
use image::DynamicImage;
use std::path::Path;

/// Saves the image with the current layout drawn on it.
///
/// This function draws the split points, their clipped cut lines and, when
/// configured, the tile outlines on a copy of the provided image and saves
/// the result to the specified path.
///
/// # Arguments
/// * `image` - The input image.
/// * `model` - The layout to draw.
/// * `output_path` - The path to save the output image.
/// * `config` - The drawing configuration.
///
/// # Errors
/// Returns [`image::ImageError`] if saving fails.
pub fn save_image_with_overlay(
    image: &DynamicImage,
    model: &PartitionModel,
    output_path: impl AsRef<Path>,
    config: &OverlayConfig,
) -> Result<(), image::ImageError> {
    let mut rgba_img = image.to_rgba8();
    model.draw(&mut rgba_img, config);
    tracing::debug!("Saving overlay to {}", output_path.as_ref().display());
    rgba_img.save(output_path)
}
