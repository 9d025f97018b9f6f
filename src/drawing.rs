//! This module provides functionality for drawing split points, cut lines and
//! tiles on images. It is feature-gated under the `drawing` feature and
//! requires the `image` and `imageproc` crates.
//!
//! # Examples
//!
//! ```rust
//! use splitter::{drawing::*, Canvas, PartitionModel, Point};
//! use image::RgbaImage;
//!
//! let mut model = PartitionModel::new(Canvas::new(40, 40).unwrap(), 5);
//! model.place_or_select(Point::new(20, 20));
//! model.toggle_vertical();
//!
//! let mut img = RgbaImage::new(40, 40);
//! model.draw(&mut img, &OverlayConfig::default());
//! assert_eq!(img.get_pixel(20, 2), &OverlayConfig::default().line_color);
//! ```

use crate::{PartitionModel, SplitPoint};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};

/// Configuration for drawing the layout overlay.
///
/// # Examples
///
/// ```
/// use splitter::drawing::OverlayConfig;
/// use image::Rgba;
///
/// let config = OverlayConfig {
///     dot_radius: 4,
///     dot_color: Rgba([0, 0, 0, 255]),
///     select_color: Rgba([0, 255, 0, 255]),
///     line_color: Rgba([0, 0, 0, 255]),
///     tile_color: Some(Rgba([255, 0, 0, 255])), // Outline every tile in red
/// };
/// ```
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Radius of the dot drawn on each split point.
    pub dot_radius: u32,
    /// Color of unselected dots.
    pub dot_color: Rgba<u8>,
    /// Color of the ring drawn under the selected point.
    pub select_color: Rgba<u8>,
    /// Color of cut lines.
    pub line_color: Rgba<u8>,
    /// Outline color for tiles, or `None` to skip tile outlines.
    pub tile_color: Option<Rgba<u8>>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            dot_radius: crate::DEFAULT_PICK_RADIUS,
            dot_color: Rgba([0, 0, 0, 255]),      // Black
            select_color: Rgba([0, 255, 0, 255]), // Green
            line_color: Rgba([0, 0, 0, 255]),
            tile_color: None,
        }
    }
}

/// Trait for types that can be drawn on an image.
pub trait Drawable {
    /// Draws the object on the provided image using the given configuration.
    fn draw(&self, image: &mut RgbaImage, config: &OverlayConfig);
}

impl Drawable for SplitPoint {
    fn draw(&self, image: &mut RgbaImage, config: &OverlayConfig) {
        let center = (self.position.x as i32, self.position.y as i32);
        draw_filled_circle_mut(image, center, config.dot_radius as i32, config.dot_color);

        if let Some((start, end)) = self.horizontal_segment() {
            draw_line_segment_mut(
                image,
                (start.x as f32, start.y as f32),
                (end.x as f32, end.y as f32),
                config.line_color,
            );
        }
        if let Some((start, end)) = self.vertical_segment() {
            draw_line_segment_mut(
                image,
                (start.x as f32, start.y as f32),
                (end.x as f32, end.y as f32),
                config.line_color,
            );
        }
    }
}

impl Drawable for PartitionModel {
    fn draw(&self, image: &mut RgbaImage, config: &OverlayConfig) {
        if let Some(color) = config.tile_color {
            for tile in self.calculate_boxes() {
                draw_hollow_rect_mut(image, tile.into(), color);
            }
        }

        // Selection ring goes underneath so the dot itself stays visible.
        if let Some(selected) = self.selected() {
            let center = (selected.position.x as i32, selected.position.y as i32);
            draw_filled_circle_mut(
                image,
                center,
                config.dot_radius as i32 + 2,
                config.select_color,
            );
        }

        for point in self.points() {
            point.draw(image, config);
        }
    }
}
