use crate::geometry::{Canvas, Point, Span};
use std::fmt;

/// Stable identifier of a split point, assigned by the model at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PointId(pub u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A user-placed anchor that may emit a horizontal and/or vertical cut line.
///
/// `horizontal` is the clipped x-extent of the line running through
/// `position.y`; `vertical` is the clipped y-extent of the line running
/// through `position.x`. `None` means the point emits no line on that axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SplitPoint {
    pub id: PointId,
    pub position: Point,
    pub horizontal: Option<Span>,
    pub vertical: Option<Span>,
    pub priority: i32,
}

impl SplitPoint {
    /// Creates a point with no cut lines and priority 0.
    ///
    /// # Example
    /// ```
    /// use splitter::{Point, PointId, SplitPoint};
    ///
    /// let point = SplitPoint::new(PointId(0), Point::new(10, 10));
    /// assert!(!point.has_cut());
    /// assert_eq!(point.priority, 0);
    /// ```
    pub fn new(id: PointId, position: Point) -> Self {
        Self {
            id,
            position,
            horizontal: None,
            vertical: None,
            priority: 0,
        }
    }

    /// Flips the horizontal line between absent and spanning the full width.
    pub fn toggle_horizontal(&mut self, width: u32) {
        self.horizontal = match self.horizontal {
            Some(_) => None,
            None => Some(Span::full(width)),
        };
    }

    /// Flips the vertical line between absent and spanning the full height.
    pub fn toggle_vertical(&mut self, height: u32) {
        self.vertical = match self.vertical {
            Some(_) => None,
            None => Some(Span::full(height)),
        };
    }

    /// Restores every active line to the full canvas extent on its axis.
    pub fn reset_bounds(&mut self, canvas: &Canvas) {
        if self.horizontal.is_some() {
            self.horizontal = Some(Span::full(canvas.width));
        }
        if self.vertical.is_some() {
            self.vertical = Some(Span::full(canvas.height));
        }
    }

    pub fn has_cut(&self) -> bool {
        self.horizontal.is_some() || self.vertical.is_some()
    }

    pub fn within_pick_radius(&self, point: Point, radius: u32) -> bool {
        let radius = radius as u64;
        self.position.distance_squared(point) <= radius * radius
    }

    /// End points of the horizontal line, if any.
    pub fn horizontal_segment(&self) -> Option<(Point, Point)> {
        self.horizontal.map(|span| {
            (
                Point::new(span.start, self.position.y),
                Point::new(span.end, self.position.y),
            )
        })
    }

    /// End points of the vertical line, if any.
    pub fn vertical_segment(&self) -> Option<(Point, Point)> {
        self.vertical.map(|span| {
            (
                Point::new(self.position.x, span.start),
                Point::new(self.position.x, span.end),
            )
        })
    }
}
