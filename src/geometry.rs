//! Value types shared by the partition model: anchor points, tiles, cut-line spans
//! and the canvas they live on.

use crate::SplitError;

/// An immutable anchor position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    /// Creates a new `Point`.
    ///
    /// # Example
    /// ```
    /// use splitter::Point;
    ///
    /// let p = Point::new(3, 4);
    /// assert_eq!(p.distance_squared(Point::new(0, 0)), 25);
    /// ```
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance, kept integral so pick tests are exact.
    pub fn distance_squared(self, other: Point) -> u64 {
        let dx = self.x.abs_diff(other.x) as u64;
        let dy = self.y.abs_diff(other.y) as u64;
        dx * dx + dy * dy
    }
}

impl From<(u32, u32)> for Point {
    fn from((x, y): (u32, u32)) -> Self {
        Point::new(x, y)
    }
}

/// An axis-aligned tile described by its top-left corner and size.
///
/// # Example
/// ```
/// use splitter::{Point, Rect};
///
/// let r = Rect::new(0, 50, 50, 50);
/// assert_eq!(r.right(), 50);
/// assert_eq!(r.bottom(), 100);
/// assert!(r.contains(Point::new(0, 50)));
/// assert!(!r.contains(Point::new(50, 100)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Builds a rect from its edges. `right`/`bottom` must not be smaller than `left`/`top`.
    pub fn from_edges(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        debug_assert!(right >= left && bottom >= top);
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Half-open containment: the left and top edges are inside, the right and
    /// bottom edges belong to the neighbouring rect.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }

    /// Area shared by `self` and `other`; zero when they only touch.
    pub fn intersection_area(&self, other: &Rect) -> u64 {
        let left = self.left.max(other.left);
        let right = self.right().min(other.right());
        let top = self.top.max(other.top);
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return 0;
        }
        (right - left) as u64 * (bottom - top) as u64
    }
}

impl From<Rect> for imageproc::rect::Rect {
    fn from(rect: Rect) -> Self {
        imageproc::rect::Rect::at(rect.left as i32, rect.top as i32)
            .of_size(rect.width.max(1), rect.height.max(1))
    }
}

/// Half-open extent `[start, end)` of a cut line along its own axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// The span covering a whole canvas axis of length `len`.
    pub const fn full(len: u32) -> Self {
        Self::new(0, len)
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Narrows the span around `anchor` using perpendicular cut positions.
    ///
    /// Each cut strictly between `start` and `anchor` may raise the lower bound,
    /// each cut strictly between `anchor` and `end` may lower the upper bound.
    /// The bounds tighten as the cuts are visited, so the closest cut on each
    /// side wins. Cuts equal to the anchor or to a bound are ignored.
    ///
    /// # Example
    /// ```
    /// use splitter::Span;
    ///
    /// let span = Span::full(100).narrowed(50, [20, 70, 30, 90, 50]);
    /// assert_eq!(span, Span::new(30, 70));
    /// ```
    pub fn narrowed(self, anchor: u32, cuts: impl IntoIterator<Item = u32>) -> Self {
        cuts.into_iter().fold(self, |span, cut| {
            if anchor > cut && cut > span.start {
                Span::new(cut, span.end)
            } else if span.end > cut && cut > anchor {
                Span::new(span.start, cut)
            } else {
                span
            }
        })
    }
}

/// Fixed drawing surface shared read-only by every split point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Creates a canvas, rejecting zero-sized dimensions.
    ///
    /// # Example
    /// ```
    /// use splitter::Canvas;
    ///
    /// assert!(Canvas::new(0, 10).is_err());
    /// let canvas = Canvas::new(100, 80).unwrap();
    /// assert_eq!(canvas.rect().bottom(), 80);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self, SplitError> {
        if width == 0 || height == 0 {
            return Err(SplitError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}
