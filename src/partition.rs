//! The partition model: owns the split points and the current selection, keeps
//! the clipped cut-line extents up to date and turns the cut lines into a
//! gap-free tiling of the canvas.
//!
//! Every structural change (placement, deletion, toggle, reprioritisation)
//! recomputes the clipping from scratch. Point sets are small, so this stays
//! cheap at interactive scale.

use crate::geometry::{Canvas, Point, Rect};
use crate::split_point::{PointId, SplitPoint};
use crate::{SmallVecCuts, SplitterConfig};
use tracing::*;

/// Outcome of [`PartitionModel::place_or_select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// No point was near the click, so a new one was created and selected.
    Created(PointId),
    /// An existing point was within pick radius and is now selected.
    Selected { id: PointId, priority: i32 },
}

impl Placement {
    pub fn id(&self) -> PointId {
        match *self {
            Placement::Created(id) | Placement::Selected { id, .. } => id,
        }
    }
}

/// A run of points sharing one priority, in ascending priority order.
pub type PointGroup<'a> = SmallVecCuts<&'a SplitPoint>;

/// Owns every split point placed on a canvas.
///
/// # Example
/// ```
/// use splitter::{Canvas, PartitionModel, Point, Rect};
///
/// let mut model = PartitionModel::new(Canvas::new(100, 100).unwrap(), 5);
/// model.place_or_select(Point::new(50, 50));
/// model.toggle_horizontal();
///
/// assert_eq!(
///     model.calculate_boxes(),
///     vec![Rect::new(0, 0, 100, 50), Rect::new(0, 50, 100, 50)]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PartitionModel {
    canvas: Canvas,
    pick_radius: u32,
    points: Vec<SplitPoint>,
    selected: Option<PointId>,
    next_id: u64,
}

impl PartitionModel {
    pub fn new(canvas: Canvas, pick_radius: u32) -> Self {
        Self {
            canvas,
            pick_radius,
            points: Vec::new(),
            selected: None,
            next_id: 0,
        }
    }

    /// Creates a model using the pick radius from `config`.
    pub fn with_config(canvas: Canvas, config: &SplitterConfig) -> Self {
        Self::new(canvas, config.pick_radius)
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn pick_radius(&self) -> u32 {
        self.pick_radius
    }

    /// Every split point, in placement order.
    pub fn points(&self) -> &[SplitPoint] {
        &self.points
    }

    pub fn point(&self, id: PointId) -> Option<&SplitPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn selected_id(&self) -> Option<PointId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&SplitPoint> {
        self.selected.and_then(|id| self.point(id))
    }

    pub fn is_selected(&self, id: PointId) -> bool {
        self.selected == Some(id)
    }

    /// Index of the first point (in placement order) within pick radius of `at`.
    fn find_near(&self, at: Point) -> Option<usize> {
        self.points
            .iter()
            .position(|p| p.within_pick_radius(at, self.pick_radius))
    }

    fn selected_mut(&mut self) -> Option<&mut SplitPoint> {
        let id = self.selected?;
        self.points.iter_mut().find(|p| p.id == id)
    }

    /// Selects the first point within pick radius of `at`, or places a new
    /// point there and selects it.
    pub fn place_or_select(&mut self, at: Point) -> Placement {
        if let Some(index) = self.find_near(at) {
            let point = &self.points[index];
            self.selected = Some(point.id);
            debug!("Selected point {} with priority {}", point.id, point.priority);
            return Placement::Selected {
                id: point.id,
                priority: point.priority,
            };
        }

        let id = PointId(self.next_id);
        self.next_id += 1;
        self.points.push(SplitPoint::new(id, at));
        self.selected = Some(id);
        debug!("Placed point {} at ({}, {})", id, at.x, at.y);
        self.calculate_line_rects();
        Placement::Created(id)
    }

    /// Removes the first point within pick radius of `at`, clearing the
    /// selection if it pointed there. Returns the removed point.
    pub fn delete(&mut self, at: Point) -> Option<SplitPoint> {
        let Some(index) = self.find_near(at) else {
            debug!("Nothing to delete near ({}, {})", at.x, at.y);
            return None;
        };
        let removed = self.points.remove(index);
        if self.selected == Some(removed.id) {
            self.selected = None;
        }
        debug!("Deleted point {}", removed.id);
        self.calculate_line_rects();
        Some(removed)
    }

    /// Toggles the selected point's horizontal line. Returns `false` when
    /// nothing is selected.
    pub fn toggle_horizontal(&mut self) -> bool {
        let width = self.canvas.width;
        let Some(point) = self.selected_mut() else {
            debug!("Horizontal toggle ignored: no point selected");
            return false;
        };
        point.toggle_horizontal(width);
        self.calculate_line_rects();
        true
    }

    /// Toggles the selected point's vertical line. Returns `false` when
    /// nothing is selected.
    pub fn toggle_vertical(&mut self) -> bool {
        let height = self.canvas.height;
        let Some(point) = self.selected_mut() else {
            debug!("Vertical toggle ignored: no point selected");
            return false;
        };
        point.toggle_vertical(height);
        self.calculate_line_rects();
        true
    }

    /// Raises the selected point's priority by one, returning the new value.
    pub fn increment_priority(&mut self) -> Option<i32> {
        self.adjust_priority(1)
    }

    /// Lowers the selected point's priority by one, returning the new value.
    pub fn decrement_priority(&mut self) -> Option<i32> {
        self.adjust_priority(-1)
    }

    fn adjust_priority(&mut self, delta: i32) -> Option<i32> {
        let Some(point) = self.selected_mut() else {
            debug!("Priority change ignored: no point selected");
            return None;
        };
        point.priority = point.priority.saturating_add(delta);
        let priority = point.priority;
        debug!("New priority: {}", priority);
        self.calculate_line_rects();
        Some(priority)
    }

    /// Recomputes the visible extent of every cut line.
    ///
    /// Points are visited in ascending priority. Each line starts at the full
    /// canvas extent and stops at the nearest perpendicular line belonging to a
    /// point of strictly lower priority. Points sharing a priority never clip
    /// each other.
    pub fn calculate_line_rects(&mut self) {
        trace!("Recomputing line extents for {} points", self.points.len());
        let mut order: Vec<usize> = (0..self.points.len()).collect();
        order.sort_by_key(|&i| self.points[i].priority);

        for (rank, &index) in order.iter().enumerate() {
            self.points[index].reset_bounds(&self.canvas);

            let point = &self.points[index];
            let prior = order[..rank]
                .iter()
                .map(|&i| &self.points[i])
                .filter(|p| p.priority != point.priority);

            let mut vertical_xs = SmallVecCuts::<u32>::new();
            let mut horizontal_ys = SmallVecCuts::<u32>::new();
            let mut any_prior = false;
            for other in prior {
                any_prior = true;
                if other.vertical.is_some() {
                    vertical_xs.push(other.position.x);
                }
                if other.horizontal.is_some() {
                    horizontal_ys.push(other.position.y);
                }
            }
            if !any_prior {
                continue;
            }

            let position = point.position;
            let point = &mut self.points[index];
            point.horizontal = point
                .horizontal
                .map(|span| span.narrowed(position.x, vertical_xs.iter().copied()));
            point.vertical = point
                .vertical
                .map(|span| span.narrowed(position.y, horizontal_ys.iter().copied()));
        }
    }

    /// Groups points that emit at least one line into maximal runs of equal
    /// priority, in ascending priority order.
    ///
    /// Points without lines are anchors only and do not appear in any group.
    pub fn group_points(&self) -> Vec<PointGroup<'_>> {
        let mut active: Vec<&SplitPoint> = self.points.iter().filter(|p| p.has_cut()).collect();
        active.sort_by_key(|p| p.priority);
        active
            .chunk_by(|a, b| a.priority == b.priority)
            .map(|group| group.iter().copied().collect())
            .collect()
    }

    /// Slices `rect` by the lines of `points` into a grid of sub-rectangles.
    ///
    /// Vertical lines contribute their x-coordinate, horizontal lines their
    /// y-coordinate. Coordinates are sorted and deduplicated, and only those
    /// strictly inside the rectangle are used, so no slice is ever empty. The
    /// result is ordered column by column, top to bottom within a column.
    pub fn subdivide_box(rect: Rect, points: &[&SplitPoint]) -> Vec<Rect> {
        let vertical_cuts = Self::cut_coordinates(
            points
                .iter()
                .filter(|p| p.vertical.is_some())
                .map(|p| p.position.x),
            rect.left,
            rect.right(),
        );
        let horizontal_cuts = Self::cut_coordinates(
            points
                .iter()
                .filter(|p| p.horizontal.is_some())
                .map(|p| p.position.y),
            rect.top,
            rect.bottom(),
        );

        let mut boxes = Vec::with_capacity(vertical_cuts.len() * horizontal_cuts.len());
        let mut x1 = rect.left;
        for &x2 in &vertical_cuts {
            let mut y1 = rect.top;
            for &y2 in &horizontal_cuts {
                boxes.push(Rect::from_edges(x1, y1, x2, y2));
                y1 = y2;
            }
            x1 = x2;
        }
        boxes
    }

    /// Sorted, deduplicated cut positions strictly inside `(start, end)`,
    /// terminated by `end` itself.
    fn cut_coordinates(coords: impl Iterator<Item = u32>, start: u32, end: u32) -> SmallVecCuts<u32> {
        let mut cuts: SmallVecCuts<u32> = coords.filter(|&c| c > start && c < end).collect();
        cuts.sort_unstable();
        cuts.dedup();
        cuts.push(end);
        cuts
    }

    /// Computes the final tiling of the canvas.
    ///
    /// Starts from one rectangle covering the canvas and lets each priority
    /// group, lowest first, subdivide every rectangle that contains some of its
    /// points. Rectangles keep their relative order and are replaced in place
    /// by their slices.
    pub fn calculate_boxes(&self) -> Vec<Rect> {
        let mut boxes = vec![self.canvas.rect()];
        for group in self.group_points() {
            boxes = boxes
                .into_iter()
                .flat_map(|rect| {
                    let inside: PointGroup<'_> = group
                        .iter()
                        .copied()
                        .filter(|p| rect.contains(p.position))
                        .collect();
                    Self::subdivide_box(rect, &inside)
                })
                .collect();
        }
        trace!("Tiling produced {} boxes", boxes.len());
        boxes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Span;
    use pretty_assertions::assert_eq;

    fn model(width: u32, height: u32) -> PartitionModel {
        PartitionModel::new(Canvas::new(width, height).unwrap(), 5)
    }

    /// Places a point, sets its priority and toggles the requested lines.
    fn add(model: &mut PartitionModel, x: u32, y: u32, horizontal: bool, vertical: bool, priority: i32) -> PointId {
        let id = model.place_or_select(Point::new(x, y)).id();
        if horizontal {
            model.toggle_horizontal();
        }
        if vertical {
            model.toggle_vertical();
        }
        for _ in 0..priority.unsigned_abs() {
            if priority > 0 {
                model.increment_priority();
            } else {
                model.decrement_priority();
            }
        }
        id
    }

    #[test]
    fn test_no_points_yields_canvas() {
        let model = model(120, 80);
        assert_eq!(model.calculate_boxes(), vec![Rect::new(0, 0, 120, 80)]);
        assert!(model.group_points().is_empty());
    }

    #[test]
    fn test_points_without_cuts_are_anchors_only() {
        let mut model = model(120, 80);
        add(&mut model, 10, 10, false, false, 0);
        add(&mut model, 60, 40, false, false, 3);
        assert!(model.group_points().is_empty());
        assert_eq!(model.calculate_boxes(), vec![Rect::new(0, 0, 120, 80)]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_t_junction_scenario() {
        let mut model = model(100, 100);
        let a = add(&mut model, 50, 50, true, false, 0);
        let b = add(&mut model, 50, 80, false, true, 1);

        assert_eq!(model.point(a).unwrap().horizontal, Some(Span::new(0, 100)));
        assert_eq!(model.point(b).unwrap().vertical, Some(Span::new(50, 100)));

        insta::assert_yaml_snapshot!(model.calculate_boxes(), @r###"
        - left: 0
          top: 0
          width: 100
          height: 50
        - left: 0
          top: 50
          width: 50
          height: 50
        - left: 50
          top: 50
          width: 50
          height: 50
        "###);
    }

    #[test]
    fn test_same_priority_lines_do_not_clip() {
        let mut model = model(100, 100);
        let h = add(&mut model, 30, 40, true, false, 0);
        let v = add(&mut model, 60, 70, false, true, 0);

        assert_eq!(model.point(h).unwrap().horizontal, Some(Span::full(100)));
        assert_eq!(model.point(v).unwrap().vertical, Some(Span::full(100)));
        assert_eq!(model.group_points().len(), 1);
        assert_eq!(
            model.calculate_boxes(),
            vec![
                Rect::new(0, 0, 60, 40),
                Rect::new(0, 40, 60, 60),
                Rect::new(60, 0, 40, 40),
                Rect::new(60, 40, 40, 60),
            ]
        );
    }

    #[test]
    fn test_clipping_picks_nearest_prior_line_on_each_side() {
        let mut model = model(200, 100);
        add(&mut model, 20, 10, false, true, 0);
        add(&mut model, 70, 90, false, true, 0);
        add(&mut model, 150, 10, false, true, 0);
        add(&mut model, 180, 90, false, true, 0);
        let h = add(&mut model, 100, 50, true, false, 1);

        assert_eq!(model.point(h).unwrap().horizontal, Some(Span::new(70, 150)));
    }

    #[test]
    fn test_clipping_ignores_higher_priority_lines() {
        let mut model = model(100, 100);
        let h = add(&mut model, 50, 50, true, false, 0);
        add(&mut model, 20, 20, false, true, 1);
        assert_eq!(model.point(h).unwrap().horizontal, Some(Span::full(100)));
    }

    #[test]
    fn test_clipping_ignores_lines_through_own_coordinate() {
        let mut model = model(100, 100);
        add(&mut model, 50, 10, false, true, 0);
        let h = add(&mut model, 50, 60, true, false, 1);
        assert_eq!(model.point(h).unwrap().horizontal, Some(Span::full(100)));
    }

    #[test]
    fn test_coincident_prior_lines_narrow_once() {
        let mut model = model(100, 100);
        add(&mut model, 30, 10, false, true, 0);
        add(&mut model, 30, 90, false, true, 0);
        let h = add(&mut model, 60, 50, true, false, 1);
        assert_eq!(model.point(h).unwrap().horizontal, Some(Span::new(30, 100)));
    }

    #[test]
    fn test_reprioritise_recomputes_clipping() {
        let mut model = model(100, 100);
        let a = add(&mut model, 50, 50, true, false, 0);
        let b = add(&mut model, 50, 80, false, true, 1);
        assert_eq!(model.point(b).unwrap().vertical, Some(Span::new(50, 100)));

        // Pull B below A: now A is the one being clipped.
        model.place_or_select(Point::new(50, 80));
        model.decrement_priority();
        model.decrement_priority();
        assert_eq!(model.point(b).unwrap().priority, -1);
        assert_eq!(model.point(b).unwrap().vertical, Some(Span::full(100)));
        assert_eq!(model.point(a).unwrap().horizontal, Some(Span::full(100)));

        // A sits on the seam at x=50, so only the right half contains it.
        assert_eq!(
            model.calculate_boxes(),
            vec![
                Rect::new(0, 0, 50, 100),
                Rect::new(50, 0, 50, 50),
                Rect::new(50, 50, 50, 50),
            ]
        );
    }

    #[test]
    fn test_point_on_seam_splits_only_right_box() {
        let mut model = model(100, 100);
        add(&mut model, 50, 50, false, true, 0);
        add(&mut model, 50, 30, true, false, 1);
        assert_eq!(
            model.calculate_boxes(),
            vec![
                Rect::new(0, 0, 50, 100),
                Rect::new(50, 0, 50, 30),
                Rect::new(50, 30, 50, 70),
            ]
        );
    }

    #[test]
    fn test_point_on_horizontal_seam_splits_only_lower_box() {
        let mut model = model(100, 100);
        add(&mut model, 20, 40, true, false, 0);
        add(&mut model, 60, 40, false, true, 1);
        assert_eq!(
            model.calculate_boxes(),
            vec![
                Rect::new(0, 0, 100, 40),
                Rect::new(0, 40, 60, 60),
                Rect::new(60, 40, 40, 60),
            ]
        );
    }

    #[test]
    fn test_place_then_select_same_location() {
        let mut model = model(100, 100);
        let created = model.place_or_select(Point::new(40, 40));
        assert!(matches!(created, Placement::Created(_)));
        let selected = model.place_or_select(Point::new(42, 43));
        assert_eq!(
            selected,
            Placement::Selected {
                id: created.id(),
                priority: 0
            }
        );
        assert_eq!(model.points().len(), 1);
    }

    #[test]
    fn test_first_match_wins_on_overlapping_picks() {
        let mut model = model(100, 100);
        let first = model.place_or_select(Point::new(10, 10)).id();
        // Outside the first point's radius, so a second point is created.
        let second = model.place_or_select(Point::new(18, 10)).id();
        assert_ne!(first, second);
        // Within radius of both: placement order decides.
        assert_eq!(model.place_or_select(Point::new(14, 10)).id(), first);
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut model = model(100, 100);
        add(&mut model, 50, 50, true, false, 0);
        let removed = model.delete(Point::new(51, 51)).unwrap();
        assert_eq!(removed.position, Point::new(50, 50));
        assert_eq!(model.selected_id(), None);
        assert!(!model.toggle_horizontal());
        assert!(!model.toggle_vertical());
        assert_eq!(model.increment_priority(), None);
        assert_eq!(model.decrement_priority(), None);
        assert_eq!(model.calculate_boxes(), vec![Rect::new(0, 0, 100, 100)]);
    }

    #[test]
    fn test_delete_other_point_keeps_selection() {
        let mut model = model(100, 100);
        let a = model.place_or_select(Point::new(10, 10)).id();
        let b = model.place_or_select(Point::new(80, 80)).id();
        assert!(model.is_selected(b));
        model.delete(Point::new(10, 10));
        assert!(model.point(a).is_none());
        assert!(model.is_selected(b));
    }

    #[test]
    fn test_delete_unclips_dependent_lines() {
        let mut model = model(100, 100);
        add(&mut model, 50, 50, true, false, 0);
        let b = add(&mut model, 50, 80, false, true, 1);
        model.delete(Point::new(50, 50));
        assert_eq!(model.point(b).unwrap().vertical, Some(Span::full(100)));
    }

    #[test]
    fn test_delete_with_nothing_near_is_noop() {
        let mut model = model(100, 100);
        let a = model.place_or_select(Point::new(10, 10)).id();
        assert!(model.delete(Point::new(90, 90)).is_none());
        assert!(model.is_selected(a));
        assert_eq!(model.points().len(), 1);
    }

    #[test]
    fn test_group_points_orders_by_priority() {
        let mut model = model(100, 100);
        add(&mut model, 10, 10, true, false, 2);
        add(&mut model, 30, 30, false, true, -1);
        add(&mut model, 50, 50, true, true, 2);
        add(&mut model, 70, 70, false, false, 0);

        let priorities: Vec<Vec<i32>> = model
            .group_points()
            .iter()
            .map(|g| g.iter().map(|p| p.priority).collect())
            .collect();
        assert_eq!(priorities, vec![vec![-1], vec![2, 2]]);
    }

    #[test]
    fn test_subdivide_box_sorts_and_dedups_cuts() {
        let mut a = SplitPoint::new(PointId(0), Point::new(70, 5));
        a.vertical = Some(Span::full(100));
        let mut b = SplitPoint::new(PointId(1), Point::new(30, 5));
        b.vertical = Some(Span::full(100));
        let mut c = SplitPoint::new(PointId(2), Point::new(30, 5));
        c.vertical = Some(Span::full(100));

        let boxes = PartitionModel::subdivide_box(Rect::new(0, 0, 100, 10), &[&a, &b, &c]);
        assert_eq!(
            boxes,
            vec![
                Rect::new(0, 0, 30, 10),
                Rect::new(30, 0, 40, 10),
                Rect::new(70, 0, 30, 10),
            ]
        );
    }

    #[test]
    fn test_subdivide_box_skips_cuts_on_edges() {
        let mut edge = SplitPoint::new(PointId(0), Point::new(100, 10));
        edge.vertical = Some(Span::full(100));
        edge.horizontal = Some(Span::full(100));
        let boxes = PartitionModel::subdivide_box(Rect::new(0, 0, 100, 10), &[&edge]);
        assert_eq!(boxes, vec![Rect::new(0, 0, 100, 10)]);
    }

    #[test]
    fn test_later_group_only_splits_containing_box() {
        let mut model = model(100, 100);
        add(&mut model, 50, 50, false, true, 0);
        add(&mut model, 75, 30, true, false, 1);
        assert_eq!(
            model.calculate_boxes(),
            vec![
                Rect::new(0, 0, 50, 100),
                Rect::new(50, 0, 50, 30),
                Rect::new(50, 30, 50, 70),
            ]
        );
    }
}
