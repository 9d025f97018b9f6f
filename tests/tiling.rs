use proptest::prelude::*;
use splitter::*;

/// A placement followed by optional toggles and a priority shift.
#[derive(Debug, Clone)]
struct Step {
    x: u32,
    y: u32,
    horizontal: bool,
    vertical: bool,
    priority_shift: i32,
}

fn step(width: u32, height: u32) -> impl Strategy<Value = Step> {
    (0..width, 0..height, any::<bool>(), any::<bool>(), -3..=3i32).prop_map(
        |(x, y, horizontal, vertical, priority_shift)| Step {
            x,
            y,
            horizontal,
            vertical,
            priority_shift,
        },
    )
}

fn layout() -> impl Strategy<Value = (u32, u32, Vec<Step>)> {
    (1..200u32, 1..200u32).prop_flat_map(|(width, height)| {
        (
            Just(width),
            Just(height),
            prop::collection::vec(step(width, height), 0..25),
        )
    })
}

fn build(width: u32, height: u32, steps: &[Step]) -> PartitionModel {
    let mut model = PartitionModel::new(Canvas::new(width, height).unwrap(), 3);
    for step in steps {
        model.place_or_select(Point::new(step.x, step.y));
        if step.horizontal {
            model.toggle_horizontal();
        }
        if step.vertical {
            model.toggle_vertical();
        }
        for _ in 0..step.priority_shift.unsigned_abs() {
            if step.priority_shift > 0 {
                model.increment_priority();
            } else {
                model.decrement_priority();
            }
        }
    }
    model
}

proptest! {
    #[test]
    fn test_tiles_cover_canvas_without_overlap((width, height, steps) in layout()) {
        let model = build(width, height, &steps);
        let canvas = model.canvas().rect();
        let tiles = model.calculate_boxes();

        let total: u64 = tiles.iter().map(Rect::area).sum();
        prop_assert_eq!(total, canvas.area());
        for (i, a) in tiles.iter().enumerate() {
            prop_assert!(a.width > 0 && a.height > 0, "empty tile {:?}", a);
            prop_assert_eq!(a.intersection_area(&canvas), a.area());
            for b in &tiles[i + 1..] {
                prop_assert_eq!(a.intersection_area(b), 0, "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_no_cuts_means_single_tile((width, height, steps) in layout()) {
        let steps: Vec<Step> = steps
            .into_iter()
            .map(|s| Step { horizontal: false, vertical: false, ..s })
            .collect();
        let model = build(width, height, &steps);
        prop_assert_eq!(model.calculate_boxes(), vec![model.canvas().rect()]);
    }

    #[test]
    fn test_lines_contain_their_anchor((width, height, steps) in layout()) {
        let model = build(width, height, &steps);
        for point in model.points() {
            if let Some(span) = point.horizontal {
                prop_assert!(span.start <= point.position.x && point.position.x < span.end);
                prop_assert!(span.end <= width);
            }
            if let Some(span) = point.vertical {
                prop_assert!(span.start <= point.position.y && point.position.y < span.end);
                prop_assert!(span.end <= height);
            }
        }
    }

    #[test]
    fn test_recompute_is_idempotent((width, height, steps) in layout()) {
        let model = build(width, height, &steps);
        let mut again = model.clone();
        again.calculate_line_rects();
        prop_assert_eq!(model.points(), again.points());
    }

    #[test]
    fn test_double_toggle_restores_layout((width, height, steps) in layout(), horizontal in any::<bool>()) {
        prop_assume!(!steps.is_empty());
        let mut model = build(width, height, &steps);
        let before = model.points().to_vec();
        if horizontal {
            model.toggle_horizontal();
            model.toggle_horizontal();
        } else {
            model.toggle_vertical();
            model.toggle_vertical();
        }
        prop_assert_eq!(model.points(), &before[..]);
    }
}

#[test]
fn test_deleting_selected_point_disables_commands() {
    let mut model = PartitionModel::new(Canvas::new(64, 64).unwrap(), 5);
    model.place_or_select(Point::new(32, 32));
    model.toggle_vertical();
    model.delete(Point::new(30, 30));

    assert!(model.selected().is_none());
    assert!(!model.toggle_horizontal());
    assert_eq!(model.increment_priority(), None);
    assert!(model.points().is_empty());
}
