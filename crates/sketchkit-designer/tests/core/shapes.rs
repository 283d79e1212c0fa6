use proptest::prelude::*;
use sketchkit_core::Point;
use sketchkit_designer::{Shape, Style};

fn filled(shape: Shape) -> Shape {
    shape.with_style(Style::filled("#cccccc", "#000000", 1.0))
}

#[test]
fn test_filled_shapes_pick_their_center() {
    let shapes = vec![
        filled(Shape::rect(10.0, 10.0, 40.0, 20.0)),
        filled(Shape::circle(100.0, 100.0, 20.0)),
        filled(Shape::triangle(
            Point::new(0.0, 0.0),
            Point::new(60.0, 0.0),
            Point::new(30.0, 45.0),
        )),
        filled(Shape::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(40.0, 0.0),
            Point::new(40.0, 40.0),
            Point::new(0.0, 40.0),
        ])),
        filled(Shape::star(50.0, 50.0, 5, 5.0, 15.0)),
    ];
    for shape in &shapes {
        let center = shape.bounds().center();
        assert!(shape.pick(center), "{} should pick {:?}", shape.shape_type(), center);
    }
}

#[test]
fn test_rect_corners_and_right_edge() {
    let rect = Shape::rect(10.0, 20.0, 30.0, 40.0);
    for p in [
        Point::new(10.0, 20.0),
        Point::new(40.0, 20.0),
        Point::new(10.0, 60.0),
        Point::new(40.0, 60.0),
        Point::new(25.0, 40.0),
    ] {
        assert!(rect.pick(p), "corner {:?}", p);
    }
    assert!(!rect.pick(Point::new(10.0 + 30.0 + 1.0, 20.0)));
}

#[test]
fn test_circle_pick_scenario() {
    let circle = Shape::circle(100.0, 100.0, 20.0);
    assert!(circle.pick(Point::new(115.0, 100.0)));
    assert!(!circle.pick(Point::new(125.0, 100.0)));
}

#[test]
fn test_line_pick_scenario() {
    let line = Shape::line(0.0, 0.0, 100.0, 0.0);
    assert!(line.pick(Point::new(50.0, 0.0)));
    assert!(!line.pick(Point::new(50.0, 10.0)));
}

#[test]
fn test_outline_pick_reaches_past_segment_ends() {
    let line = Shape::line(0.0, 0.0, 100.0, 0.0);
    assert!(line.pick(Point::new(150.0, 0.0)));
    assert!(line.pick(Point::new(-40.0, 2.0)));

    let tri = Shape::triangle(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(50.0, 50.0),
    );
    assert!(tri.style.fill.is_none());
    assert!(tri.pick(Point::new(150.0, 0.0)));
}

#[test]
fn test_zero_length_line_is_never_picked() {
    let line = Shape::line(5.0, 5.0, 5.0, 5.0);
    assert!(!line.pick(Point::new(5.0, 5.0)));
}

#[test]
fn test_doodle_picks_near_samples() {
    let doodle = Shape::doodle(vec![Point::new(0.0, 0.0), Point::new(20.0, 20.0)]);
    assert!(doodle.pick(Point::new(3.0, -3.0)));
    assert!(!doodle.pick(Point::new(10.0, 10.0)));
}

#[test]
fn test_rotated_rect_picks_rotated_area() {
    // 100x10 bar centered at (50, 5); a quarter turn makes it vertical.
    let bar = Shape::rect(0.0, 0.0, 100.0, 10.0).with_rotation(90.0);
    assert!(bar.pick(Point::new(50.0, 40.0)));
    assert!(!bar.pick(Point::new(90.0, 5.0)));
}

#[test]
fn test_non_finite_point_misses() {
    let rect = Shape::rect(0.0, 0.0, 10.0, 10.0);
    assert!(!rect.pick(Point::new(f64::NAN, 5.0)));
}

#[test]
fn test_invalid_scale_is_a_no_op() {
    let mut rect = Shape::rect(10.0, 10.0, 20.0, 20.0);
    rect.scale(0.0, 2.0, 0.0, 0.0);
    rect.scale(f64::NAN, 1.0, 0.0, 0.0);
    rect.scale(-1.0, 1.0, 0.0, 0.0);
    assert_eq!(rect.width(), 20.0);
    assert_eq!(rect.position(), Point::new(10.0, 10.0));
}

#[test]
fn test_vertex_shape_scale_keeps_anchor() {
    let mut tri = Shape::triangle(
        Point::new(0.0, 0.0),
        Point::new(40.0, 0.0),
        Point::new(20.0, 30.0),
    );
    tri.scale(2.0, 2.0, 1.0, 1.0);
    let b = tri.bounds();
    assert_eq!(b.max, Point::new(40.0, 30.0));
    assert_eq!(b.min, Point::new(-40.0, -30.0));
}

#[test]
fn test_circle_scale_keeps_anchor() {
    let mut circle = Shape::circle(50.0, 50.0, 10.0);
    circle.scale(2.0, 2.0, 0.0, 0.0);
    let b = circle.bounds();
    assert_eq!(b.min, Point::new(40.0, 40.0));
    assert_eq!(b.width(), 40.0);
}

fn any_shape() -> impl Strategy<Value = Shape> {
    prop_oneof![
        (1.0..200.0f64, 1.0..200.0f64).prop_map(|(w, h)| Shape::rect(0.0, 0.0, w, h)),
        (1.0..100.0f64).prop_map(|r| Shape::circle(0.0, 0.0, r)),
        (1.0..100.0f64, 1.0..100.0f64).prop_map(|(x, y)| Shape::line(0.0, 0.0, x, y)),
        (1.0..100.0f64).prop_map(|s| Shape::triangle(
            Point::new(0.0, 0.0),
            Point::new(s, 0.0),
            Point::new(s / 2.0, s)
        )),
        (1.0..100.0f64).prop_map(|r| Shape::star(0.0, 0.0, 5, r / 2.0, r)),
        (1.0..100.0f64).prop_map(|s| Shape::doodle(vec![
            Point::new(0.0, 0.0),
            Point::new(s, s / 3.0),
            Point::new(s / 2.0, s)
        ])),
    ]
}

proptest! {
    #[test]
    fn prop_move_to_round_trip(mut shape in any_shape(), x in -1.0e4..1.0e4f64, y in -1.0e4..1.0e4f64) {
        shape.move_to(x, y);
        prop_assert!((shape.x() - x).abs() < 1e-9);
        prop_assert!((shape.y() - y).abs() < 1e-9);
    }

    #[test]
    fn prop_rect_scale_inverse(
        x in -500.0..500.0f64,
        y in -500.0..500.0f64,
        w in 1.0..300.0f64,
        h in 1.0..300.0f64,
        s in 0.1..10.0f64,
        ref_x in 0.0..=1.0f64,
        ref_y in 0.0..=1.0f64,
    ) {
        let mut rect = Shape::rect(x, y, w, h);
        rect.scale(s, s, ref_x, ref_y);
        rect.scale(1.0 / s, 1.0 / s, ref_x, ref_y);
        prop_assert!((rect.width() - w).abs() < 1e-6);
        prop_assert!((rect.height() - h).abs() < 1e-6);
        prop_assert!((rect.x() - x).abs() < 1e-6);
        prop_assert!((rect.y() - y).abs() < 1e-6);
    }
}
