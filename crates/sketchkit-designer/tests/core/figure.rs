use sketchkit_core::{FigureEvent, Point, ShapeError, Shared};
use sketchkit_designer::{Figure, Painter, RecordingSurface, DrawCommand, Shape, ShapeId};
use std::cell::RefCell;
use std::rc::Rc;

fn three() -> (Figure, Shared<Shape>, Shared<Shape>, Shared<Shape>) {
    let mut figure = Figure::new();
    let a = figure.add_rect(0.0, 0.0, 10.0, 10.0);
    let b = figure.add_rect(20.0, 0.0, 10.0, 10.0);
    let c = figure.add_rect(40.0, 0.0, 10.0, 10.0);
    (figure, a, b, c)
}

fn order(figure: &Figure, expected: &[&Shared<Shape>]) -> bool {
    figure.len() == expected.len()
        && figure
            .shapes()
            .iter()
            .zip(expected)
            .all(|(s, e)| Rc::ptr_eq(s, e))
}

#[test]
fn test_up_swaps_with_neighbour() {
    let (mut figure, a, b, c) = three();
    figure.up(&a);
    assert!(order(&figure, &[&b, &a, &c]));
}

#[test]
fn test_down_swaps_with_neighbour() {
    let (mut figure, a, b, c) = three();
    figure.down(&c);
    assert!(order(&figure, &[&a, &c, &b]));
}

#[test]
fn test_to_front_and_to_back() {
    let (mut figure, a, b, c) = three();
    figure.to_front(&a);
    assert!(order(&figure, &[&b, &c, &a]));
    figure.to_back(&c);
    assert!(order(&figure, &[&c, &b, &a]));
}

#[test]
fn test_overlapping_pick_returns_last_added() {
    let mut figure = Figure::new();
    let _first = figure.add_rect(0.0, 0.0, 10.0, 10.0);
    let second = figure.add_rect(0.0, 0.0, 10.0, 10.0);
    let hit = figure.pick(Point::new(5.0, 5.0)).expect("hit");
    assert!(Rc::ptr_eq(&hit, &second));
    assert!(figure.pick(Point::new(50.0, 50.0)).is_none());
}

#[test]
fn test_remove_absent_shape_is_a_no_op() {
    let (mut figure, a, _, _) = three();
    let stranger = Rc::new(RefCell::new(Shape::rect(0.0, 0.0, 1.0, 1.0)));
    assert!(!figure.remove(&stranger));
    assert_eq!(figure.len(), 3);

    assert!(figure.remove(&a));
    assert!(!figure.remove(&a));
    assert_eq!(figure.len(), 2);
}

#[test]
fn test_remove_by_id() {
    let (mut figure, _, b, _) = three();
    let id = b.borrow().id().clone();
    let removed = figure.remove_by_id(&id).unwrap();
    assert!(Rc::ptr_eq(&removed, &b));
    assert!(figure.get(&id).is_none());
    assert_eq!(
        figure.remove_by_id(&id).unwrap_err(),
        ShapeError::NotFound { id: id.to_string() }
    );
    assert_eq!(figure.len(), 2);

    let err = figure.remove_by_id(&ShapeId::from("rect-000000")).unwrap_err();
    assert_eq!(err.to_string(), "Shape not found: rect-000000");
}

#[test]
fn test_ids_stay_unique() {
    let mut figure = Figure::new();
    let original = Shape::rect(0.0, 0.0, 5.0, 5.0);
    for _ in 0..20 {
        figure.add(original.clone());
    }
    let mut ids = figure.ids();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[test]
fn test_refresh_notifies_each_subscriber() {
    let figure_events = Rc::new(RefCell::new(Vec::new()));
    let mut figure = Figure::new();
    let sink = Rc::clone(&figure_events);
    let id = figure.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    figure.refresh();
    figure.refresh();
    assert_eq!(
        *figure_events.borrow(),
        vec![
            FigureEvent::Changed { revision: 1 },
            FigureEvent::Changed { revision: 2 }
        ]
    );

    assert!(figure.unsubscribe(id));
    figure.refresh();
    assert_eq!(figure_events.borrow().len(), 2);
}

#[test]
fn test_draw_clears_then_paints_in_order() {
    let (figure, _, _, _) = three();
    let mut painter = Painter::new(RecordingSurface::new(200.0, 100.0));
    figure.draw(&mut painter, None);
    let commands = painter.surface().commands();

    assert_eq!(commands[0], DrawCommand::ClearRect(0.0, 0.0, 200.0, 100.0));
    let rects: Vec<f64> = commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Rect(x, _, _, _) => Some(*x),
            _ => None,
        })
        .collect();
    assert_eq!(rects, vec![0.0, 20.0, 40.0]);
}
