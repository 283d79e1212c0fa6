use sketchkit_core::{FigureEvent, Point, Shared};
use sketchkit_designer::{
    EditOutcome, EditState, EditorSession, Figure, GroupManager, Handle, Preview, Shape, Style,
    Tool,
};
use sketchkit_settings::Config;
use std::cell::Cell;
use std::rc::Rc;

fn session_with_rect(x: f64, y: f64, w: f64, h: f64) -> (EditorSession, Shared<Shape>) {
    let mut figure = Figure::new();
    let rect = figure.add(Shape::rect(x, y, w, h).with_style(Style::filled("#cccccc", "#000000", 1.0)));
    (EditorSession::with_figure(figure, &Config::default()), rect)
}

/// Count `Changed` events published by the session's figure.
fn count_changes(session: &EditorSession) -> Rc<Cell<usize>> {
    let changes = Rc::new(Cell::new(0));
    let sink = Rc::clone(&changes);
    session.figure().subscribe(move |event| {
        if matches!(event, FigureEvent::Changed { .. }) {
            sink.set(sink.get() + 1);
        }
    });
    changes
}

#[test]
fn test_move_commits_only_on_release() {
    let (mut session, rect) = session_with_rect(10.0, 10.0, 20.0, 20.0);
    let changes = count_changes(&session);

    session.pointer_down(Point::new(15.0, 15.0));
    session.pointer_move(Point::new(20.0, 25.0));
    session.pointer_move(Point::new(25.0, 35.0));
    assert_eq!(session.state(), EditState::ShapeDragging);
    assert_eq!(rect.borrow().position(), Point::new(10.0, 10.0));
    assert_eq!(changes.get(), 0);

    match session.preview() {
        Some(Preview::Shape(preview)) => assert_eq!(preview.position(), Point::new(20.0, 30.0)),
        other => panic!("unexpected preview {:?}", other),
    }

    let outcome = session.pointer_up(Point::new(25.0, 35.0));
    let id = rect.borrow().id().clone();
    assert_eq!(outcome, EditOutcome::Moved(id));
    assert_eq!(rect.borrow().position(), Point::new(20.0, 30.0));
    assert_eq!(changes.get(), 1);
    assert_eq!(session.state(), EditState::Idle);
    assert!(session.preview().is_none());
}

#[test]
fn test_dragging_a_shape_selects_it() {
    let (mut session, rect) = session_with_rect(10.0, 10.0, 20.0, 20.0);
    let selections = Rc::new(Cell::new(0));
    let sink = Rc::clone(&selections);
    session.figure().subscribe(move |event| {
        if matches!(event, FigureEvent::SelectionChanged { .. }) {
            sink.set(sink.get() + 1);
        }
    });

    session.pointer_down(Point::new(15.0, 15.0));
    session.pointer_move(Point::new(40.0, 15.0));
    assert!(session.selected().is_some_and(|s| Rc::ptr_eq(&s, &rect)));
    assert_eq!(selections.get(), 1);
    session.pointer_up(Point::new(40.0, 15.0));
    assert_eq!(selections.get(), 1);
}

#[test]
fn test_pointer_leave_cancels_shape_drag() {
    let (mut session, rect) = session_with_rect(10.0, 10.0, 20.0, 20.0);
    let changes = count_changes(&session);

    session.pointer_down(Point::new(15.0, 15.0));
    session.pointer_move(Point::new(60.0, 60.0));
    session.pointer_leave();

    assert_eq!(session.state(), EditState::Idle);
    assert_eq!(session.pointer_up(Point::new(60.0, 60.0)), EditOutcome::None);
    assert_eq!(rect.borrow().position(), Point::new(10.0, 10.0));
    assert_eq!(changes.get(), 0);
}

#[test]
fn test_corner_handle_drag_scales_about_opposite_corner() {
    let (mut session, rect) = session_with_rect(100.0, 100.0, 50.0, 40.0);
    session.select(Some(Rc::clone(&rect)));
    let changes = count_changes(&session);

    session.pointer_down(Point::new(158.0, 148.0));
    session.pointer_move(Point::new(168.0, 158.0));
    assert_eq!(session.state(), EditState::HandleDragging(Handle::BottomRight));
    assert_eq!(rect.borrow().width(), 50.0);

    let outcome = session.pointer_up(Point::new(168.0, 158.0));
    assert!(matches!(outcome, EditOutcome::Scaled(_)));
    let b = rect.borrow().bounds();
    assert_eq!(b.min, Point::new(100.0, 100.0));
    assert_eq!(b.width(), 60.0);
    assert_eq!(b.height(), 50.0);
    assert_eq!(changes.get(), 1);
}

#[test]
fn test_top_left_handle_keeps_bottom_right() {
    let (mut session, rect) = session_with_rect(100.0, 100.0, 50.0, 40.0);
    session.select(Some(Rc::clone(&rect)));

    session.pointer_down(Point::new(92.0, 92.0));
    session.pointer_move(Point::new(82.0, 82.0));
    session.pointer_up(Point::new(82.0, 82.0));

    let b = rect.borrow().bounds();
    assert_eq!(b.max, Point::new(150.0, 140.0));
    assert_eq!(b.width(), 60.0);
    assert_eq!(b.height(), 50.0);
}

#[test]
fn test_rotate_handle_drag_rotates() {
    let (mut session, rect) = session_with_rect(100.0, 100.0, 50.0, 40.0);
    session.select(Some(Rc::clone(&rect)));

    // Rotate handle sits above the top edge; the box center is (125, 120).
    session.pointer_down(Point::new(125.0, 75.0));
    session.pointer_move(Point::new(170.0, 120.0));
    assert_eq!(session.state(), EditState::HandleDragging(Handle::Rotate));
    match session.preview() {
        Some(Preview::Shape(preview)) => assert!((preview.rotation() - 90.0).abs() < 1e-9),
        other => panic!("unexpected preview {:?}", other),
    }

    let outcome = session.pointer_up(Point::new(170.0, 120.0));
    assert!(matches!(outcome, EditOutcome::Rotated(_)));
    assert!((rect.borrow().rotation() - 90.0).abs() < 1e-9);
    assert_eq!(rect.borrow().bounds().min, Point::new(100.0, 100.0));
}

#[test]
fn test_click_selects_and_clears() {
    let (mut session, rect) = session_with_rect(10.0, 10.0, 20.0, 20.0);
    session.pointer_down(Point::new(15.0, 15.0));
    let outcome = session.pointer_up(Point::new(15.0, 15.0));
    assert_eq!(outcome, EditOutcome::Selected(Some(rect.borrow().id().clone())));

    session.pointer_down(Point::new(200.0, 200.0));
    assert_eq!(session.pointer_up(Point::new(200.0, 200.0)), EditOutcome::Selected(None));
    assert!(session.selected().is_none());
}

#[test]
fn test_rect_tool_previews_then_creates() {
    let mut session = EditorSession::default();
    let changes = count_changes(&session);
    session.set_tool(Tool::Rect);

    session.pointer_down(Point::new(10.0, 10.0));
    session.pointer_move(Point::new(60.0, 40.0));
    assert_eq!(session.state(), EditState::ToolDragging);
    match session.preview() {
        Some(Preview::Shape(preview)) => {
            assert_eq!(preview.width(), 50.0);
            assert_eq!(preview.height(), 30.0);
        }
        other => panic!("unexpected preview {:?}", other),
    }
    assert!(session.figure().is_empty());

    let outcome = session.pointer_up(Point::new(60.0, 40.0));
    let EditOutcome::Created(id) = outcome else {
        panic!("expected a created shape");
    };
    let created = session.figure().get(&id).expect("in figure");
    assert_eq!(created.borrow().position(), Point::new(10.0, 10.0));
    assert_eq!(changes.get(), 1);
}

#[test]
fn test_group_drag_previews_an_outline() {
    let mut figure = Figure::new();
    let a = figure.add(Shape::rect(10.0, 10.0, 20.0, 20.0).with_style(Style::filled("#cccccc", "#000000", 1.0)));
    let b = figure.add(Shape::rect(50.0, 60.0, 20.0, 20.0).with_style(Style::filled("#cccccc", "#000000", 1.0)));
    let mut groups = GroupManager::new();
    let group = groups.create_group(&a);
    let id = group.borrow().id().clone();
    groups.add_to_group(&id, &b).unwrap();
    figure.add_shared(Rc::clone(&group));
    let mut session = EditorSession::with_figure(figure, &Config::default());

    session.pointer_down(Point::new(15.0, 15.0));
    session.pointer_move(Point::new(25.0, 25.0));
    match session.preview() {
        Some(Preview::Outline { bounds, rotation }) => {
            assert_eq!(bounds.min, Point::new(20.0, 20.0));
            assert_eq!(bounds.max, Point::new(60.0, 70.0));
            assert_eq!(rotation, 0.0);
        }
        other => panic!("unexpected preview {:?}", other),
    }
    assert_eq!(a.borrow().position(), Point::new(10.0, 10.0));

    assert_eq!(session.pointer_up(Point::new(25.0, 25.0)), EditOutcome::Moved(id));
    assert_eq!(a.borrow().position(), Point::new(20.0, 20.0));
    assert_eq!(b.borrow().position(), Point::new(60.0, 70.0));
}

#[test]
fn test_delete_selected() {
    let (mut session, rect) = session_with_rect(10.0, 10.0, 20.0, 20.0);
    let changes = count_changes(&session);
    assert!(session.delete_selected().is_none());

    session.select(Some(Rc::clone(&rect)));
    let removed = session.delete_selected().expect("removed");
    assert!(Rc::ptr_eq(&removed, &rect));
    assert!(session.figure().is_empty());
    assert!(session.selected().is_none());
    assert_eq!(changes.get(), 1);
}

#[test]
fn test_switching_tool_cancels_drag() {
    let mut session = EditorSession::default();
    session.set_tool(Tool::Circle);
    session.pointer_down(Point::new(10.0, 10.0));
    session.pointer_move(Point::new(30.0, 10.0));
    session.set_tool(Tool::Selection);

    assert_eq!(session.state(), EditState::Idle);
    assert!(session.preview().is_none());
    assert_eq!(session.pointer_up(Point::new(30.0, 10.0)), EditOutcome::None);
    assert!(session.figure().is_empty());
}
