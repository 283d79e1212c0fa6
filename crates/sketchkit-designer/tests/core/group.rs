use sketchkit_core::{shared, Point, ShapeError};
use sketchkit_designer::{Figure, GroupManager, Shape, ShapeId, Style};
use std::rc::Rc;

fn filled_rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape::rect(x, y, w, h).with_style(Style::filled("#336699", "#000000", 1.0))
}

#[test]
fn test_group_box_tracks_member_positions() {
    let a = shared(filled_rect(10.0, 10.0, 5.0, 5.0));
    let b = shared(filled_rect(50.0, 60.0, 5.0, 5.0));
    let mut manager = GroupManager::new();
    let group = manager.create_group(&a);
    let id = group.borrow().id().clone();
    manager.add_to_group(&id, &b).unwrap();

    let group = group.borrow();
    assert_eq!(group.x(), 10.0);
    assert_eq!(group.y(), 10.0);
    assert_eq!(group.bounds().max, Point::new(50.0, 60.0));
}

#[test]
fn test_group_pick_delegates_to_members() {
    let a = shared(filled_rect(10.0, 10.0, 5.0, 5.0));
    let b = shared(filled_rect(50.0, 60.0, 5.0, 5.0));
    let mut manager = GroupManager::new();
    let group = manager.create_group(&a);
    let id = group.borrow().id().clone();
    manager.add_to_group(&id, &b).unwrap();

    let group = group.borrow();
    assert!(group.pick(Point::new(52.0, 62.0)));
    assert!(group.pick(Point::new(12.0, 12.0)));
    assert!(!group.pick(Point::new(30.0, 30.0)));
}

#[test]
fn test_group_scale_moves_and_scales_members() {
    let a = shared(filled_rect(10.0, 10.0, 5.0, 5.0));
    let b = shared(filled_rect(50.0, 60.0, 5.0, 5.0));
    let mut manager = GroupManager::new();
    let group = manager.create_group(&a);
    let id = group.borrow().id().clone();
    manager.add_to_group(&id, &b).unwrap();

    group.borrow_mut().scale(2.0, 2.0, 0.0, 0.0);

    assert_eq!(a.borrow().position(), Point::new(10.0, 10.0));
    assert_eq!(a.borrow().width(), 10.0);
    assert_eq!(b.borrow().position(), Point::new(90.0, 110.0));
    assert_eq!(b.borrow().height(), 10.0);
    assert_eq!(group.borrow().bounds().max, Point::new(90.0, 110.0));
}

#[test]
fn test_group_move_translates_members() {
    let a = shared(filled_rect(10.0, 10.0, 5.0, 5.0));
    let b = shared(filled_rect(50.0, 60.0, 5.0, 5.0));
    let mut manager = GroupManager::new();
    let group = manager.create_group(&a);
    let id = group.borrow().id().clone();
    manager.add_to_group(&id, &b).unwrap();

    group.borrow_mut().move_to(0.0, 0.0);

    assert_eq!(a.borrow().position(), Point::new(0.0, 0.0));
    assert_eq!(b.borrow().position(), Point::new(40.0, 50.0));
    assert_eq!(group.borrow().position(), Point::new(0.0, 0.0));
}

#[test]
fn test_rotated_group_picks_in_its_own_frame() {
    let bar = shared(filled_rect(0.0, 0.0, 100.0, 10.0));
    let mut manager = GroupManager::new();
    let group = manager.create_group(&bar);
    // The box collapses to the member position, so the group turns about (0, 0).
    group.borrow_mut().set_rotation(90.0);

    let group = group.borrow();
    assert!(group.pick(Point::new(-5.0, 50.0)));
    assert!(!group.pick(Point::new(50.0, 5.0)));
}

#[test]
fn test_group_in_figure_picks_before_members_below() {
    let mut figure = Figure::new();
    let a = figure.add(filled_rect(10.0, 10.0, 20.0, 20.0));
    let mut manager = GroupManager::new();
    let group = manager.create_group(&a);
    figure.add_shared(Rc::clone(&group));

    let hit = figure.pick(Point::new(15.0, 15.0)).expect("hit");
    assert!(Rc::ptr_eq(&hit, &group));
}

#[test]
fn test_removed_member_no_longer_picks() {
    let a = shared(filled_rect(10.0, 10.0, 5.0, 5.0));
    let b = shared(filled_rect(50.0, 60.0, 5.0, 5.0));
    let mut manager = GroupManager::new();
    let group = manager.create_group(&a);
    let id = group.borrow().id().clone();
    manager.add_to_group(&id, &b).unwrap();

    assert!(manager.remove_from_group(&id, &b).unwrap());
    assert!(!manager.remove_from_group(&id, &b).unwrap());
    assert!(!group.borrow().pick(Point::new(52.0, 62.0)));
    assert_eq!(group.borrow().bounds().max, Point::new(10.0, 10.0));
}

#[test]
fn test_shape_can_join_several_groups() {
    let a = shared(filled_rect(10.0, 10.0, 5.0, 5.0));
    let mut manager = GroupManager::new();
    let first = manager.create_group(&a);
    let second = manager.create_group(&a);

    let groups = manager.groups_for_shape(&a);
    assert_eq!(groups.len(), 2);
    assert!(Rc::ptr_eq(&groups[0], &first));
    assert!(Rc::ptr_eq(&groups[1], &second));

    let id = first.borrow().id().clone();
    assert!(manager.delete_group(&id).is_some());
    assert_eq!(manager.groups_for_shape(&a).len(), 1);
    assert_eq!(manager.len(), 1);
}

#[test]
fn test_sync_with_unknown_group_changes_nothing() {
    let a = shared(filled_rect(10.0, 10.0, 5.0, 5.0));
    let mut manager = GroupManager::new();
    let group = manager.create_group(&a);
    let known = group.borrow().id().clone();

    let result = manager.sync_memberships(&a, &[ShapeId::from("group-000000")]);
    assert!(matches!(result, Err(ShapeError::GroupNotFound { .. })));
    assert_eq!(manager.groups_for_shape(&a).len(), 1);

    manager.sync_memberships(&a, &[]).unwrap();
    assert!(manager.groups_for_shape(&a).is_empty());
    manager.sync_memberships(&a, &[known]).unwrap();
    assert_eq!(manager.groups_for_shape(&a).len(), 1);
}

#[test]
fn test_group_cannot_join_a_group_it_contains() {
    let r1 = shared(filled_rect(10.0, 10.0, 5.0, 5.0));
    let r2 = shared(filled_rect(50.0, 60.0, 5.0, 5.0));
    let r3 = shared(filled_rect(90.0, 90.0, 5.0, 5.0));
    let mut manager = GroupManager::new();
    let a = manager.create_group(&r1);
    let b = manager.create_group(&r2);
    let c = manager.create_group(&r3);
    let a_id = a.borrow().id().clone();
    let b_id = b.borrow().id().clone();
    let c_id = c.borrow().id().clone();

    manager.add_to_group(&a_id, &b).unwrap();
    manager.add_to_group(&b_id, &c).unwrap();

    manager.add_to_group(&b_id, &a).unwrap();
    manager.add_to_group(&c_id, &a).unwrap();
    manager.add_to_group(&a_id, &a).unwrap();

    assert!(!b.borrow().as_group().unwrap().has_shape(&a));
    assert!(!c.borrow().as_group().unwrap().has_shape(&a));
    assert!(!a.borrow().as_group().unwrap().has_shape(&a));
    assert_eq!(b.borrow().as_group().unwrap().len(), 2);
    assert_eq!(c.borrow().as_group().unwrap().len(), 1);

    assert!(!a.borrow().pick(Point::new(500.0, 500.0)));
    assert!(a.borrow().pick(Point::new(92.0, 92.0)));
}
