use gridplan_designer::{GridPoint, GridRect, GridSize, Layout, PlacedObject, Stamp};

fn block(x: i32, y: i32, w: i32, h: i32) -> PlacedObject {
    PlacedObject::new("Block", GridPoint::new(x, y), GridSize::new(w, h).unwrap())
}

#[test]
fn test_place_assigns_fresh_ids() {
    let mut layout = Layout::new();
    let placed = layout.place(&[block(0, 0, 1, 1), block(1, 0, 1, 1)], false);

    assert_eq!(placed.len(), 2);
    assert_ne!(placed[0], placed[1]);
    assert_eq!(layout.len(), 2);
    assert_eq!(layout.history().undo_depth(), 1);
}

#[test]
fn test_place_skips_colliding_members() {
    let mut layout = Layout::new();
    layout.place(&[block(0, 0, 2, 2)], false);

    let batch = [block(1, 1, 2, 2), block(4, 0, 1, 1), block(5, 0, 1, 1)];
    let placed = layout.place(&batch, false);

    assert_eq!(placed.len(), 2);
    assert_eq!(layout.len(), 3);
    assert!(layout.query_intersecting(&GridRect::new(2, 2, 1, 1)).len() == 1);
}

#[test]
fn test_forced_placement_places_everything() {
    let mut layout = Layout::new();
    layout.place(&[block(0, 0, 2, 2)], false);

    let placed = layout.place(&[block(1, 1, 2, 2)], true);
    assert_eq!(placed.len(), 1);
    assert_eq!(layout.len(), 2);
}

#[test]
fn test_nothing_fits_is_a_noop() {
    let mut layout = Layout::new();
    layout.place(&[block(0, 0, 4, 4)], false);
    let depth = layout.history().undo_depth();

    let placed = layout.place(&[block(1, 1, 1, 1), block(2, 2, 1, 1)], false);
    assert!(placed.is_empty());
    assert_eq!(layout.len(), 1);
    assert_eq!(layout.history().undo_depth(), depth);
}

#[test]
fn test_empty_batch_is_a_noop() {
    let mut layout = Layout::new();
    assert!(layout.place(&[], false).is_empty());
    assert!(!layout.is_dirty());
}

#[test]
fn test_invalid_members_are_skipped() {
    let mut layout = Layout::new();
    let mut bad = block(0, 0, 1, 1);
    bad.size = GridSize { width: 0, height: 1 };
    let placed = layout.place(&[bad, block(3, 3, 1, 1).with_radius(-2.0), block(5, 5, 1, 1)], false);
    assert_eq!(placed.len(), 1);
}

#[test]
fn test_batch_members_do_not_block_each_other() {
    let mut layout = Layout::new();
    let placed = layout.place(&[block(0, 0, 2, 2), block(1, 1, 2, 2)], false);
    assert_eq!(placed.len(), 2);
}

#[test]
fn test_add_operation_covers_placed_objects() {
    let mut layout = Layout::new();
    layout.place(&[block(0, 0, 2, 2)], false);
    layout.place(&[block(0, 0, 1, 1), block(3, 0, 1, 1)], false);

    assert_eq!(layout.history().undo_name(), Some("Add Objects"));
    assert!(layout.undo().unwrap());
    assert_eq!(layout.len(), 1);
}

#[test]
fn test_can_place() {
    let mut layout = Layout::new();
    layout.place(&[block(0, 0, 2, 2)], false);
    assert!(layout.can_place(&block(2, 0, 1, 1)));
    assert!(!layout.can_place(&block(1, 1, 1, 1)));
}

#[test]
fn test_stamp_placement_after_rotation() {
    let mut layout = Layout::new();
    let stamp = Stamp::new(vec![block(0, 0, 3, 1)])
        .rotated()
        .translated_to(GridPoint::new(10, 10));
    let placed = layout.place(stamp.objects(), false);

    let obj = layout.get(placed[0]).unwrap();
    assert_eq!(obj.footprint(), GridRect::new(10, 10, 1, 3));
}

#[test]
fn test_rotate_object_respects_collisions() {
    let mut layout = Layout::new();
    let ids = layout.place(&[block(0, 0, 3, 1), block(0, 1, 1, 1)], false);

    // Turning the bar would cover (0,1).
    assert!(!layout.rotate_object(ids[0]).unwrap());

    layout.remove_objects(&[ids[1]]);
    assert!(layout.rotate_object(ids[0]).unwrap());
    assert_eq!(layout.get(ids[0]).unwrap().footprint(), GridRect::new(0, 0, 1, 3));

    assert!(layout.undo().unwrap());
    assert_eq!(layout.get(ids[0]).unwrap().footprint(), GridRect::new(0, 0, 3, 1));
}

#[test]
fn test_remove_objects_registers_one_operation() {
    let mut layout = Layout::new();
    let ids = layout.place(&[block(0, 0, 1, 1), block(2, 0, 1, 1)], false);
    let removed = layout.remove_objects(&ids);

    assert_eq!(removed.len(), 2);
    assert_eq!(layout.history().undo_name(), Some("Remove Objects"));
    assert!(layout.undo().unwrap());
    assert_eq!(layout.len(), 2);
}
