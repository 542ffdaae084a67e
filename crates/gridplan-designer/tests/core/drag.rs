use gridplan_designer::{
    DragState, DragTransaction, GridPoint, GridRect, GridSize, Layout, ObjectId, PlacedObject,
    StepOutcome,
};

fn block(x: i32, y: i32, w: i32, h: i32) -> PlacedObject {
    PlacedObject::new("Block", GridPoint::new(x, y), GridSize::new(w, h).unwrap())
}

fn position(layout: &Layout, id: ObjectId) -> GridPoint {
    layout.get(id).unwrap().position
}

#[test]
fn test_drag_state_transitions() {
    assert!(DragState::PendingRect.is_pending());
    assert_eq!(DragState::PendingRect.activated(), DragState::ActiveRect);
    assert_eq!(
        DragState::PendingSingleDrag(ObjectId(1)).activated(),
        DragState::ActiveGroupDrag
    );
    assert_eq!(DragState::PendingGroupDrag.activated(), DragState::ActiveGroupDrag);
    assert_eq!(DragState::PendingPanAll.activated(), DragState::ActivePanAll);
    assert!(DragState::ActivePanAll.is_active());
    assert!(!DragState::Idle.is_pending() && !DragState::Idle.is_active());
}

#[test]
fn test_zero_step_is_unchanged() {
    let mut layout = Layout::new();
    let ids = layout.place(&[block(0, 0, 1, 1)], false);
    let mut drag = DragTransaction::begin(&layout, ids);
    assert_eq!(drag.try_step(&mut layout, 0, 0).unwrap(), StepOutcome::Unchanged);
    assert!(!drag.commit(&mut layout).unwrap());
    assert_eq!(layout.history().undo_depth(), 1);
}

#[test]
fn test_steps_accumulate_into_one_move_operation() {
    let mut layout = Layout::new();
    let ids = layout.place(&[block(0, 0, 2, 2)], false);
    let mut drag = DragTransaction::begin(&layout, ids.clone());

    for _ in 0..5 {
        assert_eq!(drag.try_step(&mut layout, 1, 0).unwrap(), StepOutcome::Moved);
    }
    assert_eq!(drag.offset(), (5, 0));
    assert_eq!(drag.collision_rect(&layout), Some(GridRect::new(5, 0, 2, 2)));
    // The index still holds the rectangle captured at begin.
    assert_eq!(
        layout.scene().index().indexed_rect(ids[0]),
        Some(GridRect::new(0, 0, 2, 2))
    );

    assert!(drag.commit(&mut layout).unwrap());
    assert_eq!(
        layout.scene().index().indexed_rect(ids[0]),
        Some(GridRect::new(5, 0, 2, 2))
    );
    assert_eq!(layout.history().undo_depth(), 2);

    layout.undo().unwrap();
    assert_eq!(position(&layout, ids[0]), GridPoint::new(0, 0));
}

#[test]
fn test_rejected_step_keeps_earlier_progress() {
    let mut layout = Layout::new();
    let ids = layout.place(&[block(0, 0, 1, 1), block(3, 0, 1, 1)], false);
    let mut drag = DragTransaction::begin(&layout, [ids[0]]);

    assert_eq!(drag.try_step(&mut layout, 1, 0).unwrap(), StepOutcome::Moved);
    assert_eq!(drag.try_step(&mut layout, 1, 0).unwrap(), StepOutcome::Moved);
    assert_eq!(drag.try_step(&mut layout, 1, 0).unwrap(), StepOutcome::Rejected);
    assert_eq!(position(&layout, ids[0]), GridPoint::new(2, 0));
}

#[test]
fn test_rollback_restores_start() {
    let mut layout = Layout::new();
    let ids = layout.place(&[block(0, 0, 1, 1), block(1, 0, 1, 1)], false);
    let mut drag = DragTransaction::begin(&layout, ids.clone());
    drag.try_step(&mut layout, 0, 4).unwrap();
    drag.try_step(&mut layout, 2, 0).unwrap();
    drag.rollback(&mut layout).unwrap();

    assert_eq!(position(&layout, ids[0]), GridPoint::new(0, 0));
    assert_eq!(position(&layout, ids[1]), GridPoint::new(1, 0));
    assert_eq!(layout.history().undo_depth(), 1);
    assert_eq!(
        layout.query_intersecting(&GridRect::new(0, 0, 1, 1)).len(),
        2
    );
}

#[test]
fn test_ignored_members_move_without_checks() {
    let mut layout = Layout::new();
    let ids = layout.place(&[block(0, 0, 1, 1).ignored(), block(1, 0, 1, 1)], false);
    let mut drag = DragTransaction::begin(&layout, [ids[0]]);
    assert_eq!(drag.try_step(&mut layout, 1, 0).unwrap(), StepOutcome::Moved);
    assert_eq!(drag.collision_rect(&layout), None);
}

#[test]
fn test_unknown_ids_are_dropped() {
    let layout = Layout::new();
    let drag = DragTransaction::begin(&layout, [ObjectId(99)]);
    assert!(drag.is_empty());
}

#[test]
fn test_atomic_move_rolls_back_every_member() {
    // Selections of size 1, 2 and "all objects" against a fixed wall.
    let mut layout = Layout::new();
    let wall = layout.place(&[block(10, 0, 1, 10)], false)[0];
    let members = layout.place(&[block(8, 0, 2, 2), block(0, 4, 2, 2), block(4, 8, 2, 2)], false);

    let all: Vec<ObjectId> = layout.objects().map(|o| o.id).collect();
    let selections: Vec<Vec<ObjectId>> = vec![
        vec![members[0]],
        vec![members[0], members[1]],
        all.into_iter().filter(|id| *id != wall).collect(),
    ];

    for selection in selections {
        let before: Vec<GridPoint> = selection.iter().map(|id| position(&layout, *id)).collect();
        let depth = layout.history().undo_depth();

        let mut drag = DragTransaction::begin(&layout, selection.clone());
        assert_eq!(drag.try_step(&mut layout, 1, 0).unwrap(), StepOutcome::Rejected);
        drag.commit(&mut layout).unwrap();

        let after: Vec<GridPoint> = selection.iter().map(|id| position(&layout, *id)).collect();
        assert_eq!(before, after);
        assert_eq!(layout.history().undo_depth(), depth);
    }
}
