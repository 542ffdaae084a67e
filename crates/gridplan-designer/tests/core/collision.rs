use gridplan_designer::collision::{any_intersects, intersects, intersects_rect, partition};
use gridplan_designer::{GridPoint, GridRect, GridSize, PlacedObject};

fn block(x: i32, y: i32, w: i32, h: i32) -> PlacedObject {
    PlacedObject::new("Block", GridPoint::new(x, y), GridSize::new(w, h).unwrap())
}

#[test]
fn test_adjacent_and_overlapping_objects() {
    let a = block(0, 0, 2, 2);
    let b = block(2, 0, 2, 2);
    let c = block(1, 0, 2, 2);

    assert!(!intersects(&a, &b));
    assert!(intersects(&a, &c));
    assert!(intersects(&b, &c));
}

#[test]
fn test_any_intersects_short_circuits_on_first_hit() {
    let candidate = block(0, 0, 3, 3);
    let neighbors = [block(5, 5, 1, 1), block(2, 2, 1, 1), block(-1, -1, 2, 2)];
    assert!(any_intersects(&candidate, &neighbors));
    assert!(!any_intersects(&candidate, &neighbors[..1]));
    assert!(!any_intersects(&candidate, &[]));
}

#[test]
fn test_ignored_candidate_never_collides() {
    let candidate = block(0, 0, 3, 3).ignored();
    assert!(!any_intersects(&candidate, &[block(1, 1, 1, 1)]));
}

#[test]
fn test_intersects_rect() {
    let neighbor = block(4, 4, 2, 2);
    assert!(intersects_rect(&GridRect::new(5, 5, 1, 1), &neighbor));
    assert!(!intersects_rect(&GridRect::new(6, 4, 1, 1), &neighbor));
}

#[test]
fn test_partition_with_no_neighbors() {
    let batch = vec![block(0, 0, 1, 1), block(0, 0, 1, 1)];
    let (colliding, free) = partition(&batch, &[]);
    assert!(colliding.is_empty());
    assert_eq!(free, vec![0, 1]);
}
