use gridplan_designer::{GridPoint, GridRect, IndexError, SpatialIndex};

fn sorted(mut v: Vec<u32>) -> Vec<u32> {
    v.sort_unstable();
    v
}

#[test]
fn test_spatial_index_creation() {
    let index: SpatialIndex<u32> = SpatialIndex::default();
    assert!(index.is_empty());
    assert_eq!(index.stats().total_items, 0);
    assert_eq!(index.stats().total_nodes, 1);
}

#[test]
fn test_query_is_edge_inclusive() {
    let mut index = SpatialIndex::default();
    index.insert(1u32, GridRect::new(0, 0, 2, 2)).unwrap();

    assert_eq!(index.query_intersecting(&GridRect::new(2, 0, 2, 2)), vec![1]);
    assert_eq!(index.query_intersecting(&GridRect::new(2, 2, 1, 1)), vec![1]);
    assert!(index.query_intersecting(&GridRect::new(3, 0, 2, 2)).is_empty());
}

#[test]
fn test_insert_rejects_duplicates_and_empty_rects() {
    let mut index = SpatialIndex::default();
    index.insert(1u32, GridRect::new(0, 0, 1, 1)).unwrap();

    assert_eq!(
        index.insert(1, GridRect::new(5, 5, 1, 1)),
        Err(IndexError::AlreadyIndexed(GridRect::new(0, 0, 1, 1)))
    );
    assert_eq!(
        index.insert(2, GridRect::new(0, 0, 0, 3)),
        Err(IndexError::InvalidRect(GridRect::new(0, 0, 0, 3)))
    );
    assert_eq!(index.len(), 1);
}

#[test]
fn test_remove_unknown_item() {
    let mut index: SpatialIndex<u32> = SpatialIndex::default();
    assert!(!index.remove(7));
}

#[test]
fn test_reindex_moves_item() {
    let mut index = SpatialIndex::default();
    index.insert(1u32, GridRect::new(0, 0, 2, 2)).unwrap();
    index
        .reindex(1, GridRect::new(0, 0, 2, 2), GridRect::new(10, 10, 2, 2))
        .unwrap();

    assert!(index.query_intersecting(&GridRect::new(0, 0, 1, 1)).is_empty());
    assert_eq!(index.query_point(GridPoint::new(11, 11)), vec![1]);
    assert_eq!(index.indexed_rect(1), Some(GridRect::new(10, 10, 2, 2)));
}

#[test]
fn test_reindex_detects_stale_and_unknown() {
    let mut index = SpatialIndex::default();
    index.insert(1u32, GridRect::new(0, 0, 2, 2)).unwrap();

    let err = index
        .reindex(1, GridRect::new(1, 0, 2, 2), GridRect::new(3, 0, 2, 2))
        .unwrap_err();
    assert!(matches!(err, IndexError::StaleRect { .. }));
    assert_eq!(index.indexed_rect(1), Some(GridRect::new(0, 0, 2, 2)));

    assert_eq!(
        index.reindex(2, GridRect::new(0, 0, 1, 1), GridRect::new(1, 1, 1, 1)),
        Err(IndexError::NotIndexed)
    );
}

#[test]
fn test_many_items_split_and_query() {
    let mut index = SpatialIndex::new(GridRect::new(0, 0, 128, 128), 8, 4);
    for i in 0..100u32 {
        let x = (i % 10) as i32 * 10;
        let y = (i / 10) as i32 * 10;
        index.insert(i, GridRect::new(x, y, 3, 3)).unwrap();
    }

    assert_eq!(index.len(), 100);
    assert!(index.stats().total_nodes > 1);
    assert!(index.quadrant_bounds().len() > 1);

    let hits = sorted(index.query_intersecting(&GridRect::new(0, 0, 12, 2)));
    assert_eq!(hits, vec![0, 1]);
    assert_eq!(index.entries().len(), 100);
}

#[test]
fn test_query_order_is_stable() {
    let mut index = SpatialIndex::new(GridRect::new(0, 0, 64, 64), 6, 2);
    for i in 0..20u32 {
        index.insert(i, GridRect::new(i as i32 * 3, i as i32 % 5, 2, 2)).unwrap();
    }
    let area = GridRect::new(0, 0, 64, 64);
    assert_eq!(index.query_intersecting(&area), index.query_intersecting(&area));
}

#[test]
fn test_negative_coordinates_grow_root() {
    let mut index = SpatialIndex::new(GridRect::new(0, 0, 16, 16), 6, 4);
    index.insert(1u32, GridRect::new(-100, -100, 1, 1)).unwrap();
    index.insert(2u32, GridRect::new(5, 5, 1, 1)).unwrap();

    assert_eq!(index.query_point(GridPoint::new(-100, -100)), vec![1]);
    assert_eq!(index.query_point(GridPoint::new(5, 5)), vec![2]);
}

#[test]
fn test_clear() {
    let mut index = SpatialIndex::default();
    index.insert(1u32, GridRect::new(0, 0, 1, 1)).unwrap();
    index.clear();
    assert!(index.is_empty());
    assert!(index.query_intersecting(&GridRect::new(0, 0, 1, 1)).is_empty());
}
