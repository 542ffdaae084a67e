use std::collections::BTreeSet;

use gridplan_designer::influence::{
    circle_of, compute, expanded_rect_polygon, objects_in_radius, propagate, reach_area,
    trace_boundary, GridSnapshot,
};
use gridplan_designer::{
    GridPoint, GridRect, GridSize, Layout, ObjectId, PlacedObject, Point, TraversalMode,
};
use gridplan_settings::InfluenceSettings;

fn building(x: i32, y: i32, w: i32, h: i32) -> PlacedObject {
    PlacedObject::new("Building", GridPoint::new(x, y), GridSize::new(w, h).unwrap())
}

fn manhattan_from_rect(rect: &GridRect, p: GridPoint) -> i32 {
    let dx = (rect.x - p.x).max(p.x - (rect.right() - 1)).max(0);
    let dy = (rect.y - p.y).max(p.y - (rect.bottom() - 1)).max(0);
    dx + dy
}

#[test]
fn test_open_field_reach_is_bounded() {
    let mut layout = Layout::new();
    let id = layout.place(&[building(0, 0, 2, 2).with_influence_range(3.7)], false)[0];
    let source = layout.get(id).unwrap().clone();

    let area = reach_area(&source);
    let snapshot = GridSnapshot::build(area, layout.objects());
    let reach = propagate(&snapshot, &source, TraversalMode::RoadsAndEmpty);

    let footprint = source.footprint();
    assert!(reach.cells.iter().all(|c| manhattan_from_rect(&footprint, *c) <= 3));
    assert!(reach.cells.contains(&GridPoint::new(-3, 0)));
    assert!(reach.cells.contains(&GridPoint::new(4, 1)));
    assert!(!reach.cells.contains(&GridPoint::new(-4, 0)));
    assert!(reach.influenced.is_empty());
}

#[test]
fn test_walled_source_reaches_only_itself() {
    let mut layout = Layout::new();
    let id = layout.place(&[building(0, 0, 1, 1).with_influence_range(5.0)], false)[0];
    let walls = layout.place(
        &[
            building(-1, -1, 3, 1),
            building(-1, 1, 3, 1),
            building(-1, 0, 1, 1),
            building(1, 0, 1, 1),
        ],
        false,
    );
    assert_eq!(walls.len(), 4);

    let source = layout.get(id).unwrap().clone();
    let snapshot = GridSnapshot::build(reach_area(&source), layout.objects());
    let reach = propagate(&snapshot, &source, TraversalMode::RoadsAndEmpty);

    assert_eq!(reach.cells, BTreeSet::from([GridPoint::new(0, 0)]));
    let mut expected = walls.clone();
    expected.sort();
    assert_eq!(reach.influenced, expected);
}

#[test]
fn test_roads_carry_influence_past_buildings() {
    let mut layout = Layout::new();
    let source = building(0, 0, 1, 1).with_influence_range(5.0);
    let id = layout.place(&[source], false)[0];
    let roads: Vec<PlacedObject> = (1..=4).map(|x| PlacedObject::road(GridPoint::new(x, 0))).collect();
    layout.place(&roads, false);
    let target = layout.place(&[building(5, 0, 1, 1)], false)[0];
    let far = layout.place(&[building(6, 0, 1, 1)], false)[0];

    let source = layout.get(id).unwrap().clone();
    let snapshot = GridSnapshot::build(reach_area(&source), layout.objects());
    let reach = propagate(&snapshot, &source, TraversalMode::RoadsOnly);

    // Four road steps reach (4,0); the fifth touches the building at (5,0).
    assert!(reach.cells.contains(&GridPoint::new(4, 0)));
    assert!(!reach.cells.contains(&GridPoint::new(0, 1)));
    assert!(reach.influenced.contains(&target));
    assert!(!reach.influenced.contains(&far));
}

#[test]
fn test_small_range_contributes_nothing() {
    let layout = Layout::new();
    let source = building(0, 0, 1, 1).with_influence_range(0.5);
    let snapshot = GridSnapshot::build(GridRect::new(-2, -2, 5, 5), layout.objects());
    assert!(snapshot.is_empty());
    assert!(propagate(&snapshot, &source, TraversalMode::RoadsAndEmpty)
        .cells
        .is_empty());
}

#[test]
fn test_trace_boundary_of_reach_is_closed_loop() {
    let cells: BTreeSet<GridPoint> = [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]
        .into_iter()
        .map(|(x, y)| GridPoint::new(x, y))
        .collect();
    let outline = trace_boundary(&cells);
    assert_eq!(outline.len(), 12);
    assert_eq!(outline[0], GridPoint::new(1, 0));
    for pair in outline.windows(2) {
        assert!(pair[0].x == pair[1].x || pair[0].y == pair[1].y);
    }
}

#[test]
fn test_compute_preserves_source_order_and_highlights_once() {
    let mut layout = Layout::new();
    let a = layout.place(&[building(0, 0, 1, 1).with_influence_range(2.0)], false)[0];
    let b = layout.place(&[building(2, 0, 1, 1).with_influence_range(2.0)], false)[0];
    let plain = layout.place(&[building(10, 10, 1, 1)], false)[0];

    let mut highlighted = Vec::new();
    let results = compute(
        &layout,
        &[b, plain, a],
        &InfluenceSettings::default(),
        |id| highlighted.push(id),
    );

    let sources: Vec<ObjectId> = results.iter().map(|r| r.source).collect();
    assert_eq!(sources, vec![b, a]);
    assert_eq!(highlighted, vec![a, b]);
    assert!(results.iter().all(|r| r.polygon.len() >= 4));
}

#[test]
fn test_compute_far_apart_sources() {
    const FAR: i32 = 200_000;
    let mut layout = Layout::new();
    let a = layout.place(&[building(0, 0, 2, 2).with_influence_range(2.0)], false)[0];
    let b = layout.place(&[building(FAR, FAR, 2, 2).with_influence_range(2.0)], false)[0];

    let results = compute(&layout, &[a, b], &InfluenceSettings::default(), |_| {});
    assert_eq!(results.len(), 2);

    // Each source's outline is the same shape, shifted by the distance.
    let shifted: Vec<Point> = results[0]
        .polygon
        .iter()
        .map(|p| Point::new(p.x + f64::from(FAR), p.y + f64::from(FAR)))
        .collect();
    assert!(!shifted.is_empty());
    assert_eq!(results[1].polygon, shifted);
}

#[test]
fn test_compute_fallback_uses_expanded_rect() {
    let mut layout = Layout::new();
    let a = layout.place(&[building(0, 0, 2, 2).with_influence_range(1.5)], false)[0];
    let settings = InfluenceSettings {
        true_influence_enabled: false,
        ..InfluenceSettings::default()
    };

    let results = compute(&layout, &[a], &settings, |_| {});
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].polygon,
        expanded_rect_polygon(layout.get(a).unwrap())
    );
    assert_eq!(results[0].polygon[0], Point::new(-1.5, -1.5));
    assert_eq!(results[0].polygon[2], Point::new(3.5, 3.5));
}

#[test]
fn test_compute_on_empty_layout() {
    let layout = Layout::new();
    assert!(compute(&layout, &[], &InfluenceSettings::default(), |_| {}).is_empty());
}

#[test]
fn test_circular_influence() {
    let mut layout = Layout::new();
    let ids = layout.place(
        &[
            building(0, 0, 2, 2).with_radius(4.0),
            building(4, 0, 2, 2),
            building(8, 0, 2, 2),
        ],
        false,
    );
    let source = layout.get(ids[0]).unwrap();

    let (center, radius) = circle_of(source).unwrap();
    assert_eq!(center, Point::new(1.0, 1.0));
    assert_eq!(radius, 4.0);
    assert_eq!(objects_in_radius(&layout, source), vec![ids[1]]);
    assert!(circle_of(layout.get(ids[1]).unwrap()).is_none());
}
