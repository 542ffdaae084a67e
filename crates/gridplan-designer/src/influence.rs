//! Building influence.
//!
//! True influence spreads breadth-first from a source's footprint over a
//! rasterized snapshot of the layout, following road connectivity, and its
//! reachable cells are traced into an outline polygon for the renderer.
//! When true influence is disabled a fixed expanded rectangle stands in for
//! the flood fill. Circular influence (the `radius` field) is a plain
//! Euclidean distance check between centres.

use std::collections::{BTreeSet, HashSet, VecDeque};

use gridplan_core::{Bounds, GridPoint, GridRect, Point};
use gridplan_settings::{InfluenceSettings, TraversalMode};
use rayon::prelude::*;

use crate::layout::Layout;
use crate::model::{ObjectId, PlacedObject};

/// Upper bound on flood-fill depth, in cells.
pub const MAX_INFLUENCE_STEPS: i32 = 512;

/// Contents of one snapshot cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Road(ObjectId),
    Building(ObjectId),
}

/// Dense raster of a layout area.
///
/// Buildings win over roads where both cover a cell. Non-road objects that
/// are ignored from collision leave their cells empty.
#[derive(Debug, Clone)]
pub struct GridSnapshot {
    area: GridRect,
    cells: Vec<Cell>,
}

impl GridSnapshot {
    pub fn build<'a, I>(area: GridRect, objects: I) -> Self
    where
        I: IntoIterator<Item = &'a PlacedObject>,
    {
        let len = if area.is_empty() {
            0
        } else {
            area.width as usize * area.height as usize
        };
        let mut snapshot = Self {
            area,
            cells: vec![Cell::Empty; len],
        };

        for obj in objects {
            if obj.ignored_from_collision && !obj.is_road {
                continue;
            }
            let value = if obj.is_road {
                Cell::Road(obj.id)
            } else {
                Cell::Building(obj.id)
            };
            for cell in obj.footprint().cells() {
                if let Some(i) = snapshot.index_of(cell) {
                    match (snapshot.cells[i], value) {
                        (Cell::Building(_), Cell::Road(_)) => {}
                        _ => snapshot.cells[i] = value,
                    }
                }
            }
        }
        snapshot
    }

    pub fn area(&self) -> GridRect {
        self.area
    }

    /// The cell at `point`, `None` outside the snapshot.
    pub fn get(&self, point: GridPoint) -> Option<Cell> {
        self.index_of(point).map(|i| self.cells[i])
    }

    /// True when no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::Empty)
    }

    fn index_of(&self, point: GridPoint) -> Option<usize> {
        if !self.area.contains_cell(point) {
            return None;
        }
        let col = (point.x - self.area.x) as usize;
        let row = (point.y - self.area.y) as usize;
        Some(row * self.area.width as usize + col)
    }
}

/// Cells and objects reached by a flood fill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reach {
    pub cells: BTreeSet<GridPoint>,
    /// Objects with at least one reached or touched cell, source excluded.
    pub influenced: Vec<ObjectId>,
}

fn flood_depth(range: f64) -> i32 {
    (range.floor() as i32).clamp(0, MAX_INFLUENCE_STEPS)
}

/// Area a snapshot must cover for `source`'s flood fill.
pub fn reach_area(source: &PlacedObject) -> GridRect {
    source.footprint().inflate(flood_depth(source.influence_range) + 1)
}

/// Flood-fills from `source`'s footprint up to `floor(influence_range)`
/// steps with 4-neighbour adjacency.
///
/// A building next to a reached cell is reported as influenced but is never
/// crossed. Sources without true influence reach nothing.
pub fn propagate(snapshot: &GridSnapshot, source: &PlacedObject, traversal: TraversalMode) -> Reach {
    if !source.has_true_influence() {
        return Reach::default();
    }
    let depth = flood_depth(source.influence_range);

    let mut cells = BTreeSet::new();
    let mut influenced = BTreeSet::new();
    let mut visited: HashSet<GridPoint> = HashSet::new();
    let mut queue = VecDeque::new();

    for cell in source.footprint().cells() {
        visited.insert(cell);
        cells.insert(cell);
        queue.push_back((cell, 0));
    }

    while let Some((cell, dist)) = queue.pop_front() {
        if dist >= depth {
            continue;
        }
        for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
            let next = cell.offset(dx, dy);
            if !visited.insert(next) {
                continue;
            }
            let passable = match snapshot.get(next) {
                None => false,
                Some(Cell::Empty) => traversal == TraversalMode::RoadsAndEmpty,
                Some(Cell::Road(id)) => {
                    influenced.insert(id);
                    true
                }
                Some(Cell::Building(id)) if id == source.id => true,
                Some(Cell::Building(id)) => {
                    influenced.insert(id);
                    false
                }
            };
            if passable {
                cells.insert(next);
                queue.push_back((next, dist + 1));
            }
        }
    }

    influenced.remove(&source.id);
    Reach {
        cells,
        influenced: influenced.into_iter().collect(),
    }
}

/// Traces the outer boundary of a cell set.
///
/// Returns the corner points of a closed polygon, clockwise on screen (the
/// set's interior on the right of each edge), starting at the top-left
/// corner of the top-most, then left-most cell. Collinear points are
/// dropped. Cells touching only at a corner are treated as separate, so the
/// walk stays on the start cell's 4-connected component.
pub fn trace_boundary(cells: &BTreeSet<GridPoint>) -> Vec<GridPoint> {
    let Some(first) = cells.iter().min_by_key(|c| (c.y, c.x)) else {
        return Vec::new();
    };

    let mut edges: HashSet<(GridPoint, (i32, i32))> = HashSet::new();
    for c in cells {
        if !cells.contains(&c.offset(0, -1)) {
            edges.insert((*c, (1, 0)));
        }
        if !cells.contains(&c.offset(1, 0)) {
            edges.insert((c.offset(1, 0), (0, 1)));
        }
        if !cells.contains(&c.offset(0, 1)) {
            edges.insert((c.offset(1, 1), (-1, 0)));
        }
        if !cells.contains(&c.offset(-1, 0)) {
            edges.insert((c.offset(0, 1), (0, -1)));
        }
    }

    let start = *first;
    let mut dir = (1, 0);
    edges.remove(&(start, dir));
    let mut points = vec![start];
    let mut pos = start.offset(dir.0, dir.1);

    while pos != start {
        let right = (-dir.1, dir.0);
        let left = (dir.1, -dir.0);
        let Some(next) = [right, dir, left]
            .into_iter()
            .find(|d| edges.remove(&(pos, *d)))
        else {
            tracing::warn!("Boundary walk stopped at {}", pos);
            break;
        };
        if next != dir {
            points.push(pos);
            dir = next;
        }
        pos = pos.offset(dir.0, dir.1);
    }
    points
}

/// Footprint grown by `influence_range` on every side, as four corners
/// (clockwise from top-left).
pub fn expanded_rect_polygon(obj: &PlacedObject) -> Vec<Point> {
    let b = obj.footprint().to_bounds();
    let r = obj.influence_range;
    vec![
        Point::new(b.min_x - r, b.min_y - r),
        Point::new(b.max_x + r, b.min_y - r),
        Point::new(b.max_x + r, b.max_y + r),
        Point::new(b.min_x - r, b.max_y + r),
    ]
}

/// Influence outline of one source.
#[derive(Debug, Clone, PartialEq)]
pub struct InfluenceResult {
    pub source: ObjectId,
    pub polygon: Vec<Point>,
    pub influenced: Vec<ObjectId>,
}

/// Computes the true influence of every source with `influence_range > 0.5`.
///
/// Sources are processed in parallel, each over a snapshot of its own reach
/// area, so far-apart sources cost no more than near ones. Results keep the
/// order of `sources`. After merging, `highlight` is called once per
/// influenced object, in source order.
pub fn compute<F>(
    layout: &Layout,
    sources: &[ObjectId],
    settings: &InfluenceSettings,
    mut highlight: F,
) -> Vec<InfluenceResult>
where
    F: FnMut(ObjectId),
{
    let active: Vec<&PlacedObject> = sources
        .iter()
        .filter_map(|id| layout.get(*id))
        .filter(|obj| obj.has_true_influence())
        .collect();
    if active.is_empty() {
        return Vec::new();
    }

    let results: Vec<InfluenceResult> = if settings.true_influence_enabled {
        tracing::debug!("Computing influence for {} sources", active.len());
        active
            .par_iter()
            .map(|obj| {
                let area = reach_area(obj);
                let snapshot = GridSnapshot::build(area, layout.query_intersecting(&area));
                let reach = propagate(&snapshot, obj, settings.traversal);
                InfluenceResult {
                    source: obj.id,
                    polygon: trace_boundary(&reach.cells)
                        .into_iter()
                        .map(GridPoint::to_point)
                        .collect(),
                    influenced: reach.influenced,
                }
            })
            .collect()
    } else {
        active
            .iter()
            .map(|obj| InfluenceResult {
                source: obj.id,
                polygon: expanded_rect_polygon(obj),
                influenced: fallback_influenced(layout, obj),
            })
            .collect()
    };

    let mut reported = HashSet::new();
    for result in &results {
        for id in &result.influenced {
            if reported.insert(*id) {
                highlight(*id);
            }
        }
    }
    results
}

fn fallback_influenced(layout: &Layout, obj: &PlacedObject) -> Vec<ObjectId> {
    let r = obj.influence_range;
    let b = obj.footprint().to_bounds();
    let bounds = Bounds::new(b.min_x - r, b.min_y - r, b.max_x + r, b.max_y + r);
    let mut ids: Vec<ObjectId> = layout
        .query_intersecting(&bounds.covering_rect())
        .into_iter()
        .filter(|other| other.id != obj.id && bounds.overlaps_rect(&other.footprint()))
        .map(|other| other.id)
        .collect();
    ids.sort();
    ids
}

/// Centre and radius of an object's circular influence, if it has one.
pub fn circle_of(obj: &PlacedObject) -> Option<(Point, f64)> {
    obj.has_circular_influence().then(|| (obj.center(), obj.radius))
}

/// Objects whose centre lies within `source`'s circular radius.
pub fn objects_in_radius(layout: &Layout, source: &PlacedObject) -> Vec<ObjectId> {
    let Some((center, radius)) = circle_of(source) else {
        return Vec::new();
    };
    let search = Bounds::new(
        center.x - radius,
        center.y - radius,
        center.x + radius,
        center.y + radius,
    )
    .covering_rect();
    layout
        .query_intersecting(&search)
        .into_iter()
        .filter(|other| other.id != source.id && other.center().distance_to(&center) <= radius)
        .map(|other| other.id)
        .collect()
}
