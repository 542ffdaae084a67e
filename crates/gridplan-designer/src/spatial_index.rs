//! Quadtree spatial index over grid rectangles.
//!
//! Items are keyed by the rectangle they were last indexed with. The index
//! does not observe the items themselves: after an item's rectangle changes,
//! callers must call [`SpatialIndex::reindex`] with the rectangle it had
//! before the change. The index keeps its own record of every item's
//! rectangle so a stale or missing re-index is reported instead of silently
//! producing duplicate or missed hits.

use std::collections::HashMap;
use std::hash::Hash;

use gridplan_core::constants::{QUADTREE_MAX_DEPTH, QUADTREE_MAX_ITEMS, QUADTREE_ROOT_HALF_EXTENT};
use gridplan_core::{GridPoint, GridRect};
use smallvec::SmallVec;

use crate::error::IndexError;

/// Growth stops once the root reaches this extent; anything still outside
/// is kept at the root level.
const MAX_ROOT_EXTENT: i32 = 1 << 30;

type NodeItems<T> = SmallVec<[(T, GridRect); QUADTREE_MAX_ITEMS]>;

/// Statistics about the index structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub total_nodes: usize,
    pub total_items: usize,
    pub max_depth: usize,
}

#[derive(Debug, Clone)]
struct QuadtreeNode<T> {
    bounds: GridRect,
    depth: usize,
    items: NodeItems<T>,
    children: Option<Box<[QuadtreeNode<T>; 4]>>,
}

impl<T: Copy + Eq> QuadtreeNode<T> {
    fn new(bounds: GridRect, depth: usize) -> Self {
        Self {
            bounds,
            depth,
            items: SmallVec::new(),
            children: None,
        }
    }

    fn insert(&mut self, item: T, rect: GridRect, max_depth: usize, max_items: usize) {
        if let Some(children) = &mut self.children {
            if let Some(child) = children.iter_mut().find(|c| c.bounds.contains_rect(&rect)) {
                child.insert(item, rect, max_depth, max_items);
            } else {
                // Straddles a split line: stays at this level.
                self.items.push((item, rect));
            }
            return;
        }

        self.items.push((item, rect));

        if self.items.len() > max_items
            && self.depth < max_depth
            && self.bounds.width >= 2
            && self.bounds.height >= 2
        {
            self.subdivide(max_depth, max_items);
        }
    }

    fn subdivide(&mut self, max_depth: usize, max_items: usize) {
        let GridRect {
            x,
            y,
            width,
            height,
        } = self.bounds;
        let hw = width / 2;
        let hh = height / 2;
        let depth = self.depth + 1;

        self.children = Some(Box::new([
            QuadtreeNode::new(GridRect::new(x, y, hw, hh), depth),
            QuadtreeNode::new(GridRect::new(x + hw, y, width - hw, hh), depth),
            QuadtreeNode::new(GridRect::new(x, y + hh, hw, height - hh), depth),
            QuadtreeNode::new(GridRect::new(x + hw, y + hh, width - hw, height - hh), depth),
        ]));

        let items = std::mem::take(&mut self.items);
        for (item, rect) in items {
            self.insert(item, rect, max_depth, max_items);
        }
    }

    /// Removes `item`, following the path its rectangle was inserted along.
    fn remove(&mut self, item: T, rect: &GridRect, max_items: usize) -> bool {
        if let Some(pos) = self.items.iter().position(|(i, _)| *i == item) {
            self.items.remove(pos);
            return true;
        }

        let removed = match &mut self.children {
            Some(children) => children
                .iter_mut()
                .find(|c| c.bounds.contains_rect(rect))
                .is_some_and(|child| child.remove(item, rect, max_items)),
            None => false,
        };

        if removed {
            self.try_collapse(max_items);
        }
        removed
    }

    /// Pulls items back up when the children no longer justify a split.
    fn try_collapse(&mut self, max_items: usize) {
        let Some(children) = &self.children else {
            return;
        };
        if children.iter().any(|c| c.children.is_some()) {
            return;
        }
        let child_items: usize = children.iter().map(|c| c.items.len()).sum();
        if child_items + self.items.len() > max_items {
            return;
        }
        if let Some(children) = self.children.take() {
            let children: [QuadtreeNode<T>; 4] = *children;
            for child in children {
                self.items.extend(child.items);
            }
        }
    }

    fn query(&self, rect: &GridRect, out: &mut Vec<T>) {
        out.extend(
            self.items
                .iter()
                .filter(|(_, r)| r.intersects_inclusive(rect))
                .map(|(item, _)| *item),
        );

        if let Some(children) = &self.children {
            for child in children.iter() {
                if child.bounds.intersects_inclusive(rect) {
                    child.query(rect, out);
                }
            }
        }
    }

    fn collect_entries(&self, out: &mut Vec<(T, GridRect)>) {
        out.extend(self.items.iter().copied());
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_entries(out);
            }
        }
    }

    fn collect_bounds(&self, out: &mut Vec<GridRect>) {
        out.push(self.bounds);
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_bounds(out);
            }
        }
    }

    fn stats(&self, stats: &mut IndexStats) {
        stats.total_nodes += 1;
        stats.total_items += self.items.len();
        stats.max_depth = stats.max_depth.max(self.depth);
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.stats(stats);
            }
        }
    }
}

/// Hierarchical bounding-rectangle index (quadtree).
///
/// Inclusive-edge queries, `O(log n)` amortized insert/remove/reindex, and an
/// unbounded grid: inserting outside the root grows the root.
#[derive(Debug, Clone)]
pub struct SpatialIndex<T> {
    root: QuadtreeNode<T>,
    locations: HashMap<T, GridRect>,
    max_depth: usize,
    max_items: usize,
}

impl<T: Copy + Eq + Hash> SpatialIndex<T> {
    /// Creates an index whose root covers `bounds`.
    pub fn new(bounds: GridRect, max_depth: usize, max_items: usize) -> Self {
        Self {
            root: QuadtreeNode::new(bounds, 0),
            locations: HashMap::new(),
            max_depth,
            max_items: max_items.max(1),
        }
    }

    /// Indexes `item` at `rect`.
    pub fn insert(&mut self, item: T, rect: GridRect) -> Result<(), IndexError> {
        if rect.is_empty() {
            return Err(IndexError::InvalidRect(rect));
        }
        if let Some(existing) = self.locations.get(&item) {
            return Err(IndexError::AlreadyIndexed(*existing));
        }

        self.ensure_covers(&rect);
        self.root.insert(item, rect, self.max_depth, self.max_items);
        self.locations.insert(item, rect);
        Ok(())
    }

    /// Removes `item`; returns `false` when it was not indexed.
    pub fn remove(&mut self, item: T) -> bool {
        let Some(rect) = self.locations.remove(&item) else {
            return false;
        };
        let removed = self.root.remove(item, &rect, self.max_items);
        debug_assert!(removed, "index location table out of sync with tree");
        removed
    }

    /// Moves `item` from `previous` (the rectangle it was indexed with) to `current`.
    pub fn reindex(
        &mut self,
        item: T,
        previous: GridRect,
        current: GridRect,
    ) -> Result<(), IndexError> {
        let indexed = *self.locations.get(&item).ok_or(IndexError::NotIndexed)?;
        if indexed != previous {
            return Err(IndexError::StaleRect {
                indexed,
                supplied: previous,
            });
        }
        if current.is_empty() {
            return Err(IndexError::InvalidRect(current));
        }
        if indexed == current {
            return Ok(());
        }

        self.remove(item);
        self.insert(item, current)
    }

    /// All items whose indexed rectangle intersects `rect`, edges inclusive.
    ///
    /// The order is stable across reads with no writes in between.
    pub fn query_intersecting(&self, rect: &GridRect) -> Vec<T> {
        let mut out = Vec::new();
        self.root.query(rect, &mut out);
        out
    }

    /// All items whose rectangle covers `cell`.
    pub fn query_point(&self, cell: GridPoint) -> Vec<T> {
        let cell_rect = GridRect::new(cell.x, cell.y, 1, 1);
        let mut out = self.query_intersecting(&cell_rect);
        out.retain(|item| {
            self.locations
                .get(item)
                .is_some_and(|r| r.contains_cell(cell))
        });
        out
    }

    /// The rectangle `item` is currently indexed with.
    pub fn indexed_rect(&self, item: T) -> Option<GridRect> {
        self.locations.get(&item).copied()
    }

    pub fn contains(&self, item: T) -> bool {
        self.locations.contains_key(&item)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Removes every item, keeping the current root bounds.
    pub fn clear(&mut self) {
        self.root = QuadtreeNode::new(self.root.bounds, 0);
        self.locations.clear();
    }

    /// Every `(item, rect)` pair in tree order.
    pub fn entries(&self) -> Vec<(T, GridRect)> {
        let mut out = Vec::with_capacity(self.len());
        self.root.collect_entries(&mut out);
        out
    }

    /// Partition rectangles of every node, for diagnostic overlays only.
    pub fn quadrant_bounds(&self) -> Vec<GridRect> {
        let mut out = Vec::new();
        self.root.collect_bounds(&mut out);
        out
    }

    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats::default();
        self.root.stats(&mut stats);
        stats
    }

    /// Grows the root until `rect` fits, then rebuilds the tree.
    fn ensure_covers(&mut self, rect: &GridRect) {
        if self.root.bounds.contains_rect(rect) {
            return;
        }

        let mut bounds = self.root.bounds;
        while !bounds.contains_rect(rect) && bounds.width < MAX_ROOT_EXTENT {
            let grow_x = bounds.width.max(1);
            let grow_y = bounds.height.max(1);
            bounds = GridRect::new(
                bounds.x - grow_x / 2 - grow_x % 2,
                bounds.y - grow_y / 2 - grow_y % 2,
                bounds.width + grow_x,
                bounds.height + grow_y,
            );
        }

        tracing::debug!(
            "Growing spatial index root from {} to {} for {}",
            self.root.bounds,
            bounds,
            rect
        );

        let entries = self.entries();
        self.root = QuadtreeNode::new(bounds, 0);
        for (item, r) in entries {
            self.root.insert(item, r, self.max_depth, self.max_items);
        }
    }
}

impl<T: Copy + Eq + Hash> Default for SpatialIndex<T> {
    fn default() -> Self {
        let h = QUADTREE_ROOT_HALF_EXTENT;
        Self::new(
            GridRect::new(-h, -h, 2 * h, 2 * h),
            QUADTREE_MAX_DEPTH,
            QUADTREE_MAX_ITEMS,
        )
    }
}
