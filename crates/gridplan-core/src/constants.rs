//! Shared constants for the grid model and interaction layer.

/// Default on-screen size of one grid cell, in pixels.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Smallest allowed cell size when zooming out, in pixels.
pub const MIN_GRID_SIZE: f64 = 8.0;

/// Largest allowed cell size when zooming in, in pixels.
pub const MAX_GRID_SIZE: f64 = 100.0;

/// Pointer travel, in grid cells, that a press must exceed to become a drag.
///
/// Fixed: up to this distance a press-and-release is a click.
pub const DRAG_THRESHOLD_CELLS: f64 = 1.0;

/// Items a quadtree node holds before it splits.
pub const QUADTREE_MAX_ITEMS: usize = 8;

/// Maximum quadtree depth.
pub const QUADTREE_MAX_DEPTH: usize = 16;

/// Half extent of the default quadtree root, in cells.
pub const QUADTREE_ROOT_HALF_EXTENT: i32 = 1 << 12;

/// Minimum radius for an object to project a circular influence.
pub const MIN_CIRCULAR_RADIUS: f64 = 0.5;

/// Influence range above which an object projects a connectivity-limited influence.
pub const MIN_TRUE_INFLUENCE_RANGE: f64 = 0.5;
