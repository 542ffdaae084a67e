//! Viewport and coordinate transformation between screen pixels and the grid.
//!
//! Screen space has (0,0) at the top-left of the canvas with +Y down, and so
//! does grid space, so no axis flip is involved: one grid cell spans
//! `grid_size` pixels and `offset` is the grid coordinate shown at the
//! canvas' top-left corner.

use std::fmt;

use gridplan_core::constants::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE};
use gridplan_core::{Bounds, GridPoint, GridRect, Point};
use gridplan_settings::GridSettings;

/// Represents the viewport transformation state (grid size and scroll offset).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    grid_size: f64,
    min_grid_size: f64,
    max_grid_size: f64,
    offset_x: f64,
    offset_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Creates a viewport at the default grid size showing the origin at the
    /// top-left corner.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            min_grid_size: MIN_GRID_SIZE,
            max_grid_size: MAX_GRID_SIZE,
            offset_x: 0.0,
            offset_y: 0.0,
            canvas_width,
            canvas_height,
        }
    }

    /// Creates a viewport using the configured zoom limits.
    pub fn with_grid_settings(canvas_width: f64, canvas_height: f64, grid: &GridSettings) -> Self {
        Self {
            grid_size: grid.default_size.clamp(grid.min_size, grid.max_size),
            min_grid_size: grid.min_size,
            max_grid_size: grid.max_size,
            ..Self::new(canvas_width, canvas_height)
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Pixels per grid cell.
    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Sets the grid size, clamped to the configured limits.
    pub fn set_grid_size(&mut self, size: f64) {
        if size.is_finite() {
            self.grid_size = size.clamp(self.min_grid_size, self.max_grid_size);
        }
    }

    /// Changes the zoom limits and re-clamps the current grid size.
    pub fn set_grid_limits(&mut self, min_size: f64, max_size: f64) {
        if !(min_size > 0.0 && max_size >= min_size) {
            return;
        }
        self.min_grid_size = min_size;
        self.max_grid_size = max_size;
        self.set_grid_size(self.grid_size);
    }

    /// Grid coordinate shown at the canvas' top-left corner.
    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    pub fn set_offset(&mut self, x: f64, y: f64) {
        self.offset_x = x;
        self.offset_y = y;
    }

    /// Converts a screen position to continuous grid coordinates.
    pub fn screen_to_grid(&self, screen: Point) -> Point {
        Point::new(
            screen.x / self.grid_size + self.offset_x,
            screen.y / self.grid_size + self.offset_y,
        )
    }

    /// The cell under a screen position.
    pub fn screen_to_cell(&self, screen: Point) -> GridPoint {
        let p = self.screen_to_grid(screen);
        GridPoint::new(p.x.floor() as i32, p.y.floor() as i32)
    }

    /// Converts continuous grid coordinates to a screen position.
    pub fn grid_to_screen(&self, grid: Point) -> Point {
        Point::new(
            (grid.x - self.offset_x) * self.grid_size,
            (grid.y - self.offset_y) * self.grid_size,
        )
    }

    /// Converts a screen-space distance to grid units.
    pub fn screen_delta_to_grid(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.grid_size, dy / self.grid_size)
    }

    /// The visible area in continuous grid coordinates.
    pub fn visible_bounds(&self) -> Bounds {
        Bounds::from_corners(
            self.screen_to_grid(Point::new(0.0, 0.0)),
            self.screen_to_grid(Point::new(self.canvas_width, self.canvas_height)),
        )
    }

    /// The cells that are at least partially visible, for culling.
    pub fn visible_rect(&self) -> GridRect {
        self.visible_bounds().covering_rect()
    }

    /// Scales the grid size by `factor`.
    ///
    /// With an `anchor` (screen position) the grid point under the anchor
    /// stays put; otherwise the canvas centre does. Returns true if the grid
    /// size changed.
    pub fn zoom_by(&mut self, factor: f64, anchor: Option<Point>) -> bool {
        if !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        let anchor = anchor.unwrap_or(Point::new(self.canvas_width / 2.0, self.canvas_height / 2.0));
        let fixed = self.screen_to_grid(anchor);
        let old = self.grid_size;
        self.set_grid_size(old * factor);
        if (self.grid_size - old).abs() < f64::EPSILON {
            return false;
        }
        self.offset_x = fixed.x - anchor.x / self.grid_size;
        self.offset_y = fixed.y - anchor.y / self.grid_size;
        true
    }

    /// Pans by a pointer movement in screen pixels.
    ///
    /// The content follows the pointer; `invert` makes it move the other way.
    pub fn pan_by_screen(&mut self, dx: f64, dy: f64, invert: bool) {
        let sign = if invert { 1.0 } else { -1.0 };
        self.offset_x += sign * dx / self.grid_size;
        self.offset_y += sign * dy / self.grid_size;
    }

    /// Scrolls by a number of grid cells.
    pub fn scroll(&mut self, dx_cells: f64, dy_cells: f64) {
        self.offset_x += dx_cells;
        self.offset_y += dy_cells;
    }

    /// Fits the given cell rectangle into the viewport.
    ///
    /// # Arguments
    /// * `rect` - Area to show
    /// * `padding` - Fraction of the viewport reserved as margin on each side (0.0 - 0.5)
    pub fn fit_to_rect(&mut self, rect: &GridRect, padding: f64) {
        if rect.is_empty() || self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return;
        }
        let padding_factor = 1.0 - padding.clamp(0.0, 0.45) * 2.0;
        let size_x = self.canvas_width * padding_factor / f64::from(rect.width);
        let size_y = self.canvas_height * padding_factor / f64::from(rect.height);
        self.set_grid_size(size_x.min(size_y));

        let (cx, cy) = rect.to_bounds().center();
        self.offset_x = cx - self.canvas_width / 2.0 / self.grid_size;
        self.offset_y = cy - self.canvas_height / 2.0 / self.grid_size;
    }

    /// Resets the viewport to the default grid size at the origin.
    pub fn reset(&mut self) {
        self.set_grid_size(DEFAULT_GRID_SIZE);
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Grid: {:.1}px | Offset: ({:.1}, {:.1})",
            self.grid_size, self.offset_x, self.offset_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
