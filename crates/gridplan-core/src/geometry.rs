//! Grid geometry value types.
//!
//! The layout lives on an infinite integer grid. Footprints are half-open cell
//! rectangles `[x, x + width) × [y, y + height)` with the y axis pointing down,
//! matching screen orientation. Continuous coordinates (`Point`, `Bounds`) are
//! used for pointer positions, rubber bands and influence outlines.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GeometryError;

/// Integer grid coordinate (top-left corner of a cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(dx, dy)` cells.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Positive width × height in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl GridSize {
    /// Creates a size, rejecting zero or negative extents.
    pub fn new(width: i32, height: i32) -> Result<Self, GeometryError> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    /// Checks the positive-extent invariant.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GeometryError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Size after a quarter turn.
    pub const fn rotated(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Half-open rectangle of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl GridRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_parts(origin: GridPoint, size: GridSize) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Builds the rectangle spanning two corners (exclusive right/bottom).
    pub fn from_corners(a: GridPoint, b: GridPoint) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, a.x.max(b.x) - x, a.y.max(b.y) - y)
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn origin(&self) -> GridPoint {
        GridPoint::new(self.x, self.y)
    }

    pub const fn size(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            i64::from(self.width) * i64::from(self.height)
        }
    }

    /// True when the rectangle covers no cell.
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Checks that the rectangle covers at least one cell.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.is_empty() {
            return Err(GeometryError::InvalidRect {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grows the rectangle by `amount` cells on every side.
    pub const fn inflate(&self, amount: i32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + 2 * amount,
            self.height + 2 * amount,
        )
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &GridRect) -> GridRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        GridRect::new(x, y, right - x, bottom - y)
    }

    /// Union of every rectangle in `rects`, `None` for an empty input.
    pub fn union_all<I>(rects: I) -> Option<GridRect>
    where
        I: IntoIterator<Item = GridRect>,
    {
        rects.into_iter().reduce(|acc, r| acc.union(&r))
    }

    /// Closed-interval intersection: rectangles sharing only an edge or a
    /// corner still intersect. Used for index queries.
    pub const fn intersects_inclusive(&self, other: &GridRect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// Positive-area overlap: edge contact does not count. Used for collisions.
    pub const fn overlaps(&self, other: &GridRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub const fn contains_rect(&self, other: &GridRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub const fn contains_cell(&self, cell: GridPoint) -> bool {
        cell.x >= self.x && cell.x < self.right() && cell.y >= self.y && cell.y < self.bottom()
    }

    /// Iterates the cells covered by the rectangle in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridPoint> + '_ {
        let (x0, x1) = (self.x, self.right());
        (self.y..self.bottom()).flat_map(move |y| (x0..x1).map(move |x| GridPoint::new(x, y)))
    }

    pub fn to_bounds(&self) -> Bounds {
        Bounds::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }
}

impl fmt::Display for GridRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}; {}x{}]",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Continuous 2D coordinate (screen pixels or fractional grid units).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned continuous rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Builds bounds from two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Positive-area overlap with a cell rectangle.
    pub fn overlaps_rect(&self, rect: &GridRect) -> bool {
        let r = rect.to_bounds();
        self.min_x < r.max_x && r.min_x < self.max_x && self.min_y < r.max_y && r.min_y < self.max_y
    }

    /// Smallest cell rectangle covering these bounds.
    pub fn covering_rect(&self) -> GridRect {
        let x = self.min_x.floor() as i32;
        let y = self.min_y.floor() as i32;
        let right = self.max_x.ceil() as i32;
        let bottom = self.max_y.ceil() as i32;
        GridRect::new(x, y, right - x, bottom - y)
    }
}

/// Cardinal facing of a placed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// The next direction after a clockwise quarter turn.
    pub const fn rotated_clockwise(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "Up"),
            Self::Right => write!(f, "Right"),
            Self::Down => write!(f, "Down"),
            Self::Left => write!(f, "Left"),
        }
    }
}
