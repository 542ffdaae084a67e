//! Placed objects.

use std::fmt;

use gridplan_core::constants::{MIN_CIRCULAR_RADIUS, MIN_TRUE_INFLUENCE_RANGE};
use gridplan_core::{Direction, GeometryError, GridPoint, GridRect, GridSize, Point};
use serde::{Deserialize, Serialize};

/// Stable identity of a placed object within a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rectangular building object on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub id: ObjectId,
    /// Preset identifier shared by every instance of the same building type.
    pub identifier: String,
    pub label: String,
    /// Top-left cell of the footprint.
    pub position: GridPoint,
    pub size: GridSize,
    pub direction: Direction,
    /// Circular influence radius; active from 0.5.
    pub radius: f64,
    /// Connectivity-limited influence range; active above 0.5.
    pub influence_range: f64,
    pub is_road: bool,
    pub is_borderless: bool,
    pub ignored_from_collision: bool,
    /// Secondary area relative to `position`, e.g. harbor frontage.
    pub blocked_area: Option<GridRect>,
}

impl PlacedObject {
    /// Creates a plain building with no influence.
    ///
    /// The id is a placeholder until the object is inserted into a layout.
    pub fn new(identifier: impl Into<String>, position: GridPoint, size: GridSize) -> Self {
        Self {
            id: ObjectId::default(),
            identifier: identifier.into(),
            label: String::new(),
            position,
            size,
            direction: Direction::Up,
            radius: 0.0,
            influence_range: 0.0,
            is_road: false,
            is_borderless: false,
            ignored_from_collision: false,
            blocked_area: None,
        }
    }

    /// Creates a 1x1 road tile.
    pub fn road(position: GridPoint) -> Self {
        Self {
            is_road: true,
            is_borderless: true,
            ..Self::new("Road", position, GridSize { width: 1, height: 1 })
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_influence_range(mut self, range: f64) -> Self {
        self.influence_range = range;
        self
    }

    pub fn with_blocked_area(mut self, area: GridRect) -> Self {
        self.blocked_area = Some(area);
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignored_from_collision = true;
        self
    }

    /// The cells the object occupies.
    pub fn footprint(&self) -> GridRect {
        GridRect::from_parts(self.position, self.size)
    }

    /// The rectangle used for overlap tests.
    ///
    /// Identical to the footprint: edge contact never counts as a collision,
    /// so no inset border is needed on an integer grid.
    pub fn collision_rect(&self) -> GridRect {
        self.footprint()
    }

    /// Blocked area in absolute grid coordinates.
    pub fn absolute_blocked_area(&self) -> Option<GridRect> {
        self.blocked_area
            .map(|a| a.translated(self.position.x, self.position.y))
    }

    /// Continuous centre of the footprint.
    pub fn center(&self) -> Point {
        Point::new(
            f64::from(self.position.x) + f64::from(self.size.width) / 2.0,
            f64::from(self.position.y) + f64::from(self.size.height) / 2.0,
        )
    }

    pub fn has_circular_influence(&self) -> bool {
        self.radius >= MIN_CIRCULAR_RADIUS
    }

    pub fn has_true_influence(&self) -> bool {
        self.influence_range > MIN_TRUE_INFLUENCE_RANGE
    }

    /// Rotates the object a quarter turn clockwise in place.
    ///
    /// The top-left position is kept; width and height swap and the blocked
    /// area turns with the footprint.
    pub fn rotate(&mut self) {
        let old_height = self.size.height;
        self.size = self.size.rotated();
        self.direction = self.direction.rotated_clockwise();
        if let Some(area) = self.blocked_area {
            // (x, y) -> (h - y - ah, x) for a clockwise turn inside the old footprint.
            self.blocked_area = Some(GridRect::new(
                old_height - area.y - area.height,
                area.x,
                area.height,
                area.width,
            ));
        }
    }

    /// Checks the object invariants.
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.size.validate()?;
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(GeometryError::InvalidValue {
                name: "radius",
                value: self.radius,
            });
        }
        if !(self.influence_range.is_finite() && self.influence_range >= 0.0) {
            return Err(GeometryError::InvalidValue {
                name: "influence_range",
                value: self.influence_range,
            });
        }
        Ok(())
    }
}
