//! Placement batches ("stamps") built from copied or preset objects.

use gridplan_core::{GridPoint, GridRect};

use crate::model::PlacedObject;

/// A group of objects placed together, positioned relative to each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stamp {
    objects: Vec<PlacedObject>,
}

impl Stamp {
    pub fn new(objects: Vec<PlacedObject>) -> Self {
        Self { objects }
    }

    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn into_objects(self) -> Vec<PlacedObject> {
        self.objects
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Bounding rectangle of every member's footprint.
    pub fn bounds(&self) -> Option<GridRect> {
        GridRect::union_all(self.objects.iter().map(PlacedObject::footprint))
    }

    /// Moves the stamp so its bounding rectangle starts at `origin`.
    pub fn translated_to(mut self, origin: GridPoint) -> Self {
        if let Some(bounds) = self.bounds() {
            let (dx, dy) = (origin.x - bounds.x, origin.y - bounds.y);
            for obj in &mut self.objects {
                obj.position = obj.position.offset(dx, dy);
            }
        }
        self
    }

    /// Turns the whole stamp a quarter turn clockwise inside its bounding
    /// rectangle, keeping the top-left corner fixed.
    pub fn rotated(mut self) -> Self {
        let Some(bounds) = self.bounds() else {
            return self;
        };
        for obj in &mut self.objects {
            let rx = obj.position.x - bounds.x;
            let ry = obj.position.y - bounds.y;
            let new_x = bounds.height - ry - obj.size.height;
            obj.rotate();
            obj.position = GridPoint::new(bounds.x + new_x, bounds.y + rx);
        }
        self
    }
}

impl From<Vec<PlacedObject>> for Stamp {
    fn from(objects: Vec<PlacedObject>) -> Self {
        Self::new(objects)
    }
}
