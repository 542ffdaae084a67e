//! Batch placement of new objects.

use gridplan_core::GridRect;

use crate::collision;
use crate::history::Operation;
use crate::layout::Layout;
use crate::model::{ObjectId, PlacedObject};

impl Layout {
    /// Places a batch of objects ("stamp") and returns the ids actually placed.
    ///
    /// Members are checked against objects already in the layout, never
    /// against each other. Without `force` only the non-colliding members are
    /// placed; with `force` the whole batch is. Each placed member is a clone
    /// with a fresh id. A non-empty placement registers one `Add` operation
    /// covering exactly the placed objects. Nothing fitting is a no-op, not an
    /// error.
    ///
    /// # Arguments
    /// * `batch` - Objects to place; their ids are ignored
    /// * `force` - Place colliding members too
    pub fn place(&mut self, batch: &[PlacedObject], force: bool) -> Vec<ObjectId> {
        let valid: Vec<PlacedObject> = batch
            .iter()
            .filter(|obj| match obj.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Skipping invalid object '{}': {}", obj.identifier, e);
                    false
                }
            })
            .cloned()
            .collect();

        let Some(area) = GridRect::union_all(valid.iter().map(PlacedObject::collision_rect)) else {
            return Vec::new();
        };

        let selected: Vec<usize> = if force {
            (0..valid.len()).collect()
        } else {
            let neighbors = self.scene.objects_in(&area);
            let (colliding, free) = collision::partition(&valid, &neighbors);
            if !colliding.is_empty() {
                tracing::debug!(
                    "{} of {} objects collide and were not placed",
                    colliding.len(),
                    valid.len()
                );
            }
            free
        };

        let mut placed = Vec::with_capacity(selected.len());
        for i in selected {
            let mut object = valid[i].clone();
            object.id = self.scene.generate_id();
            match self.scene.insert(object.clone()) {
                Ok(()) => placed.push(object),
                Err(e) => tracing::warn!("Failed to place object: {}", e),
            }
        }

        let ids: Vec<ObjectId> = placed.iter().map(|o| o.id).collect();
        if !placed.is_empty() {
            tracing::debug!("Placed {} objects", placed.len());
            self.history.register(Operation::Add { objects: placed });
        }
        ids
    }

    /// Returns true if `object` could be placed without a collision.
    pub fn can_place(&self, object: &PlacedObject) -> bool {
        let neighbors = self.scene.objects_in(&object.collision_rect());
        !collision::any_intersects(object, neighbors)
    }
}
