//! Collision rules between placed objects.
//!
//! Two objects collide when their collision rectangles share a positive area.
//! Touching edges is legal, and objects flagged `ignored_from_collision` never
//! collide with anything. Nothing here queries the spatial index; callers pass
//! the neighbor set they fetched themselves.

use gridplan_core::GridRect;

use crate::model::PlacedObject;

/// Returns true if `a` and `b` overlap with positive area.
pub fn intersects(a: &PlacedObject, b: &PlacedObject) -> bool {
    if a.ignored_from_collision || b.ignored_from_collision {
        return false;
    }
    a.collision_rect().overlaps(&b.collision_rect())
}

/// Same rule as [`intersects`], for a speculative rectangle that has not been
/// written back to an object yet.
pub fn intersects_rect(rect: &GridRect, neighbor: &PlacedObject) -> bool {
    !neighbor.ignored_from_collision && rect.overlaps(&neighbor.collision_rect())
}

/// Returns true on the first neighbor that collides with `candidate`.
pub fn any_intersects<'a, I>(candidate: &PlacedObject, neighbors: I) -> bool
where
    I: IntoIterator<Item = &'a PlacedObject>,
{
    if candidate.ignored_from_collision {
        return false;
    }
    neighbors.into_iter().any(|n| intersects(candidate, n))
}

/// Splits `batch` into indices that collide with a neighbor and indices that
/// do not.
///
/// Batch members are only tested against `neighbors`, never against each
/// other: a stamp is allowed to contain touching or stacked pieces.
pub fn partition(batch: &[PlacedObject], neighbors: &[&PlacedObject]) -> (Vec<usize>, Vec<usize>) {
    let mut colliding = Vec::new();
    let mut free = Vec::new();
    for (i, candidate) in batch.iter().enumerate() {
        if any_intersects(candidate, neighbors.iter().copied()) {
            colliding.push(i);
        } else {
            free.push(i);
        }
    }
    (colliding, free)
}
