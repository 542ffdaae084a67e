//! The indexed object set: an [`ObjectStore`] and a [`SpatialIndex`] kept in step.

use gridplan_core::{GridPoint, GridRect};

use crate::error::{DesignerError, DesignerResult};
use crate::model::{ObjectId, PlacedObject};
use crate::spatial_index::SpatialIndex;
use crate::store::ObjectStore;

/// Placed objects plus the spatial index over their footprints.
///
/// Every mutation that goes through `Scene` keeps the index consistent,
/// except the explicitly unindexed position setter used by drag
/// transactions, which must be followed by [`Scene::reindex`].
#[derive(Debug, Clone, Default)]
pub struct Scene {
    store: ObjectStore,
    index: SpatialIndex<ObjectId>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            store: ObjectStore::new(),
            index: SpatialIndex::default(),
        }
    }

    pub fn generate_id(&mut self) -> ObjectId {
        self.store.generate_id()
    }

    /// Inserts an object under its own id and indexes its footprint.
    pub fn insert(&mut self, object: PlacedObject) -> DesignerResult<()> {
        object.validate()?;
        let id = object.id;
        self.index
            .insert(id, object.footprint())
            .map_err(|e| DesignerError::index(id, e))?;
        self.store.insert(object);
        Ok(())
    }

    /// Removes an object from the store and the index.
    pub fn remove(&mut self, id: ObjectId) -> Option<PlacedObject> {
        let object = self.store.remove(id)?;
        if !self.index.remove(id) {
            tracing::warn!("Object {} was stored but not indexed", id);
        }
        Some(object)
    }

    pub fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.store.get(id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.store.contains(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.index.clear();
    }

    /// Objects in draw order.
    pub fn objects(&self) -> impl DoubleEndedIterator<Item = &PlacedObject> + '_ {
        self.store.iter()
    }

    pub fn index(&self) -> &SpatialIndex<ObjectId> {
        &self.index
    }

    /// Ids whose indexed rectangle intersects `rect`, edges inclusive.
    pub fn query_intersecting(&self, rect: &GridRect) -> Vec<ObjectId> {
        self.index.query_intersecting(rect)
    }

    /// Objects whose indexed rectangle intersects `rect`, edges inclusive.
    pub fn objects_in(&self, rect: &GridRect) -> Vec<&PlacedObject> {
        self.index
            .query_intersecting(rect)
            .into_iter()
            .filter_map(|id| self.store.get(id))
            .collect()
    }

    /// Topmost object covering `cell`, in reverse draw order.
    pub fn object_at(&self, cell: GridPoint) -> Option<&PlacedObject> {
        let hits = self.index.query_point(cell);
        self.store
            .draw_order()
            .iter()
            .rev()
            .find(|id| hits.contains(id))
            .and_then(|id| self.store.get(*id))
    }

    /// Moves an object and re-indexes it in one step.
    ///
    /// The index is updated first; when it refuses (the object's position
    /// no longer matches its indexed rectangle) the object is left alone.
    pub fn move_to(&mut self, id: ObjectId, position: GridPoint) -> DesignerResult<()> {
        let previous = self.footprint(id)?;
        let current = GridRect::from_parts(position, previous.size());
        self.index
            .reindex(id, previous, current)
            .map_err(|e| DesignerError::index(id, e))?;
        self.set_position_unindexed(id, position)
    }

    /// Changes an object's position without touching the index.
    ///
    /// The caller owns the pending re-index and must eventually call
    /// [`Scene::reindex`] with the footprint the object had before.
    pub fn set_position_unindexed(&mut self, id: ObjectId, position: GridPoint) -> DesignerResult<()> {
        let object = self
            .store
            .get_mut(id)
            .ok_or(DesignerError::ObjectNotFound(id))?;
        object.position = position;
        Ok(())
    }

    /// Re-indexes an object at its current footprint.
    pub fn reindex(&mut self, id: ObjectId, previous: GridRect) -> DesignerResult<()> {
        let current = self.footprint(id)?;
        self.index
            .reindex(id, previous, current)
            .map_err(|e| DesignerError::index(id, e))
    }

    pub fn footprint(&self, id: ObjectId) -> DesignerResult<GridRect> {
        self.store
            .get(id)
            .map(PlacedObject::footprint)
            .ok_or(DesignerError::ObjectNotFound(id))
    }
}
