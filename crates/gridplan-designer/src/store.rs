//! Object storage with id allocation and draw order.

use std::collections::HashMap;

use crate::model::{ObjectId, PlacedObject};

/// Owns the placed objects of a layout, keyed by id, in draw order.
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    objects: HashMap<ObjectId, PlacedObject>,
    draw_order: Vec<ObjectId>,
    next_id: u64,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            draw_order: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocates a fresh id.
    pub fn generate_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        id
    }

    /// Inserts (or replaces) an object under its own id.
    ///
    /// Keeps the id allocator ahead of any restored id.
    pub fn insert(&mut self, object: PlacedObject) {
        let id = object.id;
        if self.objects.insert(id, object).is_none() {
            self.draw_order.push(id);
        }
        self.next_id = self.next_id.max(id.0 + 1);
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<PlacedObject> {
        let object = self.objects.remove(&id)?;
        self.draw_order.retain(|&other| other != id);
        Some(object)
    }

    pub fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut PlacedObject> {
        self.objects.get_mut(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.draw_order.clear();
    }

    /// Ids in draw order (first placed first).
    pub fn draw_order(&self) -> &[ObjectId] {
        &self.draw_order
    }

    /// Objects in draw order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PlacedObject> + '_ {
        self.draw_order.iter().filter_map(|id| self.objects.get(id))
    }
}
