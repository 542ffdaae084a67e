//! The layout document: placed objects and their undo history.

use gridplan_core::{GridPoint, GridRect};

use crate::error::{DesignerError, DesignerResult};
use crate::history::{Operation, UndoLog};
use crate::model::{ObjectId, PlacedObject};
use crate::scene::Scene;

/// A layout document.
///
/// Owns the indexed scene and the undo log that journals every committed
/// change to it. Placement lives in [`crate::placement`], interactive moves
/// in [`crate::drag`].
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub(crate) scene: Scene,
    pub(crate) history: UndoLog,
}

impl Layout {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            history: UndoLog::new(),
        }
    }

    /// Creates an empty layout whose undo log keeps `depth` steps.
    pub fn with_undo_depth(depth: usize) -> Self {
        Self {
            scene: Scene::new(),
            history: UndoLog::with_depth(depth),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &UndoLog {
        &self.history
    }

    /// Every placed object in draw order, for serialization.
    pub fn objects(&self) -> impl DoubleEndedIterator<Item = &PlacedObject> + '_ {
        self.scene.objects()
    }

    pub fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.scene.get(id)
    }

    pub fn len(&self) -> usize {
        self.scene.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scene.is_empty()
    }

    /// Objects whose rectangle intersects `rect` (edges inclusive), for
    /// visible-object culling.
    pub fn query_intersecting(&self, rect: &GridRect) -> Vec<&PlacedObject> {
        self.scene.objects_in(rect)
    }

    /// Topmost object covering `cell`.
    pub fn object_at(&self, cell: GridPoint) -> Option<&PlacedObject> {
        self.scene.object_at(cell)
    }

    /// Bulk insert used by deserialization. Not recorded in the undo log.
    ///
    /// Objects keep their ids; a default id is replaced by a fresh one.
    pub fn add_range<I>(&mut self, objects: I) -> DesignerResult<()>
    where
        I: IntoIterator<Item = PlacedObject>,
    {
        for mut object in objects {
            if object.id == ObjectId::default() {
                object.id = self.scene.generate_id();
            }
            self.scene.insert(object)?;
        }
        Ok(())
    }

    /// Replaces the whole document and starts a fresh history.
    pub fn load<I>(&mut self, objects: I) -> DesignerResult<()>
    where
        I: IntoIterator<Item = PlacedObject>,
    {
        self.scene.clear();
        let result = self.add_range(objects);
        self.history.clear();
        tracing::debug!("Loaded layout with {} objects", self.scene.len());
        result
    }

    /// Removes everything and drops the history (new document).
    pub fn clear(&mut self) {
        self.scene.clear();
        self.history.clear();
    }

    /// Removes the given objects as one undo step. Unknown ids are skipped.
    ///
    /// Returns the removed objects.
    pub fn remove_objects(&mut self, ids: &[ObjectId]) -> Vec<PlacedObject> {
        let removed: Vec<PlacedObject> = ids.iter().filter_map(|&id| self.scene.remove(id)).collect();
        if !removed.is_empty() {
            self.history.register(Operation::Remove {
                objects: removed.clone(),
            });
        }
        removed
    }

    /// Rotates one object a quarter turn in place if the rotated footprint
    /// fits. Returns false when it would collide.
    pub fn rotate_object(&mut self, id: ObjectId) -> DesignerResult<bool> {
        let original = self
            .scene
            .get(id)
            .cloned()
            .ok_or(DesignerError::ObjectNotFound(id))?;
        let mut rotated = original.clone();
        rotated.rotate();

        let rect = rotated.collision_rect();
        let blocked = self
            .scene
            .objects_in(&rect)
            .into_iter()
            .filter(|n| n.id != id)
            .any(|n| crate::collision::intersects(&rotated, n));
        if blocked {
            return Ok(false);
        }

        self.scene.remove(id);
        self.scene.insert(rotated.clone())?;
        self.history.as_single_undoable_operation(|log| {
            log.register(Operation::Remove {
                objects: vec![original],
            });
            log.register(Operation::Add {
                objects: vec![rotated],
            });
        });
        Ok(true)
    }

    /// Records an operation that has already been applied to the scene.
    pub fn register(&mut self, operation: Operation) {
        if operation.is_empty() {
            return;
        }
        self.history.register(operation);
    }

    /// Runs `action` and collapses every operation it registers into one
    /// undo step.
    pub fn as_single_undoable_operation<R>(&mut self, action: impl FnOnce(&mut Self) -> R) -> R {
        self.history.begin_group();
        let result = action(self);
        self.history.end_group(None);
        result
    }

    pub fn undo(&mut self) -> DesignerResult<bool> {
        self.history.undo(&mut self.scene)
    }

    pub fn redo(&mut self) -> DesignerResult<bool> {
        self.history.redo(&mut self.scene)
    }

    pub fn is_dirty(&self) -> bool {
        self.history.is_dirty()
    }

    /// Called by the save pathway once the document is written.
    pub fn mark_saved(&mut self) {
        self.history.mark_saved();
    }
}
