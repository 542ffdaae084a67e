//! Editing commands on the session: placement, deletion, selection, history.
//!
//! Commands that change the document cancel any gesture in progress first,
//! so they never run against objects sitting at unindexed drag positions.

use super::DesignerState;
use crate::drag::DragState;
use crate::error::DesignerResult;
use crate::influence::{self, InfluenceResult};
use crate::model::{ObjectId, PlacedObject};
use crate::selection::{expand_to_identifiers, SelectionMode};
use crate::stamp::Stamp;
use crate::statistics::LayoutStatistics;

impl DesignerState {
    /// Places a stamp and returns the ids of the objects that fit.
    pub fn place_stamp(&mut self, stamp: &Stamp, force: bool) -> DesignerResult<Vec<ObjectId>> {
        self.end_gesture()?;
        Ok(self.layout.place(stamp.objects(), force))
    }

    /// Removes every selected object as one undo step.
    ///
    /// Returns the number of objects removed.
    pub fn delete_selected(&mut self) -> DesignerResult<usize> {
        self.end_gesture()?;
        let ids = self.selection.ids();
        let removed = self.layout.remove_objects(&ids);
        self.selection.clear();
        Ok(removed.len())
    }

    /// Rotates one object a quarter turn if the rotated footprint fits.
    pub fn rotate_object(&mut self, id: ObjectId) -> DesignerResult<bool> {
        self.end_gesture()?;
        self.layout.rotate_object(id)
    }

    /// Replaces the selection with every object sharing `id`'s identifier.
    pub fn select_all_with_identifier(&mut self, id: ObjectId) -> bool {
        let same = expand_to_identifiers(&self.layout, &[id]);
        self.selection.apply(SelectionMode::Replace, same)
    }

    pub fn select_all(&mut self) -> bool {
        let all: Vec<ObjectId> = self.layout.objects().map(|obj| obj.id).collect();
        self.selection.apply(SelectionMode::Replace, all)
    }

    pub fn clear_selection(&mut self) -> bool {
        self.selection.clear()
    }

    /// Copies of the selected objects, ready to be placed again as a stamp.
    pub fn copy_selection(&self) -> Stamp {
        Stamp::new(self.selection.objects(&self.layout).cloned().collect())
    }

    pub fn undo(&mut self) -> DesignerResult<bool> {
        self.end_gesture()?;
        let changed = self.layout.undo()?;
        self.selection.retain_existing(&self.layout);
        Ok(changed)
    }

    pub fn redo(&mut self) -> DesignerResult<bool> {
        self.end_gesture()?;
        let changed = self.layout.redo()?;
        self.selection.retain_existing(&self.layout);
        Ok(changed)
    }

    /// Replaces the document with `objects` and resets the session.
    pub fn load<I>(&mut self, objects: I) -> DesignerResult<()>
    where
        I: IntoIterator<Item = PlacedObject>,
    {
        self.gesture = Default::default();
        self.selection.clear();
        self.layout.load(objects)
    }

    /// Starts an empty document.
    pub fn new_document(&mut self) {
        self.gesture = Default::default();
        self.selection.clear();
        self.layout.clear();
        self.viewport.reset();
    }

    /// Objects at least partially inside the viewport.
    pub fn visible_objects(&self) -> Vec<&PlacedObject> {
        self.layout.query_intersecting(&self.viewport.visible_rect())
    }

    /// Rolls back the gesture in progress, if any.
    fn end_gesture(&mut self) -> DesignerResult<()> {
        if self.drag_state() != DragState::Idle {
            self.cancel_gesture()?;
        }
        Ok(())
    }

    pub fn statistics(&self) -> LayoutStatistics {
        LayoutStatistics::compute(self.layout.objects())
    }

    pub fn selection_statistics(&self) -> LayoutStatistics {
        LayoutStatistics::compute(self.selection.objects(&self.layout))
    }

    /// True influence of the selected objects, using the session's settings.
    pub fn selection_influence<F>(&self, highlight: F) -> Vec<InfluenceResult>
    where
        F: FnMut(ObjectId),
    {
        influence::compute(
            &self.layout,
            &self.selection.ids(),
            &self.settings.influence,
            highlight,
        )
    }
}
