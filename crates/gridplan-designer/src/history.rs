//! Undo/redo journal of reversible layout operations.
//!
//! Operations describe a mutation that has already happened. `register`
//! records them without replaying; `undo` reverts the newest entry against
//! the scene and `redo` re-applies it.

use gridplan_core::{GridPoint, GridRect};

use crate::error::{DesignerError, DesignerResult};
use crate::model::{ObjectId, PlacedObject};
use crate::scene::Scene;

/// Default number of undo steps kept before the oldest is dropped.
pub const DEFAULT_UNDO_DEPTH: usize = 1000;

/// One object's rectangle before and after a move.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMove {
    pub id: ObjectId,
    pub old_rect: GridRect,
    pub new_rect: GridRect,
}

/// A committed, reversible layout mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Objects were added. Holds full copies so redo restores the same ids.
    Add { objects: Vec<PlacedObject> },
    /// Objects were removed.
    Remove { objects: Vec<PlacedObject> },
    /// Objects were moved; one entry per object.
    Move { moves: Vec<ObjectMove> },
    /// Several operations undone and redone as one step.
    Composite {
        operations: Vec<Operation>,
        name: Option<String>,
    },
}

impl Operation {
    /// Display name for undo/redo menus.
    pub fn name(&self) -> &str {
        match self {
            Operation::Add { .. } => "Add Objects",
            Operation::Remove { .. } => "Remove Objects",
            Operation::Move { .. } => "Move Objects",
            Operation::Composite { name: Some(name), .. } => name.as_str(),
            Operation::Composite { name: None, .. } => "Multiple Changes",
        }
    }

    /// Returns true if replaying this operation would change nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Operation::Add { objects } | Operation::Remove { objects } => objects.is_empty(),
            Operation::Move { moves } => moves.is_empty(),
            Operation::Composite { operations, .. } => operations.iter().all(Operation::is_empty),
        }
    }

    /// Re-applies the operation (redo).
    ///
    /// All or nothing: if one step fails, the steps already applied are
    /// undone before the error is returned.
    pub fn apply(&self, scene: &mut Scene) -> DesignerResult<()> {
        let mut steps = Vec::new();
        self.collect_steps(true, &mut steps);
        run_steps(scene, steps)
    }

    /// Reverts the operation (undo). All or nothing, like [`Operation::apply`].
    pub fn revert(&self, scene: &mut Scene) -> DesignerResult<()> {
        let mut steps = Vec::new();
        self.collect_steps(false, &mut steps);
        run_steps(scene, steps)
    }

    /// Flattens the operation into scene steps, in replay order.
    fn collect_steps<'a>(&'a self, forward: bool, out: &mut Vec<Step<'a>>) {
        match (self, forward) {
            (Operation::Add { objects }, true) | (Operation::Remove { objects }, false) => {
                out.extend(objects.iter().map(Step::Insert));
            }
            (Operation::Add { objects }, false) => {
                out.extend(objects.iter().rev().map(|o| Step::Remove(o.id)));
            }
            (Operation::Remove { objects }, true) => {
                out.extend(objects.iter().map(|o| Step::Remove(o.id)));
            }
            (Operation::Move { moves }, true) => out.extend(moves.iter().map(|m| Step::Move {
                id: m.id,
                to: m.new_rect.origin(),
            })),
            (Operation::Move { moves }, false) => out.extend(moves.iter().rev().map(|m| Step::Move {
                id: m.id,
                to: m.old_rect.origin(),
            })),
            (Operation::Composite { operations, .. }, true) => {
                for op in operations {
                    op.collect_steps(true, out);
                }
            }
            (Operation::Composite { operations, .. }, false) => {
                for op in operations.iter().rev() {
                    op.collect_steps(false, out);
                }
            }
        }
    }
}

/// One primitive scene change.
enum Step<'a> {
    Insert(&'a PlacedObject),
    Remove(ObjectId),
    Move { id: ObjectId, to: GridPoint },
}

/// A step that went through, with what it takes to take it back.
enum Applied {
    Inserted(ObjectId),
    Removed(PlacedObject),
    Moved { id: ObjectId, from: GridPoint },
}

fn run_steps(scene: &mut Scene, steps: Vec<Step<'_>>) -> DesignerResult<()> {
    let mut applied = Vec::with_capacity(steps.len());
    for step in steps {
        match apply_step(scene, step) {
            Ok(done) => applied.push(done),
            Err(e) => {
                unwind(scene, applied);
                return Err(e);
            }
        }
    }
    Ok(())
}

fn apply_step(scene: &mut Scene, step: Step<'_>) -> DesignerResult<Applied> {
    match step {
        Step::Insert(object) => {
            scene.insert(object.clone())?;
            Ok(Applied::Inserted(object.id))
        }
        Step::Remove(id) => scene
            .remove(id)
            .map(Applied::Removed)
            .ok_or(DesignerError::ObjectNotFound(id)),
        Step::Move { id, to } => {
            let from = scene.footprint(id)?.origin();
            scene.move_to(id, to)?;
            Ok(Applied::Moved { id, from })
        }
    }
}

fn unwind(scene: &mut Scene, applied: Vec<Applied>) {
    for done in applied.into_iter().rev() {
        let result = match done {
            Applied::Inserted(id) => scene
                .remove(id)
                .map(|_| ())
                .ok_or(DesignerError::ObjectNotFound(id)),
            Applied::Removed(object) => scene.insert(object),
            Applied::Moved { id, from } => scene.move_to(id, from),
        };
        if let Err(e) = result {
            tracing::error!("Failed to unwind a partially replayed operation: {}", e);
        }
    }
}

/// Undo and redo stacks plus the unsaved-changes flag.
#[derive(Debug, Clone)]
pub struct UndoLog {
    undo_stack: Vec<Operation>,
    redo_stack: Vec<Operation>,
    max_depth: usize,
    group: Option<Vec<Operation>>,
    group_depth: usize,
    is_dirty: bool,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_UNDO_DEPTH)
    }

    /// Creates a log that keeps at most `max_depth` undo steps.
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
            group: None,
            group_depth: 0,
            is_dirty: false,
        }
    }

    /// Records an operation that has already been applied.
    ///
    /// Clears the redo stack. Inside a group the operation is buffered until
    /// the outermost group ends.
    pub fn register(&mut self, operation: Operation) {
        self.is_dirty = true;
        match &mut self.group {
            Some(group) => group.push(operation),
            None => self.push_undo(operation),
        }
    }

    fn push_undo(&mut self, operation: Operation) {
        self.redo_stack.clear();
        self.undo_stack.push(operation);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
    }

    /// Starts collecting registrations into one undo step. Groups nest.
    pub fn begin_group(&mut self) {
        if self.group_depth == 0 {
            self.group = Some(Vec::new());
        }
        self.group_depth += 1;
    }

    /// Closes the innermost group; the outermost one pushes its collected
    /// operations as a single entry.
    pub fn end_group(&mut self, name: Option<&str>) {
        if self.group_depth == 0 {
            tracing::warn!("end_group called without a matching begin_group");
            return;
        }
        self.group_depth -= 1;
        if self.group_depth > 0 {
            return;
        }

        let Some(mut operations) = self.group.take() else {
            return;
        };
        match operations.len() {
            0 => {}
            1 if name.is_none() => {
                if let Some(op) = operations.pop() {
                    self.push_undo(op);
                }
            }
            _ => self.push_undo(Operation::Composite {
                operations,
                name: name.map(str::to_string),
            }),
        }
    }

    /// Runs `action` and collapses every registration it makes into one
    /// undo step.
    pub fn as_single_undoable_operation<R>(&mut self, action: impl FnOnce(&mut Self) -> R) -> R {
        self.begin_group();
        let result = action(self);
        self.end_group(None);
        result
    }

    /// Reverts the newest operation. Returns `Ok(false)` when there is
    /// nothing to undo.
    pub fn undo(&mut self, scene: &mut Scene) -> DesignerResult<bool> {
        let Some(operation) = self.undo_stack.pop() else {
            return Ok(false);
        };
        tracing::debug!("Undo: {}", operation.name());
        if let Err(e) = operation.revert(scene) {
            tracing::warn!("Undo of {} failed: {}", operation.name(), e);
            self.undo_stack.push(operation);
            return Err(e);
        }
        self.redo_stack.push(operation);
        self.is_dirty = true;
        Ok(true)
    }

    /// Re-applies the newest undone operation. Returns `Ok(false)` when there
    /// is nothing to redo.
    pub fn redo(&mut self, scene: &mut Scene) -> DesignerResult<bool> {
        let Some(operation) = self.redo_stack.pop() else {
            return Ok(false);
        };
        tracing::debug!("Redo: {}", operation.name());
        if let Err(e) = operation.apply(scene) {
            tracing::warn!("Redo of {} failed: {}", operation.name(), e);
            self.redo_stack.push(operation);
            return Err(e);
        }
        self.undo_stack.push(operation);
        self.is_dirty = true;
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Name of the operation the next undo would revert.
    pub fn undo_name(&self) -> Option<&str> {
        self.undo_stack.last().map(Operation::name)
    }

    pub fn redo_name(&self) -> Option<&str> {
        self.redo_stack.last().map(Operation::name)
    }

    /// True when the document differs from what was last saved.
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Clears the dirty flag after the document was saved.
    pub fn mark_saved(&mut self) {
        self.is_dirty = false;
    }

    /// Drops both stacks and any open group, and resets the dirty flag.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.group = None;
        self.group_depth = 0;
        self.is_dirty = false;
    }
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new()
    }
}
