//! Drag gestures and the atomic group move.
//!
//! A [`DragTransaction`] moves a set of objects step by step. Each step is
//! all-or-nothing: every member is translated speculatively, and if any
//! collidable member would overlap an object outside the group, all of them
//! snap back. The spatial index keeps the rectangles captured at
//! [`DragTransaction::begin`] for the whole gesture and is updated once on
//! [`DragTransaction::commit`], which also registers a single `Move`
//! operation. [`DragTransaction::rollback`] restores the captured positions.

use std::collections::HashSet;
use std::fmt;

use gridplan_core::GridRect;

use crate::collision;
use crate::error::DesignerResult;
use crate::history::{ObjectMove, Operation};
use crate::layout::Layout;
use crate::model::ObjectId;

/// Pointer gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pressed on empty space; becomes a rubber band once moved.
    PendingRect,
    /// Pressed on an unselected object.
    PendingSingleDrag(ObjectId),
    /// Pressed on a selected object.
    PendingGroupDrag,
    /// Pressed with the pan button or modifier.
    PendingPanAll,
    ActiveRect,
    ActiveGroupDrag,
    ActivePanAll,
}

impl DragState {
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            DragState::PendingRect
                | DragState::PendingSingleDrag(_)
                | DragState::PendingGroupDrag
                | DragState::PendingPanAll
        )
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self,
            DragState::ActiveRect | DragState::ActiveGroupDrag | DragState::ActivePanAll
        )
    }

    /// The state a pending gesture turns into once it passes the threshold.
    pub fn activated(&self) -> DragState {
        match self {
            DragState::PendingRect => DragState::ActiveRect,
            DragState::PendingSingleDrag(_) | DragState::PendingGroupDrag => DragState::ActiveGroupDrag,
            DragState::PendingPanAll => DragState::ActivePanAll,
            other => *other,
        }
    }
}

impl fmt::Display for DragState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DragState::Idle => "Idle",
            DragState::PendingRect => "PendingRect",
            DragState::PendingSingleDrag(_) => "PendingSingleDrag",
            DragState::PendingGroupDrag => "PendingGroupDrag",
            DragState::PendingPanAll => "PendingPanAll",
            DragState::ActiveRect => "ActiveRect",
            DragState::ActiveGroupDrag => "ActiveGroupDrag",
            DragState::ActivePanAll => "ActivePanAll",
        };
        write!(f, "{}", name)
    }
}

/// Result of one [`DragTransaction::try_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Zero delta; nothing happened.
    Unchanged,
    /// Every member moved.
    Moved,
    /// A member would have collided; every member is back where it was.
    Rejected,
}

/// An in-progress move of a group of objects.
#[derive(Debug, Clone)]
pub struct DragTransaction {
    /// Members with the footprint they had (and are indexed at) when the
    /// gesture began.
    members: Vec<(ObjectId, GridRect)>,
    member_set: HashSet<ObjectId>,
    dx: i32,
    dy: i32,
}

impl DragTransaction {
    /// Starts moving `ids`. Ids not in the layout are dropped.
    pub fn begin<I>(layout: &Layout, ids: I) -> Self
    where
        I: IntoIterator<Item = ObjectId>,
    {
        let mut member_set = HashSet::new();
        let members: Vec<(ObjectId, GridRect)> = ids
            .into_iter()
            .filter(|id| member_set.insert(*id))
            .filter_map(|id| layout.get(id).map(|obj| (id, obj.footprint())))
            .collect();
        member_set.retain(|id| members.iter().any(|(m, _)| m == id));
        tracing::debug!("Drag transaction started with {} objects", members.len());
        Self {
            members,
            member_set,
            dx: 0,
            dy: 0,
        }
    }

    pub fn member_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.members.iter().map(|(id, _)| *id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Total accepted offset since the gesture began.
    pub fn offset(&self) -> (i32, i32) {
        (self.dx, self.dy)
    }

    /// Union of the collidable members' current collision rectangles.
    pub fn collision_rect(&self, layout: &Layout) -> Option<GridRect> {
        GridRect::union_all(
            self.member_ids()
                .filter_map(|id| layout.get(id))
                .filter(|obj| !obj.ignored_from_collision)
                .map(|obj| obj.collision_rect()),
        )
    }

    /// Tries to move every member by `(dx, dy)` cells.
    pub fn try_step(&mut self, layout: &mut Layout, dx: i32, dy: i32) -> DesignerResult<StepOutcome> {
        if (dx, dy) == (0, 0) || self.members.is_empty() {
            return Ok(StepOutcome::Unchanged);
        }

        let blockers: Vec<ObjectId> = match self.collision_rect(layout) {
            Some(rect) => layout
                .scene
                .query_intersecting(&rect.translated(dx, dy))
                .into_iter()
                .filter(|id| !self.member_set.contains(id))
                .collect(),
            None => Vec::new(),
        };

        let current: Vec<(ObjectId, GridRect)> = self
            .members
            .iter()
            .map(|(id, start)| (*id, start.translated(self.dx, self.dy)))
            .collect();
        for (id, rect) in &current {
            layout
                .scene
                .set_position_unindexed(*id, rect.translated(dx, dy).origin())?;
        }

        let collides = self.member_ids().any(|id| {
            let Some(member) = layout.scene.get(id) else {
                return false;
            };
            blockers
                .iter()
                .filter_map(|b| layout.scene.get(*b))
                .any(|blocker| collision::intersects(member, blocker))
        });

        if collides {
            for (id, rect) in &current {
                layout.scene.set_position_unindexed(*id, rect.origin())?;
            }
            tracing::trace!("Drag step ({}, {}) rejected", dx, dy);
            return Ok(StepOutcome::Rejected);
        }

        self.dx += dx;
        self.dy += dy;
        tracing::trace!("Drag step ({}, {}) accepted", dx, dy);
        Ok(StepOutcome::Moved)
    }

    /// Restores every member to its position at `begin`.
    ///
    /// The index was never touched during the gesture, so nothing else needs
    /// undoing.
    pub fn rollback(self, layout: &mut Layout) -> DesignerResult<()> {
        for (id, start) in &self.members {
            layout.scene.set_position_unindexed(*id, start.origin())?;
        }
        tracing::debug!("Drag transaction rolled back");
        Ok(())
    }

    /// Re-indexes every member from its start rectangle and registers one
    /// `Move` operation for the whole gesture.
    ///
    /// Returns false when the accepted offset is zero (nothing registered).
    pub fn commit(self, layout: &mut Layout) -> DesignerResult<bool> {
        for (id, start) in &self.members {
            layout.scene.reindex(*id, *start)?;
        }
        if (self.dx, self.dy) == (0, 0) {
            return Ok(false);
        }

        let moves = self
            .members
            .iter()
            .map(|(id, start)| ObjectMove {
                id: *id,
                old_rect: *start,
                new_rect: start.translated(self.dx, self.dy),
            })
            .collect();
        layout.register(Operation::Move { moves });
        tracing::debug!(
            "Drag transaction committed: {} objects by ({}, {})",
            self.members.len(),
            self.dx,
            self.dy
        );
        Ok(true)
    }
}
