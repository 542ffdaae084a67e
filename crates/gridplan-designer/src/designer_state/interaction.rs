//! Pointer and wheel handling.
//!
//! A press starts a pending gesture; it becomes active once the pointer has
//! moved more than one grid cell on either axis, otherwise the release is a
//! click. The right button cancels any gesture, or deletes the object under
//! the pointer when idle.

use gridplan_core::constants::DRAG_THRESHOLD_CELLS;
use gridplan_core::{Bounds, GridRect, Point};

use super::DesignerState;
use crate::drag::{DragState, DragTransaction, StepOutcome};
use crate::error::DesignerResult;
use crate::model::ObjectId;
use crate::selection::{expand_to_identifiers, SelectionMode, SelectionSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub control: bool,
    pub shift: bool,
    /// Pan key (space) held: a left drag pans instead of selecting.
    pub pan: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        control: false,
        shift: false,
        pan: false,
    };

    pub fn any(&self) -> bool {
        self.control || self.shift
    }
}

/// A pointer event in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, button: PointerButton) -> Self {
        Self {
            position: Point::new(x, y),
            button,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A wheel event; `delta` is in notches, positive away from the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub position: Point,
    pub delta: f64,
    pub modifiers: Modifiers,
}

/// What an input event changed, for the host to redraw or refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionOutcome {
    pub selection_changed: bool,
    pub layout_changed: bool,
    pub viewport_changed: bool,
    /// A move step collided and was rolled back.
    pub move_rejected: bool,
    pub statistics_dirty: bool,
}

impl InteractionOutcome {
    fn layout() -> Self {
        Self {
            layout_changed: true,
            statistics_dirty: true,
            ..Self::default()
        }
    }

    fn selection(changed: bool) -> Self {
        Self {
            selection_changed: changed,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The gesture between a press and its release.
#[derive(Debug, Clone, Default)]
pub(super) struct Gesture {
    state: DragState,
    press: Point,
    /// Screen point matching the accepted drag offset.
    origin: Point,
    last: Point,
    modifiers: Modifiers,
    pressed_object: Option<ObjectId>,
    previous_selection: SelectionSet,
    transaction: Option<DragTransaction>,
    rubber_band: Option<Bounds>,
}

impl DesignerState {
    pub fn drag_state(&self) -> DragState {
        self.gesture.state
    }

    /// Live rubber-band rectangle in grid coordinates, for overlay drawing.
    pub fn rubber_band(&self) -> Option<Bounds> {
        self.gesture.rubber_band
    }

    /// Union of the dragged objects' collision rectangles, for overlay drawing.
    pub fn drag_collision_rect(&self) -> Option<GridRect> {
        self.gesture
            .transaction
            .as_ref()
            .and_then(|t| t.collision_rect(&self.layout))
    }

    pub fn pointer_down(&mut self, event: PointerEvent) -> DesignerResult<InteractionOutcome> {
        if event.button == PointerButton::Right {
            if self.gesture.state != DragState::Idle {
                return self.cancel_gesture();
            }
            return Ok(self.remove_under(event.position));
        }
        if self.gesture.state != DragState::Idle {
            return Ok(InteractionOutcome::default());
        }

        let cell = self.viewport.screen_to_cell(event.position);
        let hit = self.layout.object_at(cell).map(|obj| obj.id);
        let state = if event.button == PointerButton::Middle || event.modifiers.pan {
            DragState::PendingPanAll
        } else {
            match hit {
                Some(id) if self.selection.contains(id) => DragState::PendingGroupDrag,
                Some(id) => DragState::PendingSingleDrag(id),
                None => DragState::PendingRect,
            }
        };

        tracing::debug!("Pointer down at {} -> {}", cell, state);
        self.gesture = Gesture {
            state,
            press: event.position,
            origin: event.position,
            last: event.position,
            modifiers: event.modifiers,
            pressed_object: hit,
            previous_selection: self.selection.clone(),
            transaction: None,
            rubber_band: None,
        };
        Ok(InteractionOutcome::default())
    }

    pub fn pointer_move(&mut self, position: Point) -> DesignerResult<InteractionOutcome> {
        let mut outcome = InteractionOutcome::default();
        let state = self.gesture.state;
        if state == DragState::Idle {
            return Ok(outcome);
        }

        if state.is_pending() {
            let (gx, gy) = self.viewport.screen_delta_to_grid(
                position.x - self.gesture.press.x,
                position.y - self.gesture.press.y,
            );
            if gx.abs() <= DRAG_THRESHOLD_CELLS && gy.abs() <= DRAG_THRESHOLD_CELLS {
                return Ok(outcome);
            }
            outcome = self.activate(state);
        }

        let step = match self.gesture.state {
            DragState::ActivePanAll => {
                self.viewport.pan_by_screen(
                    position.x - self.gesture.last.x,
                    position.y - self.gesture.last.y,
                    self.settings.invert_panning_direction,
                );
                InteractionOutcome {
                    viewport_changed: true,
                    ..InteractionOutcome::default()
                }
            }
            DragState::ActiveRect => self.update_rubber_band(position),
            DragState::ActiveGroupDrag => self.step_drag(position)?,
            _ => InteractionOutcome::default(),
        };
        self.gesture.last = position;

        Ok(merge(outcome, step))
    }

    pub fn pointer_up(&mut self, event: PointerEvent) -> DesignerResult<InteractionOutcome> {
        if event.button == PointerButton::Right {
            return Ok(InteractionOutcome::default());
        }

        let gesture = std::mem::take(&mut self.gesture);
        let outcome = match gesture.state {
            DragState::Idle | DragState::PendingPanAll | DragState::ActivePanAll => {
                InteractionOutcome::default()
            }
            DragState::PendingRect => {
                if gesture.modifiers.any() {
                    InteractionOutcome::default()
                } else {
                    InteractionOutcome::selection(self.selection.clear())
                }
            }
            DragState::PendingSingleDrag(_) | DragState::PendingGroupDrag => match gesture.pressed_object {
                Some(id) => self.click_object(id, gesture.modifiers),
                None => InteractionOutcome::default(),
            },
            DragState::ActiveRect => InteractionOutcome::default(),
            DragState::ActiveGroupDrag => match gesture.transaction {
                Some(transaction) => {
                    if transaction.commit(&mut self.layout)? {
                        InteractionOutcome::layout()
                    } else {
                        InteractionOutcome::default()
                    }
                }
                None => InteractionOutcome::default(),
            },
        };
        Ok(outcome)
    }

    /// Aborts the gesture in progress.
    ///
    /// A group drag snaps back to where it started and a rubber band restores
    /// the selection it started from.
    pub fn cancel_gesture(&mut self) -> DesignerResult<InteractionOutcome> {
        let gesture = std::mem::take(&mut self.gesture);
        tracing::debug!("Gesture {} cancelled", gesture.state);
        let outcome = match gesture.state {
            DragState::ActiveGroupDrag => match gesture.transaction {
                Some(transaction) => {
                    let moved = transaction.offset() != (0, 0);
                    transaction.rollback(&mut self.layout)?;
                    if moved {
                        InteractionOutcome::layout()
                    } else {
                        InteractionOutcome::default()
                    }
                }
                None => InteractionOutcome::default(),
            },
            DragState::ActiveRect => {
                let changed = self.selection != gesture.previous_selection;
                self.selection = gesture.previous_selection;
                InteractionOutcome::selection(changed)
            }
            _ => InteractionOutcome::default(),
        };
        Ok(outcome)
    }

    /// Handles a wheel notch: shift scrolls horizontally, control scrolls
    /// vertically, otherwise the view zooms.
    pub fn wheel(&mut self, event: WheelEvent) -> InteractionOutcome {
        let sign = if self.settings.invert_scrolling_direction {
            -1.0
        } else {
            1.0
        };
        let changed = if event.modifiers.shift {
            self.viewport.scroll(-sign * event.delta, 0.0);
            event.delta != 0.0
        } else if event.modifiers.control {
            self.viewport.scroll(0.0, -sign * event.delta);
            event.delta != 0.0
        } else {
            let anchor = self.settings.use_zoom_to_point.then_some(event.position);
            self.viewport
                .zoom_by(self.settings.zoom_factor(event.delta), anchor)
        };
        InteractionOutcome {
            viewport_changed: changed,
            ..InteractionOutcome::default()
        }
    }

    fn activate(&mut self, pending: DragState) -> InteractionOutcome {
        let mut outcome = InteractionOutcome::default();
        if let DragState::PendingSingleDrag(id) = pending {
            let mode = if self.gesture.modifiers.any() {
                SelectionMode::Add
            } else {
                SelectionMode::Replace
            };
            outcome.selection_changed = self.selection.apply(mode, [id]);
        }

        let active = pending.activated();
        if active == DragState::ActiveGroupDrag {
            self.gesture.transaction = Some(DragTransaction::begin(&self.layout, self.selection.iter()));
        }
        tracing::debug!("Gesture {} -> {}", pending, active);
        self.gesture.state = active;
        outcome
    }

    fn step_drag(&mut self, position: Point) -> DesignerResult<InteractionOutcome> {
        let Some(transaction) = self.gesture.transaction.as_mut() else {
            return Ok(InteractionOutcome::default());
        };
        let (gx, gy) = self.viewport.screen_delta_to_grid(
            position.x - self.gesture.origin.x,
            position.y - self.gesture.origin.y,
        );
        let (dx, dy) = (gx.round() as i32, gy.round() as i32);

        let outcome = match transaction.try_step(&mut self.layout, dx, dy)? {
            StepOutcome::Unchanged => InteractionOutcome::default(),
            StepOutcome::Moved => {
                let size = self.viewport.grid_size();
                self.gesture.origin = Point::new(
                    self.gesture.origin.x + f64::from(dx) * size,
                    self.gesture.origin.y + f64::from(dy) * size,
                );
                InteractionOutcome::layout()
            }
            StepOutcome::Rejected => InteractionOutcome {
                move_rejected: true,
                ..InteractionOutcome::default()
            },
        };
        Ok(outcome)
    }

    fn update_rubber_band(&mut self, position: Point) -> InteractionOutcome {
        let band = Bounds::from_corners(
            self.viewport.screen_to_grid(self.gesture.press),
            self.viewport.screen_to_grid(position),
        );
        self.gesture.rubber_band = Some(band);

        let mut hits: Vec<ObjectId> = self
            .layout
            .query_intersecting(&band.covering_rect())
            .into_iter()
            .filter(|obj| band.intersects(&obj.footprint().to_bounds()))
            .map(|obj| obj.id)
            .collect();

        let modifiers = self.gesture.modifiers;
        let mut next = self.gesture.previous_selection.clone();
        let mode = match (modifiers.control, modifiers.shift) {
            (true, true) => {
                hits = expand_to_identifiers(&self.layout, &hits);
                SelectionMode::Add
            }
            (false, true) => SelectionMode::Add,
            (true, false) => SelectionMode::Subtract,
            (false, false) => SelectionMode::Replace,
        };
        next.apply(mode, hits);

        let changed = next != self.selection;
        self.selection = next;
        InteractionOutcome::selection(changed)
    }

    fn click_object(&mut self, id: ObjectId, modifiers: Modifiers) -> InteractionOutcome {
        let changed = match (modifiers.control, modifiers.shift) {
            (true, true) => {
                let same = expand_to_identifiers(&self.layout, &[id]);
                self.selection.apply(SelectionMode::Replace, same)
            }
            (true, false) => self.selection.apply(SelectionMode::Toggle, [id]),
            (false, true) => self.selection.apply(SelectionMode::Add, [id]),
            (false, false) => self.selection.apply(SelectionMode::Replace, [id]),
        };
        InteractionOutcome::selection(changed)
    }

    fn remove_under(&mut self, position: Point) -> InteractionOutcome {
        let cell = self.viewport.screen_to_cell(position);
        let Some(id) = self.layout.object_at(cell).map(|obj| obj.id) else {
            return InteractionOutcome::default();
        };
        self.layout.remove_objects(&[id]);
        let mut outcome = InteractionOutcome::layout();
        outcome.selection_changed = self.selection.retain_existing(&self.layout);
        outcome
    }
}

fn merge(a: InteractionOutcome, b: InteractionOutcome) -> InteractionOutcome {
    InteractionOutcome {
        selection_changed: a.selection_changed || b.selection_changed,
        layout_changed: a.layout_changed || b.layout_changed,
        viewport_changed: a.viewport_changed || b.viewport_changed,
        move_rejected: a.move_rejected || b.move_rejected,
        statistics_dirty: a.statistics_dirty || b.statistics_dirty,
    }
}
