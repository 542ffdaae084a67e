//! Designer session state.
//!
//! `DesignerState` owns one layout document together with everything an
//! editing session keeps around it: the selection, the viewport, the
//! settings it was constructed with, and the pointer gesture in progress.
//!
//! This module is split into submodules:
//! - `interaction`: pointer and wheel handling, drag state machine
//! - `editing`: placement, deletion, selection commands, undo/redo

mod editing;
mod interaction;

pub use interaction::{InteractionOutcome, Modifiers, PointerButton, PointerEvent, WheelEvent};

use gridplan_settings::{DesignerSettings, SettingsResult};

use crate::layout::Layout;
use crate::selection::SelectionSet;
use crate::viewport::Viewport;
use interaction::Gesture;

/// Designer state for UI integration
#[derive(Debug, Clone)]
pub struct DesignerState {
    layout: Layout,
    pub selection: SelectionSet,
    pub viewport: Viewport,
    settings: DesignerSettings,
    gesture: Gesture,
}

impl DesignerState {
    /// Creates a designer with default settings.
    pub fn new() -> Self {
        Self::with_settings(DesignerSettings::default())
    }

    /// Creates a designer using `settings` for zoom, pan, scroll and
    /// influence behaviour.
    ///
    /// Settings that fail validation are replaced by the defaults.
    pub fn with_settings(settings: DesignerSettings) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                tracing::warn!("Invalid designer settings, using defaults: {}", e);
                DesignerSettings::default()
            }
        };
        Self {
            layout: Layout::new(),
            selection: SelectionSet::new(),
            viewport: Viewport::with_grid_settings(1200.0, 800.0, &settings.grid),
            settings,
            gesture: Gesture::default(),
        }
    }

    /// The document. Changes go through the session's editing commands.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn settings(&self) -> &DesignerSettings {
        &self.settings
    }

    /// Replaces the settings after validating them.
    pub fn set_settings(&mut self, settings: DesignerSettings) -> SettingsResult<()> {
        settings.validate()?;
        self.viewport
            .set_grid_limits(settings.grid.min_size, settings.grid.max_size);
        self.settings = settings;
        Ok(())
    }
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new()
    }
}
