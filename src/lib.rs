//! # GridPlan
//!
//! A grid layout designer core for placing rectangular buildings on an
//! unbounded integer grid:
//! - Quadtree spatial index with fail-fast re-indexing
//! - Collision-checked batch placement ("stamps")
//! - Atomic multi-object drag transactions with rollback
//! - Road-connected influence propagation with boundary tracing
//! - Reversible undo/redo history with operation grouping
//!
//! ## Architecture
//!
//! GridPlan is organized as a workspace with multiple crates:
//!
//! 1. **gridplan-core** - Grid geometry, shared constants and errors
//! 2. **gridplan-settings** - Designer settings and validation
//! 3. **gridplan-designer** - Layout model, interaction and analysis
//! 4. **gridplan** - This facade, re-exporting the crates above

pub use gridplan_core as core;
pub use gridplan_designer as designer;
pub use gridplan_settings as settings;

pub use gridplan_core::{Bounds, Direction, GeometryError, GridPoint, GridRect, GridSize, Point};

pub use gridplan_designer::{
    DesignerError, DesignerResult, DesignerState, DragState, DragTransaction, InfluenceResult,
    InteractionOutcome, Layout, LayoutStatistics, Modifiers, ObjectId, Operation, PlacedObject,
    PointerButton, PointerEvent, SelectionMode, SelectionSet, SpatialIndex, Stamp, StepOutcome,
    UndoLog, Viewport, WheelEvent,
};

pub use gridplan_settings::{
    DesignerSettings, GridSettings, InfluenceSettings, SettingsError, TraversalMode,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, `info` by default
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!("GridPlan {} ({}) logging initialized", VERSION, BUILD_DATE);
    Ok(())
}
