//! # GridPlan Designer
//!
//! This crate provides the spatial placement and influence engine behind the
//! GridPlan layout designer: rectangular building objects placed on an
//! unbounded integer grid, selected and dragged as groups, and analysed for
//! area efficiency and building influence.
//!
//! ## Core Components
//!
//! ### Layout Model
//! - **Spatial Index**: Quadtree over object footprints with fail-fast re-indexing
//! - **Collision**: Positive-area overlap rules; edge contact is legal
//! - **Placement**: Batch ("stamp") placement that places what fits
//! - **History/Undo-Redo**: Reversible add/remove/move operations with grouping
//!
//! ### Interaction
//! - **Drag Transactions**: All-or-nothing group moves with rollback
//! - **Selection**: Click, rubber-band and same-identifier selection
//! - **Viewport**: Screen/grid mapping, zoom and pan
//!
//! ### Analysis
//! - **Influence**: Road-connected flood fill with boundary tracing, plus
//!   circular radius influence
//! - **Statistics**: Used area, bounding area and efficiency
//!
//! ## Architecture
//!
//! ```text
//! DesignerState (session)
//!   ├── Layout (document)
//!   │     ├── Scene (ObjectStore + SpatialIndex)
//!   │     └── UndoLog
//!   ├── SelectionSet
//!   ├── Viewport
//!   └── Gesture (DragState + DragTransaction)
//!
//! Influence / Statistics (read-only over Layout)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use gridplan_core::{GridPoint, GridSize};
//! use gridplan_designer::{Layout, PlacedObject};
//!
//! let mut layout = Layout::new();
//! let house = PlacedObject::new("House", GridPoint::new(0, 0), GridSize::new(2, 2).unwrap());
//! let placed = layout.place(&[house], false);
//! assert_eq!(placed.len(), 1);
//! assert!(layout.undo().unwrap());
//! assert!(layout.is_empty());
//! ```

pub mod collision;
pub mod designer_state;
pub mod drag;
pub mod error;
pub mod history;
pub mod influence;
pub mod layout;
pub mod model;
pub mod placement;
pub mod scene;
pub mod selection;
pub mod spatial_index;
pub mod stamp;
pub mod statistics;
pub mod store;
pub mod viewport;

pub use designer_state::{
    DesignerState, InteractionOutcome, Modifiers, PointerButton, PointerEvent, WheelEvent,
};
pub use drag::{DragState, DragTransaction, StepOutcome};
pub use error::{DesignerError, DesignerResult, IndexError};
pub use history::{ObjectMove, Operation, UndoLog};
pub use influence::{GridSnapshot, InfluenceResult, Reach};
pub use layout::Layout;
pub use model::{ObjectId, PlacedObject};
pub use scene::Scene;
pub use selection::{SelectionMode, SelectionSet};
pub use spatial_index::{IndexStats, SpatialIndex};
pub use stamp::Stamp;
pub use statistics::LayoutStatistics;
pub use store::ObjectStore;
pub use viewport::Viewport;

pub use gridplan_core::{Bounds, Direction, GridPoint, GridRect, GridSize, Point};
pub use gridplan_settings::{DesignerSettings, TraversalMode};
