//! Error types for the designer crate.
//!
//! Rejected placements and moves are normal outcomes and never show up here.
//! These errors cover programmer mistakes against the spatial index and
//! invalid object data, which must fail fast instead of corrupting the index.

use gridplan_core::{GeometryError, GridRect};
use thiserror::Error;

use crate::model::ObjectId;

/// Errors raised by the spatial index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The item was never inserted, or has already been removed.
    #[error("Item is not indexed")]
    NotIndexed,

    /// The item is already present; re-index it instead of inserting twice.
    #[error("Item is already indexed at {0}")]
    AlreadyIndexed(GridRect),

    /// The caller's previous rectangle does not match the indexed one.
    #[error("Stale rectangle: indexed at {indexed}, caller supplied {supplied}")]
    StaleRect {
        indexed: GridRect,
        supplied: GridRect,
    },

    /// The rectangle covers no cell.
    #[error("Cannot index empty rectangle {0}")]
    InvalidRect(GridRect),
}

/// Errors that can occur during designer operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignerError {
    /// A spatial index operation failed.
    #[error("Index error for object {id}: {source}")]
    Index {
        id: ObjectId,
        #[source]
        source: IndexError,
    },

    /// An object violates the grid model.
    #[error("Invalid object: {0}")]
    Geometry(#[from] GeometryError),

    /// The referenced object is not in the layout.
    #[error("Object {0} not found")]
    ObjectNotFound(ObjectId),
}

impl DesignerError {
    pub(crate) fn index(id: ObjectId, source: IndexError) -> Self {
        Self::Index { id, source }
    }
}

/// Result type alias for designer operations.
pub type DesignerResult<T> = Result<T, DesignerError>;
