//! # GridPlan Core
//!
//! Core types and utilities for GridPlan.
//! Provides the integer grid geometry every other crate builds on,
//! the shared interaction constants, and the base error types.

pub mod constants;
pub mod error;
pub mod geometry;

pub use error::GeometryError;
pub use geometry::{Bounds, Direction, GridPoint, GridRect, GridSize, Point};
