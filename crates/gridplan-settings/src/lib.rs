//! GridPlan Settings Crate
//!
//! Defines the designer configuration struct passed into the interaction
//! layer at construction, with validation and a JSON representation.

pub mod config;
pub mod error;

pub use config::{DesignerSettings, GridSettings, InfluenceSettings, TraversalMode};
pub use error::{SettingsError, SettingsResult};
