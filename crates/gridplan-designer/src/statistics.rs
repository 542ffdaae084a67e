//! Area statistics over a set of placed objects.

use std::collections::BTreeMap;

use gridplan_core::GridRect;
use serde::Serialize;

use crate::model::PlacedObject;

/// Aggregate figures for the statistics panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutStatistics {
    pub object_count: usize,
    /// Smallest rectangle containing every counted footprint.
    pub bounding_rect: Option<GridRect>,
    /// Sum of the counted footprint areas, in cells.
    pub used_area: i64,
    /// Area of `bounding_rect`, in cells.
    pub bounding_area: i64,
    /// `used_area / bounding_area`, 0 for an empty set.
    pub efficiency: f64,
    pub counts_by_identifier: BTreeMap<String, usize>,
}

impl LayoutStatistics {
    /// Computes statistics for `objects`.
    ///
    /// Roads and objects ignored from collision are counted per identifier
    /// but do not contribute to the used or bounding area.
    pub fn compute<'a, I>(objects: I) -> Self
    where
        I: IntoIterator<Item = &'a PlacedObject>,
    {
        let mut stats = Self::default();
        for obj in objects {
            stats.object_count += 1;
            *stats
                .counts_by_identifier
                .entry(obj.identifier.clone())
                .or_insert(0) += 1;

            if obj.is_road || obj.ignored_from_collision {
                continue;
            }
            let footprint = obj.footprint();
            stats.used_area += footprint.area();
            stats.bounding_rect = Some(match stats.bounding_rect {
                Some(rect) => rect.union(&footprint),
                None => footprint,
            });
        }

        stats.bounding_area = stats.bounding_rect.map_or(0, |r| r.area());
        if stats.bounding_area > 0 {
            stats.efficiency = stats.used_area as f64 / stats.bounding_area as f64;
        }
        stats
    }

    /// Efficiency as a whole percentage, for display.
    pub fn efficiency_percent(&self) -> u32 {
        (self.efficiency * 100.0).round() as u32
    }
}
