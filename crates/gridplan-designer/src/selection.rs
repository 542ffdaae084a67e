use std::collections::BTreeSet;

use crate::layout::Layout;
use crate::model::{ObjectId, PlacedObject};

/// How a set of hits is combined with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// The hits become the selection.
    #[default]
    Replace,
    /// The hits are added.
    Add,
    /// The hits are removed.
    Subtract,
    /// Each hit flips between selected and unselected.
    Toggle,
}

/// The set of selected objects.
///
/// Holds ids only; [`SelectionSet::retain_existing`] drops ids whose object
/// left the layout (after undo, removal or load).
///
/// # Examples
///
/// ```
/// use gridplan_designer::{ObjectId, SelectionMode, SelectionSet};
///
/// let mut selection = SelectionSet::new();
/// selection.apply(SelectionMode::Add, [ObjectId(1), ObjectId(2)]);
/// selection.apply(SelectionMode::Toggle, [ObjectId(2)]);
/// assert_eq!(selection.ids(), vec![ObjectId(1)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<ObjectId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<ObjectId> {
        self.ids.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.ids.iter().copied()
    }

    /// Clears the selection. Returns true if anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.ids.is_empty();
        self.ids.clear();
        changed
    }

    /// Combines `hits` with the selection according to `mode`.
    ///
    /// # Returns
    ///
    /// `true` if the selection changed.
    pub fn apply<I>(&mut self, mode: SelectionMode, hits: I) -> bool
    where
        I: IntoIterator<Item = ObjectId>,
    {
        let before = self.ids.clone();
        match mode {
            SelectionMode::Replace => self.ids = hits.into_iter().collect(),
            SelectionMode::Add => self.ids.extend(hits),
            SelectionMode::Subtract => {
                for id in hits {
                    self.ids.remove(&id);
                }
            }
            SelectionMode::Toggle => {
                for id in hits {
                    if !self.ids.remove(&id) {
                        self.ids.insert(id);
                    }
                }
            }
        }
        before != self.ids
    }

    /// Drops ids that are no longer in `layout`. Returns true if any were dropped.
    pub fn retain_existing(&mut self, layout: &Layout) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| layout.get(*id).is_some());
        before != self.ids.len()
    }

    /// Selected objects that still exist, in id order.
    pub fn objects<'a>(&'a self, layout: &'a Layout) -> impl Iterator<Item = &'a PlacedObject> + 'a {
        self.ids.iter().filter_map(move |id| layout.get(*id))
    }
}

/// Every object in `layout` whose identifier matches one of `seeds`.
pub fn expand_to_identifiers(layout: &Layout, seeds: &[ObjectId]) -> Vec<ObjectId> {
    let identifiers: BTreeSet<&str> = seeds
        .iter()
        .filter_map(|id| layout.get(*id))
        .map(|obj| obj.identifier.as_str())
        .collect();
    layout
        .objects()
        .filter(|obj| identifiers.contains(obj.identifier.as_str()))
        .map(|obj| obj.id)
        .collect()
}
