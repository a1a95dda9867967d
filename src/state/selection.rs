//! Cross-page multi-selection of record ids.
//!
//! Selection belongs to a record, not to its visibility: changing the search,
//! the filters or the page leaves it alone. The only thing that removes ids
//! implicitly is [`SelectionTracker::prune`], run after every refresh of the
//! superset so the selection never names a record that no longer exists.

use std::collections::BTreeSet;

/// Set of selected record ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTracker<Id: Ord> {
    selected: BTreeSet<Id>,
}

impl<Id: Ord> Default for SelectionTracker<Id> {
    fn default() -> Self {
        Self {
            selected: BTreeSet::new(),
        }
    }
}

impl<Id: Ord + Clone> SelectionTracker<Id> {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id` if unselected, deselect it otherwise.
    pub fn toggle(&mut self, id: &Id) {
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
    }

    /// Select-page / deselect-page.
    ///
    /// If every id in `visible` is already selected they are all removed,
    /// otherwise all of them are added. Ids outside `visible` are untouched.
    /// An empty `visible` is a no-op.
    pub fn toggle_all_visible<'a, I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = &'a Id>,
        Id: 'a,
    {
        let visible: Vec<&Id> = visible.into_iter().collect();
        if visible.is_empty() {
            return;
        }

        if visible.iter().all(|id| self.selected.contains(*id)) {
            for id in visible {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(visible.into_iter().cloned());
        }
    }

    /// Whether every id in `visible` is selected (drives the header checkbox).
    /// False for an empty page.
    pub fn all_selected<'a, I>(&self, visible: I) -> bool
    where
        I: IntoIterator<Item = &'a Id>,
        Id: 'a,
    {
        let mut any = false;
        for id in visible {
            if !self.selected.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Drop every selected id that is not in `current`.
    ///
    /// Returns how many ids were dropped.
    pub fn prune<'a, I>(&mut self, current: I) -> usize
    where
        I: IntoIterator<Item = &'a Id>,
        Id: 'a,
    {
        let live: BTreeSet<&Id> = current.into_iter().collect();
        let before = self.selected.len();
        self.selected.retain(|id| live.contains(id));
        before - self.selected.len()
    }

    /// Deselect the given ids (used after they were deleted).
    pub fn remove_all<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a Id>,
        Id: 'a,
    {
        for id in ids {
            self.selected.remove(id);
        }
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: &Id) -> bool {
        self.selected.contains(id)
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// True when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<Id> {
        self.selected.iter().cloned().collect()
    }

    /// Selected ids in ascending order, borrowed.
    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.selected.iter()
    }
}
