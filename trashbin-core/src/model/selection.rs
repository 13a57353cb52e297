use std::collections::HashSet;

use super::entry::TrashEntry;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Selection {
    ids: HashSet<u64>,
}

impl Selection {
    /// Flips the selection state of `id` and returns whether it is selected
    /// afterwards. Ids not part of `entries` are never selected.
    pub fn toggle(&mut self, id: u64, entries: &[TrashEntry]) -> bool {
        if self.ids.remove(&id) {
            return false;
        }

        if entries.iter().any(|entry| entry.id == id) {
            self.ids.insert(id);
            true
        } else {
            tracing::warn!("ignoring selection of unknown entry: {}", id);
            false
        }
    }

    pub fn select_all(&mut self, entries: &[TrashEntry]) {
        self.ids = entries.iter().map(|entry| entry.id).collect();
    }

    pub fn toggle_all(&mut self, entries: &[TrashEntry]) {
        if self.is_all_selected(entries) {
            self.clear();
        } else {
            self.select_all(entries);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_all_selected(&self, entries: &[TrashEntry]) -> bool {
        !entries.is_empty() && entries.iter().all(|entry| self.ids.contains(&entry.id))
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.ids.len()
    }

    /// Bulk actions are offered as soon as one entry is selected.
    pub fn is_actions_visible(&self) -> bool {
        self.selected_count() > 0
    }

    /// Selected ids in listing order.
    pub fn ordered(&self, entries: &[TrashEntry]) -> Vec<u64> {
        entries
            .iter()
            .filter(|entry| self.ids.contains(&entry.id))
            .map(|entry| entry.id)
            .collect()
    }

    pub(crate) fn retain(&mut self, entries: &[TrashEntry]) {
        self.ids
            .retain(|id| entries.iter().any(|entry| &entry.id == id));
    }
}
