//! Ordered, depot-aware stop selection.
//!
//! The stop list is what the operator sees and edits. Insertion order is
//! the travel order sent to the optimizer, so the only reordering ever
//! applied is an explicit move operation. The depot designation never
//! mutates the displayed list; it is applied to a copy at dispatch time.

/// Ordered, duplicate-free sequence of stop ids with an optional
/// designated depot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopList {
    ids: Vec<String>,
    depot: Option<String>,
}

impl StopList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an id unless it is already selected. Returns whether the
    /// list changed.
    pub fn add(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.ids.iter().any(|existing| *existing == id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes the stop at `index`. Out-of-range indices are a no-op.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.ids.len() {
            Some(self.ids.remove(index))
        } else {
            None
        }
    }

    /// Swaps the stop at `index` with its predecessor. No-op at the top
    /// of the list or out of range.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.ids.len() {
            return false;
        }
        self.ids.swap(index - 1, index);
        true
    }

    /// Swaps the stop at `index` with its successor. No-op at the bottom
    /// of the list or out of range.
    pub fn move_down(&mut self, index: usize) -> bool {
        if self.ids.len() < 2 || index >= self.ids.len() - 1 {
            return false;
        }
        self.ids.swap(index, index + 1);
        true
    }

    /// Clears the selection. The depot designation is separate state and
    /// survives.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Designates (or clears) the selected depot.
    pub fn set_depot(&mut self, depot: Option<String>) {
        self.depot = depot;
    }

    pub fn depot(&self) -> Option<&str> {
        self.depot.as_deref()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The stop sequence for an outbound request: a copy of the displayed
    /// list with the designated depot forced to position 0. When the
    /// depot is not among the picks it is prepended; when it is, it moves
    /// to the front with the relative order of the rest preserved. The
    /// displayed list is never mutated.
    pub fn effective_stops(&self) -> Vec<String> {
        let Some(depot) = self.depot.as_deref() else {
            return self.ids.clone();
        };

        let mut stops = Vec::with_capacity(self.ids.len() + 1);
        stops.push(depot.to_string());
        stops.extend(self.ids.iter().filter(|id| *id != depot).cloned());
        stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(ids: &[&str]) -> StopList {
        let mut list = StopList::new();
        for id in ids {
            list.add(*id);
        }
        list
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut list = StopList::new();
        assert!(list.add("a"));
        assert!(list.add("b"));
        assert!(!list.add("a"), "duplicate add should be a no-op");
        assert_eq!(list.ids(), ["a", "b"]);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut list = list_of(&["a", "b", "c"]);
        assert_eq!(list.remove(1), Some("b".to_string()));
        assert_eq!(list.ids(), ["a", "c"]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut list = list_of(&["a"]);
        assert_eq!(list.remove(5), None);
        assert_eq!(list.ids(), ["a"]);
    }

    #[test]
    fn test_move_up_and_down() {
        let mut list = list_of(&["a", "b", "c"]);

        assert!(list.move_up(2));
        assert_eq!(list.ids(), ["a", "c", "b"]);

        assert!(list.move_down(0));
        assert_eq!(list.ids(), ["c", "a", "b"]);
    }

    #[test]
    fn test_move_noop_at_boundaries() {
        let mut list = list_of(&["a", "b"]);

        assert!(!list.move_up(0), "first element cannot move up");
        assert!(!list.move_down(1), "last element cannot move down");
        assert!(!list.move_up(9));
        assert!(!list.move_down(9));
        assert_eq!(list.ids(), ["a", "b"]);
    }

    #[test]
    fn test_clear_keeps_depot_designation() {
        let mut list = list_of(&["a", "b"]);
        list.set_depot(Some("d".to_string()));
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.depot(), Some("d"));
    }

    #[test]
    fn test_effective_stops_without_depot() {
        let list = list_of(&["a", "b", "c"]);
        assert_eq!(list.effective_stops(), ["a", "b", "c"]);
    }

    #[test]
    fn test_effective_stops_prepends_absent_depot() {
        let mut list = list_of(&["a", "b"]);
        list.set_depot(Some("d".to_string()));

        assert_eq!(list.effective_stops(), ["d", "a", "b"]);
        assert_eq!(list.ids(), ["a", "b"], "displayed list must not change");
    }

    #[test]
    fn test_effective_stops_moves_member_depot_to_front() {
        let mut list = list_of(&["a", "d", "b"]);
        list.set_depot(Some("d".to_string()));

        assert_eq!(list.effective_stops(), ["d", "a", "b"]);
        assert_eq!(list.ids(), ["a", "d", "b"], "displayed list must not change");
    }

    #[test]
    fn test_effective_stops_depot_already_first() {
        let mut list = list_of(&["d", "a"]);
        list.set_depot(Some("d".to_string()));

        assert_eq!(list.effective_stops(), ["d", "a"]);
    }

    #[test]
    fn test_no_duplicates_across_edit_sequences() {
        let mut list = StopList::new();
        for id in ["a", "b", "c", "b", "a", "d"] {
            list.add(id);
        }
        list.move_up(2);
        list.remove(0);
        list.add("a");
        list.move_down(1);

        let mut seen = std::collections::HashSet::new();
        for id in list.ids() {
            assert!(seen.insert(id.clone()), "duplicate id {id} in {:?}", list.ids());
        }
    }
}
