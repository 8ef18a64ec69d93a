use dashmap::DashSet;

/// Name the front end used for the persisted check-in list.
pub const STORE_NAME: &str = "travel-checkins";

/// Activities the traveller has ticked off by hand. Independent from the
/// time-derived completion in the progress calculator.
#[derive(Debug, Default)]
pub struct CheckinStore {
    checked: DashSet<String>,
}

impl CheckinStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the flag for `activity_id` and returns the new state.
    pub fn toggle(&self, activity_id: &str) -> bool {
        if self.checked.remove(activity_id).is_some() {
            false
        } else {
            self.checked.insert(activity_id.to_string());
            true
        }
    }

    pub fn is_checked_in(&self, activity_id: &str) -> bool {
        self.checked.contains(activity_id)
    }

    pub fn clear(&self) {
        self.checked.clear();
    }

    pub fn count(&self) -> usize {
        self.checked.len()
    }

    pub fn checked_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.checked.iter().map(|id| id.key().clone()).collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::CheckinStore;

    #[test]
    fn toggle_flips_state() {
        let store = CheckinStore::new();

        assert!(store.toggle("d1-1"));
        assert!(store.is_checked_in("d1-1"));
        assert!(!store.toggle("d1-1"));
        assert!(!store.is_checked_in("d1-1"));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn ids_are_listed_sorted_and_cleared_together() {
        let store = CheckinStore::new();
        store.toggle("d2-1");
        store.toggle("d1-3");
        store.toggle("d1-1");

        assert_eq!(store.checked_ids(), vec!["d1-1", "d1-3", "d2-1"]);

        store.clear();
        assert_eq!(store.count(), 0);
        assert!(store.checked_ids().is_empty());
    }
}
