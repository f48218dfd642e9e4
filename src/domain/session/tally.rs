//! Tally value object - vote counts per option.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::OptionId;

/// Mapping from option id to vote count for one session.
///
/// Serializes as a flat JSON object (`{"1": 3, "2": 0}`), which is the
/// payload format of both the detail endpoint and the live stream.
///
/// # Invariants
///
/// - Keys are fixed at construction; `increment` never adds a key
/// - Counts only ever grow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally(BTreeMap<OptionId, u64>);

impl Tally {
    /// Creates a tally with a zero count for each option.
    pub fn zeroed<'a>(option_ids: impl IntoIterator<Item = &'a OptionId>) -> Self {
        Self(option_ids.into_iter().map(|id| (id.clone(), 0)).collect())
    }

    /// Adds one vote for the option.
    ///
    /// Returns the new count, or `None` if the option is not part of this tally.
    pub fn increment(&mut self, option_id: &OptionId) -> Option<u64> {
        let count = self.0.get_mut(option_id)?;
        *count += 1;
        Some(*count)
    }

    /// Returns the count for an option.
    pub fn count(&self, option_id: &OptionId) -> Option<u64> {
        self.0.get(option_id).copied()
    }

    /// Checks whether the option is tracked by this tally.
    pub fn contains(&self, option_id: &OptionId) -> bool {
        self.0.contains_key(option_id)
    }

    /// Total number of votes recorded.
    ///
    /// Grows by exactly one per vote, so it orders snapshots of the same session.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of options tracked.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(option_id, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&OptionId, u64)> {
        self.0.iter().map(|(id, count)| (id, *count))
    }

    /// Returns the underlying map.
    pub fn counts(&self) -> &BTreeMap<OptionId, u64> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> Vec<OptionId> {
        vec![OptionId::new("1"), OptionId::new("2")]
    }

    #[test]
    fn zeroed_tally_has_every_option_at_zero() {
        let tally = Tally::zeroed(&ids());

        assert_eq!(tally.len(), 2);
        assert_eq!(tally.count(&OptionId::new("1")), Some(0));
        assert_eq!(tally.count(&OptionId::new("2")), Some(0));
        assert_eq!(tally.total(), 0);
    }

    #[test]
    fn increment_adds_one_and_returns_new_count() {
        let mut tally = Tally::zeroed(&ids());

        assert_eq!(tally.increment(&OptionId::new("1")), Some(1));
        assert_eq!(tally.increment(&OptionId::new("1")), Some(2));
        assert_eq!(tally.total(), 2);
    }

    #[test]
    fn increment_unknown_option_leaves_tally_unchanged() {
        let mut tally = Tally::zeroed(&ids());
        let before = tally.clone();

        assert_eq!(tally.increment(&OptionId::new("3")), None);
        assert_eq!(tally, before);
        assert!(!tally.contains(&OptionId::new("3")));
    }

    #[test]
    fn tally_serializes_as_flat_object() {
        let mut tally = Tally::zeroed(&ids());
        tally.increment(&OptionId::new("2"));

        let json = serde_json::to_value(&tally).unwrap();
        assert_eq!(json, serde_json::json!({"1": 0, "2": 1}));
    }
}
