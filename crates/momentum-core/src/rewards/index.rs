//! Completion index: member → calendar day → completed habit IDs.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::model::Completion;

/// Lookup of completed habits per member and local calendar day.
///
/// Only records with `completed == Some(true)` and all of member, habit and
/// a parseable `YYYY-MM-DD` date are indexed. Duplicates collapse.
#[derive(Debug, Clone, Default)]
pub struct CompletionIndex {
    by_member: HashMap<String, HashMap<NaiveDate, HashSet<String>>>,
}

impl CompletionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from an unfiltered completion log.
    pub fn build(completions: &[Completion]) -> Self {
        let mut index = Self::new();
        let mut skipped = 0usize;

        for completion in completions {
            if !index.insert(completion) {
                skipped += 1;
            }
        }

        tracing::debug!(
            records = completions.len(),
            skipped,
            members = index.by_member.len(),
            "built completion index"
        );
        index
    }

    /// Index one record. Returns `false` when the record was skipped.
    pub fn insert(&mut self, completion: &Completion) -> bool {
        if !completion.is_completed() {
            return false;
        }
        let (Some(member_id), Some(habit_id), Some(day)) = (
            completion.member_id.as_deref().filter(|s| !s.is_empty()),
            completion.habit_id.as_deref().filter(|s| !s.is_empty()),
            completion.day(),
        ) else {
            return false;
        };

        self.by_member
            .entry(member_id.to_string())
            .or_default()
            .entry(day)
            .or_default()
            .insert(habit_id.to_string());
        true
    }

    /// Habits `member_id` completed on `day`, if any.
    pub fn completed_on(&self, member_id: &str, day: NaiveDate) -> Option<&HashSet<String>> {
        self.by_member.get(member_id)?.get(&day)
    }

    pub fn is_completed(&self, member_id: &str, habit_id: &str, day: NaiveDate) -> bool {
        self.completed_on(member_id, day)
            .is_some_and(|done| done.contains(habit_id))
    }

    /// Number of members with at least one indexed completion.
    pub fn member_count(&self) -> usize {
        self.by_member.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_member.is_empty()
    }
}
