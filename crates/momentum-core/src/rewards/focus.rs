//! Focus habit resolution.
//!
//! A member's focus habits are the ones that must all be completed on a day
//! to earn that day's token. They come from the member's explicit
//! configuration, or default to the first few eligible habits.

use std::cmp::Ordering;

use crate::model::{Eligibility, Habit, Member};

/// Resolved focus habits for one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusSelection<'a> {
    /// Configured IDs verbatim, or the default IDs when none are configured.
    pub focus_habit_ids: Vec<String>,
    /// Habits the IDs resolved to, in focus order.
    pub focus_habits: Vec<&'a Habit>,
    /// Configured IDs that no longer point at an eligible habit.
    pub stale_habit_ids: Vec<String>,
}

impl FocusSelection<'_> {
    pub fn total(&self) -> usize {
        self.focus_habits.len()
    }

    pub fn resolved_ids(&self) -> Vec<&str> {
        self.focus_habits.iter().map(|h| h.id.as_str()).collect()
    }
}

/// Habits that count for `member_id`, in stable display order.
///
/// Sorted by `sort_order`, then `created_at`, present values first. Habits
/// carrying neither keep the order they were supplied in.
pub fn eligible_habits<'a>(habits: &'a [Habit], member_id: &str) -> Vec<&'a Habit> {
    let mut eligible: Vec<&Habit> = habits
        .iter()
        .filter(|h| h.is_eligible_for(member_id))
        .collect();
    eligible.sort_by(|a, b| {
        present_first(&a.sort_order, &b.sort_order)
            .then_with(|| present_first(&a.created_at, &b.created_at))
    });
    eligible
}

fn present_first<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// First `count` eligible habit IDs.
pub fn default_focus_ids(eligible: &[&Habit], count: usize) -> Vec<String> {
    eligible.iter().take(count).map(|h| h.id.clone()).collect()
}

/// Resolve `member`'s focus habits against their eligible habits.
pub fn resolve<'a>(member: &Member, eligible: &[&'a Habit], default_count: usize) -> FocusSelection<'a> {
    let configured = member.configured_focus();
    let focus_habit_ids = if configured.is_empty() {
        default_focus_ids(eligible, default_count)
    } else {
        configured.to_vec()
    };

    let mut focus_habits = Vec::with_capacity(focus_habit_ids.len());
    let mut stale_habit_ids = Vec::new();
    for id in &focus_habit_ids {
        match eligible.iter().find(|h| &h.id == id) {
            Some(habit) => focus_habits.push(*habit),
            None => stale_habit_ids.push(id.clone()),
        }
    }

    if !stale_habit_ids.is_empty() {
        tracing::debug!(
            member_id = %member.id,
            stale = ?stale_habit_ids,
            "dropping focus habits that are no longer eligible"
        );
    }

    FocusSelection {
        focus_habit_ids,
        focus_habits,
        stale_habit_ids,
    }
}
