//! Trailing-window token aggregation.
//!
//! A token is earned on a day when every focus habit was completed that
//! day. Windows are walked in whole local calendar days ending at `today`.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::CompletionIndex;

/// Days in the weekly window, today included.
pub const WEEK_DAYS: u64 = 7;
/// Days in the monthly window, today included.
pub const MONTH_DAYS: u64 = 30;

/// Whether a token was earned on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardDaySnapshot {
    pub date: NaiveDate,
    pub earned: bool,
}

/// Single-day rule. An empty focus list never earns.
pub fn day_earned(index: &CompletionIndex, member_id: &str, focus_ids: &[&str], day: NaiveDate) -> bool {
    if focus_ids.is_empty() {
        return false;
    }
    match index.completed_on(member_id, day) {
        Some(done) => focus_ids.iter().all(|id| done.contains(*id)),
        None => false,
    }
}

/// The `len` calendar days ending at `today`, oldest first.
pub fn trailing_days(today: NaiveDate, len: u64) -> impl Iterator<Item = NaiveDate> {
    (0..len)
        .rev()
        .filter_map(move |offset| today.checked_sub_days(Days::new(offset)))
}

/// Per-day history for the trailing week plus its token count.
pub fn weekly_history(
    index: &CompletionIndex,
    member_id: &str,
    focus_ids: &[&str],
    today: NaiveDate,
) -> (u32, Vec<RewardDaySnapshot>) {
    let history: Vec<RewardDaySnapshot> = trailing_days(today, WEEK_DAYS)
        .map(|date| RewardDaySnapshot {
            date,
            earned: day_earned(index, member_id, focus_ids, date),
        })
        .collect();
    let tokens = history.iter().filter(|d| d.earned).count() as u32;
    (tokens, history)
}

/// Tokens earned over the last `days` calendar days.
pub fn count_tokens(
    index: &CompletionIndex,
    member_id: &str,
    focus_ids: &[&str],
    today: NaiveDate,
    days: u64,
) -> u32 {
    trailing_days(today, days)
        .filter(|date| day_earned(index, member_id, focus_ids, *date))
        .count() as u32
}

/// Consecutive earned days ending today, bounded by `max_days`.
///
/// An unearned today does not break the streak while the day is still in
/// progress; counting then starts from yesterday.
pub fn current_streak(
    index: &CompletionIndex,
    member_id: &str,
    focus_ids: &[&str],
    today: NaiveDate,
    max_days: u64,
) -> u32 {
    let start = if day_earned(index, member_id, focus_ids, today) {
        0
    } else {
        1
    };
    (start..max_days)
        .map_while(|offset| today.checked_sub_days(Days::new(offset)))
        .take_while(|date| day_earned(index, member_id, focus_ids, *date))
        .count() as u32
}
