//! Progress assembly: one [`MemberRewardProgress`] per active member.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::focus::{self, FocusSelection};
use super::window::{self, RewardDaySnapshot, MONTH_DAYS};
use super::CompletionIndex;
use crate::model::{Completion, Habit, Member};

fn default_focus_count() -> usize {
    3
}
fn default_weekly_goal() -> i64 {
    4
}

/// Tunables for the reward engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Focus habits picked when a member has none configured.
    #[serde(default = "default_focus_count")]
    pub default_focus_count: usize,
    /// Weekly goal for members without one.
    #[serde(default = "default_weekly_goal")]
    pub default_weekly_goal: i64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            default_focus_count: default_focus_count(),
            default_weekly_goal: default_weekly_goal(),
        }
    }
}

impl RewardConfig {
    /// Zero values, and a non-positive weekly goal, fall back to the
    /// built-in defaults.
    pub fn normalized(mut self) -> Self {
        if self.default_focus_count == 0 {
            self.default_focus_count = default_focus_count();
        }
        if self.default_weekly_goal <= 0 {
            self.default_weekly_goal = default_weekly_goal();
        }
        self
    }
}

/// Today's focus progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayProgress {
    pub completed: u32,
    pub total: u32,
    pub token_earned: bool,
    /// Names of focus habits still open today, in focus order.
    pub missing_habit_names: Vec<String>,
}

/// Trailing seven-day progress toward the weekly reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProgress {
    pub tokens: u32,
    pub goal: i64,
    /// Exactly seven days, oldest first, ending today.
    pub history: Vec<RewardDaySnapshot>,
    pub ready_for_reward: bool,
}

/// Derived reward state for one member. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRewardProgress {
    pub member_id: String,
    pub focus_habit_ids: Vec<String>,
    pub focus_habits: Vec<Habit>,
    pub stale_focus_habit_ids: Vec<String>,
    pub today: TodayProgress,
    pub weekly: WeeklyProgress,
    pub monthly_tokens: u32,
    /// Same as `weekly.tokens`; redemption is tracked elsewhere.
    pub available_tokens: u32,
    pub current_streak: u32,
}

/// Computes reward progress from members, habits and completions.
#[derive(Debug, Clone, Default)]
pub struct RewardEngine {
    config: RewardConfig,
}

impl RewardEngine {
    /// Create an engine with the default focus count and weekly goal
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RewardConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Progress for every active member as of `today`.
    ///
    /// Inactive members are omitted entirely. Empty collections yield an
    /// empty map.
    pub fn compute(
        &self,
        members: &[Member],
        habits: &[Habit],
        completions: &[Completion],
        today: NaiveDate,
    ) -> BTreeMap<String, MemberRewardProgress> {
        let index = CompletionIndex::build(completions);

        let progress: BTreeMap<String, MemberRewardProgress> = members
            .iter()
            .filter_map(|member| self.member_progress(member, habits, &index, today))
            .map(|p| (p.member_id.clone(), p))
            .collect();

        tracing::debug!(
            %today,
            members = members.len(),
            active = progress.len(),
            habits = habits.len(),
            "computed reward progress"
        );
        progress
    }

    /// Same as [`compute`](Self::compute) with today's local date.
    pub fn compute_now(
        &self,
        members: &[Member],
        habits: &[Habit],
        completions: &[Completion],
    ) -> BTreeMap<String, MemberRewardProgress> {
        self.compute(members, habits, completions, chrono::Local::now().date_naive())
    }

    /// Progress for a single member, `None` when the member is inactive.
    pub fn member_progress(
        &self,
        member: &Member,
        habits: &[Habit],
        index: &CompletionIndex,
        today: NaiveDate,
    ) -> Option<MemberRewardProgress> {
        if !member.is_active {
            return None;
        }

        let eligible = focus::eligible_habits(habits, &member.id);
        let selection = focus::resolve(member, &eligible, self.config.default_focus_count);
        let focus_ids = selection.resolved_ids();

        let today_progress = today_progress(index, &member.id, &selection, today);
        let (tokens, history) = window::weekly_history(index, &member.id, &focus_ids, today);
        let monthly_tokens = window::count_tokens(index, &member.id, &focus_ids, today, MONTH_DAYS);
        let current_streak = window::current_streak(index, &member.id, &focus_ids, today, MONTH_DAYS);
        let goal = member.weekly_goal_or(self.config.default_weekly_goal);

        let progress = MemberRewardProgress {
            member_id: member.id.clone(),
            focus_habit_ids: selection.focus_habit_ids.clone(),
            focus_habits: selection.focus_habits.iter().map(|h| (*h).clone()).collect(),
            stale_focus_habit_ids: selection.stale_habit_ids,
            today: today_progress,
            weekly: WeeklyProgress {
                tokens,
                goal,
                history,
                ready_for_reward: goal > 0 && i64::from(tokens) >= goal,
            },
            monthly_tokens,
            available_tokens: tokens,
            current_streak,
        };

        tracing::trace!(
            member_id = %progress.member_id,
            token_earned = progress.today.token_earned,
            weekly_tokens = progress.weekly.tokens,
            monthly_tokens = progress.monthly_tokens,
            "member progress"
        );
        Some(progress)
    }

    /// Default focus habit IDs for every active member, whether or not the
    /// member has configured their own.
    pub fn default_focus_map(&self, members: &[Member], habits: &[Habit]) -> BTreeMap<String, Vec<String>> {
        members
            .iter()
            .filter(|m| m.is_active)
            .map(|m| {
                let eligible = focus::eligible_habits(habits, &m.id);
                (
                    m.id.clone(),
                    focus::default_focus_ids(&eligible, self.config.default_focus_count),
                )
            })
            .collect()
    }
}

fn today_progress(
    index: &CompletionIndex,
    member_id: &str,
    selection: &FocusSelection<'_>,
    today: NaiveDate,
) -> TodayProgress {
    let mut completed = 0u32;
    let mut missing_habit_names = Vec::new();
    for habit in &selection.focus_habits {
        if index.is_completed(member_id, &habit.id, today) {
            completed += 1;
        } else {
            missing_habit_names.push(habit.name.clone());
        }
    }

    let total = selection.total() as u32;
    TodayProgress {
        completed,
        total,
        token_earned: total > 0 && completed == total,
        missing_habit_names,
    }
}
