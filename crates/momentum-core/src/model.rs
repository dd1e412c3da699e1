//! Input entities for the reward engine.
//!
//! These mirror the documents kept by the external data store. The engine
//! only ever reads them; every field that the store may omit deserializes
//! to an empty or `None` value instead of failing the whole load.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Calendar-day format used by completion records.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A habit that can be assigned to one or more members.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub assigned_members: Vec<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_archived: bool,
    /// Explicit position chosen by the household, lowest first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One completion event as stored upstream.
///
/// All fields are optional: incomplete records are kept so that a single
/// bad document never breaks deserialization, and the indexer skips them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    #[serde(default)]
    pub habit_id: Option<String>,
    #[serde(default)]
    pub member_id: Option<String>,
    /// Local calendar day, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl Completion {
    /// A completed record for `habit_id` on `date`.
    pub fn done(member_id: &str, habit_id: &str, date: NaiveDate) -> Self {
        Self {
            habit_id: Some(habit_id.to_string()),
            member_id: Some(member_id.to_string()),
            date: Some(date.format(DATE_FORMAT).to_string()),
            completed: Some(true),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed == Some(true)
    }

    /// Parsed calendar day, or `None` when missing or not exactly `YYYY-MM-DD`.
    pub fn day(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?;
        let day = NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()?;
        (day.format(DATE_FORMAT).to_string() == raw).then_some(day)
    }
}

/// Per-member reward settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardProfile {
    #[serde(default)]
    pub daily_focus_habit_ids: Vec<String>,
    /// Tokens needed in the trailing week; absent or zero means "use default".
    #[serde(default)]
    pub weekly_goal: Option<i64>,
}

/// A household member.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub reward_profile: Option<RewardProfile>,
}

impl Member {
    /// Explicitly configured focus habit IDs, empty when none.
    pub fn configured_focus(&self) -> &[String] {
        self.reward_profile
            .as_ref()
            .map(|p| p.daily_focus_habit_ids.as_slice())
            .unwrap_or(&[])
    }

    /// Weekly goal with zero/absent replaced by `default_goal`.
    pub fn weekly_goal_or(&self, default_goal: i64) -> i64 {
        match self.reward_profile.as_ref().and_then(|p| p.weekly_goal) {
            Some(goal) if goal != 0 => goal,
            _ => default_goal,
        }
    }
}

/// Whether something counts toward a member's rewards.
pub trait Eligibility {
    fn is_eligible_for(&self, member_id: &str) -> bool;
}

impl Eligibility for Habit {
    fn is_eligible_for(&self, member_id: &str) -> bool {
        self.is_active && !self.is_archived && self.assigned_members.iter().any(|m| m == member_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn habit(id: &str, members: &[&str]) -> Habit {
        Habit {
            id: id.to_string(),
            name: id.to_string(),
            assigned_members: members.iter().map(|m| m.to_string()).collect(),
            is_active: true,
            ..Default::default()
        }
    }

    #[test]
    fn habit_eligibility_requires_assignment_active_and_not_archived() {
        let h = habit("h1", &["m1"]);
        assert!(h.is_eligible_for("m1"));
        assert!(!h.is_eligible_for("m2"));

        let archived = Habit { is_archived: true, ..h.clone() };
        assert!(!archived.is_eligible_for("m1"));

        let inactive = Habit { is_active: false, ..h };
        assert!(!inactive.is_eligible_for("m1"));
    }

    #[test]
    fn completion_day_rejects_malformed_dates() {
        let mut c = Completion::done("m1", "h1", NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(c.date.as_deref(), Some("2024-03-09"));
        assert_eq!(c.day(), NaiveDate::from_ymd_opt(2024, 3, 9));

        c.date = Some("03/09/2024".to_string());
        assert_eq!(c.day(), None);

        c.date = None;
        assert_eq!(c.day(), None);
    }

    #[test]
    fn completion_day_requires_canonical_form() {
        let mut c = Completion::default();
        for raw in ["2024-3-3", "2024-03-3", " 2024-03-03", "2024-03-03 ", "+2024-03-03"] {
            c.date = Some(raw.to_string());
            assert_eq!(c.day(), None, "accepted {raw:?}");
        }

        c.date = Some("2024-03-03".to_string());
        assert_eq!(c.day(), NaiveDate::from_ymd_opt(2024, 3, 3));
    }

    #[test]
    fn weekly_goal_falls_back_on_absent_or_zero() {
        let mut m = Member { id: "m1".into(), is_active: true, ..Default::default() };
        assert_eq!(m.weekly_goal_or(4), 4);

        m.reward_profile = Some(RewardProfile { weekly_goal: Some(0), ..Default::default() });
        assert_eq!(m.weekly_goal_or(4), 4);

        m.reward_profile = Some(RewardProfile { weekly_goal: Some(6), ..Default::default() });
        assert_eq!(m.weekly_goal_or(4), 6);
    }

    #[test]
    fn deserializes_camel_case_documents_with_missing_fields() {
        let json = r#"{
            "id": "m1",
            "isActive": true,
            "rewardProfile": { "dailyFocusHabitIds": ["h2", "h1"] }
        }"#;
        let m: Member = serde_json::from_str(json).unwrap();
        assert_eq!(m.configured_focus(), &["h2".to_string(), "h1".to_string()]);
        assert_eq!(m.weekly_goal_or(4), 4);

        let c: Completion = serde_json::from_str(r#"{ "habitId": "h1" }"#).unwrap();
        assert!(!c.is_completed());
        assert_eq!(c.member_id, None);
    }
}
