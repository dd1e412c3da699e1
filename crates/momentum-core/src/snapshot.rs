//! Input bundle handed over by the data-access layer.
//!
//! A snapshot is a JSON document with `members`, `habits` and
//! `completions` arrays. Any missing array is treated as empty, and a
//! record that does not fit its type is skipped rather than failing the load.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, SnapshotError};
use crate::model::{Completion, Habit, Member};
use crate::rewards::{MemberRewardProgress, RewardEngine};

/// Members, habits and completions for one recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardInputs {
    #[serde(default, deserialize_with = "lenient_records")]
    pub members: Vec<Member>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub habits: Vec<Habit>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub completions: Vec<Completion>,
}

/// Deserialize an array element by element, dropping elements that fail.
/// A non-array value (including `null`) yields an empty list.
fn lenient_records<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let serde_json::Value::Array(items) = serde_json::Value::deserialize(deserializer)? else {
        tracing::debug!(kind = std::any::type_name::<T>(), "expected an array, using empty list");
        return Ok(Vec::new());
    };

    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if records.len() < total {
        tracing::debug!(
            kind = std::any::type_name::<T>(),
            skipped = total - records.len(),
            kept = records.len(),
            "skipped malformed records"
        );
    }
    Ok(records)
}

impl RewardInputs {
    /// Parse a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let inputs: RewardInputs =
            serde_json::from_str(&content).map_err(|source| SnapshotError::ParseFailed {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            members = inputs.members.len(),
            habits = inputs.habits.len(),
            completions = inputs.completions.len(),
            "loaded snapshot"
        );
        Ok(inputs)
    }

    /// Run `engine` over this snapshot.
    pub fn progress(&self, engine: &RewardEngine, today: NaiveDate) -> BTreeMap<String, MemberRewardProgress> {
        engine.compute(&self.members, &self.habits, &self.completions, today)
    }

    pub fn default_focus(&self, engine: &RewardEngine) -> BTreeMap<String, Vec<String>> {
        engine.default_focus_map(&self.members, &self.habits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use std::io::Write;

    #[test]
    fn missing_collections_default_to_empty() {
        let inputs = RewardInputs::from_json("{}").unwrap();
        assert_eq!(inputs, RewardInputs::default());

        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(inputs.progress(&RewardEngine::new(), today).is_empty());
    }

    #[test]
    fn malformed_completions_do_not_fail_the_load() {
        let json = r#"{
            "completions": [
                { "habitId": "h1", "memberId": "m1", "date": "2024-01-01", "completed": true },
                { "memberId": "m1", "completed": true },
                { "habitId": "h1", "memberId": "m1", "date": "not-a-date", "completed": true }
            ]
        }"#;
        let inputs = RewardInputs::from_json(json).unwrap();
        assert_eq!(inputs.completions.len(), 3);
    }

    #[test]
    fn wrong_typed_records_are_skipped() {
        let json = r#"{
            "members": [
                { "id": "m1", "isActive": true },
                { "id": "m2", "isActive": null },
                { "name": "no id", "isActive": true }
            ],
            "habits": [
                { "id": "h1", "name": "Read", "assignedMembers": ["m1"], "isActive": true },
                { "name": "no id", "assignedMembers": ["m1"], "isActive": true },
                "not an object"
            ],
            "completions": [
                { "habitId": "h1", "memberId": "m1", "date": "2024-03-03", "completed": true },
                { "habitId": "h1", "memberId": "m1", "date": 20240303, "completed": true },
                { "habitId": "h1", "memberId": "m1", "date": "2024-03-02", "completed": "yes" }
            ]
        }"#;
        let inputs = RewardInputs::from_json(json).unwrap();
        assert_eq!(inputs.members.len(), 1);
        assert_eq!(inputs.habits.len(), 1);
        assert_eq!(inputs.completions.len(), 1);

        let today = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        let progress = inputs.progress(&RewardEngine::new(), today);
        assert!(progress["m1"].today.token_earned);
        assert_eq!(progress["m1"].weekly.tokens, 1);
    }

    #[test]
    fn non_array_collections_are_empty() {
        let inputs = RewardInputs::from_json(r#"{ "members": null, "habits": 5 }"#).unwrap();
        assert_eq!(inputs, RewardInputs::default());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "members": [{{ "id": "m1", "isActive": true }}] }}"#).unwrap();

        let inputs = RewardInputs::load(file.path()).unwrap();
        assert_eq!(inputs.members.len(), 1);
        assert!(inputs.habits.is_empty());
    }

    #[test]
    fn load_reports_missing_file_and_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            RewardInputs::load(&missing),
            Err(CoreError::Snapshot(SnapshotError::ReadFailed { .. }))
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "[1, 2").unwrap();
        assert!(matches!(
            RewardInputs::load(&bad),
            Err(CoreError::Snapshot(SnapshotError::ParseFailed { .. }))
        ));
    }
}
