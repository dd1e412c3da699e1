//! Property tests for reward progress invariants.

use chrono::{Days, NaiveDate};
use momentum_core::{Completion, Habit, Member, RewardEngine, RewardProfile};
use proptest::prelude::*;

const HABITS: [&str; 4] = ["h0", "h1", "h2", "h3"];
const MEMBERS: [&str; 2] = ["m0", "m1"];

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
}

fn habits() -> Vec<Habit> {
    HABITS
        .iter()
        .map(|id| Habit {
            id: id.to_string(),
            name: id.to_string(),
            assigned_members: MEMBERS.iter().map(|m| m.to_string()).collect(),
            is_active: true,
            ..Default::default()
        })
        .collect()
}

fn arb_completion() -> impl Strategy<Value = Completion> {
    (0..MEMBERS.len(), 0..HABITS.len(), 0u64..40, any::<bool>()).prop_map(|(m, h, d, done)| {
        let mut c = Completion::done(MEMBERS[m], HABITS[h], today().checked_sub_days(Days::new(d)).unwrap());
        c.completed = Some(done);
        c
    })
}

fn arb_member(id: &'static str) -> impl Strategy<Value = Member> {
    (prop::collection::vec(0..HABITS.len() + 1, 0..4), proptest::option::of(0i64..8)).prop_map(
        move |(focus, weekly_goal)| Member {
            id: id.to_string(),
            name: id.to_string(),
            is_active: true,
            reward_profile: Some(RewardProfile {
                // Index HABITS.len() stands for a deleted habit.
                daily_focus_habit_ids: focus
                    .into_iter()
                    .map(|i| HABITS.get(i).map_or("deleted".to_string(), |h| h.to_string()))
                    .collect(),
                weekly_goal,
            }),
        },
    )
}

proptest! {
    #[test]
    fn weekly_invariants_hold(
        m0 in arb_member("m0"),
        m1 in arb_member("m1"),
        completions in prop::collection::vec(arb_completion(), 0..120),
    ) {
        let progress = RewardEngine::new().compute(&[m0, m1], &habits(), &completions, today());
        prop_assert_eq!(progress.len(), 2);

        for p in progress.values() {
            prop_assert_eq!(p.weekly.history.len(), 7);
            prop_assert_eq!(p.weekly.history[6].date, today());
            prop_assert!(p.weekly.history.windows(2).all(|w| w[0].date < w[1].date));

            let earned = p.weekly.history.iter().filter(|d| d.earned).count() as u32;
            prop_assert_eq!(p.weekly.tokens, earned);
            prop_assert_eq!(p.available_tokens, p.weekly.tokens);
            prop_assert!(p.monthly_tokens >= p.weekly.tokens);

            prop_assert_eq!(
                p.weekly.ready_for_reward,
                p.weekly.goal > 0 && i64::from(p.weekly.tokens) >= p.weekly.goal
            );
            prop_assert_eq!(
                p.today.token_earned,
                p.today.total > 0 && p.today.completed == p.today.total
            );
            prop_assert_eq!(p.today.token_earned, p.weekly.history[6].earned);

            if p.focus_habits.is_empty() {
                prop_assert!(!p.today.token_earned);
                prop_assert!(p.weekly.history.iter().all(|d| !d.earned));
            }
        }
    }

    #[test]
    fn computation_is_deterministic(
        m0 in arb_member("m0"),
        completions in prop::collection::vec(arb_completion(), 0..80),
    ) {
        let engine = RewardEngine::new();
        let members = vec![m0];
        let first = engine.compute(&members, &habits(), &completions, today());
        let second = engine.compute(&members, &habits(), &completions, today());
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
