//! Reward momentum engine.
//!
//! Converts per-day habit completions into daily focus tokens, trailing
//! weekly and monthly token counts, and reward readiness for each member.
//!
//! The pipeline runs once per recomputation:
//! - [`CompletionIndex`] is built once from the flat completion log
//! - [`focus`] resolves each member's focus habits
//! - [`window`] walks trailing calendar days against the shared index
//! - [`RewardEngine`] stitches the per-member results into one map
//!
//! Everything here is pure and synchronous. "Today" is always an explicit
//! argument except at [`RewardEngine::compute_now`].

pub mod focus;
mod index;
mod progress;
pub mod window;

pub use focus::FocusSelection;
pub use index::CompletionIndex;
pub use progress::{
    MemberRewardProgress, RewardConfig, RewardEngine, TodayProgress, WeeklyProgress,
};
pub use window::RewardDaySnapshot;
