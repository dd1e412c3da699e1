//! # Momentum Core Library
//!
//! This library turns raw per-day habit completions into a gamified progress
//! model for every member of a household: a daily "focus" token, weekly and
//! monthly token counts, a seven-day history strip, and reward readiness.
//!
//! ## Architecture
//!
//! - **Rewards**: a pure, synchronous engine over already-fetched collections.
//!   The caller supplies "today" so the computation is fully deterministic.
//! - **Snapshot**: JSON input bundle handed over by the data-access layer
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`RewardEngine`]: Computes [`MemberRewardProgress`] for every active member
//! - [`CompletionIndex`]: member → date → completed habit lookup
//! - [`RewardInputs`]: Members, habits and completions for one recomputation
//! - [`Config`]: Application configuration management

pub mod error;
pub mod model;
pub mod rewards;
pub mod snapshot;
pub mod storage;

pub use error::{ConfigError, CoreError, SnapshotError};
pub use model::{Completion, Eligibility, Habit, Member, RewardProfile};
pub use rewards::{
    CompletionIndex, FocusSelection, MemberRewardProgress, RewardConfig, RewardDaySnapshot,
    RewardEngine, TodayProgress, WeeklyProgress,
};
pub use snapshot::RewardInputs;
pub use storage::Config;
