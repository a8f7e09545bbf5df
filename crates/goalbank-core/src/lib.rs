//! # Goalbank Core Library
//!
//! This library provides the rule engine behind the Goalbank savings app:
//! savings goals, contribution streaks, reward points, challenges, rewards
//! and cumulative milestones. Front ends (the CLI in this workspace) submit
//! input events and render the snapshots the engine hands back.
//!
//! ## Architecture
//!
//! - **Engine**: owns all session state and applies one input at a time,
//!   either purely ([`EngineState::apply`]) or through the committing
//!   [`SavingsEngine`] facade
//! - **Trackers**: goals, streak and points ledger
//! - **Catalogs**: rewards and challenges carry their unlock thresholds as
//!   data, checked by one shared predicate ([`UnlockCriteria`])
//! - **Storage**: TOML-based configuration only; sessions start from
//!   [`seed::sample_state`]
//!
//! ## Key Components
//!
//! - [`SavingsEngine`]: session facade returning [`Snapshot`]s
//! - [`GoalTracker`], [`StreakTracker`], [`PointsLedger`]
//! - [`ChallengeEngine`], [`RewardEngine`], [`MilestoneView`]
//! - [`Config`]: application configuration management

pub mod budget;
pub mod challenge;
pub mod criteria;
pub mod engine;
pub mod error;
pub mod events;
pub mod goal;
pub mod history;
pub mod milestone;
pub mod points;
pub mod product;
pub mod reward;
pub mod seed;
pub mod storage;
pub mod streak;

pub use budget::{Budget, CategorySpending, Transaction, TransactionKind};
pub use challenge::{Challenge, ChallengeEngine, Payout};
pub use criteria::{MatchMode, Progress, UnlockCriteria};
pub use engine::{BudgetView, EngineState, FriendGoalView, GoalView, Input, ProfileSummary, SavingsEngine, Settings, Snapshot};
pub use error::{ConfigError, CoreError, EntityKind, Result, ValidationError};
pub use events::Event;
pub use goal::{FriendGoal, Goal, GoalTracker, ProgressMode};
pub use history::{ContributionHistory, ContributionRecord};
pub use milestone::{Milestone, MilestoneStatus, MilestoneView};
pub use points::{PointsLedger, PointsState};
pub use product::{FinancialProduct, ProductCatalog, ProductCategory, ProductQuery, SortDirection, SortKey};
pub use reward::{Reward, RewardEngine};
pub use storage::Config;
pub use streak::{SameDayPolicy, StreakState, StreakTracker};
