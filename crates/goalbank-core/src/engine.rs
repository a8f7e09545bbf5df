//! Savings engine.
//!
//! [`EngineState`] owns every collection of a session. Inputs are applied
//! with [`EngineState::apply`], which is pure: it returns the next state and
//! the events describing the change, and leaves `self` untouched on error.
//! [`SavingsEngine`] wraps a state, commits successful inputs and renders
//! [`Snapshot`]s for the UI.
//!
//! ## Contribution pipeline
//!
//! ```text
//! validate -> goal += amount -> streak -> points -> challenges -> rewards
//!          -> milestone crossings -> history
//! ```

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::budget::{Budget, CategorySpending, Transaction, DEFAULT_CATEGORY};
use crate::challenge::{Challenge, ChallengeEngine};
use crate::error::{CoreError, EntityKind, Result, ValidationError};
use crate::events::Event;
use crate::goal::{FriendGoal, Goal, GoalTracker, ProgressMode};
use crate::history::{ContributionHistory, ContributionRecord};
use crate::milestone::{Milestone, MilestoneStatus, MilestoneView};
use crate::points::{PointsLedger, PointsState, DEFAULT_POINTS_PER_LEVEL, DEFAULT_WON_PER_POINT};
use crate::product::{FinancialProduct, ProductCatalog, ProductQuery};
use crate::reward::{Reward, RewardEngine};
use crate::streak::{SameDayPolicy, StreakState, StreakTracker};

/// Tunables applied to every input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub won_per_point: u64,
    pub points_per_level: u64,
    pub same_day: SameDayPolicy,
    pub progress_mode: ProgressMode,
    /// Number of history entries included in snapshots.
    pub recent_history: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            won_per_point: DEFAULT_WON_PER_POINT,
            points_per_level: DEFAULT_POINTS_PER_LEVEL,
            same_day: SameDayPolicy::default(),
            progress_mode: ProgressMode::default(),
            recent_history: 5,
        }
    }
}

impl Settings {
    fn ledger(&self, points: &PointsState) -> PointsLedger {
        PointsLedger::with_rates(self.won_per_point, self.points_per_level).with_total(points.total_points)
    }

    fn streak_tracker(&self, streak: &StreakState) -> StreakTracker {
        StreakTracker::with_policy(self.same_day).with_state(streak.clone())
    }
}

/// Events submitted by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Input {
    AddGoal {
        title: String,
        target_amount: u64,
        target_date: NaiveDate,
    },
    RecordContribution {
        goal_id: String,
        amount: u64,
        /// Defaults to today.
        #[serde(default)]
        date: Option<NaiveDate>,
        #[serde(default)]
        memo: Option<String>,
    },
    ToggleFavorite {
        id: String,
    },
    /// Removes a goal, or a product when no goal has the id.
    DeleteEntity {
        id: String,
    },
    /// An expense against the monthly budget.
    Spend {
        amount: u64,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        category: Option<String>,
        /// Defaults to today.
        #[serde(default)]
        date: Option<NaiveDate>,
    },
    RecordIncome {
        label: String,
        amount: u64,
        #[serde(default)]
        date: Option<NaiveDate>,
    },
    TopUpBudget {
        amount: u64,
    },
}

impl Input {
    pub fn kind(&self) -> &'static str {
        match self {
            Input::AddGoal { .. } => "add_goal",
            Input::RecordContribution { .. } => "record_contribution",
            Input::ToggleFavorite { .. } => "toggle_favorite",
            Input::DeleteEntity { .. } => "delete_entity",
            Input::Spend { .. } => "spend",
            Input::RecordIncome { .. } => "record_income",
            Input::TopUpBudget { .. } => "top_up_budget",
        }
    }
}

/// Everything a session owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    pub goals: GoalTracker,
    pub streak: StreakState,
    pub points: PointsState,
    pub challenges: Vec<Challenge>,
    pub rewards: Vec<Reward>,
    pub milestones: Vec<Milestone>,
    pub products: ProductCatalog,
    pub budget: Budget,
    pub history: ContributionHistory,
    #[serde(default)]
    pub friends: Vec<FriendGoal>,
}

impl EngineState {
    /// Apply `input` and return the resulting state with its events.
    ///
    /// `today` is used for new goals and for contributions without a date.
    pub fn apply(&self, input: &Input, settings: &Settings, today: NaiveDate) -> Result<(EngineState, Vec<Event>)> {
        let mut next = self.clone();
        let events = next.apply_in_place(input, settings, today)?;
        Ok((next, events))
    }

    fn apply_in_place(&mut self, input: &Input, settings: &Settings, today: NaiveDate) -> Result<Vec<Event>> {
        debug!(input = input.kind(), "applying input");
        match input {
            Input::AddGoal {
                title,
                target_amount,
                target_date,
            } => {
                let (_, event) = self.add_goal(title, *target_amount, *target_date, today)?;
                Ok(vec![event])
            }
            Input::RecordContribution {
                goal_id,
                amount,
                date,
                memo,
            } => self.record_contribution(goal_id, *amount, date.unwrap_or(today), memo.clone(), settings),
            Input::ToggleFavorite { id } => {
                let is_favorite = self.products.toggle_favorite(id)?;
                Ok(vec![Event::FavoriteToggled {
                    product_id: id.clone(),
                    is_favorite,
                }])
            }
            Input::DeleteEntity { id } => {
                if self.goals.contains(id) {
                    self.goals.remove(id)?;
                    info!(goal = %id, "goal deleted");
                    Ok(vec![Event::GoalDeleted { goal_id: id.clone() }])
                } else if self.products.get(id).is_some() {
                    self.products.remove(id)?;
                    Ok(vec![Event::ProductDeleted { product_id: id.clone() }])
                } else {
                    Err(CoreError::not_found(EntityKind::Entity, id.as_str()))
                }
            }
            Input::Spend {
                amount,
                label,
                category,
                date,
            } => {
                let category = category.as_deref().unwrap_or(DEFAULT_CATEGORY);
                let label = label.as_deref().unwrap_or(category);
                let remaining = self.budget.spend(label, category, *amount, date.unwrap_or(today))?;
                let category = self
                    .budget
                    .transactions
                    .last()
                    .map(|t| t.category.clone())
                    .unwrap_or_default();
                debug!(amount = *amount, category = %category, remaining, "expense recorded");
                Ok(vec![Event::BudgetSpent {
                    amount: *amount,
                    category,
                    remaining,
                }])
            }
            Input::RecordIncome { label, amount, date } => {
                self.budget.record_income(label, *amount, date.unwrap_or(today))?;
                Ok(vec![Event::IncomeRecorded {
                    label: label.trim().to_string(),
                    amount: *amount,
                }])
            }
            Input::TopUpBudget { amount } => {
                let remaining = self.budget.deposit(*amount)?;
                Ok(vec![Event::BudgetToppedUp {
                    amount: *amount,
                    remaining,
                }])
            }
        }
    }

    /// Goal creation validates before pushing, so a failure leaves `self` as it was.
    fn add_goal(
        &mut self,
        title: &str,
        target_amount: u64,
        target_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<(Goal, Event)> {
        let goal = self.goals.add_goal(title, target_amount, target_date, today)?;
        info!(goal = %goal.id, title = %goal.title, "goal added");
        let event = Event::GoalAdded {
            goal_id: goal.id.clone(),
            title: goal.title.clone(),
            target_amount: goal.target_amount,
            target_date: goal.target_date,
        };
        Ok((goal, event))
    }

    fn record_contribution(
        &mut self,
        goal_id: &str,
        amount: u64,
        date: NaiveDate,
        memo: Option<String>,
        settings: &Settings,
    ) -> Result<Vec<Event>> {
        if amount == 0 {
            return Err(ValidationError::NonPositiveAmount {
                field: "amount".into(),
            }
            .into());
        }

        let saved_before = self.goals.total_saved();
        let goal = self.goals.record_contribution(goal_id, amount)?;
        let mut events = vec![Event::ContributionRecorded {
            goal_id: goal.id.clone(),
            amount,
            new_amount: goal.current_amount,
            at: date,
        }];

        let mut tracker = settings.streak_tracker(&self.streak);
        self.streak = tracker.update(date).clone();
        events.push(Event::StreakUpdated {
            current_streak: self.streak.current_streak,
            longest_streak: self.streak.longest_streak,
            at: date,
        });

        let mut ledger = settings.ledger(&self.points);
        let earned = ledger.earn(amount);
        events.push(Event::PointsEarned {
            earned,
            total_points: ledger.total_points(),
        });

        for challenge in ChallengeEngine::reevaluate(&goal, &self.streak, &mut self.challenges) {
            ledger.award(challenge.payout.points());
            events.push(Event::ChallengeCompleted {
                challenge_id: challenge.id,
                payout: challenge.payout,
            });
        }
        self.points = ledger.state().clone();

        for reward_id in RewardEngine::reevaluate(&self.streak, &self.points, &mut self.rewards) {
            events.push(Event::RewardUnlocked { reward_id });
        }

        let saved_after = self.goals.total_saved();
        for milestone in MilestoneView::newly_achieved(saved_before, saved_after, &self.milestones) {
            info!(milestone = %milestone.id, total = saved_after, "milestone achieved");
            events.push(Event::MilestoneAchieved {
                milestone_id: milestone.id.clone(),
                total_saved: saved_after,
            });
        }

        self.history.push(ContributionRecord {
            goal_id: goal.id,
            amount,
            date,
            memo,
        });

        debug!(
            goal = goal_id,
            amount,
            streak = self.streak.current_streak,
            points = self.points.total_points,
            "contribution recorded"
        );
        Ok(events)
    }
}

/// A goal as the UI renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: u32,
    pub days_remaining: i64,
    pub is_overdue: bool,
    pub amount_left: u64,
}

/// A friend's goal with the same progress numbers as the user's own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendGoalView {
    pub friend: String,
    #[serde(flatten)]
    pub view: GoalView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetView {
    #[serde(flatten)]
    pub budget: Budget,
    pub remaining: u64,
    pub usage_percent: u32,
    /// Projected month-end spending.
    pub forecast: u64,
    pub ranking: Vec<CategorySpending>,
}

/// Profile header numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub total_saved: u64,
    /// Unlocked rewards plus completed challenges.
    pub achievements: usize,
    pub level: u64,
    pub total_points: u64,
    pub points_to_next_level: u64,
}

/// Immutable view model of the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub today: NaiveDate,
    pub goals: Vec<GoalView>,
    pub streak: StreakState,
    pub points: PointsState,
    pub challenges: Vec<Challenge>,
    pub rewards: Vec<Reward>,
    pub milestones: Vec<MilestoneStatus>,
    pub favorites: Vec<FinancialProduct>,
    pub budget: BudgetView,
    pub recent_contributions: Vec<ContributionRecord>,
    pub recent_transactions: Vec<Transaction>,
    pub friend_goals: Vec<FriendGoalView>,
    pub profile: ProfileSummary,
}

/// Owns one session's state and settings.
#[derive(Debug, Clone)]
pub struct SavingsEngine {
    state: EngineState,
    settings: Settings,
    /// Fixed "today"; falls back to the local date when unset.
    today: Option<NaiveDate>,
}

impl SavingsEngine {
    pub fn new(state: EngineState, settings: Settings) -> Self {
        Self {
            state,
            settings,
            today: None,
        }
    }

    /// Pin the engine's notion of today.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply an input and commit the result. On error nothing changes.
    pub fn apply(&mut self, input: &Input) -> Result<Vec<Event>> {
        let (next, events) = self.state.apply(input, &self.settings, self.today())?;
        self.state = next;
        for event in &events {
            debug!(event = event.kind(), "event");
        }
        Ok(events)
    }

    /// Apply inputs in order, stopping at the first failure.
    pub fn apply_all<'a>(&mut self, inputs: impl IntoIterator<Item = &'a Input>) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        for input in inputs {
            events.extend(self.apply(input)?);
        }
        Ok(events)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn add_goal(&mut self, title: &str, target_amount: u64, target_date: NaiveDate) -> Result<Goal> {
        let today = self.today();
        let (goal, event) = self.state.add_goal(title, target_amount, target_date, today)?;
        debug!(event = event.kind(), "event");
        Ok(goal)
    }

    /// Record a contribution and return the updated snapshot.
    pub fn record_contribution(&mut self, goal_id: &str, amount: u64, date: Option<NaiveDate>) -> Result<Snapshot> {
        self.apply(&Input::RecordContribution {
            goal_id: goal_id.to_string(),
            amount,
            date,
            memo: None,
        })?;
        Ok(self.snapshot())
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        self.apply(&Input::ToggleFavorite { id: id.to_string() })?;
        self.state
            .products
            .get(id)
            .map(|p| p.is_favorite)
            .ok_or_else(|| CoreError::not_found(EntityKind::Product, id))
    }

    pub fn delete_entity(&mut self, id: &str) -> Result<()> {
        self.apply(&Input::DeleteEntity { id: id.to_string() })?;
        Ok(())
    }

    /// Spend from the budget today and return what is left.
    pub fn spend(&mut self, label: &str, category: &str, amount: u64) -> Result<u64> {
        self.apply(&Input::Spend {
            amount,
            label: Some(label.to_string()),
            category: Some(category.to_string()),
            date: None,
        })?;
        Ok(self.state.budget.remaining())
    }

    pub fn record_income(&mut self, label: &str, amount: u64) -> Result<()> {
        self.apply(&Input::RecordIncome {
            label: label.to_string(),
            amount,
            date: None,
        })?;
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn goal_view(&self, goal: &Goal) -> GoalView {
        let today = self.today();
        GoalView {
            goal: goal.clone(),
            progress: goal.progress(self.settings.progress_mode),
            days_remaining: goal.days_remaining(today),
            is_overdue: goal.is_overdue(today),
            amount_left: goal.amount_left(),
        }
    }

    pub fn goal_views(&self) -> Vec<GoalView> {
        self.state.goals.goals().iter().map(|g| self.goal_view(g)).collect()
    }

    pub fn friend_goals(&self) -> Vec<FriendGoalView> {
        self.state
            .friends
            .iter()
            .map(|f| FriendGoalView {
                friend: f.friend.clone(),
                view: self.goal_view(&f.goal),
            })
            .collect()
    }

    pub fn budget_view(&self) -> BudgetView {
        let budget = &self.state.budget;
        BudgetView {
            budget: budget.clone(),
            remaining: budget.remaining(),
            usage_percent: budget.usage_percent(),
            forecast: budget.forecast(self.today()),
            ranking: budget.spending_ranking(),
        }
    }

    pub fn milestones(&self) -> Vec<MilestoneStatus> {
        MilestoneView::evaluate(self.state.goals.goals(), &self.state.milestones)
    }

    pub fn products(&self, query: &ProductQuery) -> Vec<&FinancialProduct> {
        self.state.products.query(query)
    }

    pub fn profile(&self) -> ProfileSummary {
        let ledger = self.settings.ledger(&self.state.points);
        let achievements = self.state.rewards.iter().filter(|r| r.is_unlocked).count()
            + self.state.challenges.iter().filter(|c| c.is_completed).count();
        ProfileSummary {
            total_saved: self.state.goals.total_saved(),
            achievements,
            level: ledger.level(),
            total_points: ledger.total_points(),
            points_to_next_level: ledger.points_to_next_level(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            today: self.today(),
            goals: self.goal_views(),
            streak: self.state.streak.clone(),
            points: self.state.points.clone(),
            challenges: self.state.challenges.clone(),
            rewards: self.state.rewards.clone(),
            milestones: self.milestones(),
            favorites: self.state.products.favorites().into_iter().cloned().collect(),
            budget: self.budget_view(),
            recent_contributions: self.state.history.recent(self.settings.recent_history),
            recent_transactions: self.state.budget.recent_transactions(self.settings.recent_history),
            friend_goals: self.friend_goals(),
            profile: self.profile(),
        }
    }
}
