//! Sample session the app starts with.
//!
//! Every front end begins from this data set; nothing is persisted between
//! sessions.

use chrono::NaiveDate;

use crate::budget::{Budget, Transaction, TransactionKind};
use crate::challenge::{Challenge, Payout};
use crate::engine::EngineState;
use crate::goal::{FriendGoal, Goal, GoalTracker};
use crate::history::{ContributionHistory, ContributionRecord};
use crate::milestone::Milestone;
use crate::points::PointsState;
use crate::product::{FinancialProduct, ProductCatalog, ProductCategory};
use crate::reward::Reward;
use crate::streak::StreakState;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn goal(id: &str, title: &str, current: u64, target: u64, target_date: NaiveDate) -> Option<Goal> {
    Goal::new(id, title, target, target_date, date(2024, 1, 1))
        .ok()
        .map(|g| g.with_current_amount(current))
}

pub fn sample_goals() -> Vec<Goal> {
    [
        goal("dream-car", "Dream car", 500_000, 3_000_000, date(2025, 12, 31)),
        goal("travel", "Travel fund", 2_400_000, 3_000_000, date(2025, 6, 30)),
        goal("wedding", "Wedding fund", 15_000_000, 50_000_000, date(2027, 10, 31)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn sample_history() -> ContributionHistory {
    let mut history = ContributionHistory::new();
    for (amount, day, memo) in [
        (300_000, 18, "Transfer to savings account"),
        (200_000, 22, "Deposit from a friend"),
        (500_000, 25, "Salary"),
    ] {
        history.push(ContributionRecord {
            goal_id: "dream-car".into(),
            amount,
            date: date(2024, 12, day),
            memo: Some(memo.into()),
        });
    }
    history
}

pub fn sample_rewards() -> Vec<Reward> {
    let mut thrifty = Reward::new("thrifty", "Thrifty", "Hit a monthly spending goal").requires_points(300);
    thrifty.is_unlocked = true;
    let mut pro = Reward::new("savings-pro", "Savings pro", "Saved three months in a row").requires_streak(90);
    pro.is_unlocked = true;

    vec![
        thrifty,
        pro,
        Reward::new("week-warrior", "Week warrior", "Save seven days in a row").requires_streak(7),
        Reward::new("point-collector", "Point collector", "Collect 1,000 points").requires_points(1_000),
        Reward::new("devoted-saver", "Devoted saver", "Save 30 days in a row or collect 2,000 points")
            .requires_streak(30)
            .requires_points(2_000),
    ]
}

pub fn sample_challenges() -> Vec<Challenge> {
    vec![
        Challenge::new(
            "car-halfway",
            "Halfway there",
            "Save 1,500,000 won towards the dream car",
            1_500_000,
            Payout::Points { points: 50 },
        )
        .for_goal("dream-car")
        .with_current_amount(500_000),
        Challenge::new(
            "pack-your-bags",
            "Pack your bags",
            "Fully fund the travel goal",
            3_000_000,
            Payout::BonusRate { basis_points: 30 },
        )
        .for_goal("travel")
        .with_current_amount(2_400_000),
        Challenge::new(
            "steady-saver",
            "Steady saver",
            "Reach 1,000,000 won on any goal with a five day streak",
            1_000_000,
            Payout::Points { points: 100 },
        )
        .requires_streak(5),
    ]
}

pub fn sample_milestones() -> Vec<Milestone> {
    vec![
        Milestone::new("first-million", "First million", 1_000_000, 100),
        Milestone::new("ten-million", "Ten million club", 10_000_000, 300),
        Milestone::new("twenty-million", "Twenty million", 20_000_000, 500),
        Milestone::new("fifty-million", "Fifty million", 50_000_000, 1_000),
    ]
}

pub fn sample_products() -> ProductCatalog {
    let product = |id: &str,
                   title: &str,
                   description: &str,
                   benefit: &str,
                   tag: &str,
                   rate: u32,
                   min_amount: u64,
                   period_months: Option<u32>,
                   category: ProductCategory| FinancialProduct {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        benefit: benefit.into(),
        tag: tag.into(),
        interest_rate_bp: rate,
        min_amount,
        period_months,
        category,
        is_favorite: false,
    };

    ProductCatalog::new(vec![
        product(
            "youth-hope",
            "Youth hope savings",
            "4.5% a year",
            "Up to 3.0% preferential rate",
            "Popular",
            450,
            10_000,
            Some(24),
            ProductCategory::Savings,
        ),
        product(
            "salary-plus",
            "Salary plus account",
            "No fees",
            "Unlimited free transfers",
            "Recommended",
            250,
            0,
            None,
            ProductCategory::Deposit,
        ),
        product(
            "smart-term",
            "Smart term deposit",
            "3.8% a year",
            "Online preferential rate",
            "New",
            380,
            100_000,
            Some(12),
            ProductCategory::Deposit,
        ),
        product(
            "global-equity",
            "Global equity fund",
            "Overseas equity fund",
            "Diversified investing",
            "Recommended",
            720,
            500_000,
            Some(36),
            ProductCategory::Investment,
        ),
    ])
}

/// December budget; the logged expenses add up to `spent`.
pub fn sample_budget() -> Budget {
    let tx = |label: &str, category: &str, amount: u64, day: u32, kind: TransactionKind| Transaction {
        label: label.into(),
        category: category.into(),
        amount,
        date: date(2024, 12, day),
        kind,
    };
    use TransactionKind::{Expense, Income};

    let mut budget = Budget::new("2024-12", 1_200_000);
    budget.transactions = vec![
        tx("Lunch set", "Food", 44_500, 3, Expense),
        tx("Metro pass", "Transport", 62_000, 5, Expense),
        tx("Grocery run", "Food", 150_000, 10, Expense),
        tx("Winter coat", "Shopping", 60_000, 14, Expense),
        tx("Taxi", "Transport", 28_000, 19, Expense),
        tx("Transfer from friend", "Income", 50_000, 22, Income),
        tx("Starbucks", "Food", 5_500, 24, Expense),
        tx("Salary", "Income", 2_800_000, 25, Income),
    ];
    budget.spent = budget
        .transactions
        .iter()
        .filter(|t| t.kind == Expense)
        .map(|t| t.amount)
        .sum();
    budget
}

pub fn sample_friends() -> Vec<FriendGoal> {
    [
        ("Friend 1", goal("friend-bag", "Designer bag", 1_200_000, 2_000_000, date(2025, 3, 31))),
        ("Friend 2", goal("friend-deposit", "Jeonse deposit", 2_000_000, 5_000_000, date(2026, 2, 28))),
        ("Friend 3", goal("friend-us-trip", "US trip", 500_000, 2_000_000, date(2025, 8, 31))),
    ]
    .into_iter()
    .filter_map(|(friend, goal)| goal.map(|g| FriendGoal::new(friend, g)))
    .collect()
}

/// The full sample session.
pub fn sample_state() -> EngineState {

    EngineState {
        goals: GoalTracker::from_goals(sample_goals()),
        streak: StreakState {
            current_streak: 1,
            longest_streak: 92,
            last_contribution_date: Some(date(2024, 12, 25)),
        },
        points: PointsState { total_points: 420 },
        challenges: sample_challenges(),
        rewards: sample_rewards(),
        milestones: sample_milestones(),
        products: sample_products(),
        budget: sample_budget(),
        history: sample_history(),
        friends: sample_friends(),
    }
}
