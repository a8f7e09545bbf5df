//! Goal commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use goalbank_core::{Event, GoalView, Input};

use super::{open_session, print_json, SessionOpts};
use crate::format::{bar, won};

#[derive(Subcommand)]
pub enum GoalAction {
    /// List goals with progress
    List {
        #[arg(long)]
        json: bool,
    },
    /// Create a new goal
    Add {
        /// Goal title
        title: String,
        /// Target amount in won
        target_amount: u64,
        /// Target date (YYYY-MM-DD)
        target_date: NaiveDate,
        #[arg(long)]
        json: bool,
    },
    /// Add savings to a goal
    Contribute {
        /// Goal ID
        goal_id: String,
        /// Amount in won
        amount: u64,
        /// Contribution date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Optional note shown in the savings history
        #[arg(long)]
        memo: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Friends' goals and their progress
    Friends {
        #[arg(long)]
        json: bool,
    },
    /// Recent savings history
    History {
        /// Number of entries (default: from config)
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Delete a goal
    Delete {
        /// Goal ID
        id: String,
    },
}

fn print_goal(view: &GoalView, symbol: &str) {
    let goal = &view.goal;
    let due = if view.is_overdue {
        format!("{} days overdue", view.days_remaining)
    } else {
        format!("{} days left", view.days_remaining)
    };
    println!("{} ({})", goal.title, goal.id);
    let left = if goal.is_reached() {
        "reached".to_string()
    } else {
        format!("{} to go", won(view.amount_left, symbol))
    };
    println!(
        "  {} {:>3}%  {} / {}  {}, {}",
        bar(view.progress, 20),
        view.progress,
        won(goal.current_amount, symbol),
        won(goal.target_amount, symbol),
        left,
        due
    );
}

pub fn run(opts: &SessionOpts, action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut engine, config) = open_session(opts)?;
    let symbol = config.display.currency_symbol.as_str();

    match action {
        GoalAction::List { json } => {
            let views = engine.goal_views();
            if json {
                print_json(&views)?;
            } else if views.is_empty() {
                println!("No goals yet");
            } else {
                for view in &views {
                    print_goal(view, symbol);
                }
                println!("Total saved: {}", won(engine.state().goals.total_saved(), symbol));
            }
        }
        GoalAction::Add {
            title,
            target_amount,
            target_date,
            json,
        } => {
            let goal = engine.add_goal(&title, target_amount, target_date)?;
            if json {
                print_json(&engine.goal_view(&goal))?;
            } else {
                println!("Goal created: {}", goal.id);
                print_goal(&engine.goal_view(&goal), symbol);
            }
        }
        GoalAction::Contribute {
            goal_id,
            amount,
            date,
            memo,
            json,
        } => {
            let events = engine.apply(&Input::RecordContribution {
                goal_id: goal_id.clone(),
                amount,
                date,
                memo,
            })?;
            if json {
                print_json(&serde_json::json!({
                    "events": events,
                    "snapshot": engine.snapshot(),
                }))?;
                return Ok(());
            }
            for event in &events {
                match event {
                    Event::ContributionRecorded { amount, at, .. } => {
                        println!("Saved {} on {at}", won(*amount, symbol))
                    }
                    Event::StreakUpdated { current_streak, .. } => {
                        println!("Streak: {current_streak} day(s)")
                    }
                    Event::PointsEarned { earned, total_points } => {
                        println!("Points: +{earned} (total {total_points})")
                    }
                    Event::ChallengeCompleted { challenge_id, .. } => {
                        println!("Challenge completed: {challenge_id}")
                    }
                    Event::RewardUnlocked { reward_id } => println!("Reward unlocked: {reward_id}"),
                    Event::MilestoneAchieved { milestone_id, .. } => {
                        println!("Milestone achieved: {milestone_id}")
                    }
                    _ => {}
                }
            }
            if let Some(goal) = engine.state().goals.get(&goal_id) {
                print_goal(&engine.goal_view(goal), symbol);
            }
        }
        GoalAction::Friends { json } => {
            let friends = engine.friend_goals();
            if json {
                print_json(&friends)?;
            } else {
                for friend in &friends {
                    print!("{}: ", friend.friend);
                    print_goal(&friend.view, symbol);
                }
            }
        }
        GoalAction::History { limit, json } => {
            let limit = limit.unwrap_or(config.display.recent_history);
            let records = engine.state().history.recent(limit);
            if json {
                print_json(&records)?;
            } else {
                for record in &records {
                    println!(
                        "{}  +{}  {}  {}",
                        record.date,
                        won(record.amount, symbol),
                        record.goal_id,
                        record.memo.as_deref().unwrap_or("")
                    );
                }
            }
        }
        GoalAction::Delete { id } => {
            if !engine.state().goals.contains(&id) {
                return Err(format!("Goal not found: {id}").into());
            }
            engine.delete_entity(&id)?;
            println!("Goal deleted: {id}");
        }
    }
    Ok(())
}
