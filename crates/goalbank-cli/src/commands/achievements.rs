use clap::Subcommand;
use goalbank_core::Payout;

use super::{open_session, print_json, SessionOpts};
use crate::format::{rate, won};

#[derive(Subcommand)]
pub enum AchievementsAction {
    /// Reward badges and their thresholds
    Rewards {
        #[arg(long)]
        json: bool,
    },
    /// Savings challenges
    Challenges {
        #[arg(long)]
        json: bool,
    },
    /// Cumulative savings milestones
    Milestones {
        #[arg(long)]
        json: bool,
    },
    /// Level, points and streak summary
    Profile {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(opts: &SessionOpts, action: AchievementsAction) -> Result<(), Box<dyn std::error::Error>> {
    let (engine, config) = open_session(opts)?;
    let symbol = config.display.currency_symbol.as_str();
    let state = engine.state();

    match action {
        AchievementsAction::Rewards { json } => {
            if json {
                return print_json(&state.rewards);
            }
            for reward in &state.rewards {
                let mark = if reward.is_unlocked { "x" } else { " " };
                let mut needs = Vec::new();
                if let Some(days) = reward.required_streak {
                    needs.push(format!("{days}-day streak"));
                }
                if let Some(points) = reward.required_points {
                    needs.push(format!("{points} points"));
                }
                println!("[{mark}] {} - {} ({})", reward.title, reward.description, needs.join(" or "));
            }
        }
        AchievementsAction::Challenges { json } => {
            if json {
                return print_json(&state.challenges);
            }
            for challenge in &state.challenges {
                let mark = if challenge.is_completed { "x" } else { " " };
                let payout = match challenge.payout {
                    Payout::Points { points } => format!("{points} points"),
                    Payout::BonusRate { basis_points } => format!("+{} rate", rate(basis_points)),
                };
                println!(
                    "[{mark}] {} {:>3}%  {} / {}  reward: {payout}",
                    challenge.title,
                    challenge.progress(),
                    won(challenge.current_amount, symbol),
                    won(challenge.target_amount, symbol),
                );
            }
        }
        AchievementsAction::Milestones { json } => {
            let statuses = engine.milestones();
            if json {
                return print_json(&statuses);
            }
            for status in &statuses {
                let mark = if status.is_achieved { "x" } else { " " };
                println!(
                    "[{mark}] {} ({})  {} to go",
                    status.milestone.title,
                    won(status.milestone.target_amount, symbol),
                    won(status.remaining, symbol)
                );
            }
        }
        AchievementsAction::Profile { json } => {
            let profile = engine.profile();
            if json {
                return print_json(&profile);
            }
            println!("Level {}", profile.level);
            println!("Total saved:  {}", won(profile.total_saved, symbol));
            println!(
                "Points:       {} ({} to next level)",
                profile.total_points, profile.points_to_next_level
            );
            println!("Achievements: {}", profile.achievements);
            println!(
                "Streak:       {} day(s), longest {}",
                state.streak.current_streak, state.streak.longest_streak
            );
            println!("Streak rule:  {}", engine.settings().same_day.description());
        }
    }
    Ok(())
}
