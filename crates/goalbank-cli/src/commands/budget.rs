use chrono::NaiveDate;
use clap::Subcommand;
use goalbank_core::{Input, TransactionKind};

use super::{open_session, print_json, SessionOpts};
use crate::format::{bar, won};

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Show this month's budget and spending forecast
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Record spending against the budget
    Spend {
        /// Amount in won
        amount: u64,
        /// What the money was spent on
        #[arg(long)]
        label: Option<String>,
        /// Spending category (e.g. Food, Transport)
        #[arg(long)]
        category: Option<String>,
        /// Transaction date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Log an income
    Income {
        /// Source of the income
        label: String,
        /// Amount in won
        amount: u64,
        /// Transaction date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Add to the monthly budget
    TopUp {
        /// Amount in won
        amount: u64,
    },
    /// This month's spending ranked by category
    Ranking {
        #[arg(long)]
        json: bool,
    },
    /// Recent transactions, newest first
    Transactions {
        /// Number of entries (default: from config)
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(opts: &SessionOpts, action: BudgetAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut engine, config) = open_session(opts)?;
    let symbol = config.display.currency_symbol.as_str();

    match action {
        BudgetAction::Show { json } => {
            let view = engine.budget_view();
            if json {
                return print_json(&view);
            }
            println!("Budget {}", view.budget.month);
            println!("  {} {:>3}% used", bar(view.usage_percent, 20), view.usage_percent);
            println!("  Total:     {}", won(view.budget.total, symbol));
            println!("  Spent:     {}", won(view.budget.spent, symbol));
            println!("  Remaining: {}", won(view.remaining, symbol));
            println!("  Forecast:  {}", won(view.forecast, symbol));
        }
        BudgetAction::Spend {
            amount,
            label,
            category,
            date,
        } => {
            engine.apply(&Input::Spend {
                amount,
                label,
                category,
                date,
            })?;
            println!(
                "Spent {}, {} left",
                won(amount, symbol),
                won(engine.state().budget.remaining(), symbol)
            );
        }
        BudgetAction::Income { label, amount, date } => {
            engine.apply(&Input::RecordIncome {
                label: label.clone(),
                amount,
                date,
            })?;
            println!("Income logged: {label} +{}", won(amount, symbol));
        }
        BudgetAction::TopUp { amount } => {
            engine.apply(&Input::TopUpBudget { amount })?;
            println!(
                "Budget raised to {}, {} left",
                won(engine.state().budget.total, symbol),
                won(engine.state().budget.remaining(), symbol)
            );
        }
        BudgetAction::Ranking { json } => {
            let ranking = engine.state().budget.spending_ranking();
            if json {
                return print_json(&ranking);
            }
            if ranking.is_empty() {
                println!("No spending yet");
            }
            for (rank, row) in ranking.iter().enumerate() {
                println!(
                    "{}. {:<12} {:>12}  {} {:>3}%",
                    rank + 1,
                    row.category,
                    won(row.amount, symbol),
                    bar(row.share_percent, 20),
                    row.share_percent
                );
            }
        }
        BudgetAction::Transactions { limit, json } => {
            let limit = limit.unwrap_or(config.display.recent_history);
            let transactions = engine.state().budget.recent_transactions(limit);
            if json {
                return print_json(&transactions);
            }
            for tx in &transactions {
                let amount = format!("{}{}", tx.kind.sign(), won(tx.amount, symbol));
                let category = match tx.kind {
                    TransactionKind::Expense => tx.category.as_str(),
                    TransactionKind::Income => "",
                };
                println!("{}  {:<24} {:>14}  {}", tx.date, tx.label, amount, category);
            }
        }
    }
    Ok(())
}
