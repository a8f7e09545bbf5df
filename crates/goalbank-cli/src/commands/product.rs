use clap::{Subcommand, ValueEnum};
use goalbank_core::{ProductCategory, ProductQuery, SortDirection, SortKey};

use super::{open_session, print_json, SessionOpts};
use crate::format::{rate, won};

#[derive(Clone, Copy, ValueEnum)]
pub enum SortArg {
    Rate,
    Amount,
}

#[derive(Subcommand)]
pub enum ProductAction {
    /// List products
    List {
        /// Filter by category (deposit, savings, investment)
        #[arg(long)]
        category: Option<ProductCategory>,
        /// Sort key
        #[arg(long, value_enum, default_value = "rate")]
        sort: SortArg,
        /// Ascending order (default: descending)
        #[arg(long)]
        asc: bool,
        /// Mark these products as favorites before listing
        #[arg(long = "favorite")]
        favorites: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Toggle a product's favorite flag
    Favorite {
        /// Product ID
        id: String,
    },
}

pub fn run(opts: &SessionOpts, action: ProductAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut engine, config) = open_session(opts)?;
    let symbol = config.display.currency_symbol.as_str();

    match action {
        ProductAction::List {
            category,
            sort,
            asc,
            favorites,
            json,
        } => {
            for id in &favorites {
                engine.toggle_favorite(id)?;
            }
            let query = ProductQuery {
                category,
                sort: match sort {
                    SortArg::Rate => SortKey::Rate,
                    SortArg::Amount => SortKey::MinAmount,
                },
                direction: if asc { SortDirection::Asc } else { SortDirection::Desc },
            };
            let products = engine.products(&query);
            if json {
                return print_json(&products);
            }
            println!("{} product(s)", products.len());
            for product in products {
                let heart = if product.is_favorite { "*" } else { " " };
                let min = if product.min_amount == 0 {
                    "no minimum".to_string()
                } else {
                    won(product.min_amount, symbol)
                };
                let period = product
                    .period_months
                    .map(|m| format!("{m} months"))
                    .unwrap_or_else(|| "no term".to_string());
                println!(
                    "{heart} {:<24} {:>6}  min {:<12} {:<10} [{}] {}",
                    product.title,
                    rate(product.interest_rate_bp),
                    min,
                    period,
                    product.tag,
                    product.benefit
                );
            }
        }
        ProductAction::Favorite { id } => {
            let is_favorite = engine.toggle_favorite(&id)?;
            println!("{id}: favorite = {is_favorite}");
        }
    }
    Ok(())
}
