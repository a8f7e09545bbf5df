//! Financial product catalog with favorites, filtering and sorting.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, EntityKind, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Deposit,
    Savings,
    Investment,
}

impl std::str::FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(ProductCategory::Deposit),
            "savings" => Ok(ProductCategory::Savings),
            "investment" => Ok(ProductCategory::Investment),
            other => Err(format!("unknown product category: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialProduct {
    pub id: String,
    pub title: String,
    pub description: String,
    pub benefit: String,
    pub tag: String,
    /// Annual rate in basis points (450 = 4.50%).
    pub interest_rate_bp: u32,
    pub min_amount: u64,
    /// `None` means no fixed term.
    pub period_months: Option<u32>,
    pub category: ProductCategory,
    #[serde(default)]
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Rate,
    MinAmount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    /// `None` lists every category.
    pub category: Option<ProductCategory>,
    pub sort: SortKey,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCatalog {
    products: Vec<FinancialProduct>,
}

impl ProductCatalog {
    pub fn new(products: Vec<FinancialProduct>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[FinancialProduct] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&FinancialProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Flip the favorite flag and return its new value.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Product, id))?;
        product.is_favorite = !product.is_favorite;
        Ok(product.is_favorite)
    }

    pub fn remove(&mut self, id: &str) -> Result<FinancialProduct> {
        let idx = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Product, id))?;
        Ok(self.products.remove(idx))
    }

    pub fn favorites(&self) -> Vec<&FinancialProduct> {
        self.products.iter().filter(|p| p.is_favorite).collect()
    }

    /// Filtered and sorted view. Equal keys keep catalog order.
    pub fn query(&self, query: &ProductQuery) -> Vec<&FinancialProduct> {
        let mut result: Vec<&FinancialProduct> = self
            .products
            .iter()
            .filter(|p| query.category.map_or(true, |c| p.category == c))
            .collect();

        result.sort_by(|a, b| {
            let ord = match query.sort {
                SortKey::Rate => a.interest_rate_bp.cmp(&b.interest_rate_bp),
                SortKey::MinAmount => a.min_amount.cmp(&b.min_amount),
            };
            match query.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, rate: u32, min: u64, category: ProductCategory) -> FinancialProduct {
        FinancialProduct {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            benefit: String::new(),
            tag: String::new(),
            interest_rate_bp: rate,
            min_amount: min,
            period_months: None,
            category,
            is_favorite: false,
        }
    }

    fn catalog() -> ProductCatalog {
        ProductCatalog::new(vec![
            product("youth", 450, 10_000, ProductCategory::Savings),
            product("salary", 250, 0, ProductCategory::Deposit),
            product("smart", 380, 100_000, ProductCategory::Deposit),
            product("fund", 720, 500_000, ProductCategory::Investment),
        ])
    }

    fn ids(list: Vec<&FinancialProduct>) -> Vec<&str> {
        list.into_iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn default_query_sorts_by_rate_desc() {
        let c = catalog();
        assert_eq!(ids(c.query(&ProductQuery::default())), vec!["fund", "youth", "smart", "salary"]);
    }

    #[test]
    fn filter_and_sort_by_min_amount() {
        let c = catalog();
        let q = ProductQuery {
            category: Some(ProductCategory::Deposit),
            sort: SortKey::MinAmount,
            direction: SortDirection::Asc,
        };
        assert_eq!(ids(c.query(&q)), vec!["salary", "smart"]);
    }

    #[test]
    fn toggle_favorite_flips_flag() {
        let mut c = catalog();
        assert!(c.toggle_favorite("smart").unwrap());
        assert_eq!(ids(c.favorites()), vec!["smart"]);
        assert!(!c.toggle_favorite("smart").unwrap());
        assert!(c.favorites().is_empty());
        assert!(c.toggle_favorite("missing").is_err());
    }

    #[test]
    fn remove_product() {
        let mut c = catalog();
        assert_eq!(c.remove("fund").unwrap().id, "fund");
        assert_eq!(c.products().len(), 3);
        assert!(c.remove("fund").is_err());
    }
}
