//! Catalog search
//!
//! A read-only projection: the three filters are independent and the
//! result is their intersection.
use crate::auction::{Amount, Category, CategoryRef, Lot, LotId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_MAX_PRICE: Amount = 2_000_000;

/// Anything the catalog can filter
pub trait Listing {
    fn title(&self) -> &str;
    fn category(&self) -> CategoryRef;
    fn price(&self) -> Amount;
}

impl Listing for Lot {
    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> CategoryRef {
        &self.category
    }

    fn price(&self) -> Amount {
        self.current_bid
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Available,
    Upcoming,
    Sold,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: LotId,
    pub title: String,
    pub category: Category,
    pub price: Amount,
    pub year: String,
    pub status: ItemStatus,
    #[serde(default)]
    pub image: String,
}

impl Listing for CatalogItem {
    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> CategoryRef {
        &self.category
    }

    fn price(&self) -> Amount {
        self.price
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub search: String,
    pub min_price: Amount,
    pub max_price: Amount,
    /// Empty means every category
    pub categories: BTreeSet<Category>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            min_price: 0,
            max_price: DEFAULT_MAX_PRICE,
            categories: BTreeSet::new(),
        }
    }
}

impl CatalogQuery {
    pub fn toggle_category(&mut self, category: CategoryRef) {
        if !self.categories.remove(category) {
            self.categories.insert(category.to_owned());
        }
    }

    pub fn matches(&self, listing: &impl Listing) -> bool {
        let matches_search = listing
            .title()
            .to_lowercase()
            .contains(&self.search.to_lowercase());
        let price = listing.price();
        let matches_price = self.min_price <= price && price <= self.max_price;
        let matches_category =
            self.categories.is_empty() || self.categories.contains(listing.category());

        matches_search && matches_price && matches_category
    }

    pub fn apply<'a, L: Listing>(&self, listings: &'a [L]) -> Vec<&'a L> {
        listings.iter().filter(|l| self.matches(*l)).collect()
    }
}
