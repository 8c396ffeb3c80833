use serde::{Deserialize, Serialize};

/// Category value meaning "no category constraint"
pub const WILDCARD_CATEGORY: &str = "all";

/// Product model - the star of the show
///
/// Created by the data source and never mutated; a refetch replaces the
/// whole collection rather than patching individual records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Rating,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

/// The user's filter constraints, all of them optional.
///
/// One value object, replaced wholesale on every change - no per-field
/// aliasing, so the derived view stays a plain function of
/// (products, criteria).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub search_query: String,
    pub category: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            category: WILDCARD_CATEGORY.to_string(),
            min_price: None,
            max_price: None,
            min_rating: None,
        }
    }
}

impl FilterCriteria {
    /// True when any constraint deviates from the defaults.
    /// Drives the "reset filters" affordance in the UI.
    pub fn is_active(&self) -> bool {
        !self.search_query.is_empty()
            || self.category != WILDCARD_CATEGORY
            || self.min_price.is_some()
            || self.max_price.is_some()
            || self.min_rating.is_some()
    }
}
