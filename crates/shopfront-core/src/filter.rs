//! The filter engine: a pure derivation from (products, criteria) to the
//! visible subset. Nothing here can fail and nothing here has state.

use crate::models::{FilterCriteria, Product, WILDCARD_CATEGORY};

/// Distinct category values in first-appearance order.
///
/// The `"all"` wildcard is implicit; callers that display a picker prepend
/// it themselves. Empty input yields an empty set.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !seen.iter().any(|c| c == &product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

/// Keep exactly the products satisfying every active constraint,
/// preserving the input order.
///
/// An all-default criteria is a no-op, and filtering an already-filtered
/// list with the same criteria changes nothing. Malformed numeric input is
/// the UI's problem: by the time a bound reaches this function it is either
/// a number or absent.
pub fn apply(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    products
        .iter()
        .filter(|p| matches(p, criteria))
        .cloned()
        .collect()
}

fn matches(product: &Product, criteria: &FilterCriteria) -> bool {
    let matches_search = criteria.search_query.is_empty() || {
        let needle = criteria.search_query.to_lowercase();
        product.title.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle)
            || product.category.to_lowercase().contains(&needle)
    };

    // Category values come from the catalog itself, so this one is an
    // exact, case-sensitive comparison.
    let matches_category =
        criteria.category == WILDCARD_CATEGORY || product.category == criteria.category;

    let matches_min_price = criteria.min_price.map_or(true, |min| product.price >= min);
    let matches_max_price = criteria.max_price.map_or(true, |max| product.price <= max);
    let matches_rating = criteria
        .min_rating
        .map_or(true, |min| product.rating.rate >= min);

    matches_search && matches_category && matches_min_price && matches_max_price && matches_rating
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;

    fn product(id: u64, title: &str, price: f64, rate: f64, category: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
            description: format!("{} in the {} aisle", title, category),
            category: category.to_string(),
            image: String::new(),
            rating: Rating { rate, count: 10 },
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product(1, "Canvas Backpack", 10.0, 4.0, "a"),
            product(2, "Steel Watch", 20.0, 2.0, "b"),
        ]
    }

    #[test]
    fn default_criteria_returns_the_input_unchanged() {
        let products = sample();
        let result = apply(&products, &FilterCriteria::default());

        assert_eq!(result.len(), products.len());
        let ids: Vec<u64> = result.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn title_substring_matches_case_insensitively() {
        let products = sample();
        let criteria = FilterCriteria {
            search_query: "canvas back".to_string(),
            ..Default::default()
        };

        let result = apply(&products, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);

        // Uppercased needle hits the same product
        let shouting = FilterCriteria {
            search_query: "CANVAS".to_string(),
            ..Default::default()
        };
        assert_eq!(apply(&products, &shouting).len(), 1);
    }

    #[test]
    fn description_and_category_are_searched_too() {
        let products = sample();

        let by_description = FilterCriteria {
            search_query: "aisle".to_string(),
            ..Default::default()
        };
        assert_eq!(apply(&products, &by_description).len(), 2);

        let by_category = FilterCriteria {
            search_query: "B".to_string(),
            ..Default::default()
        };
        // "b" the category matches case-insensitively; "Backpack" also
        // contains a b, so both survive
        assert_eq!(apply(&products, &by_category).len(), 2);
    }

    #[test]
    fn category_constraint_is_exact_and_case_sensitive() {
        let products = sample();

        let exact = FilterCriteria {
            category: "b".to_string(),
            ..Default::default()
        };
        let result = apply(&products, &exact);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);

        let wrong_case = FilterCriteria {
            category: "B".to_string(),
            ..Default::default()
        };
        assert!(apply(&products, &wrong_case).is_empty());
    }

    #[test]
    fn result_is_a_subsequence_of_the_input() {
        let products = vec![
            product(1, "One", 5.0, 1.0, "a"),
            product(2, "Two", 15.0, 2.0, "a"),
            product(3, "Three", 25.0, 3.0, "a"),
            product(4, "Four", 35.0, 4.0, "a"),
        ];
        let criteria = FilterCriteria {
            min_price: Some(10.0),
            max_price: Some(30.0),
            ..Default::default()
        };

        let ids: Vec<u64> = apply(&products, &criteria).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn filtering_twice_with_the_same_criteria_is_a_no_op() {
        let products = sample();
        let criteria = FilterCriteria {
            search_query: "watch".to_string(),
            min_price: Some(5.0),
            ..Default::default()
        };

        let once = apply(&products, &criteria);
        let twice = apply(&once, &criteria);

        assert_eq!(once.len(), twice.len());
        assert_eq!(
            once.iter().map(|p| p.id).collect::<Vec<_>>(),
            twice.iter().map(|p| p.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn price_bounds_are_inclusive_at_both_ends() {
        let products = sample();
        let pinned = FilterCriteria {
            min_price: Some(10.0),
            max_price: Some(10.0),
            ..Default::default()
        };
        let result = apply(&products, &pinned);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);

        let just_above = FilterCriteria {
            min_price: Some(11.0),
            max_price: None,
            ..Default::default()
        };
        let ids: Vec<u64> = apply(&products, &just_above).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn min_price_scenario_keeps_only_the_expensive_product() {
        let products = sample();
        let criteria = FilterCriteria {
            min_price: Some(15.0),
            ..Default::default()
        };

        let result = apply(&products, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);
    }

    #[test]
    fn conjunction_of_category_and_rating_can_exclude_everything() {
        let products = sample();
        // First product fails the category, second fails the rating
        let criteria = FilterCriteria {
            category: "b".to_string(),
            min_rating: Some(3.0),
            ..Default::default()
        };

        assert!(apply(&products, &criteria).is_empty());
    }

    #[test]
    fn categories_are_distinct_and_in_first_appearance_order() {
        let products = vec![
            product(1, "One", 1.0, 1.0, "electronics"),
            product(2, "Two", 2.0, 2.0, "jewelery"),
            product(3, "Three", 3.0, 3.0, "electronics"),
        ];

        assert_eq!(categories(&products), vec!["electronics", "jewelery"]);
        assert!(categories(&[]).is_empty());
    }

    #[test]
    fn default_criteria_is_inactive_and_any_deviation_activates_it() {
        assert!(!FilterCriteria::default().is_active());

        let with_rating = FilterCriteria {
            min_rating: Some(3.0),
            ..Default::default()
        };
        assert!(with_rating.is_active());

        let with_category = FilterCriteria {
            category: "b".to_string(),
            ..Default::default()
        };
        assert!(with_category.is_active());
    }
}
