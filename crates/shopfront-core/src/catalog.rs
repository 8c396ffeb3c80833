//! The fetch lifecycle around the product collection.
//!
//! Loading is the initial state; Ready and Failed are terminal for one
//! attempt; retry re-enters Loading. All transitions are synchronous - the
//! async part (actually talking to the source) lives in [`refresh`], so the
//! holder itself stays trivially testable.

use tracing::{debug, info, warn};

use crate::{
    filter,
    models::{FilterCriteria, Product},
    source::ProductSource,
    Result,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Ready,
    Failed(String),
}

/// Holds the product collection, the lifecycle state around it, and the
/// detail-view selection into it.
pub struct Catalog {
    state: CatalogState,
    products: Vec<Product>,
    selected: Option<u64>,
    generation: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            state: CatalogState::Loading,
            products: Vec::new(),
            selected: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == CatalogState::Loading
    }

    /// The fetch error message, if the last attempt failed
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            CatalogState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Derived view of the collection under the given criteria
    pub fn visible(&self, criteria: &FilterCriteria) -> Vec<Product> {
        filter::apply(&self.products, criteria)
    }

    /// Distinct categories present in the collection
    pub fn categories(&self) -> Vec<String> {
        filter::categories(&self.products)
    }

    /// Start a fetch attempt and return its generation stamp.
    ///
    /// The matching [`complete`](Self::complete) call must present the same
    /// stamp; a newer `begin_fetch` invalidates every outstanding one, which
    /// is how "latest issued request wins" stays deterministic when fetches
    /// overlap.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.state = CatalogState::Loading;
        debug!(generation = self.generation, "fetch started");
        self.generation
    }

    /// Apply a fetch outcome. Stale generations are dropped.
    pub fn complete(&mut self, generation: u64, result: Result<Vec<Product>>) {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "dropping stale fetch completion"
            );
            return;
        }

        match result {
            Ok(products) => {
                info!(count = products.len(), "catalog loaded");
                self.products = products;
                // The old collection is gone, so any selection into it is too
                self.selected = None;
                self.state = CatalogState::Ready;
            }
            Err(err) => {
                warn!(error = %err, "catalog fetch failed");
                self.products.clear();
                self.selected = None;
                self.state = CatalogState::Failed(err.to_string());
            }
        }
    }

    /// Open the detail view on a product. Returns false when the id is not
    /// in the current collection.
    pub fn select(&mut self, id: u64) -> bool {
        if self.products.iter().any(|p| p.id == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The product the detail view is open on, if any
    pub fn selected(&self) -> Option<&Product> {
        let id = self.selected?;
        self.products.iter().find(|p| p.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive one full fetch attempt against a source.
pub async fn refresh(catalog: &mut Catalog, source: &dyn ProductSource) {
    let generation = catalog.begin_fetch();
    let result = source.fetch_products().await;
    catalog.complete(generation, result);
}
