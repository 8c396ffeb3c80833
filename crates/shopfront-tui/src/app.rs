// TUI application state and event handling
use ratatui::widgets::ListState;
use shopfront_core::{
    models::{FilterCriteria, Product, WILDCARD_CATEGORY},
    Catalog,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,        // Navigating the product list
    Searching,     // Typing in the search box
    Filtering,     // Moving across filter fields
    EditingFilter, // Typing a numeric filter value
}

// Filter panel fields, addressed by `filter_cursor`:
// 0 = category, 1 = min price, 2 = max price, 3 = min rating
pub const FILTER_FIELD_COUNT: usize = 4;

// Rating steps the panel cycles through, mirroring the fixed
// "N stars & above" choices of a storefront dropdown
const RATING_STEPS: [Option<f64>; 5] = [None, Some(4.0), Some(3.0), Some(2.0), Some(1.0)];

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub catalog: Catalog,
    pub criteria: FilterCriteria,
    pub selected_index: usize,
    pub list_state: ListState,
    pub show_filters: bool,
    pub filter_cursor: usize,
    pub filter_edit_buffer: String,
    pub detail_scroll: u16,
    // Set whenever a (re)fetch should run before the next input is read
    pub pending_fetch: bool,
}

impl App {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            catalog: Catalog::new(),
            criteria: FilterCriteria::default(),
            selected_index: 0,
            list_state,
            show_filters: false,
            filter_cursor: 0,
            filter_edit_buffer: String::new(),
            detail_scroll: 0,
            pending_fetch: true,
        }
    }

    /// The derived view: current collection under the current criteria.
    /// Recomputed on demand, never stored.
    pub fn visible(&self) -> Vec<Product> {
        self.catalog.visible(&self.criteria)
    }

    /// Replace the criteria wholesale and keep the selection in bounds
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
        self.list_state.select(Some(self.selected_index));
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Queue a fetch; the event loop runs it before reading more input
    pub fn request_fetch(&mut self) {
        self.pending_fetch = true;
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_filter_mode(&mut self) {
        self.input_mode = InputMode::Filtering;
    }

    // -- search box ---------------------------------------------------------

    /// Every keystroke refilters immediately, like a live search box
    pub fn push_search_char(&mut self, c: char) {
        let mut search_query = self.criteria.search_query.clone();
        search_query.push(c);
        self.set_criteria(FilterCriteria {
            search_query,
            ..self.criteria.clone()
        });
    }

    pub fn pop_search_char(&mut self) {
        let mut search_query = self.criteria.search_query.clone();
        search_query.pop();
        self.set_criteria(FilterCriteria {
            search_query,
            ..self.criteria.clone()
        });
    }

    // -- filter panel -------------------------------------------------------

    pub fn toggle_filters(&mut self) {
        self.show_filters = !self.show_filters;
    }

    pub fn next_filter(&mut self) {
        self.filter_cursor = (self.filter_cursor + 1).min(FILTER_FIELD_COUNT - 1);
    }

    pub fn previous_filter(&mut self) {
        if self.filter_cursor > 0 {
            self.filter_cursor -= 1;
        }
    }

    /// Start editing the numeric field under the cursor.
    /// Category and rating cycle instead; see the caller.
    pub fn enter_editing_filter_mode(&mut self) {
        self.input_mode = InputMode::EditingFilter;
        self.filter_edit_buffer = match self.filter_cursor {
            1 => self
                .criteria
                .min_price
                .map(|p| p.to_string())
                .unwrap_or_default(),
            2 => self
                .criteria
                .max_price
                .map(|p| p.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };
    }

    /// Commit the edit buffer into the criteria.
    ///
    /// Text that does not parse as a non-negative number means "no bound" -
    /// the filter engine never sees malformed input.
    pub fn save_filter_edit(&mut self) {
        let value = self
            .filter_edit_buffer
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| *v >= 0.0);

        match self.filter_cursor {
            1 => self.set_criteria(FilterCriteria {
                min_price: value,
                ..self.criteria.clone()
            }),
            2 => self.set_criteria(FilterCriteria {
                max_price: value,
                ..self.criteria.clone()
            }),
            _ => {}
        }

        self.filter_edit_buffer.clear();
        self.input_mode = InputMode::Filtering;
    }

    pub fn cancel_filter_edit(&mut self) {
        self.filter_edit_buffer.clear();
        self.input_mode = InputMode::Filtering;
    }

    /// Cycle the category through "all" plus every category in the catalog
    pub fn cycle_category(&mut self) {
        let mut options = vec![WILDCARD_CATEGORY.to_string()];
        options.extend(self.catalog.categories());

        let current = options
            .iter()
            .position(|c| *c == self.criteria.category)
            .unwrap_or(0);
        let category = options[(current + 1) % options.len()].clone();

        self.set_criteria(FilterCriteria {
            category,
            ..self.criteria.clone()
        });
    }

    /// Cycle the minimum rating through any / 4+ / 3+ / 2+ / 1+
    pub fn cycle_rating(&mut self) {
        let current = RATING_STEPS
            .iter()
            .position(|step| *step == self.criteria.min_rating)
            .unwrap_or(0);
        let min_rating = RATING_STEPS[(current + 1) % RATING_STEPS.len()];

        self.set_criteria(FilterCriteria {
            min_rating,
            ..self.criteria.clone()
        });
    }

    pub fn clear_current_filter(&mut self) {
        let mut criteria = self.criteria.clone();
        match self.filter_cursor {
            0 => criteria.category = WILDCARD_CATEGORY.to_string(),
            1 => criteria.min_price = None,
            2 => criteria.max_price = None,
            3 => criteria.min_rating = None,
            _ => {}
        }
        self.set_criteria(criteria);
    }

    pub fn reset_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    // -- list navigation and detail view ------------------------------------

    pub fn next_item(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1).min(len - 1);
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn previous_item(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    /// The product under the list cursor, if any
    pub fn highlighted_product(&self) -> Option<Product> {
        self.visible().get(self.selected_index).cloned()
    }

    /// Open the detail view on the highlighted product
    pub fn open_detail(&mut self) {
        if let Some(product) = self.highlighted_product() {
            self.catalog.select(product.id);
            self.detail_scroll = 0;
        }
    }

    pub fn close_detail(&mut self) {
        self.catalog.clear_selection();
        self.detail_scroll = 0;
    }

    pub fn detail_open(&self) -> bool {
        self.catalog.selected().is_some()
    }

    pub fn scroll_detail_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_detail_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::models::Rating;

    fn product(id: u64, title: &str, price: f64, rate: f64, category: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
            description: String::new(),
            category: category.to_string(),
            image: String::new(),
            rating: Rating { rate, count: 5 },
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new();
        let generation = app.catalog.begin_fetch();
        app.catalog.complete(
            generation,
            Ok(vec![
                product(1, "Desk Lamp", 15.0, 4.5, "home"),
                product(2, "Wool Scarf", 25.0, 3.0, "clothing"),
                product(3, "Floor Lamp", 45.0, 2.0, "home"),
            ]),
        );
        app.pending_fetch = false;
        app
    }

    #[test]
    fn garbage_in_a_price_field_means_no_bound() {
        let mut app = loaded_app();
        app.filter_cursor = 1;
        app.enter_editing_filter_mode();
        app.filter_edit_buffer = "cheap".to_string();
        app.save_filter_edit();

        assert_eq!(app.criteria.min_price, None);
        assert_eq!(app.visible().len(), 3);

        // Negative input is equally meaningless for a price
        app.filter_cursor = 2;
        app.enter_editing_filter_mode();
        app.filter_edit_buffer = "-3".to_string();
        app.save_filter_edit();
        assert_eq!(app.criteria.max_price, None);
    }

    #[test]
    fn numeric_price_input_becomes_a_bound() {
        let mut app = loaded_app();
        app.filter_cursor = 1;
        app.enter_editing_filter_mode();
        app.filter_edit_buffer = "20".to_string();
        app.save_filter_edit();

        assert_eq!(app.criteria.min_price, Some(20.0));
        let ids: Vec<u64> = app.visible().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn category_cycles_through_wildcard_and_catalog_values() {
        let mut app = loaded_app();
        assert_eq!(app.criteria.category, WILDCARD_CATEGORY);

        app.cycle_category();
        assert_eq!(app.criteria.category, "home");
        app.cycle_category();
        assert_eq!(app.criteria.category, "clothing");
        app.cycle_category();
        assert_eq!(app.criteria.category, WILDCARD_CATEGORY);
    }

    #[test]
    fn rating_cycles_through_the_fixed_steps() {
        let mut app = loaded_app();

        let mut seen = Vec::new();
        for _ in 0..5 {
            app.cycle_rating();
            seen.push(app.criteria.min_rating);
        }

        assert_eq!(
            seen,
            vec![Some(4.0), Some(3.0), Some(2.0), Some(1.0), None]
        );
    }

    #[test]
    fn shrinking_the_view_pulls_the_selection_back_in_bounds() {
        let mut app = loaded_app();
        app.next_item();
        app.next_item();
        assert_eq!(app.selected_index, 2);

        app.set_criteria(FilterCriteria {
            category: "clothing".to_string(),
            ..Default::default()
        });

        assert_eq!(app.visible().len(), 1);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn reset_restores_the_default_criteria() {
        let mut app = loaded_app();
        app.set_criteria(FilterCriteria {
            search_query: "lamp".to_string(),
            category: "home".to_string(),
            min_price: Some(10.0),
            ..Default::default()
        });
        assert!(app.criteria.is_active());

        app.reset_filters();
        assert_eq!(app.criteria, FilterCriteria::default());
        assert_eq!(app.visible().len(), 3);
    }

    #[test]
    fn detail_view_opens_on_the_highlighted_product_and_closes() {
        let mut app = loaded_app();
        app.next_item();
        app.open_detail();

        assert!(app.detail_open());
        assert_eq!(app.catalog.selected().map(|p| p.id), Some(2));

        app.close_detail();
        assert!(!app.detail_open());
    }

    #[test]
    fn search_keystrokes_filter_live() {
        let mut app = loaded_app();
        for c in "lamp".chars() {
            app.push_search_char(c);
        }
        assert_eq!(app.visible().len(), 2);

        app.pop_search_char();
        assert_eq!(app.criteria.search_query, "lam");
    }
}
