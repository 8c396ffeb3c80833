use std::sync::atomic::{AtomicU32, Ordering};

use shopfront_core::{
    catalog,
    models::{FilterCriteria, Product, Rating},
    Catalog, CatalogState, Error, ProductSource, Result,
};

fn create_test_product(id: u64, title: &str, price: f64, rate: f64, category: &str) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
        description: format!("{} for everyday use", title),
        category: category.to_string(),
        image: format!("https://store.example.com/img/{}.jpg", id),
        rating: Rating { rate, count: 42 },
    }
}

/// Source that serves a fixed catalog, failing the first `failures` calls
struct ScriptedSource {
    products: Vec<Product>,
    failures: u32,
    calls: AtomicU32,
}

impl ScriptedSource {
    fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            failures: 0,
            calls: AtomicU32::new(0),
        }
    }

    fn failing_first(products: Vec<Product>, failures: u32) -> Self {
        Self {
            products,
            failures,
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait::async_trait]
impl ProductSource for ScriptedSource {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(Error::Fetch("upstream unavailable".to_string()))
        } else {
            Ok(self.products.clone())
        }
    }
}

#[tokio::test]
async fn test_browse_flow_from_fetch_to_detail() {
    let source = ScriptedSource::new(vec![
        create_test_product(1, "Canvas Backpack", 109.95, 3.9, "bags"),
        create_test_product(2, "Slim Fit T-Shirt", 22.3, 4.1, "men's clothing"),
        create_test_product(3, "Rain Jacket", 56.99, 4.7, "men's clothing"),
    ]);

    let mut catalog = Catalog::new();
    assert!(catalog.is_loading());

    catalog::refresh(&mut catalog, &source).await;
    assert_eq!(*catalog.state(), CatalogState::Ready);
    assert_eq!(catalog.products().len(), 3);
    assert_eq!(catalog.categories(), vec!["bags", "men's clothing"]);

    // Narrow down to affordable clothing
    let criteria = FilterCriteria {
        category: "men's clothing".to_string(),
        max_price: Some(50.0),
        ..Default::default()
    };
    let visible = catalog.visible(&criteria);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, 2);

    // Open the detail view on it
    assert!(catalog.select(visible[0].id));
    assert_eq!(
        catalog.selected().map(|p| p.title.as_str()),
        Some("Slim Fit T-Shirt")
    );
}

#[tokio::test]
async fn test_failure_surfaces_a_message_and_retry_recovers() {
    let source = ScriptedSource::failing_first(
        vec![create_test_product(1, "Desk Lamp", 15.0, 4.5, "home")],
        1,
    );

    let mut catalog = Catalog::new();
    catalog::refresh(&mut catalog, &source).await;

    match catalog.state() {
        CatalogState::Failed(message) => {
            assert!(message.contains("upstream unavailable"));
        }
        other => panic!("expected Failed, got {:?}", other),
    }

    // Manual retry goes back through Loading and lands in Ready
    catalog::refresh(&mut catalog, &source).await;
    assert_eq!(*catalog.state(), CatalogState::Ready);
    assert_eq!(catalog.products().len(), 1);
}

#[tokio::test]
async fn test_refetch_replaces_the_collection_and_drops_the_selection() {
    let source = ScriptedSource::new(vec![create_test_product(1, "Desk Lamp", 15.0, 4.5, "home")]);

    let mut catalog = Catalog::new();
    catalog::refresh(&mut catalog, &source).await;
    assert!(catalog.select(1));

    let replacement = ScriptedSource::new(vec![
        create_test_product(7, "Wool Scarf", 25.0, 3.0, "clothing"),
    ]);
    catalog::refresh(&mut catalog, &replacement).await;

    assert!(catalog.selected().is_none());
    assert_eq!(catalog.products()[0].id, 7);
}

#[test]
fn test_model_decodes_a_realistic_payload() {
    let raw = r#"[
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }
    ]"#;

    let products: Vec<Product> = serde_json::from_str(raw).unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].rating.count, 120);

    let criteria = FilterCriteria {
        search_query: "foldsack".to_string(),
        ..Default::default()
    };
    let visible = shopfront_core::filter::apply(&products, &criteria);
    assert_eq!(visible.len(), 1);
}
