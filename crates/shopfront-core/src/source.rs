use shopfront_api::{ProductRecord, StoreClient};

use crate::{
    models::{Product, Rating},
    Error, Result,
};

/// Trait for product sources - makes testing easier and keeps things flexible
///
/// The real implementation talks HTTP through [`StoreSource`]; tests mock it.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>>;
}

/// Wrapper around [`StoreClient`] that implements [`ProductSource`]
pub struct StoreSource {
    client: StoreClient,
}

impl StoreSource {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// Fetch one product by id, bypassing the collection
    pub async fn fetch_product(&self, id: u64) -> Result<Product> {
        let record = self
            .client
            .fetch_product(id)
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        Ok(record_to_product(record))
    }
}

#[async_trait::async_trait]
impl ProductSource for StoreSource {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        let records = self
            .client
            .fetch_products()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        Ok(records.into_iter().map(record_to_product).collect())
    }
}

/// Convert the endpoint's wire record into our internal model
fn record_to_product(record: ProductRecord) -> Product {
    Product {
        id: record.id,
        title: record.title,
        price: record.price,
        description: record.description,
        category: record.category,
        image: record.image,
        rating: Rating {
            rate: record.rating.rate,
            count: record.rating.count,
        },
    }
}
