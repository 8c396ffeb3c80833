// Domain logic lives here - the model, the filter engine, and the fetch lifecycle
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod source;

pub use catalog::{Catalog, CatalogState};
pub use config::Config;
pub use error::Error;
pub use source::{ProductSource, StoreSource};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
