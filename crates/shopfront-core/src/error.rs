use thiserror::Error;

/// All the ways things can go wrong in shopfront
///
/// There is exactly one user-visible failure in this system - the catalog
/// fetch - and it is carried as a message, never rethrown past the state
/// that displays it. The rest exist for the config file and the JSON edges.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Product fetch failed: {0}")]
    Fetch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
