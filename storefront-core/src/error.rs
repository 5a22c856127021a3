use thiserror::Error;

/// Errors raised while parsing or validating storefront configuration.
///
/// The reconciler itself never fails; these only surface when loading
/// tables and ids from data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown purchase plan '{0}'")]
    UnknownPlan(String),
    #[error("unknown fragrance '{0}'")]
    UnknownFragrance(String),
    #[error("cart url table has no entry for '{0}'")]
    MissingEntry(String),
    #[error("cart url for '{0}' is empty")]
    EmptyUrl(String),
    #[error("fallback key '{0}' is not present in the cart url table")]
    MissingFallback(String),
    #[error("invalid storefront data: {0}")]
    Parse(#[from] serde_json::Error),
}
