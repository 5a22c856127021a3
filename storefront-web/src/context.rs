use storefront_core::{Reconciler, StorefrontConfig};

/// Shared, read-only configuration handed to every component.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub config: StorefrontConfig,
    pub reconciler: Reconciler,
}

impl PageContext {
    /// Context built from the data embedded in `storefront-core`.
    #[must_use]
    pub fn load() -> Self {
        Self {
            config: StorefrontConfig::load_from_static(),
            reconciler: Reconciler::default(),
        }
    }
}
