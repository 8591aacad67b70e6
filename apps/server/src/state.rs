use inventory::ProductRepository;
use pricing_runtime::PricingEngine;
use std::sync::Arc;

/// Shared handler state: the engine and the injected product store.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<PricingEngine>,
    pub products: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn new(engine: PricingEngine, products: Arc<dyn ProductRepository>) -> Self {
        Self {
            engine: Arc::new(engine),
            products,
        }
    }
}
