use portal_core::calculator::RiskCalculator;
use portal_core::catalog::CourseCatalog;
use std::sync::Arc;

/// Shared, read-only application state.
///
/// Progress is never stored here: clients send their completed set with
/// every request.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CourseCatalog>,
    pub calculator: RiskCalculator,
}

impl AppState {
    pub fn new(catalog: CourseCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            calculator: RiskCalculator::default(),
        }
    }
}
