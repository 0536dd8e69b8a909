use crate::service::CareerService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub service: CareerService,
    /// Name of the report backend, reported by `/health`.
    pub store_backend: &'static str,
}
