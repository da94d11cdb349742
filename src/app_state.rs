use crate::service::CredibilityService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CredibilityService>,
}

impl AppState {
    pub fn new(service: CredibilityService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
