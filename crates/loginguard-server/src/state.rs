use std::sync::Arc;

use loginguard_core::{DecisionEngine, ListService};

/// Shared application state, cloned cheaply into every worker via
/// `actix_web::web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DecisionEngine>,
    pub lists: Arc<ListService>,
}
