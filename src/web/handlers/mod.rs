//! API handlers for Web API.

pub mod tattoo;

pub use tattoo::*;

use std::sync::Arc;

use crate::tattoo::TattooModel;
use crate::upload::UploadGate;

/// Shared state for the record routes.
#[derive(Clone)]
pub struct AppState {
    /// Record model, injected by the caller.
    pub model: Arc<dyn TattooModel>,
    /// Upload validation and storage.
    pub upload_gate: Arc<UploadGate>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(model: Arc<dyn TattooModel>, upload_gate: UploadGate) -> Self {
        Self {
            model,
            upload_gate: Arc::new(upload_gate),
        }
    }
}
