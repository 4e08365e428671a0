//! In-Memory Model Source Adapter
//!
//! Serves a model held in memory. Useful for testing and embedding.

use crate::domain::io_model::MrioModel;
use crate::ports::{ModelSource, StorageError};

/// In-memory model source
#[derive(Debug, Clone)]
pub struct InMemoryModelSource {
    model: MrioModel,
}

impl InMemoryModelSource {
    pub fn new(model: MrioModel) -> Self {
        Self { model }
    }
}

impl ModelSource for InMemoryModelSource {
    fn load(&self) -> Result<MrioModel, StorageError> {
        Ok(self.model.clone())
    }
}
