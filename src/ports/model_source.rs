//! ModelSource port for loading the MRIO model.

use super::StorageError;
use crate::domain::io_model::MrioModel;

/// Supplies the immutable model for a run.
pub trait ModelSource: Send + Sync {
    /// Load coefficients, final demand and satellite account.
    ///
    /// # Errors
    /// Returns `StorageError` if the source is missing, unreadable or
    /// violates a model invariant.
    fn load(&self) -> Result<MrioModel, StorageError>;
}
