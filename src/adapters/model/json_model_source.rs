//! JSON Model Source Adapter
//!
//! Reads an MRIO model document from a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use super::ModelDocument;
use crate::domain::io_model::MrioModel;
use crate::ports::{ModelSource, StorageError};

/// File-based model source
#[derive(Debug, Clone)]
pub struct JsonModelSource {
    path: PathBuf,
}

impl JsonModelSource {
    /// Create a source reading from `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelSource for JsonModelSource {
    fn load(&self) -> Result<MrioModel, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::NotFound(self.path.display().to_string()));
        }

        let json = fs::read_to_string(&self.path)?;
        let document: ModelDocument = serde_json::from_str(&json)
            .map_err(|e| StorageError::Malformed(format!("{}: {}", self.path.display(), e)))?;
        let model = document.into_model()?;

        tracing::info!(
            path = %self.path.display(),
            entities = model.entities().len(),
            indicators = model.satellite().indicators().len(),
            "Loaded MRIO model"
        );

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_is_not_found() {
        let source = JsonModelSource::new("/nonexistent/model.json");
        assert!(matches!(source.load(), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let source = JsonModelSource::new(file.path());
        assert!(matches!(source.load(), Err(StorageError::Malformed(_))));
    }

    #[test]
    fn valid_document_loads() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "entities": [{{"region": "EU", "item": "Agriculture"}}],
                "coefficients": [[0.1]],
                "final_demand": {{"columns": [{{"region": "EU", "item": "Households"}}], "values": [[1.0]]}},
                "satellite": {{"indicators": ["GHG"], "values": [[2.0]]}}
            }}"#
        )
        .unwrap();
        let model = JsonModelSource::new(file.path()).load().unwrap();
        assert_eq!(model.entities().len(), 1);
    }
}
