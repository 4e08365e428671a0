//! YAML Plan Loader
//!
//! Reads an analysis plan (scenario, perspectives, analyses) from YAML.

use std::fs;
use std::path::{Path, PathBuf};

use crate::application::AnalysisPlan;
use crate::ports::StorageError;

/// File-based plan loader.
#[derive(Debug, Clone)]
pub struct YamlPlanLoader {
    path: PathBuf,
}

impl YamlPlanLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parses the plan and checks it for consistency.
    pub fn load(&self) -> Result<AnalysisPlan, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::NotFound(self.path.display().to_string()));
        }

        let yaml = fs::read_to_string(&self.path)?;
        let plan: AnalysisPlan = serde_yaml::from_str(&yaml)
            .map_err(|e| StorageError::Malformed(format!("{}: {}", self.path.display(), e)))?;
        plan.validate()?;

        tracing::info!(
            path = %self.path.display(),
            scenario = %plan.scenario.name,
            deltas = plan.scenario.deltas.len(),
            analyses = plan.analyses.len(),
            "Loaded analysis plan"
        );

        Ok(plan)
    }
}
