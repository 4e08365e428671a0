//! Input and output locations

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the model and plan are read from and where reports go.
#[derive(Debug, Clone, Deserialize)]
pub struct IoConfig {
    /// JSON model document
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// YAML analysis plan
    #[serde(default = "default_plan_path")]
    pub plan_path: PathBuf,

    /// Directory receiving run reports (created if missing)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl IoConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("io.model_path"));
        }
        if self.plan_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("io.plan_path"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("io.output_dir"));
        }
        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(ValidationError::OutputNotDirectory(
                self.output_dir.display().to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            plan_path: default_plan_path(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model.json")
}

fn default_plan_path() -> PathBuf {
    PathBuf::from("plan.yaml")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        let config = IoConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("results"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_model_path_is_missing() {
        let config = IoConfig {
            model_path: PathBuf::new(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("io.model_path"))
        ));
    }

    #[test]
    fn output_dir_pointing_at_file_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        let config = IoConfig {
            output_dir: file.path().to_path_buf(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::OutputNotDirectory(_))
        ));
    }
}
