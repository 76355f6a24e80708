use crate::utils::error::{BigFileError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file. Every section and key may be omitted; command
/// line flags take precedence over anything set here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub cursor: CursorSection,
    pub probe: ProbeSection,
    pub scan: ScanSection,
    pub monitoring: MonitoringSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorSection {
    pub chunk_size: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSection {
    pub offsets: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSection {
    pub timestamps: Option<bool>,
    pub skip_payloads: Option<bool>,
    pub allow_trailing: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringSection {
    pub enabled: Option<bool>,
    /// "compact" or "json"
    pub log_format: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BigFileError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| BigFileError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| BigFileError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring.log_format.as_deref() == Some("json")
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(chunk_size) = self.cursor.chunk_size {
            validation::validate_range("cursor.chunk_size", chunk_size, 1, super::MAX_CHUNK_SIZE)?;
        }
        if let Some(offsets) = self.probe.offsets {
            validation::validate_positive_number("probe.offsets", offsets, 1)?;
        }
        if let Some(format) = &self.monitoring.log_format {
            if format != "compact" && format != "json" {
                return Err(BigFileError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.clone(),
                    reason: "Expected 'compact' or 'json'".to_string(),
                });
            }
        }
        Ok(())
    }
}
