use crate::{ConfigError, ConfigErrorResult, DEFAULT_RESERVED_SUBDOMAINS};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TenancyConfig {
    /// Host labels that never resolve to a tenant (www, api, ...)
    pub reserved_subdomains: Vec<String>,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            reserved_subdomains: DEFAULT_RESERVED_SUBDOMAINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl TenancyConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for label in &self.reserved_subdomains {
            if label.is_empty() || label.contains('.') {
                return Err(ConfigError::tenancy(format!(
                    "tenancy.reserved_subdomains entries must be single non-empty labels, got '{label}'"
                )));
            }
        }

        Ok(())
    }
}
