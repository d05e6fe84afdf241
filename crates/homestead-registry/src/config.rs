//! Registry configuration and validation.

use std::error::Error;
use std::fmt;

use crate::error::RegionNameError;
use crate::naming::validate_region_name;

/// Base names handed out to automatically allocated regions when the
/// host does not supply its own list.
pub const DEFAULT_REGION_NAMES: &[&str] = &[
    "redstone", "mountain", "valley", "willow", "hollow", "summit", "meadow", "canyon", "harbor",
    "thicket", "ember", "frost", "cedar", "marsh", "granite", "aspen",
];

/// Configuration for [`RegionRegistry`](crate::RegionRegistry).
#[derive(Clone, Debug)]
pub struct RegistryConfig {
    /// Candidate base names, consumed in rotation by `add_region`.
    /// Must be non-empty, and each entry must itself be a valid name.
    pub region_names: Vec<String>,
    /// Maximum length of a region name in characters. Default: 10.
    pub max_name_len: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            region_names: DEFAULT_REGION_NAMES.iter().map(|s| s.to_string()).collect(),
            max_name_len: 10,
        }
    }
}

impl RegistryConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), RegistryConfigError> {
        if self.max_name_len == 0 {
            return Err(RegistryConfigError::ZeroMaxNameLen);
        }
        if self.region_names.is_empty() {
            return Err(RegistryConfigError::EmptyNamePool);
        }
        for name in &self.region_names {
            validate_region_name(name, self.max_name_len).map_err(|reason| {
                RegistryConfigError::InvalidPoolName {
                    name: name.clone(),
                    reason,
                }
            })?;
        }
        Ok(())
    }
}

/// Errors detected by [`RegistryConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryConfigError {
    /// No candidate names were supplied.
    EmptyNamePool,
    /// `max_name_len` is zero, so no name could ever be accepted.
    ZeroMaxNameLen,
    /// A candidate name fails the naming policy.
    InvalidPoolName {
        /// The rejected candidate.
        name: String,
        /// Why it was rejected.
        reason: RegionNameError,
    },
}

impl fmt::Display for RegistryConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNamePool => write!(f, "region name pool is empty"),
            Self::ZeroMaxNameLen => write!(f, "max_name_len must be at least 1"),
            Self::InvalidPoolName { name, reason } => {
                write!(f, "invalid pool name '{name}': {reason}")
            }
        }
    }
}

impl Error for RegistryConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPoolName { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(RegistryConfig::default().validate(), Ok(()));
    }

    #[test]
    fn empty_pool_rejected() {
        let config = RegistryConfig {
            region_names: vec![],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(RegistryConfigError::EmptyNamePool));
    }

    #[test]
    fn zero_max_len_rejected() {
        let config = RegistryConfig {
            max_name_len: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(RegistryConfigError::ZeroMaxNameLen));
    }

    #[test]
    fn pool_entries_must_be_valid_names() {
        let config = RegistryConfig {
            region_names: vec!["ok".into(), "not ok".into()],
            max_name_len: 10,
        };
        assert!(matches!(
            config.validate(),
            Err(RegistryConfigError::InvalidPoolName {
                reason: RegionNameError::ContainsWhitespace,
                ..
            })
        ));
    }
}
