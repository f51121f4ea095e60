//! Synchronization configuration

use crate::error::ModelResult;
use serde::{Deserialize, Serialize};

/// Policy passed to every refreshing read and to materialization
///
/// # Example
/// ```
/// use spdx_model::SyncConfig;
///
/// let config = SyncConfig::from_toml_str("refresh_on_get = false").unwrap();
/// assert!(!config.refresh_on_get);
/// assert!(config.dedup_on_materialize);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Re-read attached properties from the graph on every get
    pub refresh_on_get: bool,
    /// Reuse an existing node with the same name and SHA-1 when attaching
    pub dedup_on_materialize: bool,
}

impl SyncConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that never re-reads the graph on get
    #[inline]
    #[must_use]
    pub fn cached() -> Self {
        Self::default().with_refresh_on_get(false)
    }

    /// With refresh-on-get policy
    #[inline]
    #[must_use]
    pub fn with_refresh_on_get(mut self, refresh: bool) -> Self {
        self.refresh_on_get = refresh;
        self
    }

    /// With dedup-on-materialize policy
    #[inline]
    #[must_use]
    pub fn with_dedup_on_materialize(mut self, dedup: bool) -> Self {
        self.dedup_on_materialize = dedup;
        self
    }

    /// Parse from TOML; missing keys take their defaults
    ///
    /// # Errors
    /// Returns error if the text is not valid TOML for this struct
    pub fn from_toml_str(text: &str) -> ModelResult<Self> {
        Ok(toml::from_str(text)?)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            refresh_on_get: true,
            dedup_on_materialize: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_refresh_and_dedup() {
        let config = SyncConfig::new();
        assert!(config.refresh_on_get);
        assert!(config.dedup_on_materialize);
        assert!(!SyncConfig::cached().refresh_on_get);
    }

    #[test]
    fn toml_overrides_and_defaults() {
        let config = SyncConfig::from_toml_str("dedup_on_materialize = false").unwrap();
        assert!(config.refresh_on_get);
        assert!(!config.dedup_on_materialize);

        let empty = SyncConfig::from_toml_str("").unwrap();
        assert_eq!(empty, SyncConfig::default());
    }

    #[test]
    fn toml_rejects_wrong_types() {
        assert!(SyncConfig::from_toml_str("refresh_on_get = \"yes\"").is_err());
    }
}
