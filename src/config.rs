//! Configuration for audit behavior and freshness thresholds

use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the resource table, relative to the repository root
pub const DEFAULT_DATASET: &str = "THE_RESOURCES_TABLE.csv";

/// Main configuration for the audit process
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Path to the resource table (CSV)
    pub dataset_path: PathBuf,
    /// Day thresholds for the freshness buckets
    pub freshness: FreshnessThresholds,
    /// How missing licenses are recognized
    pub license_policy: LicensePolicy,
    /// Number of authors kept in the top-authors distribution
    pub top_authors: usize,
}

/// Thresholds (in days) for the freshness buckets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FreshnessThresholds {
    /// Resources added within this many days count as recently added
    pub recent_added_days: u32,
    /// Resources checked within this many days count as recently checked
    pub recent_checked_days: u32,
    /// Resources last checked more than this many days ago are outdated
    pub outdated_days: u32,
}

/// License policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LicensePolicy {
    /// Cell values that mean "no license was found"
    pub missing_markers: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            freshness: FreshnessThresholds::default(),
            license_policy: LicensePolicy::default(),
            top_authors: 10,
        }
    }
}

impl Default for FreshnessThresholds {
    fn default() -> Self {
        Self {
            recent_added_days: 30,
            recent_checked_days: 7,
            outdated_days: 30,
        }
    }
}

impl Default for LicensePolicy {
    fn default() -> Self {
        Self {
            missing_markers: vec!["NOT_FOUND".to_string()],
        }
    }
}

impl AuditConfig {
    /// Create a new builder for AuditConfig
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder::default()
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AuditConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject thresholds that would make a bucket meaningless
    pub fn validate(&self) -> Result<()> {
        let f = &self.freshness;
        if f.recent_added_days == 0 || f.recent_checked_days == 0 || f.outdated_days == 0 {
            return Err(AuditError::config(
                "freshness thresholds must be at least 1 day",
            ));
        }
        if self.top_authors == 0 {
            return Err(AuditError::config("top_authors must be at least 1"));
        }
        Ok(())
    }
}

/// Builder for AuditConfig
#[derive(Default)]
pub struct AuditConfigBuilder {
    dataset_path: Option<PathBuf>,
    freshness: Option<FreshnessThresholds>,
    license_policy: Option<LicensePolicy>,
    top_authors: Option<usize>,
}

impl AuditConfigBuilder {
    pub fn dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = Some(path.into());
        self
    }

    pub fn freshness(mut self, thresholds: FreshnessThresholds) -> Self {
        self.freshness = Some(thresholds);
        self
    }

    pub fn license_policy(mut self, policy: LicensePolicy) -> Self {
        self.license_policy = Some(policy);
        self
    }

    pub fn top_authors(mut self, n: usize) -> Self {
        self.top_authors = Some(n);
        self
    }

    pub fn build(self) -> AuditConfig {
        let defaults = AuditConfig::default();
        AuditConfig {
            dataset_path: self.dataset_path.unwrap_or(defaults.dataset_path),
            freshness: self.freshness.unwrap_or_default(),
            license_policy: self.license_policy.unwrap_or_default(),
            top_authors: self.top_authors.unwrap_or(defaults.top_authors),
        }
    }
}
