//! Resource filters for scoped audits

use crate::freshness::on_or_after_cutoff;
use crate::license::license_matches;
use crate::types::Resource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filter criteria for a scoped audit.
///
/// Every criterion that is set must hold (logical AND); unset criteria
/// impose no constraint. String criteria compare the whole value ignoring
/// case, so an unknown value simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    /// Keep only resources whose origin is no longer active
    pub inactive_only: bool,
    /// Keep only resources without a license
    pub no_license_only: bool,
    /// Keep only resources added within the last N days
    pub recent_days: Option<u32>,
}

impl FilterOptions {
    /// True if no criterion is set (high-level audit)
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.sub_category.is_none()
            && self.author.is_none()
            && self.license.is_none()
            && !self.inactive_only
            && !self.no_license_only
            && self.recent_days.is_none()
    }

    /// Check a single resource against every set criterion
    pub fn matches(&self, resource: &Resource, now: DateTime<Utc>) -> bool {
        if let Some(category) = &self.category {
            if !same_value(&resource.category, category) {
                return false;
            }
        }

        if let Some(sub_category) = &self.sub_category {
            match &resource.sub_category {
                Some(value) if same_value(value, sub_category) => {}
                _ => return false,
            }
        }

        if let Some(author) = &self.author {
            if !same_value(&resource.author, author) {
                return false;
            }
        }

        if let Some(license) = &self.license {
            if !license_matches(resource.license.as_deref(), license) {
                return false;
            }
        }

        if self.inactive_only && resource.active {
            return false;
        }

        if self.no_license_only && resource.license.is_some() {
            return false;
        }

        if let Some(days) = self.recent_days {
            match resource.added_at {
                Some(added) if on_or_after_cutoff(added, now, days) => {}
                _ => return false,
            }
        }

        true
    }

    /// Human-readable list of the criteria that are set
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        let mut active = Vec::new();
        if let Some(v) = &self.category {
            active.push(("Category", v.clone()));
        }
        if let Some(v) = &self.sub_category {
            active.push(("Sub Category", v.clone()));
        }
        if let Some(v) = &self.author {
            active.push(("Author", v.clone()));
        }
        if let Some(v) = &self.license {
            active.push(("License", v.clone()));
        }
        if self.inactive_only {
            active.push(("Inactive Only", "true".to_string()));
        }
        if self.no_license_only {
            active.push(("No License Only", "true".to_string()));
        }
        if let Some(days) = self.recent_days {
            active.push(("Recent Days", days.to_string()));
        }
        active
    }
}

fn same_value(value: &str, wanted: &str) -> bool {
    value.to_lowercase() == wanted.to_lowercase()
}

/// Apply the filters, keeping source order
pub fn filter_resources<'a>(
    resources: &'a [Resource],
    filters: &FilterOptions,
    now: DateTime<Utc>,
) -> Vec<&'a Resource> {
    resources
        .iter()
        .filter(|resource| filters.matches(resource, now))
        .collect()
}
