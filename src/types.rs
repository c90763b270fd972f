//! Core data types for resource auditing

use crate::filter::FilterOptions;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// A single cataloged entry of the resource list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    /// Unique identifier
    pub id: String,
    /// Human-readable name
    pub display_name: String,
    pub category: String,
    pub sub_category: Option<String>,
    pub author: String,
    /// `None` when the table has no license or a "not found" marker
    pub license: Option<String>,
    /// Whether the upstream origin was reachable at the last check
    pub active: bool,
    /// Whether the resource was taken down upstream
    pub removed_from_origin: bool,
    pub primary_link: String,
    pub added_at: Option<DateTime<Utc>>,
    pub last_checked_at: Option<DateTime<Utc>>,
}

/// Count distribution ordered by count (descending), ties in first-seen order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<(String, usize)>,
}

impl Tally {
    /// Count every key produced by `keys`
    pub fn count<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<(String, usize)> = Vec::new();

        for key in keys {
            let key = key.into();
            match index.get(&key) {
                Some(&pos) => entries[pos].1 += 1,
                None => {
                    index.insert(key.clone(), entries.len());
                    entries.push((key, 1));
                }
            }
        }

        // stable: equal counts stay in first-seen order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries }
    }

    /// Keep only the `n` most common keys
    pub fn truncated(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, count)| (k.as_str(), *count))
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// License risk categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseRisk {
    /// Permissive licenses (MIT, Apache, BSD, etc.)
    Permissive,
    /// Copyleft licenses (GPL, LGPL, AGPL, etc.)
    Copyleft,
    /// Proprietary or restrictive licenses
    Proprietary,
    /// License not found or not recognized
    Unknown,
}

impl LicenseRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Permissive => "permissive",
            Self::Copyleft => "copyleft",
            Self::Proprietary => "proprietary",
            Self::Unknown => "unknown",
        }
    }
}

/// Freshness buckets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FreshnessSummary {
    pub recently_added: usize,
    pub recently_checked: usize,
    pub never_checked: usize,
    pub outdated_checks: usize,
}

/// Why a resource shows up in the issue list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Inactive,
    MissingLicense,
    RemovedFromOrigin,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inactive => write!(f, "inactive"),
            Self::MissingLicense => write!(f, "missing license"),
            Self::RemovedFromOrigin => write!(f, "removed from origin"),
        }
    }
}

/// A resource flagged by the audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub id: String,
    pub name: String,
    pub kinds: Vec<IssueKind>,
}

/// Summary statistics for a set of resources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub total_resources: usize,
    pub active: usize,
    pub inactive: usize,
    pub categories: Tally,
    pub sub_categories: Tally,
    pub licenses: Tally,
    pub license_risk: Tally,
    pub no_license: usize,
    pub unique_authors: usize,
    pub top_authors: Tally,
    pub freshness: FreshnessSummary,
    pub removed_from_origin: usize,
    pub issues: Vec<Issue>,
}

/// Whether the summary covers the whole dataset or a filtered scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditMode {
    HighLevel,
    Scoped,
}

/// A matched resource together with its check age
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDetail {
    #[serde(flatten)]
    pub resource: Resource,
    /// Whole days since the last check, `None` if never checked
    pub days_since_check: Option<i64>,
}

/// Complete audit report for a resource table
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// Where the resources came from, if loaded from a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    /// Reference time the freshness metrics were computed against
    pub generated_at: DateTime<Utc>,
    pub mode: AuditMode,
    pub filters: FilterOptions,
    pub matched_count: usize,
    /// Matched resources in source order
    pub resources: Vec<ResourceDetail>,
    pub summary: AuditSummary,
}
