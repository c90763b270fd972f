//! Main audit orchestration logic

use crate::config::AuditConfig;
use crate::error::Result;
use crate::filter::{filter_resources, FilterOptions};
use crate::freshness::{days_since, freshness_summary};
use crate::license::{categorize_license, license_bucket};
use crate::parser::load_resources;
use crate::types::{
    AuditMode, AuditReport, AuditSummary, Issue, IssueKind, Resource, ResourceDetail, Tally,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, info};

/// Bucket name for blank categories and missing sub-categories
pub const UNCATEGORIZED: &str = "uncategorized";

/// Load the configured resource table and audit it
pub fn audit_dataset(filters: &FilterOptions, config: &AuditConfig) -> Result<AuditReport> {
    info!("Starting audit of {}", config.dataset_path.display());

    let resources = load_resources(&config.dataset_path, &config.license_policy)?;
    info!("Loaded {} resources", resources.len());

    let mut report = audit_resources(&resources, filters, config, Utc::now());
    report.dataset = Some(config.dataset_path.display().to_string());
    Ok(report)
}

/// Audit an in-memory collection.
///
/// Without filters this is a high-level audit of everything; otherwise the
/// summary only covers the matched resources.
pub fn audit_resources(
    resources: &[Resource],
    filters: &FilterOptions,
    config: &AuditConfig,
    now: DateTime<Utc>,
) -> AuditReport {
    if filters.is_empty() {
        high_level_audit(resources, config, now)
    } else {
        scoped_audit(resources, filters, config, now)
    }
}

/// Repository-wide audit
pub fn high_level_audit(
    resources: &[Resource],
    config: &AuditConfig,
    now: DateTime<Utc>,
) -> AuditReport {
    let all: Vec<&Resource> = resources.iter().collect();
    let report = build_report(AuditMode::HighLevel, FilterOptions::default(), &all, config, now);

    info!(
        "Audit complete: {}/{} active, {} without license, {} issues",
        report.summary.active,
        report.summary.total_resources,
        report.summary.no_license,
        report.summary.issues.len(),
    );
    report
}

/// Audit restricted to the resources matching `filters`
pub fn scoped_audit(
    resources: &[Resource],
    filters: &FilterOptions,
    config: &AuditConfig,
    now: DateTime<Utc>,
) -> AuditReport {
    let matched = filter_resources(resources, filters, now);
    debug!("Filters {:?} matched {} of {}", filters, matched.len(), resources.len());

    let report = build_report(AuditMode::Scoped, filters.clone(), &matched, config, now);
    info!("Scoped audit complete: {} resources matched", report.matched_count);
    report
}

fn build_report(
    mode: AuditMode,
    filters: FilterOptions,
    matched: &[&Resource],
    config: &AuditConfig,
    now: DateTime<Utc>,
) -> AuditReport {
    let details = matched
        .iter()
        .map(|resource| ResourceDetail {
            resource: (*resource).clone(),
            days_since_check: resource.last_checked_at.map(|checked| days_since(checked, now)),
        })
        .collect();

    AuditReport {
        dataset: None,
        generated_at: now,
        mode,
        filters,
        matched_count: matched.len(),
        resources: details,
        summary: summarize(matched, config, now),
    }
}

/// Compute counts and distributions over a set of resources
pub fn summarize(resources: &[&Resource], config: &AuditConfig, now: DateTime<Utc>) -> AuditSummary {
    let total = resources.len();
    let active = resources.iter().filter(|r| r.active).count();

    let categories = Tally::count(resources.iter().map(|r| {
        if r.category.is_empty() {
            UNCATEGORIZED
        } else {
            r.category.as_str()
        }
    }));
    let sub_categories = Tally::count(
        resources
            .iter()
            .map(|r| r.sub_category.as_deref().unwrap_or(UNCATEGORIZED)),
    );

    let licenses = Tally::count(resources.iter().map(|r| license_bucket(r.license.as_deref())));
    let license_risk = Tally::count(
        resources
            .iter()
            .map(|r| categorize_license(r.license.as_deref()).as_str()),
    );
    let no_license = resources.iter().filter(|r| r.license.is_none()).count();

    let authors: Vec<&str> = resources
        .iter()
        .map(|r| r.author.as_str())
        .filter(|a| !a.is_empty())
        .collect();
    let unique_authors = authors.iter().collect::<HashSet<_>>().len();
    let top_authors = Tally::count(authors).truncated(config.top_authors);

    AuditSummary {
        total_resources: total,
        active,
        inactive: total - active,
        categories,
        sub_categories,
        licenses,
        license_risk,
        no_license,
        unique_authors,
        top_authors,
        freshness: freshness_summary(resources.iter().copied(), now, &config.freshness),
        removed_from_origin: resources.iter().filter(|r| r.removed_from_origin).count(),
        issues: resources.iter().filter_map(|r| issue_for(r)).collect(),
    }
}

fn issue_for(resource: &Resource) -> Option<Issue> {
    let mut kinds = Vec::new();
    if !resource.active {
        kinds.push(IssueKind::Inactive);
    }
    if resource.license.is_none() {
        kinds.push(IssueKind::MissingLicense);
    }
    if resource.removed_from_origin {
        kinds.push(IssueKind::RemovedFromOrigin);
    }

    if kinds.is_empty() {
        return None;
    }

    Some(Issue {
        id: resource.id.clone(),
        name: resource.display_name.clone(),
        kinds,
    })
}
