//! # awesome_list_audit
//!
//! Audit tooling for a curated awesome-list resource table, providing:
//! - **Statistics**: totals, active/inactive counts, category and license distributions
//! - **Freshness**: recently added, recently checked, never checked and outdated resources
//! - **Scoped views**: filter by category, sub-category, author, license, status or recency
//! - **Issues**: resources that are inactive, unlicensed or removed from origin
//!
//! ## Quick Start
//!
//! ```no_run
//! use awesome_list_audit::{audit_dataset, AuditConfig, FilterOptions};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = AuditConfig::default();
//! let filters = FilterOptions {
//!     category: Some("Tooling".to_string()),
//!     inactive_only: true,
//!     ..Default::default()
//! };
//! let report = audit_dataset(&filters, &config)?;
//!
//! for detail in &report.resources {
//!     println!("{} ({})", detail.resource.display_name, detail.resource.id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The audit never mutates its input; given the same dataset and reference
//! time it always produces the same report.

mod audit;
mod config;
mod error;
mod filter;
mod freshness;
mod license;
mod parser;
mod types;

// Re-export public API
pub use audit::{audit_dataset, audit_resources, high_level_audit, scoped_audit, summarize, UNCATEGORIZED};
pub use config::{AuditConfig, AuditConfigBuilder, FreshnessThresholds, LicensePolicy, DEFAULT_DATASET};
pub use error::{AuditError, Result};
pub use filter::{filter_resources, FilterOptions};
pub use freshness::{parse_timestamp, TIMESTAMP_FORMAT};
pub use license::{categorize_license, UNLICENSED};
pub use parser::{load_resources, parse_resources};
pub use types::{
    AuditMode, AuditReport, AuditSummary, FreshnessSummary, Issue, IssueKind, LicenseRisk,
    Resource, ResourceDetail, Tally,
};
