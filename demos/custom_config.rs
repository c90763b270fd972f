//! Example showing custom configuration and a scoped audit

use awesome_list_audit::{
    audit_resources, load_resources, AuditConfig, FilterOptions, FreshnessThresholds,
    LicensePolicy,
};
use chrono::Utc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AuditConfig::builder()
        .dataset_path("THE_RESOURCES_TABLE.csv")
        .freshness(FreshnessThresholds {
            recent_added_days: 14,
            recent_checked_days: 3,
            outdated_days: 60,
        })
        .license_policy(LicensePolicy {
            missing_markers: vec!["NOT_FOUND".to_string(), "NOASSERTION".to_string()],
        })
        .top_authors(5)
        .build();
    config.validate()?;

    let resources = load_resources(&config.dataset_path, &config.license_policy)?;

    let filters = FilterOptions {
        category: Some("Tooling".to_string()),
        inactive_only: true,
        ..Default::default()
    };
    let report = audit_resources(&resources, &filters, &config, Utc::now());

    println!("=== Inactive Tooling ===");
    println!("Matched {} of {} resources", report.matched_count, resources.len());
    for detail in &report.resources {
        let checked = detail
            .days_since_check
            .map(|d| format!("{}d ago", d))
            .unwrap_or_else(|| "never".to_string());
        println!("  {} ({}), last checked {}", detail.resource.display_name, detail.resource.id, checked);
    }

    Ok(())
}
