//! Basic example of using the audit API

use awesome_list_audit::{audit_dataset, AuditConfig, FilterOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use default configuration: THE_RESOURCES_TABLE.csv in the current directory
    let config = AuditConfig::default();
    println!("Auditing {}", config.dataset_path.display());

    let report = audit_dataset(&FilterOptions::default(), &config)?;
    let summary = &report.summary;

    println!("\n=== Audit Results ===");
    println!("Total resources: {}", summary.total_resources);
    println!("  Active: {}", summary.active);
    println!("  Inactive: {}", summary.inactive);
    println!("  Without license: {}", summary.no_license);
    println!();

    println!("Categories:");
    for (category, count) in summary.categories.iter() {
        println!("  {}: {}", category, count);
    }

    if !summary.issues.is_empty() {
        println!("\nFlagged resources:");
        for issue in &summary.issues {
            let kinds: Vec<String> = issue.kinds.iter().map(|k| k.to_string()).collect();
            println!("  - {}: {}", issue.name, kinds.join(", "));
        }
    }

    Ok(())
}
