//! Loader for the resource table (CSV)

use crate::config::LicensePolicy;
use crate::error::{AuditError, Result};
use crate::freshness::parse_timestamp;
use crate::license::normalize_license;
use crate::types::Resource;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Columns without which the table cannot be audited
const REQUIRED_COLUMNS: [&str; 3] = ["ID", "Category", "Active"];

/// One raw row of the resource table
#[derive(Debug, Deserialize)]
struct ResourceRow {
    #[serde(rename = "ID", default)]
    id: String,
    #[serde(rename = "Display Name", default)]
    display_name: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Sub-Category", default)]
    sub_category: String,
    #[serde(rename = "Primary Link", default)]
    primary_link: String,
    #[serde(rename = "Author Name", default)]
    author: String,
    #[serde(rename = "License", default)]
    license: String,
    #[serde(rename = "Active", default)]
    active: String,
    #[serde(rename = "Date Added", default)]
    date_added: String,
    #[serde(rename = "Last Checked", default)]
    last_checked: String,
    #[serde(rename = "Removed From Origin", default)]
    removed_from_origin: String,
}

/// Load every resource from a CSV file
pub fn load_resources(path: &Path, policy: &LicensePolicy) -> Result<Vec<Resource>> {
    if !path.exists() {
        return Err(AuditError::DatasetNotFound(path.to_path_buf()));
    }

    debug!("Reading resource table from {}", path.display());
    let file = std::fs::File::open(path)?;
    parse_resources(file, policy)
}

/// Parse resources from any CSV source, keeping row order
pub fn parse_resources<R: Read>(reader: R, policy: &LicensePolicy) -> Result<Vec<Resource>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(AuditError::parse(format!("missing required column '{}'", column)));
        }
    }

    let mut resources = Vec::new();
    let mut seen_ids = HashSet::new();

    for (index, row) in csv_reader.deserialize::<ResourceRow>().enumerate() {
        let row = row?;
        // header is line 1
        let line = index + 2;

        if row.id.is_empty() {
            return Err(AuditError::parse(format!("row at line {} has an empty ID", line)));
        }

        if !seen_ids.insert(row.id.clone()) {
            warn!("Duplicate resource ID '{}' at line {}", row.id, line);
        }

        resources.push(into_resource(row, line, policy));
    }

    debug!("Parsed {} resources", resources.len());
    Ok(resources)
}

fn into_resource(row: ResourceRow, line: usize, policy: &LicensePolicy) -> Resource {
    let added_at = parse_timestamp(&row.date_added);
    if added_at.is_none() && !row.date_added.is_empty() {
        warn!(
            "Unparseable 'Date Added' value '{}' for {} (line {})",
            row.date_added, row.id, line
        );
    }

    let last_checked_at = parse_timestamp(&row.last_checked);
    if last_checked_at.is_none() && !row.last_checked.is_empty() {
        warn!(
            "Unparseable 'Last Checked' value '{}' for {} (line {})",
            row.last_checked, row.id, line
        );
    }

    Resource {
        license: normalize_license(&row.license, policy),
        active: parse_flag(&row.active),
        removed_from_origin: parse_flag(&row.removed_from_origin),
        sub_category: Some(row.sub_category).filter(|s| !s.is_empty()),
        added_at,
        last_checked_at,
        id: row.id,
        display_name: row.display_name,
        category: row.category,
        author: row.author,
        primary_link: row.primary_link,
    }
}

/// Boolean cells are the literal `TRUE`; anything else is false
fn parse_flag(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const HEADER: &str = "ID,Display Name,Category,Sub-Category,Primary Link,Author Name,License,Active,Date Added,Last Checked,Removed From Origin\n";

    fn parse(body: &str) -> Result<Vec<Resource>> {
        let data = format!("{HEADER}{body}");
        parse_resources(data.as_bytes(), &LicensePolicy::default())
    }

    #[test]
    fn test_parse_full_row() {
        let resources = parse(
            "skill-1,My Skill,Agent Skills,General,https://github.com/a/b,alice,MIT,TRUE,2025-07-01:10-00-00,2025-07-20:08-15-30,FALSE\n",
        )
        .unwrap();

        assert_eq!(resources.len(), 1);
        let r = &resources[0];
        assert_eq!(r.id, "skill-1");
        assert_eq!(r.display_name, "My Skill");
        assert_eq!(r.category, "Agent Skills");
        assert_eq!(r.sub_category.as_deref(), Some("General"));
        assert_eq!(r.author, "alice");
        assert_eq!(r.license.as_deref(), Some("MIT"));
        assert!(r.active);
        assert!(!r.removed_from_origin);
        assert_eq!(r.added_at, Some(Utc.with_ymd_and_hms(2025, 7, 1, 10, 0, 0).unwrap()));
        assert_eq!(
            r.last_checked_at,
            Some(Utc.with_ymd_and_hms(2025, 7, 20, 8, 15, 30).unwrap())
        );
    }

    #[test]
    fn test_blank_and_marker_cells() {
        let resources = parse("x,X,Tooling,,,bob,NOT_FOUND,FALSE,garbage,,TRUE\n").unwrap();
        let r = &resources[0];
        assert_eq!(r.sub_category, None);
        assert_eq!(r.license, None);
        assert!(!r.active);
        assert!(r.removed_from_origin);
        assert_eq!(r.added_at, None);
        assert_eq!(r.last_checked_at, None);
    }

    #[test]
    fn test_keeps_row_order_and_duplicates() {
        let resources = parse(
            "b,B,Tooling,,,bob,,TRUE,,,\na,A,Hooks,,,amy,,TRUE,,,\nb,B2,Tooling,,,bob,,TRUE,,,\n",
        )
        .unwrap();
        let ids: Vec<_> = resources.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_short_row_fills_missing_cells() {
        let resources = parse("r1,Short Row,Tooling,General,,dana,MIT,TRUE\n").unwrap();
        let r = &resources[0];
        assert_eq!(r.id, "r1");
        assert!(r.active);
        assert_eq!(r.license.as_deref(), Some("MIT"));
        assert_eq!(r.added_at, None);
        assert_eq!(r.last_checked_at, None);
        assert!(!r.removed_from_origin);
    }

    #[test]
    fn test_extra_and_missing_optional_columns() {
        let data = "ID,Category,Active,Notes\nr1,Tooling,TRUE,whatever\n";
        let resources = parse_resources(data.as_bytes(), &LicensePolicy::default()).unwrap();
        assert_eq!(resources[0].id, "r1");
        assert_eq!(resources[0].author, "");
        assert_eq!(resources[0].license, None);
    }

    #[test]
    fn test_missing_required_column() {
        let data = "Display Name,Category\nfoo,Tooling\n";
        let result = parse_resources(data.as_bytes(), &LicensePolicy::default());
        assert!(matches!(result, Err(AuditError::ParseError(_))));
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let result = parse(",X,Tooling,,,bob,,TRUE,,,\n");
        assert!(matches!(result, Err(AuditError::ParseError(m)) if m.contains("line 2")));
    }

    #[test]
    fn test_missing_file() {
        let result = load_resources(Path::new("/nonexistent/table.csv"), &LicensePolicy::default());
        assert!(matches!(result, Err(AuditError::DatasetNotFound(_))));
    }
}
