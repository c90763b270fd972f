//! License normalization and risk categorization

use crate::config::LicensePolicy;
use crate::types::LicenseRisk;

/// Bucket name for resources without a license
pub const UNLICENSED: &str = "unlicensed";

/// Normalize a raw license cell; `None` when it is blank or a missing marker
pub fn normalize_license(raw: &str, policy: &LicensePolicy) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if policy
        .missing_markers
        .iter()
        .any(|marker| marker.eq_ignore_ascii_case(trimmed))
    {
        return None;
    }

    Some(trimmed.to_string())
}

/// Distribution key for a license
pub fn license_bucket(license: Option<&str>) -> &str {
    license.unwrap_or(UNLICENSED)
}

/// Check a license against a filter value (whole value, case-insensitive)
pub fn license_matches(license: Option<&str>, pattern: &str) -> bool {
    license.is_some_and(|l| l.to_lowercase() == pattern.to_lowercase())
}

/// Categorize a license into risk levels
pub fn categorize_license(license: Option<&str>) -> LicenseRisk {
    let Some(license) = license else {
        return LicenseRisk::Unknown;
    };
    let license_lower = license.to_lowercase();

    // dual licenses like "MIT OR GPL-3.0" count as permissive
    if is_permissive(&license_lower) {
        return LicenseRisk::Permissive;
    }

    if is_copyleft(&license_lower) {
        return LicenseRisk::Copyleft;
    }

    if is_proprietary(&license_lower) {
        return LicenseRisk::Proprietary;
    }

    LicenseRisk::Unknown
}

/// Check if license is permissive
fn is_permissive(license: &str) -> bool {
    let permissive = [
        "mit",
        "apache",
        "bsd",
        "isc",
        "0bsd",
        "unlicense",
        "cc0",
        "wtfpl",
        "zlib",
        "boost",
        "bsl-1.0",
    ];

    permissive.iter().any(|&p| license.contains(p))
}

/// Check if license is copyleft
fn is_copyleft(license: &str) -> bool {
    let copyleft = [
        "gpl",
        "mpl",
        "eupl",
        "osl",
        "ms-pl",
        "cddl",
        "epl",
        "cc-by-sa",
    ];

    copyleft.iter().any(|&c| license.contains(c))
}

/// Check if license is proprietary/restrictive
fn is_proprietary(license: &str) -> bool {
    let proprietary = [
        "proprietary",
        "commercial",
        "private",
        "all rights reserved",
        "other",
    ];

    proprietary.iter().any(|&p| license.contains(p))
}
