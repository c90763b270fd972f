//! CLI tool for auditing the awesome-list resource table

use anyhow::Context;
use awesome_list_audit::{
    audit_dataset, AuditConfig, AuditMode, AuditReport, FilterOptions, Tally, UNLICENSED,
};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Distributions longer than this are cut short in the terminal report
const DISPLAY_LIMIT: usize = 10;

#[derive(Parser)]
#[command(name = "list-audit")]
#[command(about = "Audit the awesome-list resource table: statistics, freshness and scoped views", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the resource table (CSV)
    #[arg(short = 'd', long)]
    dataset: Option<PathBuf>,

    /// Path to custom configuration file (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Filter by category
    #[arg(long)]
    category: Option<String>,

    /// Filter by sub-category
    #[arg(long)]
    sub_category: Option<String>,

    /// Filter by author name
    #[arg(long)]
    author: Option<String>,

    /// Filter by license
    #[arg(long)]
    license: Option<String>,

    /// Show only inactive resources
    #[arg(long)]
    inactive: bool,

    /// Show only resources without a license
    #[arg(long)]
    no_license: bool,

    /// Show resources added in the last N days
    #[arg(long, value_name = "N")]
    recent_days: Option<u32>,

    /// Output in JSON format
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn filters(&self) -> FilterOptions {
        FilterOptions {
            category: self.category.clone(),
            sub_category: self.sub_category.clone(),
            author: self.author.clone(),
            license: self.license.clone(),
            inactive_only: self.inactive,
            no_license_only: self.no_license,
            recent_days: self.recent_days,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => AuditConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AuditConfig::default(),
    };

    if let Some(dataset) = &cli.dataset {
        config.dataset_path = dataset.clone();
    }

    let report = audit_dataset(&cli.filters(), &config).context("audit failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{}", json);
        return Ok(());
    }

    match report.mode {
        AuditMode::HighLevel => display_high_level(&report, &config),
        AuditMode::Scoped => display_scoped(&report),
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn print_tally(tally: &Tally, limit: usize) {
    for (key, count) in tally.iter().take(limit) {
        println!("  {}: {}", key, count);
    }
    if tally.len() > limit {
        println!("  ... and {} more", tally.len() - limit);
    }
}

fn display_high_level(report: &AuditReport, config: &AuditConfig) {
    let s = &report.summary;
    let f = &config.freshness;

    println!("\n{}", "=== High-Level Audit Report ===".bold());
    if let Some(dataset) = &report.dataset {
        println!("Dataset: {}", dataset.cyan());
    }

    println!("\n{}", "Overview".bold());
    println!("  Total Resources: {}", s.total_resources);
    println!(
        "  {} Active: {} ({:.1}%)",
        "●".green(),
        s.active,
        percent(s.active, s.total_resources)
    );
    println!(
        "  {} Inactive: {} ({:.1}%)",
        "●".red(),
        s.inactive,
        percent(s.inactive, s.total_resources)
    );
    println!("  Unique Authors: {}", s.unique_authors);

    println!("\n{}", format!("Categories ({} total)", s.categories.len()).bold());
    print_tally(&s.categories, usize::MAX);

    println!("\n{}", format!("Sub-Categories ({} total)", s.sub_categories.len()).bold());
    print_tally(&s.sub_categories, DISPLAY_LIMIT);

    println!("\n{}", "Licenses".bold());
    println!("  Resources without license: {}", s.no_license);
    println!("  Top licenses:");
    for (license, count) in s
        .licenses
        .iter()
        .filter(|(l, _)| *l != UNLICENSED)
        .take(DISPLAY_LIMIT)
    {
        println!("    {}: {}", license, count);
    }
    println!("  License risk:");
    for (risk, count) in s.license_risk.iter() {
        println!("    {}: {}", risk, count);
    }

    println!("\n{}", "Top Authors".bold());
    for (author, count) in s.top_authors.iter() {
        println!("  {}: {} resources", author, count);
    }

    println!("\n{}", "Freshness".bold());
    println!(
        "  Recently added (last {} days): {}",
        f.recent_added_days, s.freshness.recently_added
    );
    println!(
        "  Recently checked (last {} days): {}",
        f.recent_checked_days, s.freshness.recently_checked
    );
    println!("  Never checked: {}", s.freshness.never_checked);
    println!(
        "  Outdated checks (>{} days): {}",
        f.outdated_days, s.freshness.outdated_checks
    );

    println!("\n{}", "Issues".bold());
    println!("  Removed from origin: {}", s.removed_from_origin);
    println!("  Flagged resources: {}", s.issues.len());
    for issue in s.issues.iter().take(DISPLAY_LIMIT) {
        let kinds: Vec<String> = issue.kinds.iter().map(|k| k.to_string()).collect();
        println!("    - {} ({}): {}", issue.name, issue.id, kinds.join(", ").yellow());
    }
    if s.issues.len() > DISPLAY_LIMIT {
        println!("    ... and {} more", s.issues.len() - DISPLAY_LIMIT);
    }
    println!();
}

fn display_scoped(report: &AuditReport) {
    println!("\n{}", "=== Scoped Audit Report ===".bold());

    println!("\n{}", "Filter Criteria".bold());
    for (name, value) in report.filters.describe() {
        println!("  {}: {}", name, value);
    }

    println!("\nMatched: {} resources", report.matched_count);

    if !report.resources.is_empty() {
        println!("\n{}", "Resources".bold());
    }

    for (i, detail) in report.resources.iter().enumerate() {
        let r = &detail.resource;
        let status = if r.active { "✓".green() } else { "✗".red() };
        let checked = match detail.days_since_check {
            Some(days) => format!("({}d ago)", days),
            None => "(never checked)".to_string(),
        };
        let last_checked = r
            .last_checked_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();

        println!("\n  {}. {} {}", i + 1, status, r.display_name.bold());
        println!(
            "     Category: {} / {}",
            r.category,
            r.sub_category.as_deref().unwrap_or("-")
        );
        println!("     Author: {}", r.author);
        println!("     License: {}", r.license.as_deref().unwrap_or(UNLICENSED));
        println!("     Link: {}", r.primary_link);
        println!("     Last Checked: {} {}", last_checked, checked);
        if r.removed_from_origin {
            println!("     {}", "REMOVED FROM ORIGIN".red().bold());
        }
    }
    println!();
}
