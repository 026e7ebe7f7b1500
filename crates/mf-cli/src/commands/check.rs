use colored::Colorize;
use mf_core::Severity;

pub fn run(quiet: bool) -> Result<(), String> {
    let catalog = super::load_catalog()?;
    let issues = super::all_issues(&catalog);

    let errors = issues.iter().filter(|i| i.is_error()).count();
    let warnings = issues.len() - errors;

    for issue in &issues {
        let level = match issue.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning if quiet => continue,
            Severity::Warning => "warning".yellow(),
        };
        println!("  {level}: {}: {}", issue.subject.to_string().bold(), issue.message);
    }
    if !issues.is_empty() && !(quiet && errors == 0) {
        println!();
    }

    if errors > 0 {
        return Err(format!(
            "content check failed with {} error{}",
            errors,
            if errors == 1 { "" } else { "s" }
        ));
    }

    println!(
        "  All checks passed: {} scenes, {} items, {} warning{}",
        catalog.scene_count(),
        catalog.item_count(),
        warnings,
        if warnings == 1 { "" } else { "s" },
    );
    Ok(())
}
