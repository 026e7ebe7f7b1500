pub mod check;
pub mod items;
pub mod play;
pub mod scenes;
pub mod show;

use std::sync::Arc;

use mf_core::{ContentCatalog, IntegrityIssue, check_content_with};
use mf_engine::{ItemEffects, OverrideTable};

/// Build the shipped catalog.
fn load_catalog() -> Result<Arc<ContentCatalog>, String> {
    ContentCatalog::mystic_forest()
        .map(Arc::new)
        .map_err(|e| format!("story content is invalid: {e}"))
}

/// Every integrity issue across the scene graph and both routing tables.
fn all_issues(catalog: &ContentCatalog) -> Vec<IntegrityIssue> {
    let overrides = OverrideTable::mystic_forest(catalog);
    let mut issues = check_content_with(catalog, &overrides.edges());
    issues.extend(overrides.validate(catalog));
    issues.extend(ItemEffects::mystic_forest().validate(catalog));
    issues
}

/// Closest scene ids to a mistyped one.
fn suggest_scenes<'a>(catalog: &'a ContentCatalog, query: &str) -> Vec<&'a str> {
    let mut scored: Vec<(f64, &str)> = catalog
        .all_scene_ids()
        .iter()
        .map(|id| (strsim::jaro_winkler(query, id.as_str()), id.as_str()))
        .filter(|(score, _)| *score >= 0.8)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(3).map(|(_, id)| id).collect()
}
