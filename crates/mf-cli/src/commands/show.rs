use colored::Colorize;
use mf_engine::OverrideTable;

pub fn run(id: &str) -> Result<(), String> {
    let catalog = super::load_catalog()?;

    let Some(scene) = catalog.get_scene(id) else {
        let suggestions = super::suggest_scenes(&catalog, id);
        return Err(if suggestions.is_empty() {
            format!("scene not found: \"{id}\"")
        } else {
            format!(
                "scene not found: \"{id}\" (did you mean {}?)",
                suggestions.join(", ")
            )
        });
    };
    let overrides = OverrideTable::mystic_forest(&catalog);

    println!("  {} [{}]", scene.title.bold(), scene.id.as_str().dimmed());
    println!();
    println!("  {}", scene.description);
    println!();

    if scene.is_terminal() {
        println!("  {}", "ending: no choices".dimmed());
    }
    for (i, choice) in scene.choices.iter().enumerate() {
        let route = match overrides.lookup(scene.id.as_str(), choice.target.as_str()) {
            Some(to) => format!("{} → {to} (override)", choice.target),
            None if catalog.has_scene(choice.target.as_str()) => choice.target.to_string(),
            None => format!("{} → {} (missing)", choice.target, catalog.bad_ending()),
        };
        println!("  {}. {}  {}", i + 1, choice.label, route.dimmed());
    }

    if !scene.grants.is_empty() {
        println!();
        let grants: Vec<_> = scene.grants.iter().map(|g| g.as_str()).collect();
        println!("  grants: {}", grants.join(", "));
    }
    if !scene.requirements.is_empty() {
        println!("  requires: {:?}", scene.requirements);
    }

    Ok(())
}
