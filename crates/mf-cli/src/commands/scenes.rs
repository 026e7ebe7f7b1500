use comfy_table::{ContentArrangement, Table};
use mf_engine::OverrideTable;

pub fn run() -> Result<(), String> {
    let catalog = super::load_catalog()?;
    let overrides = OverrideTable::mystic_forest(&catalog);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Title", "Choices", "Grants"]);

    for scene in catalog.scenes() {
        let choices = if scene.is_terminal() {
            "(ending)".to_string()
        } else {
            scene
                .choices
                .iter()
                .map(|c| {
                    if let Some(to) = overrides.lookup(scene.id.as_str(), c.target.as_str()) {
                        format!("{} → {to}", c.target)
                    } else if catalog.has_scene(c.target.as_str()) {
                        c.target.to_string()
                    } else {
                        format!("{}?", c.target)
                    }
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        let grants = if scene.grants.is_empty() {
            "-".to_string()
        } else {
            scene
                .grants
                .iter()
                .map(|g| g.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![scene.id.as_str(), scene.title.as_str(), choices.as_str(), grants.as_str()]);
    }

    println!("{table}");
    println!();
    println!("  {} scenes (? = routes to {})", catalog.scene_count(), catalog.bad_ending());

    Ok(())
}
