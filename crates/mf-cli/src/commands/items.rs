use comfy_table::{ContentArrangement, Table};

pub fn run() -> Result<(), String> {
    let catalog = super::load_catalog()?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Item", "Usable", "Found in", "Description"]);

    for item in catalog.items() {
        let found_in = catalog
            .scenes()
            .filter(|s| s.grants.contains(&item.id))
            .map(|s| s.id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let usable = if item.usable { "yes" } else { "no" };
        table.add_row(vec![item.name.as_str(), usable, found_in.as_str(), item.description.as_str()]);
    }

    println!("{table}");
    println!();
    println!("  {} items", catalog.item_count());

    Ok(())
}
