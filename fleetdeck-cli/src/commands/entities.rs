use anyhow::Result;
use fleetdeck_core::catalog;

/// Print the entity catalog: slug, title and column count.
pub fn run() -> Result<()> {
    for entity in catalog::CATALOG.iter() {
        println!("{:<18} {} ({} columns)", entity.slug, entity.title, entity.fields.len());
    }
    Ok(())
}
