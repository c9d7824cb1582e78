//! Locations command implementation.

use anyhow::Result;
use std::path::Path;

use super::load_store;

/// Prints the surveyed locations in order of first appearance.
pub(crate) async fn list_locations(data: &Path, quiet: bool) -> Result<()> {
    let store = load_store(data, quiet).await?;

    for location in store.locations() {
        if quiet {
            println!("{location}");
        } else {
            println!("{location:<30} {:>6} rows", store.row_count(location));
        }
    }

    if !quiet {
        println!();
        println!("Total: {} locations", store.locations().len());
    }

    Ok(())
}
