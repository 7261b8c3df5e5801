// Schema File Loader
//
// Builds a catalog from a directory holding one schema file per table. The
// file name is the table name; each line declares one column.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use super::error::CatalogResult;
use super::schema::Schema;
use super::Catalog;

/// Load every schema file in `dir` into a new catalog
pub fn load_dir(dir: impl AsRef<Path>) -> CatalogResult<Catalog> {
    let dir = dir.as_ref();
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut catalog = Catalog::new();
    for entry in entries {
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(table_name) = file_name.to_str() else {
            warn!("Skipping schema file with non UTF-8 name: {:?}", file_name);
            continue;
        };
        if table_name.starts_with('.') {
            continue;
        }

        let text = fs::read_to_string(entry.path())?;
        let schema = Schema::parse(table_name, &text)?;
        debug!("Loaded schema for {} ({} columns)", table_name, schema.column_count());
        catalog.add_table(schema)?;
    }
    Ok(catalog)
}
