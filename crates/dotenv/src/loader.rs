//! Applies parsed entries to a repository.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;
use crate::parser::Entry;
use crate::repository::Repository;

/// Variables written during one load, by name.
pub type LoadedVariables = BTreeMap<String, String>;

/// Write `entries` into `repository` in order.
///
/// `${NAME}` references resolve against `repository` as it stands when the entry is
/// written, so earlier accepted entries are visible to later ones. Later entries for the
/// same name win, unless the repository declines them. Only accepted writes appear in
/// the result.
pub fn load_entries(repository: &dyn Repository, entries: Vec<Entry>) -> Result<LoadedVariables> {
    let mut loaded = LoadedVariables::new();

    for Entry { name, value } in entries {
        let value = value.resolve(|reference| repository.get(reference));
        if repository.set(&name, &value)? {
            loaded.insert(name, value);
        }
    }

    debug!(count = loaded.len(), "Loaded environment variables");
    Ok(loaded)
}
