use std::path::Path;

use serde::Serialize;

use crate::error::SurveyError;

use super::ensure_parent_dir;

/// Write any serializable value as JSON.
pub fn write_json<T: Serialize + ?Sized>(
    value: &T,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), SurveyError> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let content = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    std::fs::write(path, content)?;
    Ok(())
}
