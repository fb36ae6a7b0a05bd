/**
 * Filename Sanitization
 *
 * Every name that reaches the filesystem goes through `secure_filename`
 * first, so a client can never address a path outside its workspace.
 *
 * # Rules
 *
 * 1. Non-ASCII characters are dropped
 * 2. Path separators (`/`, `\`) become spaces
 * 3. Runs of whitespace collapse into a single `_`
 * 4. Characters outside `[A-Za-z0-9_.-]` are dropped
 * 5. Leading and trailing `.` and `_` are stripped
 *
 * The result may be empty; callers must reject that.
 */
use crate::backend::workspace::error::WorkspaceError;
use crate::shared::FLOW_FILE_EXTENSION;

/// Reduce an arbitrary string to a safe single path component
pub fn secure_filename(raw: &str) -> String {
    let spaced: String = raw
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    filtered.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Turn a client-supplied document name into its stored filename
///
/// The `.flow.json` suffix is optional on input and always present on
/// output. Fails with `InvalidInput` when nothing usable remains after
/// sanitization.
pub fn document_file_name(raw: &str) -> Result<String, WorkspaceError> {
    let trimmed = raw.trim();
    let stem = trimmed.strip_suffix(FLOW_FILE_EXTENSION).unwrap_or(trimmed);
    let safe = secure_filename(stem);
    if safe.is_empty() {
        return Err(WorkspaceError::invalid_input(format!(
            "Invalid filename: {:?}",
            raw
        )));
    }
    Ok(format!("{}{}", safe, FLOW_FILE_EXTENSION))
}

/// Listed name of a stored document, i.e. the filename without its suffix
pub fn display_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(FLOW_FILE_EXTENSION)
        .filter(|stem| !stem.is_empty())
}
