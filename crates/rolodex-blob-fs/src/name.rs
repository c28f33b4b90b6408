//! Blob name handling: what is kept of a client filename, and which names
//! `load` will resolve.

const FALLBACK_NAME: &str = "upload";

/// Reduce a client-supplied filename to a single safe path component.
///
/// Directory parts (either separator) are dropped, every character outside
/// `[A-Za-z0-9._-]` becomes `_`, and leading dots are stripped.
pub fn sanitize_file_name(original: &str) -> String {
  let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
  let cleaned: String = base
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
        c
      } else {
        '_'
      }
    })
    .collect();

  let trimmed = cleaned.trim_start_matches('.');
  if trimmed.is_empty() {
    FALLBACK_NAME.to_owned()
  } else {
    trimmed.to_owned()
  }
}

/// Whether `name` could have been produced by the store: one non-empty path
/// component with no separators and no leading dot. The leading-dot rule
/// also covers `.` and `..`; dots inside a component are harmless.
pub fn is_blob_name(name: &str) -> bool {
  !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\', '\0'])
}
