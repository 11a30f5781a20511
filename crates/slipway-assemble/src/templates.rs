//! Placeholder substitution for the copied HTML templates.

use std::fs;
use std::path::Path;

use crate::assembler::AssembleError;

/// The literal token replaced by the resolved site URL.
pub const URL_PLACEHOLDER: &str = "{{url}}";

/// Destination files subject to substitution.
pub const TEMPLATE_FILES: &[&str] = &["index.html", "game.html"];

/// Replace every occurrence of the placeholder, returning the new content
/// and the number of occurrences replaced.
pub fn substitute(content: &str, url: &str) -> (String, usize) {
    let count = content.matches(URL_PLACEHOLDER).count();
    (content.replace(URL_PLACEHOLDER, url), count)
}

/// Rewrite the template files that exist under `build_path` in place.
///
/// Substitution is whole-content: the file is read fully, every placeholder
/// occurrence is replaced, and the result is written back over the same
/// file. Template files absent from the destination are skipped.
pub fn resolve_placeholders(build_path: &Path, url: &str) -> Result<usize, AssembleError> {
    let mut total = 0;

    for name in TEMPLATE_FILES {
        let path = build_path.join(name);
        if !path.exists() {
            continue;
        }

        let content = fs::read_to_string(&path).map_err(|e| AssembleError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let (resolved, count) = substitute(&content, url);
        if count > 0 {
            fs::write(&path, resolved).map_err(|e| AssembleError::Write {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            tracing::debug!("Replaced {} placeholder(s) in {}", count, path.display());
        }

        total += count;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn replaces_every_occurrence() {
        let (out, count) = substitute(
            "<a href=\"{{url}}\">{{url}}</a>",
            "https://x.test",
        );
        assert_eq!(out, "<a href=\"https://x.test\">https://x.test</a>");
        assert_eq!(count, 2);
    }

    #[test]
    fn leaves_files_without_placeholders_untouched() {
        let (out, count) = substitute("<p>static</p>", "https://x.test");
        assert_eq!(out, "<p>static</p>");
        assert_eq!(count, 0);
    }

    #[test]
    fn skips_missing_template_files() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("game.html"), "{{url}}").unwrap();

        let total = resolve_placeholders(temp.path(), "https://x.test").unwrap();

        assert_eq!(total, 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("game.html")).unwrap(),
            "https://x.test"
        );
        assert!(!temp.path().join("index.html").exists());
    }
}
