//! Structural smoke check for the settings page
//!
//! This is a literal substring check, not an HTML parser: attributes, case and
//! nesting are not looked at.

use crate::error::{CheckError, Result};
use crate::layout::{ProjectLayout, SETTINGS_HTML};

/// Tokens every page must contain, verbatim
pub const REQUIRED_HTML_TOKENS: [&str; 5] =
    ["<!DOCTYPE html>", "<html", "</html>", "<body", "</body>"];

/// Required tokens absent from `content`, in declaration order
pub fn missing_html_tokens(content: &str) -> Vec<&'static str> {
    REQUIRED_HTML_TOKENS
        .iter()
        .copied()
        .filter(|token| !content.contains(token))
        .collect()
}

/// Read `GUI/settings.html` and require every structural token
pub fn check_settings_html(layout: &ProjectLayout) -> Result<()> {
    let path = layout.resolve(SETTINGS_HTML);
    if !path.exists() {
        return Err(CheckError::MissingArtifact(SETTINGS_HTML.to_string()));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| CheckError::io(&path, e))?;
    let missing = missing_html_tokens(&content);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CheckError::MissingHtmlTokens(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PAGE: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head><title>OppNDA</title></head>\n<body class=\"settings\">\n</body>\n</html>\n";

    #[test]
    fn test_complete_page_has_no_missing_tokens() {
        assert!(missing_html_tokens(PAGE).is_empty());
    }

    #[test]
    fn test_lowercase_doctype_is_missing() {
        let page = PAGE.replace("<!DOCTYPE html>", "<!doctype html>");
        assert_eq!(missing_html_tokens(&page), vec!["<!DOCTYPE html>"]);
    }

    #[test]
    fn test_fragment_misses_everything_but_body() {
        let missing = missing_html_tokens("<body><p>settings</p></body>");
        assert_eq!(missing, vec!["<!DOCTYPE html>", "<html", "</html>"]);
    }

    #[test]
    fn test_check_settings_html_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = check_settings_html(&ProjectLayout::new(dir.path())).unwrap_err();
        assert_eq!(err.to_string(), "Missing: GUI/settings.html");
    }

    #[test]
    fn test_check_settings_html_reads_page() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("GUI")).unwrap();
        std::fs::write(dir.path().join(SETTINGS_HTML), PAGE).unwrap();

        check_settings_html(&ProjectLayout::new(dir.path())).unwrap();

        std::fs::write(dir.path().join(SETTINGS_HTML), "<html><body></body>").unwrap();
        let err = check_settings_html(&ProjectLayout::new(dir.path())).unwrap_err();
        match err {
            CheckError::MissingHtmlTokens(tokens) => {
                assert_eq!(tokens, vec!["<!DOCTYPE html>", "</html>"]);
            }
            other => panic!("Expected missing HTML tokens, got {other:?}"),
        }
    }
}
