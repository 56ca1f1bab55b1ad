//! Figma share-link parsing.
//!
//! Accepts links like `https://www.figma.com/design/<key>/<Name>?node-id=347-3746`
//! (or `/file/`). Node ids appear as `<major>-<minor>` in URLs but the API
//! expects `<major>:<minor>`.

use std::sync::LazyLock;

use figmacopy_shared::{FigmaCopyError, FigmaRef, Result};
use regex::Regex;

/// Matches `figma.com/(file|design)/<key>[/<name>][...node-id=<id>]`.
static FIGMA_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"figma\.com/(file|design)/([A-Za-z0-9]+)(?:/[^?]+)?(?:.*node-id=([^&\s]+))?")
        .expect("figma url regex")
});

/// Parse a Figma URL into its file key and optional node id.
pub fn parse_figma_url(url: &str) -> Result<FigmaRef> {
    let caps = FIGMA_URL_RE
        .captures(url)
        .ok_or_else(|| FigmaCopyError::InvalidUrlFormat {
            url: url.to_string(),
        })?;

    let node_id = caps.get(3).map(|m| normalize_node_id(m.as_str()));

    Ok(FigmaRef {
        file_key: caps[2].to_string(),
        node_id,
    })
}

/// Turn a URL-encoded node id into API form. Only the first `-` is the
/// major/minor separator.
fn normalize_node_id(raw: &str) -> String {
    raw.replace("%3A", ":")
        .replace("%3a", ":")
        .replacen('-', ":", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_url_with_hyphenated_node_id() {
        let parsed =
            parse_figma_url("https://www.figma.com/design/ABC123/Name?node-id=347-3746").unwrap();
        assert_eq!(parsed.file_key, "ABC123");
        assert_eq!(parsed.node_id.as_deref(), Some("347:3746"));
    }

    #[test]
    fn file_url_with_colon_node_id() {
        let parsed =
            parse_figma_url("https://www.figma.com/file/xYz9/Design?node-id=347:3746").unwrap();
        assert_eq!(parsed.file_key, "xYz9");
        assert_eq!(parsed.node_id.as_deref(), Some("347:3746"));
    }

    #[test]
    fn percent_encoded_colon() {
        let parsed =
            parse_figma_url("https://www.figma.com/file/KEY/Design?node-id=12%3A34").unwrap();
        assert_eq!(parsed.node_id.as_deref(), Some("12:34"));
    }

    #[test]
    fn node_id_stops_at_next_query_param() {
        let parsed = parse_figma_url(
            "https://www.figma.com/design/KEY/Name?type=design&node-id=1-2&mode=dev",
        )
        .unwrap();
        assert_eq!(parsed.node_id.as_deref(), Some("1:2"));
    }

    #[test]
    fn only_first_hyphen_is_replaced() {
        let parsed =
            parse_figma_url("https://www.figma.com/design/KEY/Name?node-id=1-2-3").unwrap();
        assert_eq!(parsed.node_id.as_deref(), Some("1:2-3"));
    }

    #[test]
    fn missing_node_id_is_absent_not_error() {
        let parsed = parse_figma_url("https://www.figma.com/design/KEY/Name").unwrap();
        assert_eq!(parsed.file_key, "KEY");
        assert!(parsed.node_id.is_none());
    }

    #[test]
    fn non_figma_url_fails() {
        let err = parse_figma_url("https://example.com/design/KEY").unwrap_err();
        assert!(matches!(err, FigmaCopyError::InvalidUrlFormat { .. }));

        let err = parse_figma_url("https://www.figma.com/proto/KEY/Name").unwrap_err();
        assert!(matches!(err, FigmaCopyError::InvalidUrlFormat { .. }));
    }
}
