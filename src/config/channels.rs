//! Channel feature detection
//!
//! Scans ZeroClaw's `config.toml` for the channel sections that imply cargo
//! features, so a configured integration is compiled in without the operator
//! tracking feature flags by hand. This is a narrow line scanner, not a TOML
//! parser: it only recognizes `[section]` headers and `key = value` lines,
//! and a file that is invalid TOML elsewhere still scans fine.
//!
//! Detected mappings:
//! - `[channels_config.matrix]` → `channel-matrix`
//! - `[channels_config.lark]` or `[channels_config.feishu]` → `channel-lark`
//! - `[channels_config.whatsapp]` with a non-empty `session_path` →
//!   `whatsapp-web`

use std::fs;
use std::path::Path;

use crate::features::FeatureSet;

const SECTION_MATRIX: &str = "channels_config.matrix";
const SECTION_LARK: &str = "channels_config.lark";
// feishu is the pre-rename spelling of lark; both map to the same feature
const SECTION_FEISHU: &str = "channels_config.feishu";
const SECTION_WHATSAPP: &str = "channels_config.whatsapp";

/// Line-oriented scanner over `[section]` headers and `key = value` lines
pub struct SectionScanner<'a> {
    lines: std::iter::Peekable<std::str::Lines<'a>>,
}

impl<'a> SectionScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().peekable(),
        }
    }

    /// Advance to the next section header and return its name, trimmed of
    /// brackets and surrounding whitespace. Returns `None` at end of input.
    pub fn next_section(&mut self) -> Option<&'a str> {
        for line in self.lines.by_ref() {
            if let Some(name) = section_name(line) {
                return Some(name);
            }
        }
        None
    }

    /// Return the next `key = value` pair before the following section
    /// header, with the key trimmed and the value cleaned (comment stripped,
    /// trimmed, one pair of surrounding quotes removed). Stops without
    /// consuming the next header so section iteration can continue.
    pub fn next_key_value(&mut self) -> Option<(&'a str, &'a str)> {
        loop {
            let line = *self.lines.peek()?;
            if section_name(line).is_some() {
                return None;
            }
            let line = self.lines.next()?;
            if let Some((key, raw_value)) = line.split_once('=') {
                let key = key.trim();
                if !key.is_empty() {
                    return Some((key, clean_value(raw_value)));
                }
            }
        }
    }
}

/// Parse a line as a `[section]` header, returning the trimmed name
fn section_name(line: &str) -> Option<&str> {
    let line = line.trim();
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    Some(inner.trim())
}

/// Strip a trailing `#` comment, trim whitespace, and remove one pair of
/// matching surrounding quotes
fn clean_value(raw: &str) -> &str {
    let uncommented = match raw.find('#') {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    let trimmed = uncommented.trim();

    let bytes = trimmed.as_bytes();
    if trimmed.len() >= 2 {
        let (first, last) = (bytes[0], bytes[trimmed.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}

/// Scan a config file and return the features it implies.
///
/// A missing or unreadable file yields an empty set; detection is purely
/// informative and never fails the build.
pub fn detect(path: &Path) -> FeatureSet {
    match fs::read_to_string(path) {
        Ok(text) => {
            let features = detect_in_text(&text);
            tracing::debug!(
                path = %path.display(),
                features = %features.to_arg(),
                "scanned config for channel features"
            );
            features
        }
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "config not readable, skipping detection");
            FeatureSet::new()
        }
    }
}

fn detect_in_text(text: &str) -> FeatureSet {
    let mut features = FeatureSet::new();
    let mut scanner = SectionScanner::new(text);

    while let Some(section) = scanner.next_section() {
        match section {
            SECTION_MATRIX => {
                features.insert("channel-matrix");
            }
            SECTION_LARK | SECTION_FEISHU => {
                features.insert("channel-lark");
            }
            SECTION_WHATSAPP => {
                while let Some((key, value)) = scanner.next_key_value() {
                    if key == "session_path" && !value.is_empty() {
                        features.insert("whatsapp-web");
                    }
                }
            }
            _ => {}
        }
    }

    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_empty_set() {
        let temp = TempDir::new().unwrap();
        let features = detect(&temp.path().join("nope.toml"));
        assert!(features.is_empty());
    }

    #[test]
    fn test_matrix_section_implies_channel_matrix() {
        let features = detect_in_text("[channels_config.matrix]\n");
        assert_eq!(features.to_arg(), "channel-matrix");
    }

    #[test]
    fn test_lark_and_feishu_both_imply_channel_lark() {
        let lark = detect_in_text("[channels_config.lark]\n");
        let feishu = detect_in_text("[channels_config.feishu]\n");
        assert_eq!(lark.to_arg(), "channel-lark");
        assert_eq!(feishu.to_arg(), "channel-lark");

        // Both present still yields the feature once
        let both = detect_in_text("[channels_config.lark]\n[channels_config.feishu]\n");
        assert_eq!(both.to_arg(), "channel-lark");
    }

    #[test]
    fn test_whatsapp_needs_non_empty_session_path() {
        let empty = detect_in_text("[channels_config.whatsapp]\nsession_path = \"\"\n");
        assert!(empty.is_empty());

        let set = detect_in_text("[channels_config.whatsapp]\nsession_path = \"/tmp/s\"\n");
        assert_eq!(set.to_arg(), "whatsapp-web");
    }

    #[test]
    fn test_whatsapp_section_without_session_path_is_ignored() {
        let features = detect_in_text("[channels_config.whatsapp]\nenabled = true\n");
        assert!(features.is_empty());
    }

    #[test]
    fn test_session_path_outside_whatsapp_section_is_ignored() {
        let text = "[channels_config.whatsapp]\n\n[other]\nsession_path = \"/tmp/s\"\n";
        let features = detect_in_text(text);
        assert!(features.is_empty());
    }

    #[test]
    fn test_session_path_value_cleaning() {
        // Trailing comment, whitespace, single quotes
        let text = "[channels_config.whatsapp]\nsession_path = ' /tmp/s '  # persisted session\n";
        // Comment stripped first, then trim, then quote strip; inner spaces
        // survive quote stripping
        let features = detect_in_text(text);
        assert_eq!(features.to_arg(), "whatsapp-web");

        // A value that is only a comment is empty
        let commented = detect_in_text("[channels_config.whatsapp]\nsession_path = # unset\n");
        assert!(commented.is_empty());
    }

    #[test]
    fn test_section_matching_is_exact() {
        let text = "[channels_config.matrix_bridge]\n[channels_config]\n[matrix]\n";
        let features = detect_in_text(text);
        assert!(features.is_empty());
    }

    #[test]
    fn test_headers_tolerate_surrounding_whitespace() {
        let features = detect_in_text("   [ channels_config.matrix ]   \n");
        assert_eq!(features.to_arg(), "channel-matrix");
    }

    #[test]
    fn test_invalid_toml_elsewhere_does_not_break_detection() {
        let text = "this is not = = valid toml\n[channels_config.matrix]\n%%%\n";
        let features = detect_in_text(text);
        assert_eq!(features.to_arg(), "channel-matrix");
    }

    #[test]
    fn test_multiple_sections_accumulate() {
        let text = "\
[channels_config.matrix]
homeserver = \"https://matrix.org\"

[channels_config.whatsapp]
session_path = \"/var/lib/zeroclaw/wa\"

[channels_config.feishu]
app_id = \"cli_x\"
";
        let features = detect_in_text(text);
        assert_eq!(features.to_arg(), "channel-matrix,whatsapp-web,channel-lark");
    }

    #[test]
    fn test_scanner_stops_key_scan_at_next_header() {
        let mut scanner = SectionScanner::new("[a]\nk1 = v1\n[b]\nk2 = v2\n");
        assert_eq!(scanner.next_section(), Some("a"));
        assert_eq!(scanner.next_key_value(), Some(("k1", "v1")));
        assert_eq!(scanner.next_key_value(), None);
        assert_eq!(scanner.next_section(), Some("b"));
        assert_eq!(scanner.next_key_value(), Some(("k2", "v2")));
    }

    #[test]
    fn test_detect_reads_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[channels_config.matrix]\n").unwrap();
        assert_eq!(detect(&path).to_arg(), "channel-matrix");
    }
}
