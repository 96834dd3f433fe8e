//! On-disk digest ledger line format: `<hex-digest>  <key>\n`.
//!
//! The ledger is advisory (spec.md §3): readers must tolerate a missing
//! trailing newline on the last line and silently discard malformed
//! lines rather than fail the whole read.

/// One parsed ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerLine {
    /// Lowercase hex SHA-256 digest.
    pub digest_hex: String,
    /// Object key this digest belongs to.
    pub key: String,
}

impl LedgerLine {
    /// Format an append-ready ledger line, newline included.
    pub fn format(digest_hex: &str, key: &str) -> String {
        format!("{digest_hex}  {key}\n")
    }

    /// Parse a single line (without requiring a trailing newline).
    ///
    /// Uses whitespace-run splitting the way the original
    /// `line.strip().split()` does, so lines with irregular spacing
    /// still parse; lines that don't split into exactly two tokens are
    /// discarded as malformed rather than erroring.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let digest_hex = parts.next()?;
        let key = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            digest_hex: digest_hex.to_string(),
            key: key.to_string(),
        })
    }

    /// Parse a whole ledger file's contents into a key → digest map,
    /// keeping the last occurrence of any duplicate key.
    pub fn parse_all(contents: &str) -> std::collections::HashMap<String, String> {
        let mut map = std::collections::HashMap::new();
        for line in contents.lines() {
            if let Some(entry) = Self::parse(line) {
                map.insert(entry.key, entry.digest_hex);
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_two_space_separated() {
        assert_eq!(LedgerLine::format("abc", "k1"), "abc  k1\n");
    }

    #[test]
    fn parses_formatted_line() {
        let line = LedgerLine::format("abc123", "my-key");
        let parsed = LedgerLine::parse(line.trim_end()).unwrap();
        assert_eq!(parsed.digest_hex, "abc123");
        assert_eq!(parsed.key, "my-key");
    }

    #[test]
    fn tolerates_missing_trailing_newline() {
        let contents = "abc  k1\ndef  k2";
        let map = LedgerLine::parse_all(contents);
        assert_eq!(map.get("k1").map(String::as_str), Some("abc"));
        assert_eq!(map.get("k2").map(String::as_str), Some("def"));
    }

    #[test]
    fn discards_malformed_lines() {
        assert_eq!(LedgerLine::parse(""), None);
        assert_eq!(LedgerLine::parse("onlyonetoken"), None);
        assert_eq!(LedgerLine::parse("a b c"), None);
    }

    #[test]
    fn last_occurrence_wins_on_duplicate_key() {
        let contents = "aaa  k\nbbb  k\n";
        let map = LedgerLine::parse_all(contents);
        assert_eq!(map.get("k").map(String::as_str), Some("bbb"));
    }
}
