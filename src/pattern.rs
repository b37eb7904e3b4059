// Pattern Matcher Module
//
// Compiled name filters for database and table listings, following the
// Hive/metastore glob convention: `*` matches any run of characters, `|`
// separates alternative patterns, matching is case-insensitive.

use regex::RegexBuilder;

enum MatcherKind {
    /// Matches every candidate name
    All,
    /// Compiled Hive-style glob
    Pattern(regex::Regex),
    /// Matches nothing (empty or uncompilable pattern)
    None,
}

/// A compiled name filter. Compile once, apply to many candidates.
pub struct PatternMatcher {
    kind: MatcherKind,
}

impl PatternMatcher {
    /// A matcher that accepts every name.
    pub fn match_all() -> Self {
        PatternMatcher {
            kind: MatcherKind::All,
        }
    }

    /// Compile a Hive-style glob pattern. A pattern with no usable
    /// alternatives matches nothing rather than failing, so listing with a
    /// degenerate pattern simply yields an empty result.
    pub fn new_hive_pattern(pattern: &str) -> Self {
        let mut alternatives = Vec::new();
        for alt in pattern.split('|') {
            let alt = alt.trim();
            if alt.is_empty() {
                continue;
            }
            let mut compiled = String::new();
            for ch in alt.chars() {
                if ch == '*' {
                    compiled.push_str(".*");
                } else {
                    compiled.push_str(&regex::escape(ch.encode_utf8(&mut [0u8; 4])));
                }
            }
            alternatives.push(format!("(?:{})", compiled));
        }
        if alternatives.is_empty() {
            return PatternMatcher {
                kind: MatcherKind::None,
            };
        }
        let anchored = format!("^(?:{})$", alternatives.join("|"));
        let kind = match RegexBuilder::new(&anchored).case_insensitive(true).build() {
            Ok(re) => MatcherKind::Pattern(re),
            Err(_) => MatcherKind::None,
        };
        PatternMatcher { kind }
    }

    /// Test a candidate name against this matcher
    pub fn matches(&self, name: &str) -> bool {
        match &self.kind {
            MatcherKind::All => true,
            MatcherKind::Pattern(re) => re.is_match(name),
            MatcherKind::None => false,
        }
    }
}
