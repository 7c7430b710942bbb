//! Key patterns
//!
//! Glob-like matchers over dotted translation keys, used by the ignore lists,
//! write routes and the `usages --filter` option:
//!
//! - `*` matches any run of characters, dots included
//! - `:` matches exactly one key segment
//! - `{a, b}` matches any of the alternatives and captures the match
//!
//! ```rust
//! use i18n_tasks_core::key_pattern::KeyPattern;
//!
//! let pattern = KeyPattern::new("{devise, simple_form}.*").unwrap();
//! assert!(pattern.matches("devise.failure.invalid"));
//! assert_eq!(pattern.captures("simple_form.yes"), vec!["simple_form"]);
//! ```

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;

/// A compiled key pattern
#[derive(Debug, Clone)]
pub struct KeyPattern {
    source: String,
    regex: Regex,
}

impl KeyPattern {
    /// Compile a key pattern
    pub fn new(pattern: &str) -> Result<Self> {
        let body = translate(pattern)?;
        let regex = Regex::new(&format!("^{}$", body))
            .map_err(|e| Error::invalid_key_pattern(pattern, e))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Whether the key matches the whole pattern
    pub fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    /// Values captured by `{...}` groups, empty when the key does not match
    pub fn captures(&self, key: &str) -> Vec<String> {
        self.regex
            .captures(key)
            .map(|caps| {
                caps.iter()
                    .skip(1)
                    .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn translate(pattern: &str) -> Result<String> {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    while let Some(c) = rest.chars().next() {
        if c == '{' {
            let close = rest
                .find('}')
                .ok_or_else(|| Error::invalid_key_pattern(pattern, "unclosed '{'"))?;
            let alternatives = rest[1..close]
                .split(',')
                .map(|alt| translate_segment(alt.trim()))
                .collect::<Vec<_>>();
            out.push('(');
            out.push_str(&alternatives.join("|"));
            out.push(')');
            rest = &rest[close + 1..];
        } else if c == '}' {
            return Err(Error::invalid_key_pattern(pattern, "unmatched '}'"));
        } else {
            out.push_str(&translate_char(c));
            rest = &rest[c.len_utf8()..];
        }
    }

    Ok(out)
}

fn translate_segment(segment: &str) -> String {
    segment.chars().map(translate_char).collect()
}

fn translate_char(c: char) -> String {
    match c {
        '*' => ".*".to_string(),
        ':' => "[^.]+".to_string(),
        _ => regex::escape(c.encode_utf8(&mut [0; 4])),
    }
}

/// A list of key patterns, typically one of the ignore lists
#[derive(Debug, Clone, Default)]
pub struct KeyPatternSet {
    patterns: Vec<KeyPattern>,
}

impl KeyPatternSet {
    /// Compile every pattern in the list
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| KeyPattern::new(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Whether any pattern matches the key
    pub fn matches_any(&self, key: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(key))
    }

    /// Append the patterns of another set
    pub fn extend(&mut self, other: KeyPatternSet) {
        self.patterns.extend(other.patterns);
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_literal_pattern() {
        let p = KeyPattern::new("users.show.title").unwrap();
        assert!(p.matches("users.show.title"));
        assert!(!p.matches("users.show.titles"));
        assert!(!p.matches("usersXshow.title"));
    }

    #[test]
    fn test_star_crosses_segments() {
        let p = KeyPattern::new("errors.*").unwrap();
        assert!(p.matches("errors.messages.blank"));
        assert!(!p.matches("errors"));
    }

    #[test]
    fn test_colon_matches_one_segment() {
        let p = KeyPattern::new("cats.:.name").unwrap();
        assert!(p.matches("cats.tabby.name"));
        assert!(!p.matches("cats.tabby.big.name"));
    }

    #[test]
    fn test_alternatives_capture() {
        let p = KeyPattern::new("{devise, simple_form}.*").unwrap();
        assert!(p.matches("simple_form.labels.name"));
        assert!(!p.matches("activerecord.models"));
        assert_eq!(p.captures("devise.failure"), vec!["devise"]);
    }

    #[test]
    fn test_segment_capture() {
        let p = KeyPattern::new("{:}.*").unwrap();
        assert_eq!(p.captures("admin.users.index"), vec!["admin"]);
        assert!(p.captures("admin").is_empty());
    }

    #[test]
    fn test_unclosed_brace_is_error() {
        let err = KeyPattern::new("{a,b.*").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidKeyPattern);
    }

    #[test]
    fn test_pattern_set() {
        let set = KeyPatternSet::new(&["simple_form.*", "*.placeholder"]).unwrap();
        assert!(set.matches_any("simple_form.yes"));
        assert!(set.matches_any("users.form.placeholder"));
        assert!(!set.matches_any("users.form.title"));
        assert!(KeyPatternSet::default().is_empty());
    }

    proptest! {
        #[test]
        fn literal_keys_match_themselves(key in "[a-z_]{1,8}(\\.[a-z_]{1,8}){0,4}") {
            let p = KeyPattern::new(&key).unwrap();
            prop_assert!(p.matches(&key));
        }

        #[test]
        fn star_matches_everything(key in "[a-z_.]{0,32}") {
            prop_assert!(KeyPattern::new("*").unwrap().matches(&key));
        }
    }
}
