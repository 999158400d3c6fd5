//! Quantifier vocabulary

use crate::error::ConfigError;
use crate::token::Token;

/// Quantifiers searched for when the caller does not name any
pub const DEFAULT_QUANTIFIERS: &[&str] = &["every", "some", "no"];

/// Token texts that never count as quantifiers
///
/// "know" contains "no" but is never a quantifier.
pub const DEFAULT_EXCLUSIONS: &[&str] = &["know"];

/// Set of quantifier substrings plus excluded token texts
///
/// Matching is substring-based and case-insensitive, so "every" also finds
/// "Everything" and "everyone". Exclusions compare the whole token text
/// exactly, so "Know" at the start of a sentence is still a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuantifierSet {
    quantifiers: Vec<String>,
    exclusions: Vec<String>,
}

impl QuantifierSet {
    /// Build a set from substrings, keeping the default exclusions
    pub fn new<I, S>(quantifiers: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for (position, quantifier) in quantifiers.into_iter().enumerate() {
            let quantifier = quantifier.as_ref().trim().to_lowercase();
            if quantifier.is_empty() {
                return Err(ConfigError::EmptyQuantifier(position));
            }
            if !normalized.contains(&quantifier) {
                normalized.push(quantifier);
            }
        }

        if normalized.is_empty() {
            return Err(ConfigError::NoQuantifiers);
        }

        Ok(Self {
            quantifiers: normalized,
            exclusions: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Replace the excluded token texts
    pub fn with_exclusions<I, S>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclusions = exclusions
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        self
    }

    /// Quantifier substrings in the order given
    pub fn quantifiers(&self) -> &[String] {
        &self.quantifiers
    }

    /// Excluded token texts
    pub fn exclusions(&self) -> &[String] {
        &self.exclusions
    }

    /// Iterate over the quantifier substrings
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.quantifiers.iter().map(String::as_str)
    }

    /// Whether the token text contains any quantifier substring
    pub fn matches(&self, token: &Token) -> bool {
        let lowered = token.text.to_lowercase();
        self.quantifiers.iter().any(|q| lowered.contains(q.as_str()))
    }

    /// Whether the token text is on the exclusion list
    pub fn is_excluded(&self, token: &Token) -> bool {
        self.exclusions
            .iter()
            .any(|word| token.text == *word)
    }
}

impl Default for QuantifierSet {
    fn default() -> Self {
        Self {
            quantifiers: DEFAULT_QUANTIFIERS.iter().map(|s| s.to_string()).collect(),
            exclusions: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set() {
        let set = QuantifierSet::default();
        assert_eq!(set.quantifiers(), &["every", "some", "no"]);
        assert_eq!(set.exclusions(), &["know"]);
    }

    #[test]
    fn test_new_normalizes_and_dedups() {
        let set = QuantifierSet::new([" Every ", "every", "SOME"]).unwrap();
        assert_eq!(set.quantifiers(), &["every", "some"]);
    }

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(
            QuantifierSet::new(Vec::<String>::new()),
            Err(ConfigError::NoQuantifiers)
        );
        assert_eq!(
            QuantifierSet::new(["no", "  "]),
            Err(ConfigError::EmptyQuantifier(1))
        );
    }

    #[test]
    fn test_matches_substring_case_insensitive() {
        let set = QuantifierSet::default();
        assert!(set.matches(&Token::new(0, "Nobody", "nsubj", 0)));
        assert!(set.matches(&Token::new(0, "someone", "nsubj", 0)));
        assert!(!set.matches(&Token::new(0, "apple", "dobj", 0)));
    }

    #[test]
    fn test_exclusions() {
        let set = QuantifierSet::default();
        assert!(set.is_excluded(&Token::new(0, "know", "ROOT", 0)));
        assert!(!set.is_excluded(&Token::new(0, "Know", "ROOT", 0)));
        assert!(!set.is_excluded(&Token::new(0, "KNOW", "ROOT", 0)));
        assert!(!set.is_excluded(&Token::new(0, "knows", "ROOT", 0)));

        let set = set.with_exclusions(["None", ""]);
        assert_eq!(set.exclusions(), &["None"]);
        assert!(set.is_excluded(&Token::new(0, "None", "ROOT", 0)));
        assert!(!set.is_excluded(&Token::new(0, "none", "ROOT", 0)));
        assert!(!set.is_excluded(&Token::new(0, "know", "ROOT", 0)));
    }
}
