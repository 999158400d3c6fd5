//! Dependency-parse data model
//!
//! A [`ParsedSentence`] owns its tokens and stores heads as indices into the
//! same sequence, so head references can never dangle once the sentence has
//! been validated.

use crate::error::ParseError;
use std::fmt;

/// Dependency relation label attached to a token
///
/// Only the labels the detector reasons about get their own variant; every
/// other label is kept verbatim in [`DepRole::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepRole {
    /// `det`
    Determiner,
    /// `poss`
    Possessive,
    /// `advmod`
    AdverbialModifier,
    /// `nmod`
    NounModifier,
    /// `nsubj`
    Subject,
    /// `nsubjpass` / `nsubj:pass`
    PassiveSubject,
    /// `ROOT` / `root`
    Root,
    /// `neg`
    Negation,
    /// `preconj`
    PreCoordinator,
    /// `auxpass` / `aux:pass`
    PassiveAuxiliary,
    /// Any other label
    Other(String),
}

impl DepRole {
    /// Map a parser label onto a role
    ///
    /// Accepts both the ClearNLP style labels emitted by spaCy's English
    /// models and their Universal Dependencies spellings.
    pub fn from_label(label: &str) -> Self {
        match label {
            "det" => DepRole::Determiner,
            "poss" | "nmod:poss" => DepRole::Possessive,
            "advmod" => DepRole::AdverbialModifier,
            "nmod" => DepRole::NounModifier,
            "nsubj" => DepRole::Subject,
            "nsubjpass" | "nsubj:pass" => DepRole::PassiveSubject,
            "ROOT" | "root" => DepRole::Root,
            "neg" => DepRole::Negation,
            "preconj" | "cc:preconj" => DepRole::PreCoordinator,
            "auxpass" | "aux:pass" => DepRole::PassiveAuxiliary,
            other => DepRole::Other(other.to_string()),
        }
    }

    /// The canonical label for this role
    pub fn label(&self) -> &str {
        match self {
            DepRole::Determiner => "det",
            DepRole::Possessive => "poss",
            DepRole::AdverbialModifier => "advmod",
            DepRole::NounModifier => "nmod",
            DepRole::Subject => "nsubj",
            DepRole::PassiveSubject => "nsubjpass",
            DepRole::Root => "ROOT",
            DepRole::Negation => "neg",
            DepRole::PreCoordinator => "preconj",
            DepRole::PassiveAuxiliary => "auxpass",
            DepRole::Other(label) => label,
        }
    }

    /// Roles a quantifier token may carry
    pub fn can_host_quantifier(&self) -> bool {
        matches!(
            self,
            DepRole::Determiner
                | DepRole::Possessive
                | DepRole::AdverbialModifier
                | DepRole::NounModifier
                | DepRole::Subject
                | DepRole::PassiveSubject
                | DepRole::Root
        )
    }
}

impl From<&str> for DepRole {
    fn from(label: &str) -> Self {
        DepRole::from_label(label)
    }
}

impl fmt::Display for DepRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single token of a parsed sentence
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// Surface form
    pub text: String,
    /// Dependency relation to the head
    pub role: DepRole,
    /// 0-based position in the sentence
    pub index: usize,
    /// Position of the governing token; equal to `index` for a root
    pub head: usize,
}

impl Token {
    /// Create a new token
    pub fn new(
        index: usize,
        text: impl Into<String>,
        role: impl Into<DepRole>,
        head: usize,
    ) -> Self {
        Self {
            text: text.into(),
            role: role.into(),
            index,
            head,
        }
    }

    /// Whether the token is its own head
    pub fn is_root(&self) -> bool {
        self.head == self.index
    }

    /// Case-insensitive substring test; `needle` must already be lowercase
    pub fn contains(&self, needle: &str) -> bool {
        self.text.to_lowercase().contains(needle)
    }

    /// Identity within a sentence: same text at the same position
    pub fn same_as(&self, other: &Token) -> bool {
        self.index == other.index && self.text == other.text
    }
}

/// A validated dependency parse of one sentence
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParsedSentence {
    tokens: Vec<Token>,
}

impl ParsedSentence {
    /// Validate and wrap a token sequence
    ///
    /// Rejects empty sequences, tokens whose `index` differs from their
    /// position, heads outside the sentence, and head chains that never reach
    /// a self-headed root.
    pub fn new(tokens: Vec<Token>) -> Result<Self, ParseError> {
        if tokens.is_empty() {
            return Err(ParseError::EmptySentence);
        }

        let len = tokens.len();
        for (position, token) in tokens.iter().enumerate() {
            if token.index != position {
                return Err(ParseError::MisplacedToken {
                    position,
                    index: token.index,
                });
            }
            if token.head >= len {
                return Err(ParseError::HeadOutOfRange {
                    index: token.index,
                    head: token.head,
                    len,
                });
            }
        }

        // A chain longer than the sentence must revisit a token.
        for start in 0..len {
            let mut current = start;
            let mut steps = 0;
            while tokens[current].head != current {
                current = tokens[current].head;
                steps += 1;
                if steps > len {
                    return Err(ParseError::Cycle { index: start });
                }
            }
        }

        Ok(Self { tokens })
    }

    /// Tokens in sentence order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false for a validated sentence
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `index`
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// The governing token of `token`
    pub fn head_of(&self, token: &Token) -> &Token {
        &self.tokens[token.head]
    }

    /// Follow heads from `token` up to its root
    pub fn root_of<'a>(&'a self, token: &'a Token) -> &'a Token {
        let mut ancestor = token;
        while !ancestor.is_root() {
            ancestor = self.head_of(ancestor);
        }
        ancestor
    }

    /// Direct dependents of `head`, excluding a root's self-loop
    pub fn dependents_of<'a>(&'a self, head: &'a Token) -> impl Iterator<Item = &'a Token> + 'a {
        self.tokens
            .iter()
            .filter(move |t| t.head == head.index && t.index != head.index)
    }

    /// Surface forms joined by single spaces
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Consume the sentence and return its tokens
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Token> {
        // "nobody came"
        vec![Token::new(0, "nobody", "nsubj", 1), Token::new(1, "came", "ROOT", 1)]
    }

    #[test]
    fn test_role_from_label() {
        assert_eq!(DepRole::from_label("det"), DepRole::Determiner);
        assert_eq!(DepRole::from_label("nsubj:pass"), DepRole::PassiveSubject);
        assert_eq!(DepRole::from_label("root"), DepRole::Root);
        assert_eq!(DepRole::from_label("aux:pass"), DepRole::PassiveAuxiliary);
        assert_eq!(
            DepRole::from_label("dobj"),
            DepRole::Other("dobj".to_string())
        );
        assert_eq!(DepRole::Other("dobj".to_string()).label(), "dobj");
    }

    #[test]
    fn test_quantifier_host_roles() {
        assert!(DepRole::Determiner.can_host_quantifier());
        assert!(DepRole::Root.can_host_quantifier());
        assert!(!DepRole::Negation.can_host_quantifier());
        assert!(!DepRole::Other("dobj".into()).can_host_quantifier());
    }

    #[test]
    fn test_valid_sentence() {
        let sentence = ParsedSentence::new(sample()).unwrap();
        assert_eq!(sentence.len(), 2);
        let first = sentence.get(0).unwrap();
        assert_eq!(sentence.head_of(first).text, "came");
        assert_eq!(sentence.root_of(first).index, 1);
        assert_eq!(sentence.text(), "nobody came");
    }

    #[test]
    fn test_empty_sentence_rejected() {
        assert_eq!(
            ParsedSentence::new(Vec::new()),
            Err(ParseError::EmptySentence)
        );
    }

    #[test]
    fn test_head_out_of_range_rejected() {
        let tokens = vec![Token::new(0, "a", "ROOT", 0), Token::new(1, "b", "dep", 5)];
        assert!(matches!(
            ParsedSentence::new(tokens),
            Err(ParseError::HeadOutOfRange { index: 1, head: 5, .. })
        ));
    }

    #[test]
    fn test_cycle_rejected() {
        let tokens = vec![
            Token::new(0, "a", "dep", 1),
            Token::new(1, "b", "dep", 0),
            Token::new(2, "c", "ROOT", 2),
        ];
        assert_eq!(
            ParsedSentence::new(tokens),
            Err(ParseError::Cycle { index: 0 })
        );
    }

    #[test]
    fn test_misplaced_token_rejected() {
        let tokens = vec![Token::new(1, "a", "ROOT", 1)];
        assert!(matches!(
            ParsedSentence::new(tokens),
            Err(ParseError::MisplacedToken { position: 0, index: 1 })
        ));
    }

    #[test]
    fn test_dependents_skip_self_loop() {
        let sentence = ParsedSentence::new(sample()).unwrap();
        let root = sentence.get(1).unwrap();
        let deps: Vec<_> = sentence.dependents_of(root).map(|t| t.index).collect();
        assert_eq!(deps, vec![0]);
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let token = Token::new(0, "Everything", "nsubj", 0);
        assert!(token.contains("every"));
        assert!(!token.contains("some"));
    }
}
