//! Quantifier + negation detection
//!
//! Two strategies decide whether a negation marker is associated with a
//! quantifier:
//!
//! - **Scope traversal** ([`reversed_traversal`]) climbs from the last
//!   negation marker to the root of its clause and looks for a quantifier at
//!   the root or in front of it.
//! - **Direct attachment** ([`assoc_negation_exists`]) resolves the node the
//!   quantifier hangs off ([`quantifier_root`]) and looks for a negation
//!   marker attached to it, directly or one level down.
//!
//! Scope traversal always runs first and is authoritative: when it succeeds,
//! direct attachment is not consulted.

use crate::error::ParseError;
use crate::parser::DependencyParser;
use crate::quantifier::QuantifierSet;
use crate::token::{DepRole, ParsedSentence, Token};

/// Outcome of evaluating one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    /// No token qualified as a quantifier; neither strategy ran
    NoQuantifier,
    /// Negation scopes over the quantifier's clause
    ScopeNegation,
    /// Negation attaches to the quantifier's governing node
    AttachedNegation,
    /// A quantifier was found but neither strategy associated a negation
    NotNegated,
}

impl Verdict {
    /// Whether the sentence is a quantifier + negation match
    pub fn is_match(self) -> bool {
        matches!(self, Verdict::ScopeNegation | Verdict::AttachedNegation)
    }
}

/// First token that qualifies as a quantifier
///
/// A token qualifies when its text contains one of the quantifier substrings,
/// its role is one that can host a quantifier, and its text is not excluded.
pub fn find_quantifier<'a>(
    sentence: &'a ParsedSentence,
    quantifiers: &QuantifierSet,
) -> Option<&'a Token> {
    sentence.tokens().iter().find(|token| {
        token.role.can_host_quantifier()
            && quantifiers.matches(token)
            && !quantifiers.is_excluded(token)
    })
}

/// Node against which negation attachment is checked
///
/// Returns `None` for roles that cannot host a quantifier.
pub fn quantifier_root<'a>(sentence: &'a ParsedSentence, quantifier: &Token) -> Option<&'a Token> {
    let head = sentence.head_of(quantifier);
    match quantifier.role {
        DepRole::Subject | DepRole::PassiveSubject => {
            if matches!(head.role, DepRole::Subject | DepRole::PassiveAuxiliary) {
                Some(sentence.head_of(head))
            } else {
                Some(head)
            }
        }
        DepRole::Determiner
        | DepRole::Possessive
        | DepRole::AdverbialModifier
        | DepRole::NounModifier => Some(sentence.head_of(head)),
        _ => None,
    }
}

/// Scope traversal from the last negation marker
///
/// Succeeds when the root reached from the last `neg`/`preconj` token is itself
/// a quantifier, or when a quantifier depends directly on that root and comes
/// before it.
pub fn reversed_traversal(sentence: &ParsedSentence, quantifiers: &QuantifierSet) -> bool {
    let Some(negation) = sentence
        .tokens()
        .iter()
        .rev()
        .find(|t| matches!(t.role, DepRole::Negation | DepRole::PreCoordinator))
    else {
        return false;
    };

    let root = sentence.root_of(negation);
    log::trace!(
        "negation {:?}@{} scopes under root {:?}@{}",
        negation.text,
        negation.index,
        root.text,
        root.index
    );

    quantifiers.iter().any(|quantifier| {
        if root.role == DepRole::Root && root.contains(quantifier) {
            return true;
        }
        sentence
            .dependents_of(root)
            .any(|t| t.index < root.index && t.contains(quantifier))
    })
}

/// Negation attached to the quantifier root, directly or through one head
pub fn assoc_negation_exists(sentence: &ParsedSentence, q_root: &Token) -> bool {
    sentence
        .tokens()
        .iter()
        .filter(|t| t.role == DepRole::Negation)
        .any(|negation| {
            let head = sentence.head_of(negation);
            head.same_as(q_root) || sentence.head_of(head).same_as(q_root)
        })
}

/// Evaluate a parsed sentence and report which rule decided
pub fn evaluate(sentence: &ParsedSentence, quantifiers: &QuantifierSet) -> Verdict {
    let Some(quantifier) = find_quantifier(sentence, quantifiers) else {
        return Verdict::NoQuantifier;
    };

    if reversed_traversal(sentence, quantifiers) {
        return Verdict::ScopeNegation;
    }

    match quantifier_root(sentence, quantifier) {
        Some(q_root) if assoc_negation_exists(sentence, q_root) => Verdict::AttachedNegation,
        Some(_) => Verdict::NotNegated,
        None => {
            log::debug!(
                "quantifier {:?} with role {} has no root",
                quantifier.text,
                quantifier.role
            );
            Verdict::NotNegated
        }
    }
}

/// Whether a parsed sentence contains a quantifier + negation construction
pub fn is_quantifier_negation(sentence: &ParsedSentence, quantifiers: &QuantifierSet) -> bool {
    evaluate(sentence, quantifiers).is_match()
}

/// Detector bound to a parser and a quantifier set
///
/// The parser is borrowed so that one loaded model can back any number of
/// detectors.
pub struct Detector<'p, P: DependencyParser + ?Sized> {
    parser: &'p P,
    quantifiers: QuantifierSet,
}

impl<'p, P: DependencyParser + ?Sized> Detector<'p, P> {
    /// Create a detector
    pub fn new(parser: &'p P, quantifiers: QuantifierSet) -> Self {
        Self {
            parser,
            quantifiers,
        }
    }

    /// The quantifier set in use
    pub fn quantifiers(&self) -> &QuantifierSet {
        &self.quantifiers
    }

    /// The underlying parser
    pub fn parser(&self) -> &'p P {
        self.parser
    }

    /// Parse and evaluate a sentence
    pub fn evaluate(&self, sentence: &str) -> Result<Verdict, ParseError> {
        let parsed = self.parser.parse(sentence)?;
        Ok(evaluate(&parsed, &self.quantifiers))
    }

    /// Parse a sentence and decide whether it matches
    pub fn detect(&self, sentence: &str) -> Result<bool, ParseError> {
        self.evaluate(sentence).map(Verdict::is_match)
    }

    /// Decide on an already parsed sentence
    pub fn detect_tokens(&self, sentence: &ParsedSentence) -> bool {
        is_quantifier_negation(sentence, &self.quantifiers)
    }
}
