//! Detector configuration

use crate::error::ConfigError;
use crate::quantifier::{QuantifierSet, DEFAULT_EXCLUSIONS, DEFAULT_QUANTIFIERS};

/// Sentences kept around each match when building context output
///
/// The window for a match at index `i` spans
/// `[i - preceding, i + following]`, clamped to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextWindow {
    /// Sentences before the match
    pub preceding: usize,
    /// Sentences after the match
    pub following: usize,
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self {
            preceding: 3,
            following: 1,
        }
    }
}

/// Configuration for detection and scanning
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectorConfig {
    /// Quantifiers and excluded words
    pub quantifiers: QuantifierSet,
    /// Context window, `None` to skip context output
    pub context: Option<ContextWindow>,
    /// Evaluate sentences on a worker pool
    pub parallel: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            quantifiers: QuantifierSet::default(),
            context: Some(ContextWindow::default()),
            parallel: false,
        }
    }
}

impl DetectorConfig {
    /// Create a builder
    pub fn builder() -> DetectorConfigBuilder {
        DetectorConfigBuilder::default()
    }
}

/// Builder for [`DetectorConfig`]
#[derive(Debug, Clone)]
pub struct DetectorConfigBuilder {
    quantifiers: Vec<String>,
    exclusions: Vec<String>,
    context: Option<ContextWindow>,
    parallel: bool,
}

impl Default for DetectorConfigBuilder {
    fn default() -> Self {
        Self {
            quantifiers: DEFAULT_QUANTIFIERS.iter().map(|s| s.to_string()).collect(),
            exclusions: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
            context: Some(ContextWindow::default()),
            parallel: false,
        }
    }
}

impl DetectorConfigBuilder {
    /// Set the quantifier substrings
    pub fn quantifiers<I, S>(mut self, quantifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quantifiers = quantifiers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the excluded token texts
    pub fn exclusions<I, S>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions = exclusions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the context window
    pub fn context(mut self, window: Option<ContextWindow>) -> Self {
        self.context = window;
        self
    }

    /// Enable or disable parallel evaluation
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DetectorConfig, ConfigError> {
        let quantifiers = QuantifierSet::new(&self.quantifiers)?.with_exclusions(&self.exclusions);

        Ok(DetectorConfig {
            quantifiers,
            context: self.context,
            parallel: self.parallel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.quantifiers, QuantifierSet::default());
        assert_eq!(
            config.context,
            Some(ContextWindow {
                preceding: 3,
                following: 1
            })
        );
        assert!(!config.parallel);
    }

    #[test]
    fn test_builder_matches_default() {
        let built = DetectorConfig::builder().build().unwrap();
        assert_eq!(built, DetectorConfig::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = DetectorConfig::builder()
            .quantifiers(["all"])
            .exclusions(Vec::<String>::new())
            .context(None)
            .parallel(true)
            .build()
            .unwrap();

        assert_eq!(config.quantifiers.quantifiers(), &["all"]);
        assert!(config.quantifiers.exclusions().is_empty());
        assert!(config.context.is_none());
        assert!(config.parallel);
    }

    #[test]
    fn test_builder_rejects_empty_quantifiers() {
        let result = DetectorConfig::builder()
            .quantifiers(Vec::<String>::new())
            .build();
        assert_eq!(result, Err(ConfigError::NoQuantifiers));
    }
}
