use serde::{Deserialize, Serialize};

/// Compiler configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Minimum similarity score for the fuzzy resolution fallback.
    ///
    /// A candidate word resolves to the vocabulary value with the
    /// strictly-highest score above this threshold; a score exactly at the
    /// threshold does not resolve.
    pub similarity_threshold: f64,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompilerConfig::default();
        assert_eq!(config.similarity_threshold, 0.8);
    }
}
