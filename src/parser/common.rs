//! Shared parser configuration.

use std::collections::HashMap;

/// Tunables shared by all format parsers.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Reject a file larger than this many bytes before reading it.
    pub max_file_size: usize,
    /// Reject syntax the parser can't make sense of instead of skipping it.
    pub strict_validation: bool,
    /// Prefix declarations seeded before parsing starts, in addition to
    /// whatever `@prefix` lines the document itself declares.
    pub prefixes: HashMap<String, String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_file_size: 100 * 1024 * 1024,
            strict_validation: true,
            prefixes: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.max_file_size, 100 * 1024 * 1024);
        assert!(config.strict_validation);
        assert!(config.prefixes.is_empty());
    }
}
