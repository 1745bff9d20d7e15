//! Configuration options for normalization.

use serde::{Deserialize, Serialize};

/// Default separator that marks a composite (non-atomic) value.
pub const DEFAULT_MULTI_VALUE_SEPARATOR: char = ',';

/// Default bound on the number of attributes explored by key discovery.
pub const DEFAULT_MAX_KEY_SEARCH_ATTRIBUTES: usize = 20;

/// Options controlling checks and decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NormalizeOptions {
    /// A stored value containing this character is composite (violates 1NF).
    pub multi_value_separator: char,

    /// Drop repeated rows from every projected relation.
    ///
    /// 4NF splits always de-duplicate; other forms keep duplicates unless
    /// this is set.
    pub deduplicate_projections: bool,

    /// Upper bound on the attributes candidate-key discovery may enumerate.
    pub max_key_search_attributes: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            multi_value_separator: DEFAULT_MULTI_VALUE_SEPARATOR,
            deduplicate_projections: false,
            max_key_search_attributes: DEFAULT_MAX_KEY_SEARCH_ATTRIBUTES,
        }
    }
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.multi_value_separator = separator;
        self
    }

    #[must_use]
    pub fn with_deduplication(mut self, enable: bool) -> Self {
        self.deduplicate_projections = enable;
        self
    }

    #[must_use]
    pub fn with_key_search_limit(mut self, limit: usize) -> Self {
        self.max_key_search_attributes = limit;
        self
    }
}
