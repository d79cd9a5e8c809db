//! Decoder configuration.
//!
//! A configuration is captured once when a decode session is created and is
//! read-only for the session's lifetime.

/// The default composite nesting ceiling.
pub const DEFAULT_MAX_NESTING: usize = 19;

/// The default tag key identifying a materializable object.
pub const DEFAULT_TYPE_TAG_KEY: &str = "json_class";

/// Configuration for a decode session.
#[derive(Clone, Debug)]
pub struct DecodeConfig {
    /// Maximum array/object nesting depth. 0 means unlimited.
    pub max_nesting: usize,
    /// Accept the bare literals `NaN`, `Infinity`, and `-Infinity` at value
    /// positions.
    pub allow_extended_numerics: bool,
    /// Offer tagged objects to the session's type resolver.
    pub materialize_types: bool,
    /// Key whose string value names the type of a materializable object.
    pub type_tag_key: String,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_nesting: DEFAULT_MAX_NESTING,
            allow_extended_numerics: false,
            materialize_types: true,
            type_tag_key: DEFAULT_TYPE_TAG_KEY.to_string(),
        }
    }
}

impl DecodeConfig {
    /// Set the nesting ceiling. 0 disables the limit.
    pub fn max_nesting(mut self, limit: usize) -> Self {
        self.max_nesting = limit;
        self
    }

    /// Enable or disable the bare non-finite numeric literals.
    pub fn allow_extended_numerics(mut self, allow: bool) -> Self {
        self.allow_extended_numerics = allow;
        self
    }

    /// Enable or disable type materialization for tagged objects.
    pub fn materialize_types(mut self, materialize: bool) -> Self {
        self.materialize_types = materialize;
        self
    }

    /// Use a different tag key for materializable objects.
    pub fn type_tag_key(mut self, key: impl Into<String>) -> Self {
        self.type_tag_key = key.into();
        self
    }
}
