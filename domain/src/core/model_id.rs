//! Model identifier value object

use serde::{Deserialize, Serialize};

/// Identifier of a reasoning backend (Value Object)
///
/// Backends are opaque to the domain: the only thing the aggregation core
/// knows about one is its model identifier, which is also the clustering key
/// for the effective-sample-size correlation discount.
///
/// # Example
///
/// ```
/// use verdict_domain::ModelId;
///
/// let model = ModelId::new("gpt-4o-mini");
/// assert_eq!(model.as_str(), "gpt-4o-mini");
/// assert_eq!(model.short_name(), "gpt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Create a new model identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string form of this identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get a short display name for the model
    ///
    /// E.g., "gpt-4o-mini" -> "gpt"
    pub fn short_name(&self) -> &str {
        self.0.split(['-', '_']).next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
