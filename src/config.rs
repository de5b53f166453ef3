//! Graph construction settings.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Number of vertex slots reserved up front by [`GraphConfig::default`].
///
/// Matches the vector size the engine was tuned for; the memory is only reserved,
/// not initialised.
pub const DEFAULT_INITIAL_CAPACITY: usize = 131_072;

/// Largest `initial_capacity` accepted by [`GraphConfig::from_json`].
pub const MAX_INITIAL_CAPACITY: usize = 1 << 28;

/// Settings for a [`SortledtonGraph`](crate::SortledtonGraph).
///
/// Missing fields fall back to their defaults when deserialized.
///
/// ```rust
/// use sortledton::GraphConfig;
///
/// let config = GraphConfig::from_json(r#"{ "initial_capacity": 16 }"#).unwrap();
/// assert_eq!(config.initial_capacity, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Vertex slots reserved at construction.
    pub initial_capacity: usize,
    /// Run the well-formedness predicate around every public mutator.
    pub check_invariants: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            check_invariants: cfg!(debug_assertions),
        }
    }
}

impl GraphConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    /// [`GraphError::Config`](crate::GraphError::Config) for malformed documents and
    /// for an `initial_capacity` above [`MAX_INITIAL_CAPACITY`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(serde_json::Error::custom(format!(
                "initial_capacity {} exceeds {MAX_INITIAL_CAPACITY}",
                config.initial_capacity
            ))
            .into());
        }
        Ok(config)
    }

    /// Sets the number of slots reserved at construction.
    #[must_use]
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Enables or disables invariant checking around mutators.
    #[must_use]
    pub fn with_check_invariants(mut self, check_invariants: bool) -> Self {
        self.check_invariants = check_invariants;
        self
    }
}
