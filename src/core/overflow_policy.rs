//! Overflow policies for the async engine's production buffer
//!
//! When producers outpace the consumer thread, the policy decides whether
//! a push waits for the consumer to free space or lets the buffer grow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy for handling a full production buffer in async logging
///
/// # Example
///
/// ```
/// use bufferlog::OverflowPolicy;
///
/// // Default behavior: bounded memory, producers wait
/// let policy = OverflowPolicy::default();
/// assert_eq!(policy, OverflowPolicy::Safe);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Block the producer until the consumer swaps the full buffer out
    ///
    /// Memory stays bounded by the buffer capacity; a burst of log traffic
    /// slows producers down instead.
    #[default]
    Safe,

    /// Never block; grow the production buffer as far as needed
    ///
    /// Warning: memory use is unbounded while the consumer lags behind.
    /// Meant for benchmarks and controlled environments only.
    Unsafe,
}

impl OverflowPolicy {
    /// Whether producers may be blocked by this policy
    #[inline]
    pub fn blocks_producers(&self) -> bool {
        matches!(self, OverflowPolicy::Safe)
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Safe => write!(f, "Safe"),
            OverflowPolicy::Unsafe => write!(f, "Unsafe"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_policy_default() {
        assert_eq!(OverflowPolicy::default(), OverflowPolicy::Safe);
    }

    #[test]
    fn test_overflow_policy_display() {
        assert_eq!(OverflowPolicy::Safe.to_string(), "Safe");
        assert_eq!(OverflowPolicy::Unsafe.to_string(), "Unsafe");
    }

    #[test]
    fn test_blocks_producers() {
        assert!(OverflowPolicy::Safe.blocks_producers());
        assert!(!OverflowPolicy::Unsafe.blocks_producers());
    }

    #[test]
    fn test_serde_lowercase() {
        let policy: OverflowPolicy = serde_json::from_str("\"unsafe\"").unwrap();
        assert_eq!(policy, OverflowPolicy::Unsafe);
        assert_eq!(serde_json::to_string(&OverflowPolicy::Safe).unwrap(), "\"safe\"");
    }
}
