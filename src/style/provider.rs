//! Style provider tiers.

use std::fmt;

/// Origin of a style definition, ordered by override precedence.
///
/// During a merge, an entry from a higher provider overwrites a same-id
/// entry from a lower one. `BuiltIn`, `Internal` and `Online` populate the
/// base catalog; `Custom` populates the user catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleProvider {
    /// Styles bundled with the library
    BuiltIn,
    /// Internal defaults shipped outside the bundle
    Internal,
    /// Online update feed
    Online,
    /// User configuration file
    Custom,
}

impl StyleProvider {
    /// All providers, in merge order.
    pub const ALL: [StyleProvider; 4] = [
        StyleProvider::BuiltIn,
        StyleProvider::Internal,
        StyleProvider::Online,
        StyleProvider::Custom,
    ];

    /// Whether styles from this provider land in the user catalog.
    pub fn is_user(&self) -> bool {
        matches!(self, StyleProvider::Custom)
    }

    /// Stable index for per-provider bookkeeping such as error slots.
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for StyleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StyleProvider::BuiltIn => "built-in",
            StyleProvider::Internal => "internal",
            StyleProvider::Online => "online",
            StyleProvider::Custom => "custom",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        assert!(StyleProvider::BuiltIn < StyleProvider::Internal);
        assert!(StyleProvider::Internal < StyleProvider::Online);
        assert!(StyleProvider::Online < StyleProvider::Custom);
    }

    #[test]
    fn test_all_is_in_merge_order() {
        let mut sorted = StyleProvider::ALL;
        sorted.sort();
        assert_eq!(sorted, StyleProvider::ALL);
    }

    #[test]
    fn test_user_tier() {
        assert!(StyleProvider::Custom.is_user());
        assert!(!StyleProvider::Online.is_user());
        assert!(!StyleProvider::BuiltIn.is_user());
    }

    #[test]
    fn test_display() {
        assert_eq!(StyleProvider::BuiltIn.to_string(), "built-in");
        assert_eq!(StyleProvider::Custom.to_string(), "custom");
    }
}
