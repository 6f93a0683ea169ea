//! Tracks which options already received a value in the current run.

use std::collections::HashSet;

use super::name::FlagName;

/// Set of option names claimed by a higher-precedence source.
///
/// Both names of an option are claimed together, so a later source cannot
/// reach the option through its other name.
#[derive(Debug, Default, Clone)]
pub struct Claims {
    names: HashSet<String>,
}

impl Claims {
    /// Creates an empty claim set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims every name of the option.
    pub fn claim(&mut self, name: &FlagName) {
        self.names.extend(name.keys());
    }

    /// Whether `name` has been claimed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Moves every claim from `other` into `self`.
    pub fn absorb(&mut self, other: Self) {
        self.names.extend(other.names);
    }

    /// Number of claimed names (long and short counted separately).
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing has been claimed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claiming_registers_both_names() {
        let mut claims = Claims::new();
        claims.claim(&FlagName::parse("port,p").unwrap());

        assert!(claims.contains("port"));
        assert!(claims.contains("p"));
        assert_eq!(claims.len(), 2);
    }

    #[test]
    fn new_set_is_empty() {
        let claims = Claims::new();
        assert!(claims.is_empty());
        assert!(!claims.contains("port"));
    }

    #[test]
    fn absorb_merges_claims() {
        let mut committed = Claims::new();
        committed.claim(&FlagName::parse("debug").unwrap());

        let mut pending = Claims::new();
        pending.claim(&FlagName::parse("v").unwrap());
        committed.absorb(pending);

        assert!(committed.contains("debug"));
        assert!(committed.contains("v"));
    }
}
