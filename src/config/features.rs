//! Ordered, de-duplicated cargo feature sets

use std::fmt;

/// Whether the mandatory baseline feature is injected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureBaseline {
    #[default]
    Inject,
    Suppress,
}

/// Feature tokens in insertion order, each appearing once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet(Vec<String>);

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a user-supplied list separated by spaces and/or commas
    pub fn parse(list: &str) -> Self {
        let mut set = Self::new();
        set.extend(
            list.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty()),
        );
        set
    }

    pub fn insert(&mut self, token: impl Into<String>) {
        let token = token.into();
        if !token.is_empty() && !self.contains(&token) {
            self.0.push(token);
        }
    }

    pub fn extend<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            self.insert(token);
        }
    }

    /// A new set holding `self` followed by the tokens of `other` not yet present
    pub fn merged(&self, other: &FeatureSet) -> FeatureSet {
        let mut merged = self.clone();
        merged.extend(other.iter().map(str::to_string));
        merged
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = FeatureSet::new();
        set.extend(iter);
        set
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}
