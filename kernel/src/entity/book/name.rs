use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BookName(String);

impl BookName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl AsRef<str> for BookName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<BookName> for String {
    fn from(name: BookName) -> Self {
        name.0
    }
}

/// Matches book names from their head.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BookNamePrefix(String);

impl BookNamePrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// Pattern handed to `LIKE`.
    pub fn as_like_pattern(&self) -> String {
        format!("{}%", self.0)
    }
}

#[cfg(test)]
mod test {
    use crate::entity::BookNamePrefix;

    #[test]
    fn like_pattern_appends_wildcard() {
        let prefix = BookNamePrefix::new("rust");
        assert_eq!(prefix.as_like_pattern(), "rust%");
    }
}
