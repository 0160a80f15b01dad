use serde::{Deserialize, Serialize};

// Newtypes rather than raw integers so requests can fall back to defaults
// (default attribute not supported for literals, https://github.com/serde-rs/serde/issues/368)
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PageNo(i64);

impl PageNo {
    pub fn new(no: impl Into<i64>) -> Self {
        Self(no.into())
    }

    /// Rows skipped before this page starts.
    pub fn to_offset(&self, size: &PageSize) -> i64 {
        self.0 * size.as_ref()
    }
}

impl Default for PageNo {
    fn default() -> Self {
        Self(0)
    }
}

impl AsRef<i64> for PageNo {
    fn as_ref(&self) -> &i64 {
        &self.0
    }
}

impl From<PageNo> for i64 {
    fn from(no: PageNo) -> Self {
        no.0
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PageSize(i64);

impl PageSize {
    pub fn new(size: impl Into<i64>) -> Self {
        Self(size.into())
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(10)
    }
}

impl AsRef<i64> for PageSize {
    fn as_ref(&self) -> &i64 {
        &self.0
    }
}

impl From<PageSize> for i64 {
    fn from(size: PageSize) -> Self {
        size.0
    }
}
