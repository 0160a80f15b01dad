use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BookNo(String);

impl BookNo {
    pub fn new(no: impl Into<String>) -> Self {
        Self(no.into())
    }
}

impl AsRef<str> for BookNo {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<BookNo> for String {
    fn from(no: BookNo) -> Self {
        no.0
    }
}
