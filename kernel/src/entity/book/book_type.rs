use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BookType(String);

impl BookType {
    pub fn new(book_type: impl Into<String>) -> Self {
        Self(book_type.into())
    }
}

impl AsRef<str> for BookType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<BookType> for String {
    fn from(book_type: BookType) -> Self {
        book_type.0
    }
}
