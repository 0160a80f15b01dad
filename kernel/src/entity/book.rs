mod book_type;
mod id;
mod name;
mod no;
mod window;

pub use self::{book_type::*, id::*, name::*, no::*, window::*};
use destructure::Destructure;

#[derive(Debug, Clone, Eq, PartialEq, Destructure)]
pub struct Book {
    id: BookId,
    name: BookName,
    book_no: BookNo,
    book_type: BookType,
}

impl Book {
    pub fn new(id: BookId, name: BookName, book_no: BookNo, book_type: BookType) -> Self {
        Self {
            id,
            name,
            book_no,
            book_type,
        }
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn name(&self) -> &BookName {
        &self.name
    }

    pub fn book_no(&self) -> &BookNo {
        &self.book_no
    }

    pub fn book_type(&self) -> &BookType {
        &self.book_type
    }
}
