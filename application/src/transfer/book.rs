use kernel::prelude::entity::{
    Book, BookId, BookNamePrefix, DestructBook, PageNo, PageSize,
};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookPageDto {
    pub book_id: i64,
    pub name: String,
    pub book_no: String,
    pub book_type: String,
}

impl From<Book> for BookPageDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            name,
            book_no,
            book_type,
        } = value.into_destruct();
        Self {
            book_id: id.into(),
            name: name.into(),
            book_no: book_no.into(),
            book_type: book_type.into(),
        }
    }
}

pub struct GetBookPageDto {
    pub name: BookNamePrefix,
    pub page_no: PageNo,
    pub page_size: PageSize,
}

pub struct SeekBookPageDto {
    pub name: BookNamePrefix,
    pub last_book_id: Option<BookId>,
    pub page_size: PageSize,
}

pub struct GetBookWindowDto {
    pub name: BookNamePrefix,
    pub book_id: Option<BookId>,
    pub page_size: PageSize,
}
