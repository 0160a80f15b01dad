use serde::Deserialize;

use application::transfer::{GetBookPageDto, GetBookWindowDto, SeekBookPageDto};
use kernel::prelude::entity::{BookId, BookNamePrefix, PageNo, PageSize};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct BookPageRequest {
    name: String,
    #[serde(default)]
    page_no: PageNo,
    #[serde(default)]
    page_size: PageSize,
}

#[derive(Debug, Deserialize)]
pub struct BookSeekRequest {
    name: String,
    last_book_id: Option<i64>,
    #[serde(default)]
    page_size: PageSize,
}

#[derive(Debug, Deserialize)]
pub struct BookWindowRequest {
    name: String,
    book_id: Option<i64>,
    #[serde(default)]
    page_size: PageSize,
}

pub struct BookTransformer;

impl Intake<BookPageRequest> for BookTransformer {
    type To = GetBookPageDto;
    fn emit(&self, input: BookPageRequest) -> Self::To {
        GetBookPageDto {
            name: BookNamePrefix::new(input.name),
            page_no: input.page_no,
            page_size: input.page_size,
        }
    }
}

impl Intake<BookSeekRequest> for BookTransformer {
    type To = SeekBookPageDto;
    fn emit(&self, input: BookSeekRequest) -> Self::To {
        SeekBookPageDto {
            name: BookNamePrefix::new(input.name),
            last_book_id: input.last_book_id.map(BookId::new),
            page_size: input.page_size,
        }
    }
}

impl Intake<BookWindowRequest> for BookTransformer {
    type To = GetBookWindowDto;
    fn emit(&self, input: BookWindowRequest) -> Self::To {
        GetBookWindowDto {
            name: BookNamePrefix::new(input.name),
            book_id: input.book_id.map(BookId::new),
            page_size: input.page_size,
        }
    }
}
