use axum::Json;
use serde::Serialize;

use application::transfer::BookPageDto;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct BookPageResponse {
    book_id: i64,
    name: String,
    book_no: String,
    book_type: String,
}

impl From<BookPageDto> for BookPageResponse {
    fn from(value: BookPageDto) -> Self {
        Self {
            book_id: value.book_id,
            name: value.name,
            book_no: value.book_no,
            book_type: value.book_type,
        }
    }
}

pub struct BookPresenter;

impl Exhaust<Vec<BookPageDto>> for BookPresenter {
    type To = Json<Vec<BookPageResponse>>;
    fn emit(&self, input: Vec<BookPageDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(BookPageResponse::from)
            .collect::<Vec<_>>();

        Json::from(result)
    }
}
