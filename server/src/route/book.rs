use axum::extract::{Query, State};
use axum::routing::get;
use axum::Router;

use application::service::{GetBookPageService, SeekBookPageService, WindowBookPageService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{BookPageRequest, BookSeekRequest, BookTransformer, BookWindowRequest};
use crate::response::BookPresenter;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl BookRouter for Router<AppModule> {
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(
                |State(module): State<AppModule>, Query(req): Query<BookPageRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.pgpool().get_book_page(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/seek",
            get(
                |State(module): State<AppModule>, Query(req): Query<BookSeekRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.pgpool().seek_book_page(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/covering",
            get(
                |State(module): State<AppModule>, Query(req): Query<BookPageRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|dto| async move {
                            module.pgpool().get_book_page_covering(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/covering/raw",
            get(
                |State(module): State<AppModule>, Query(req): Query<BookPageRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|dto| async move {
                            module.pgpool().get_book_page_covering_raw(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/window",
            get(
                |State(module): State<AppModule>, Query(req): Query<BookWindowRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.pgpool().get_book_window(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
