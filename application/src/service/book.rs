use kernel::interface::database::{DependOnDatabaseConnection, QueryDatabaseConnection};
use kernel::interface::query::{BookPaginationQuery, DependOnBookPaginationQuery};
use kernel::prelude::entity::BookIdWindow;
use kernel::KernelError;

use crate::transfer::{BookPageDto, GetBookPageDto, GetBookWindowDto, SeekBookPageDto};

#[async_trait::async_trait]
pub trait GetBookPageService<Connection: Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookPaginationQuery<Connection>
{
    async fn get_book_page(
        &self,
        dto: GetBookPageDto,
    ) -> error_stack::Result<Vec<BookPageDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let books = self
            .book_pagination_query()
            .find_page(&mut connection, &dto.name, &dto.page_no, &dto.page_size)
            .await?;

        Ok(books.into_iter().map(BookPageDto::from).collect())
    }

    async fn get_book_page_covering(
        &self,
        dto: GetBookPageDto,
    ) -> error_stack::Result<Vec<BookPageDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let books = self
            .book_pagination_query()
            .find_page_covering(&mut connection, &dto.name, &dto.page_no, &dto.page_size)
            .await?;

        Ok(books.into_iter().map(BookPageDto::from).collect())
    }

    async fn get_book_page_covering_raw(
        &self,
        dto: GetBookPageDto,
    ) -> error_stack::Result<Vec<BookPageDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let books = self
            .book_pagination_query()
            .find_page_covering_raw(&mut connection, &dto.name, &dto.page_no, &dto.page_size)
            .await?;

        Ok(books.into_iter().map(BookPageDto::from).collect())
    }
}

impl<Connection: Send, T> GetBookPageService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookPaginationQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait SeekBookPageService<Connection: Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookPaginationQuery<Connection>
{
    async fn seek_book_page(
        &self,
        dto: SeekBookPageDto,
    ) -> error_stack::Result<Vec<BookPageDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let books = self
            .book_pagination_query()
            .find_after(
                &mut connection,
                dto.last_book_id.as_ref(),
                &dto.name,
                &dto.page_size,
            )
            .await?;

        Ok(books.into_iter().map(BookPageDto::from).collect())
    }
}

impl<Connection: Send, T> SeekBookPageService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookPaginationQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait WindowBookPageService<Connection: Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookPaginationQuery<Connection>
{
    async fn get_book_window(
        &self,
        dto: GetBookWindowDto,
    ) -> error_stack::Result<Vec<BookPageDto>, KernelError> {
        let window = BookIdWindow::new(dto.book_id, &dto.page_size)?;

        let mut connection = self.database_connection().transact().await?;

        let books = self
            .book_pagination_query()
            .find_window(&mut connection, &dto.name, &window, &dto.page_size)
            .await?;

        Ok(books.into_iter().map(BookPageDto::from).collect())
    }
}

impl<Connection: Send, T> WindowBookPageService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookPaginationQuery<Connection>
{
}
