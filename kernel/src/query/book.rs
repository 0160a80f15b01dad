use crate::entity::{Book, BookId, BookIdWindow, BookNamePrefix, PageNo, PageSize};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookPaginationQuery<Connection: Send>: Sync + Send + 'static {
    /// Plain limit/offset page. The skip cost grows with `page`.
    async fn find_page(
        &self,
        con: &mut Connection,
        name: &BookNamePrefix,
        page: &PageNo,
        size: &PageSize,
    ) -> error_stack::Result<Vec<Book>, KernelError>;

    /// Seeks past the last seen id instead of skipping rows. `None` starts
    /// from the newest book.
    async fn find_after(
        &self,
        con: &mut Connection,
        last: Option<&BookId>,
        name: &BookNamePrefix,
        size: &PageSize,
    ) -> error_stack::Result<Vec<Book>, KernelError>;

    /// Resolves the page ids against the name index first, then fetches the
    /// full rows. Row order of the second fetch is best effort.
    async fn find_page_covering(
        &self,
        con: &mut Connection,
        name: &BookNamePrefix,
        page: &PageNo,
        size: &PageSize,
    ) -> error_stack::Result<Vec<Book>, KernelError>;

    /// Same plan as `find_page_covering`, written as one literal query.
    async fn find_page_covering_raw(
        &self,
        con: &mut Connection,
        name: &BookNamePrefix,
        page: &PageNo,
        size: &PageSize,
    ) -> error_stack::Result<Vec<Book>, KernelError>;

    /// Seek bounded to `window` on both sides.
    async fn find_window(
        &self,
        con: &mut Connection,
        name: &BookNamePrefix,
        window: &BookIdWindow,
        size: &PageSize,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
}

pub trait DependOnBookPaginationQuery<Connection: Send>: Sync + Send + 'static {
    type BookPaginationQuery: BookPaginationQuery<Connection>;
    fn book_pagination_query(&self) -> &Self::BookPaginationQuery;
}
