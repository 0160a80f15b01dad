use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, Postgres};

use kernel::interface::query::{BookPaginationQuery, DependOnBookPaginationQuery};
use kernel::prelude::entity::{
    Book, BookId, BookIdWindow, BookName, BookNamePrefix, BookNo, BookType, PageNo, PageSize,
};
use kernel::KernelError;

use crate::database::postgres::PostgresDatabase;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookPaginationQuery<PoolConnection<Postgres>> for PostgresBookRepository {
    async fn find_page(
        &self,
        con: &mut PoolConnection<Postgres>,
        name: &BookNamePrefix,
        page: &PageNo,
        size: &PageSize,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_page(con, name, page, size).await
    }

    async fn find_after(
        &self,
        con: &mut PoolConnection<Postgres>,
        last: Option<&BookId>,
        name: &BookNamePrefix,
        size: &PageSize,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_after(con, last, name, size).await
    }

    async fn find_page_covering(
        &self,
        con: &mut PoolConnection<Postgres>,
        name: &BookNamePrefix,
        page: &PageNo,
        size: &PageSize,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_page_covering(con, name, page, size).await
    }

    async fn find_page_covering_raw(
        &self,
        con: &mut PoolConnection<Postgres>,
        name: &BookNamePrefix,
        page: &PageNo,
        size: &PageSize,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_page_covering_raw(con, name, page, size).await
    }

    async fn find_window(
        &self,
        con: &mut PoolConnection<Postgres>,
        name: &BookNamePrefix,
        window: &BookIdWindow,
        size: &PageSize,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_window(con, name, window, size).await
    }
}

impl DependOnBookPaginationQuery<PoolConnection<Postgres>> for PostgresDatabase {
    type BookPaginationQuery = PostgresBookRepository;
    fn book_pagination_query(&self) -> &Self::BookPaginationQuery {
        &PostgresBookRepository
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    name: String,
    book_no: String,
    book_type: String,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookName::new(value.name),
            BookNo::new(value.book_no),
            BookType::new(value.book_type),
        )
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_page(
        con: &mut PgConnection,
        name: &BookNamePrefix,
        page: &PageNo,
        size: &PageSize,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, name, book_no, book_type
            FROM books
            WHERE name LIKE $1
            ORDER BY id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(name.as_like_pattern())
        .bind(size.as_ref())
        .bind(page.to_offset(size))
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_after(
        con: &mut PgConnection,
        last: Option<&BookId>,
        name: &BookNamePrefix,
        size: &PageSize,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, name, book_no, book_type
            FROM books
            WHERE name LIKE $1
              AND ($2::BIGINT IS NULL OR id < $2)
            ORDER BY id DESC
            LIMIT $3
            "#,
        )
        .bind(name.as_like_pattern())
        .bind(last.map(|id| i64::from(id.clone())))
        .bind(size.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_page_covering(
        con: &mut PgConnection,
        name: &BookNamePrefix,
        page: &PageNo,
        size: &PageSize,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        // 1) resolve the page ids against the name index
        let ids: Vec<i64> = sqlx::query_scalar(
            // language=postgresql
            r#"
            SELECT id
            FROM books
            WHERE name LIKE $1
            ORDER BY id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(name.as_like_pattern())
        .bind(size.as_ref())
        .bind(page.to_offset(size))
        .fetch_all(&mut *con)
        .await
        .convert_error()?;

        // 1-1) nothing matched, no need to touch the table again
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        // 2) id = ANY() alone does not pin the row order, the sort is best effort
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, name, book_no, book_type
            FROM books
            WHERE id = ANY($1)
            ORDER BY id DESC
            "#,
        )
        .bind(ids)
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_page_covering_raw(
        con: &mut PgConnection,
        name: &BookNamePrefix,
        page: &PageNo,
        size: &PageSize,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT b.id, b.name, b.book_no, b.book_type
            FROM books AS b
            JOIN (
                SELECT id
                FROM books
                WHERE name LIKE $1
                ORDER BY id DESC
                LIMIT $2 OFFSET $3
            ) AS page ON page.id = b.id
            "#,
        )
        .bind(name.as_like_pattern())
        .bind(size.as_ref())
        .bind(page.to_offset(size))
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_window(
        con: &mut PgConnection,
        name: &BookNamePrefix,
        window: &BookIdWindow,
        size: &PageSize,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        // Range probes over the unlimited filter. Callers never see these.
        let max_id: Option<i64> = sqlx::query_scalar(
            // language=postgresql
            r#"
            SELECT MAX(id)
            FROM books
            WHERE name LIKE $1
              AND id < $2
              AND id >= $3
            "#,
        )
        .bind(name.as_like_pattern())
        .bind(window.before().as_ref())
        .bind(window.floor().as_ref())
        .fetch_one(&mut *con)
        .await
        .convert_error()?;
        let min_id: Option<i64> = sqlx::query_scalar(
            // language=postgresql
            r#"
            SELECT MIN(id)
            FROM books
            WHERE name LIKE $1
              AND id < $2
              AND id >= $3
            "#,
        )
        .bind(name.as_like_pattern())
        .bind(window.before().as_ref())
        .bind(window.floor().as_ref())
        .fetch_one(&mut *con)
        .await
        .convert_error()?;
        tracing::debug!(?max_id, ?min_id, "window id range");

        // The limit can still be applied late in the plan, after the range walk.
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, name, book_no, book_type
            FROM books
            WHERE name LIKE $1
              AND id < $2
              AND id >= $3
            ORDER BY id DESC
            LIMIT $4
            "#,
        )
        .bind(name.as_like_pattern())
        .bind(window.before().as_ref())
        .bind(window.floor().as_ref())
        .bind(size.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }
}

#[cfg(test)]
mod test {
    use sqlx::PgConnection;

    use kernel::interface::database::QueryDatabaseConnection;
    use kernel::interface::query::BookPaginationQuery;
    use kernel::prelude::entity::{Book, BookId, BookIdWindow, BookNamePrefix, PageNo, PageSize};
    use kernel::KernelError;

    use crate::database::postgres::book::PostgresBookRepository;
    use crate::database::postgres::PostgresDatabase;
    use crate::error::ConvertError;

    fn unique_prefix() -> String {
        format!("pagination-{}", rand::random::<u32>())
    }

    fn found_ids(books: &[Book]) -> Vec<i64> {
        books.iter().map(|book| *book.id().as_ref()).collect()
    }

    async fn prepare(
        con: &mut PgConnection,
        prefix: &str,
        count: i64,
    ) -> error_stack::Result<Vec<i64>, KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            CREATE TABLE IF NOT EXISTS books
            (
                id        BIGSERIAL PRIMARY KEY,
                name      TEXT NOT NULL,
                book_no   TEXT NOT NULL,
                book_type TEXT NOT NULL
            )
            "#,
        )
        .execute(&mut *con)
        .await
        .convert_error()?;

        let mut ids = Vec::new();
        for i in 0..count {
            let id: i64 = sqlx::query_scalar(
                // language=postgresql
                r#"
                INSERT INTO books (name, book_no, book_type)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(format!("{prefix} volume {i}"))
            .bind(format!("no-{i}"))
            .bind(if i % 2 == 0 { "HARDCOVER" } else { "PAPERBACK" })
            .fetch_one(&mut *con)
            .await
            .convert_error()?;
            ids.push(id);
        }
        Ok(ids)
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn offset_pages_walk_ids_descending() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let prefix = unique_prefix();
        let mut ids = prepare(&mut con, &prefix, 25).await?;
        ids.sort_unstable_by(|a, b| b.cmp(a));

        let name = BookNamePrefix::new(prefix);
        let size = PageSize::new(10i64);
        let first = PostgresBookRepository
            .find_page(&mut con, &name, &PageNo::new(0i64), &size)
            .await?;
        let second = PostgresBookRepository
            .find_page(&mut con, &name, &PageNo::new(1i64), &size)
            .await?;
        let third = PostgresBookRepository
            .find_page(&mut con, &name, &PageNo::new(2i64), &size)
            .await?;

        assert_eq!(first.len(), 10);
        assert_eq!(second.len(), 10);
        assert_eq!(third.len(), 5);

        let walked: Vec<i64> = [&first, &second, &third]
            .into_iter()
            .flat_map(|page| found_ids(page))
            .collect();
        assert_eq!(walked, ids);

        let again = PostgresBookRepository
            .find_page(&mut con, &name, &PageNo::new(0i64), &size)
            .await?;
        assert_eq!(again, first);
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn seek_walk_matches_offset_walk() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let prefix = unique_prefix();
        let mut ids = prepare(&mut con, &prefix, 25).await?;
        ids.sort_unstable_by(|a, b| b.cmp(a));

        let name = BookNamePrefix::new(prefix);
        let size = PageSize::new(10i64);
        let mut walked = Vec::new();
        let mut cursor: Option<BookId> = None;
        loop {
            let page = PostgresBookRepository
                .find_after(&mut con, cursor.as_ref(), &name, &size)
                .await?;
            if page.is_empty() {
                break;
            }
            cursor = page.last().map(|book| book.id().clone());
            walked.extend(found_ids(&page));
        }
        assert_eq!(walked, ids);
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn covering_page_carries_the_same_ids() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let prefix = unique_prefix();
        prepare(&mut con, &prefix, 25).await?;

        let name = BookNamePrefix::new(prefix);
        let size = PageSize::new(10i64);
        let page = PageNo::new(1i64);
        let by_offset = PostgresBookRepository
            .find_page(&mut con, &name, &page, &size)
            .await?;
        let by_covering = PostgresBookRepository
            .find_page_covering(&mut con, &name, &page, &size)
            .await?;
        let by_raw = PostgresBookRepository
            .find_page_covering_raw(&mut con, &name, &page, &size)
            .await?;

        // order of the covering variants is best effort, compare as sets
        let mut offset_ids = found_ids(&by_offset);
        let mut covering_ids = found_ids(&by_covering);
        let mut raw_ids = found_ids(&by_raw);
        offset_ids.sort_unstable();
        covering_ids.sort_unstable();
        raw_ids.sort_unstable();
        assert_eq!(covering_ids, offset_ids);
        assert_eq!(raw_ids, covering_ids);
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn window_stays_between_floor_and_cursor() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let prefix = unique_prefix();
        let ids = prepare(&mut con, &prefix, 25).await?;

        let name = BookNamePrefix::new(prefix);
        let size = PageSize::new(10i64);
        let before = *ids.iter().max().expect("seeded ids");
        let mut expected: Vec<i64> = ids
            .iter()
            .copied()
            .filter(|id| *id < before && *id >= before - 10)
            .collect();
        expected.sort_unstable_by(|a, b| b.cmp(a));

        let window = BookIdWindow::new(Some(BookId::new(before)), &size)?;
        let page = PostgresBookRepository
            .find_window(&mut con, &name, &window, &size)
            .await?;
        let walked = found_ids(&page);
        assert!(walked.len() <= 10);
        assert_eq!(walked, expected);
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn unmatched_prefix_yields_empty_pages() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        prepare(&mut con, &unique_prefix(), 0).await?;

        let name = BookNamePrefix::new(unique_prefix());
        let size = PageSize::new(10i64);
        let page = PageNo::new(0i64);
        assert!(PostgresBookRepository
            .find_page(&mut con, &name, &page, &size)
            .await?
            .is_empty());
        assert!(PostgresBookRepository
            .find_after(&mut con, None, &name, &size)
            .await?
            .is_empty());
        assert!(PostgresBookRepository
            .find_page_covering(&mut con, &name, &page, &size)
            .await?
            .is_empty());
        assert!(PostgresBookRepository
            .find_page_covering_raw(&mut con, &name, &page, &size)
            .await?
            .is_empty());
        let window = BookIdWindow::new(Some(BookId::new(100i64)), &size)?;
        assert!(PostgresBookRepository
            .find_window(&mut con, &name, &window, &size)
            .await?
            .is_empty());
        Ok(())
    }
}
