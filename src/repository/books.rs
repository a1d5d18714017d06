//! Books repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFields, BookFilter, BookId},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Insert a new, available book
    pub async fn create(&self, fields: &BookFields) -> AppResult<BookId> {
        let id = sqlx::query(
            "INSERT INTO books (title, author, year, available) VALUES (?, ?, ?, 1)",
        )
        .bind(&fields.title)
        .bind(&fields.author)
        .bind(fields.year)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: BookId) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "SELECT id, title, author, year, available FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// List books in creation order
    pub async fn list(&self, filter: BookFilter) -> AppResult<Vec<Book>> {
        let sql = match filter {
            BookFilter::All => {
                "SELECT id, title, author, year, available FROM books ORDER BY id"
            }
            BookFilter::AvailableOnly => {
                "SELECT id, title, author, year, available FROM books WHERE available = 1 ORDER BY id"
            }
        };

        let books = sqlx::query_as::<_, Book>(sql).fetch_all(&self.pool).await?;
        Ok(books)
    }

    /// Overwrite title, author and year, returning the stored row
    pub async fn update(&self, id: BookId, fields: &BookFields) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET title = ?, author = ?, year = ?
            WHERE id = ?
            RETURNING id, title, author, year, available
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.author)
        .bind(fields.year)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Delete a book that is not on loan
    pub async fn delete(&self, id: BookId) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM books WHERE id = ? AND available = 1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = ?)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

            return Err(if exists {
                AppError::BookOnLoan(id)
            } else {
                AppError::NotFound(format!("Book with id {} not found", id))
            });
        }

        tx.commit().await?;
        Ok(())
    }
}
