//! Loans repository for database operations
//!
//! Borrow and return each run in one transaction whose first statement is a
//! write, so the transaction holds the SQLite write lock before it reads
//! anything and two callers racing on the same book are serialized.

use chrono::Utc;
use sqlx::{Pool, Sqlite};

use super::patrons::PatronsRepository;
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BookId, BookShort},
        loan::LoanDetails,
    },
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Sqlite>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Lend an available book to `patron`, creating the patron if needed
    pub async fn borrow(&self, patron: &str, book_id: BookId) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let flipped = sqlx::query("UPDATE books SET available = 0 WHERE id = ? AND available = 1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        // Missing and already lent books are indistinguishable to the borrower
        if flipped == 0 {
            return Err(AppError::NotAvailable(book_id));
        }

        let patron_id = PatronsRepository::ensure(&mut *tx, patron).await?;

        sqlx::query("INSERT INTO loans (book_id, patron_id, borrowed_at) VALUES (?, ?, ?)")
            .bind(book_id)
            .bind(patron_id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Take a book back from `patron` and mark it available
    pub async fn return_book(&self, patron: &str, book_id: BookId) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query(
            r#"
            DELETE FROM loans
            WHERE book_id = ?
              AND patron_id = (SELECT id FROM patrons WHERE name = ?)
            "#,
        )
        .bind(book_id)
        .bind(patron)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if removed == 0 {
            let held: i64 = sqlx::query_scalar(
                r#"
                SELECT COUNT(*) FROM loans l
                JOIN patrons p ON p.id = l.patron_id
                WHERE p.name = ?
                "#,
            )
            .bind(patron)
            .fetch_one(&mut *tx)
            .await?;

            return Err(if held == 0 {
                AppError::NoSuchPatron(patron.to_string())
            } else {
                AppError::NotBorrowed {
                    patron: patron.to_string(),
                    book_id,
                }
            });
        }

        sqlx::query("UPDATE books SET available = 1 WHERE id = ?")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Books held by `patron`, in the order they were borrowed
    pub async fn books_for_patron(&self, patron: &str) -> AppResult<Vec<BookShort>> {
        let books = sqlx::query_as::<_, BookShort>(
            r#"
            SELECT b.id, b.title, b.author, b.year
            FROM loans l
            JOIN patrons p ON p.id = l.patron_id
            JOIN books b ON b.id = l.book_id
            WHERE p.name = ?
            ORDER BY l.id
            "#,
        )
        .bind(patron)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// All active loans, oldest first
    pub async fn list_active(&self) -> AppResult<Vec<LoanDetails>> {
        let loans = sqlx::query_as::<_, LoanDetails>(
            r#"
            SELECT l.book_id, b.title, p.name AS patron, l.borrowed_at
            FROM loans l
            JOIN patrons p ON p.id = l.patron_id
            JOIN books b ON b.id = l.book_id
            ORDER BY l.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }
}
