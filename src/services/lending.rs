//! Loan management service

use crate::{
    error::AppResult,
    models::{
        book::{BookId, BookShort},
        change::CatalogEvent,
        loan::LoanDetails,
        patron::{Patron, PatronName},
    },
    repository::Repository,
};

use super::events::ChangeFeed;

#[derive(Clone)]
pub struct LendingService {
    repository: Repository,
    feed: ChangeFeed,
}

impl LendingService {
    pub fn new(repository: Repository, feed: ChangeFeed) -> Self {
        Self { repository, feed }
    }

    /// Lend a book; fails with `NotAvailable` if it is missing or already lent
    pub async fn borrow(&self, patron: &PatronName, book_id: BookId) -> AppResult<()> {
        if let Err(e) = self.repository.loans.borrow(patron.as_str(), book_id).await {
            tracing::warn!(book_id, patron = %patron, "Borrow refused: {}", e);
            return Err(e);
        }

        tracing::info!(book_id, patron = %patron, "Book borrowed");
        self.feed.publish(CatalogEvent::BookBorrowed {
            book_id,
            patron: patron.to_string(),
        });
        Ok(())
    }

    /// Take a book back; fails with `NoSuchPatron` or `NotBorrowed`
    pub async fn return_book(&self, patron: &PatronName, book_id: BookId) -> AppResult<()> {
        if let Err(e) = self.repository.loans.return_book(patron.as_str(), book_id).await {
            tracing::warn!(book_id, patron = %patron, "Return refused: {}", e);
            return Err(e);
        }

        tracing::info!(book_id, patron = %patron, "Book returned");
        self.feed.publish(CatalogEvent::BookReturned {
            book_id,
            patron: patron.to_string(),
        });
        Ok(())
    }

    /// Books currently held by the patron; empty for unknown patrons
    pub async fn list_borrowed(&self, patron: &PatronName) -> AppResult<Vec<BookShort>> {
        self.repository.loans.books_for_patron(patron.as_str()).await
    }

    /// Every active loan with its book and patron
    pub async fn list_loans(&self) -> AppResult<Vec<LoanDetails>> {
        self.repository.loans.list_active().await
    }

    pub async fn list_patrons(&self) -> AppResult<Vec<Patron>> {
        self.repository.patrons.list().await
    }
}
