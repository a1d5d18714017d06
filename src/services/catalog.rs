//! Catalog management service

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookFields, BookFilter, BookId},
        change::CatalogEvent,
    },
    repository::Repository,
};

use super::events::ChangeFeed;

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    feed: ChangeFeed,
}

impl CatalogService {
    pub fn new(repository: Repository, feed: ChangeFeed) -> Self {
        Self { repository, feed }
    }

    /// Add a new, available book
    pub async fn add_book(&self, fields: BookFields) -> AppResult<Book> {
        fields.check()?;
        let id = self.repository.books.create(&fields).await?;
        tracing::info!(book_id = id, title = %fields.title, "Book added");
        self.feed.publish(CatalogEvent::BookAdded { book_id: id });

        Ok(Book {
            id,
            title: fields.title,
            author: fields.author,
            year: fields.year,
            available: true,
        })
    }

    pub async fn get_book(&self, id: BookId) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// List books in creation order
    pub async fn list_books(&self, filter: BookFilter) -> AppResult<Vec<Book>> {
        self.repository.books.list(filter).await
    }

    /// Overwrite title, author and year of an existing book
    pub async fn edit_book(&self, id: BookId, fields: BookFields) -> AppResult<Book> {
        fields.check()?;
        let book = self.repository.books.update(id, &fields).await?;
        tracing::info!(book_id = id, "Book updated");
        self.feed.publish(CatalogEvent::BookUpdated { book_id: id });
        Ok(book)
    }

    /// Remove a book; refused while it is on loan
    pub async fn delete_book(&self, id: BookId) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = id, "Book deleted");
        self.feed.publish(CatalogEvent::BookDeleted { book_id: id });
        Ok(())
    }
}
