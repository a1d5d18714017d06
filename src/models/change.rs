//! Change notifications published after each successful mutation

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::book::BookId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogEvent {
    BookAdded { book_id: BookId },
    BookUpdated { book_id: BookId },
    BookDeleted { book_id: BookId },
    BookBorrowed { book_id: BookId, patron: String },
    BookReturned { book_id: BookId, patron: String },
}

impl CatalogEvent {
    pub fn book_id(&self) -> BookId {
        match self {
            CatalogEvent::BookAdded { book_id }
            | CatalogEvent::BookUpdated { book_id }
            | CatalogEvent::BookDeleted { book_id }
            | CatalogEvent::BookBorrowed { book_id, .. }
            | CatalogEvent::BookReturned { book_id, .. } => *book_id,
        }
    }

    /// SSE event name
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogEvent::BookAdded { .. } => "book_added",
            CatalogEvent::BookUpdated { .. } => "book_updated",
            CatalogEvent::BookDeleted { .. } => "book_deleted",
            CatalogEvent::BookBorrowed { .. } => "book_borrowed",
            CatalogEvent::BookReturned { .. } => "book_returned",
        }
    }
}
