//! Loan (patron holds book) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::book::BookId;

/// Active loan joined with its book and patron
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanDetails {
    pub book_id: BookId,
    pub title: String,
    pub patron: String,
    pub borrowed_at: DateTime<Utc>,
}

/// Borrow or return request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoanRequest {
    /// Patron name; surrounding whitespace is ignored
    pub patron: String,
    pub book_id: BookId,
}
