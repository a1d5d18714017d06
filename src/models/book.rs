//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, AppResult};

pub type BookId = i64;

/// Book model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i64,
    pub available: bool,
}

/// Book without availability, as shown in available and borrowed lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl From<Book> for BookShort {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            year: book.year,
        }
    }
}

/// Fields written by add and edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl BookFields {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i64) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }

    /// Title and author must be non-empty
    pub fn check(&self) -> AppResult<()> {
        if self.title.is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        if self.author.is_empty() {
            return Err(AppError::Validation("Author is required".to_string()));
        }
        Ok(())
    }
}

/// Book form as typed by an operator; year is still raw text
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    /// Publication year, digits only
    #[validate(length(min = 1, message = "Year is required"))]
    pub year: String,
}

impl BookForm {
    /// Validate the form and parse the year
    pub fn parse(self) -> AppResult<BookFields> {
        self.validate()?;
        let year = parse_year(&self.year)?;
        Ok(BookFields {
            title: self.title,
            author: self.author,
            year,
        })
    }
}

/// Accepts a non-negative decimal integer with no sign or surrounding text
pub fn parse_year(raw: &str) -> AppResult<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::Validation(format!(
            "Year must be a non-negative integer, got '{}'",
            raw
        )));
    }
    raw.parse::<i64>()
        .map_err(|_| AppError::Validation(format!("Year '{}' is out of range", raw)))
}

/// Which books a listing returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookFilter {
    #[default]
    All,
    AvailableOnly,
}

/// Book list query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Only return books that are not on loan
    pub available_only: Option<bool>,
}

impl BookQuery {
    pub fn filter(&self) -> BookFilter {
        if self.available_only.unwrap_or(false) {
            BookFilter::AvailableOnly
        } else {
            BookFilter::All
        }
    }
}
