//! Data models for Libris

pub mod book;
pub mod change;
pub mod loan;
pub mod patron;

// Re-export commonly used types
pub use book::{Book, BookFields, BookFilter, BookId, BookShort};
pub use change::CatalogEvent;
pub use loan::LoanDetails;
pub use patron::{Patron, PatronName};
