//! Patron portal endpoints: browse, borrow and return

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{
        book::{BookFilter, BookShort},
        loan::LoanRequest,
        patron::PatronName,
    },
};

use super::{JsonBody, Notice, PathParam};

/// List books that can be borrowed right now
#[utoipa::path(
    get,
    path = "/portal/books",
    tag = "portal",
    responses(
        (status = 200, description = "Available books", body = Vec<BookShort>)
    )
)]
pub async fn list_available(State(state): State<crate::AppState>) -> AppResult<Json<Vec<BookShort>>> {
    let books = state
        .services
        .catalog
        .list_books(BookFilter::AvailableOnly)
        .await?
        .into_iter()
        .map(BookShort::from)
        .collect();
    Ok(Json(books))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/portal/borrow",
    tag = "portal",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Book borrowed", body = Notice),
        (status = 400, description = "Blank patron name or malformed request"),
        (status = 409, description = "Book is not available")
    )
)]
pub async fn borrow(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<LoanRequest>,
) -> AppResult<Json<Notice>> {
    let patron = PatronName::parse(&request.patron)?;
    state.services.lending.borrow(&patron, request.book_id).await?;
    Ok(Json(Notice::info("Book borrowed successfully!")))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/portal/return",
    tag = "portal",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Book returned", body = Notice),
        (status = 400, description = "Blank patron name or malformed request"),
        (status = 404, description = "Patron has no borrowed books"),
        (status = 422, description = "Patron has not borrowed this book")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<LoanRequest>,
) -> AppResult<Json<Notice>> {
    let patron = PatronName::parse(&request.patron)?;
    state.services.lending.return_book(&patron, request.book_id).await?;
    Ok(Json(Notice::info("Book returned successfully!")))
}

/// List the books a patron currently holds
#[utoipa::path(
    get,
    path = "/portal/patrons/{name}/books",
    tag = "portal",
    params(
        ("name" = String, Path, description = "Patron name")
    ),
    responses(
        (status = 200, description = "Borrowed books in borrow order", body = Vec<BookShort>),
        (status = 400, description = "Blank patron name")
    )
)]
pub async fn list_borrowed(
    State(state): State<crate::AppState>,
    PathParam(name): PathParam<String>,
) -> AppResult<Json<Vec<BookShort>>> {
    let patron = PatronName::parse(&name)?;
    let books = state.services.lending.list_borrowed(&patron).await?;
    Ok(Json(books))
}
