//! Admin endpoints: catalog maintenance and loan overview

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookForm, BookId, BookQuery},
        loan::LoanDetails,
        patron::Patron,
    },
};

use super::{JsonBody, Notice, PathParam, QueryParams};

/// A book together with the outcome notice
#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    pub book: Book,
    pub notice: Notice,
}

/// List books, optionally only the available ones
#[utoipa::path(
    get,
    path = "/admin/books",
    tag = "admin",
    params(BookQuery),
    responses(
        (status = 200, description = "Books in creation order", body = Vec<Book>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    QueryParams(query): QueryParams<BookQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books(query.filter()).await?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/admin/books/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    PathParam(id): PathParam<BookId>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/admin/books",
    tag = "admin",
    request_body = BookForm,
    responses(
        (status = 201, description = "Book added", body = BookResponse),
        (status = 400, description = "Missing field or malformed year")
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    JsonBody(form): JsonBody<BookForm>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let fields = form.parse()?;
    let book = state.services.catalog.add_book(fields).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            book,
            notice: Notice::info("Book added successfully!"),
        }),
    ))
}

/// Edit title, author and year of a book
#[utoipa::path(
    put,
    path = "/admin/books/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = BookForm,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Missing field or malformed year"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn edit_book(
    State(state): State<crate::AppState>,
    PathParam(id): PathParam<BookId>,
    JsonBody(form): JsonBody<BookForm>,
) -> AppResult<Json<BookResponse>> {
    let fields = form.parse()?;
    let book = state.services.catalog.edit_book(id, fields).await?;

    Ok(Json(BookResponse {
        book,
        notice: Notice::info("Book details updated successfully!"),
    }))
}

/// Delete a book that is not on loan
#[utoipa::path(
    delete,
    path = "/admin/books/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = Notice),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book is on loan")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    PathParam(id): PathParam<BookId>,
) -> AppResult<Json<Notice>> {
    state.services.catalog.delete_book(id).await?;
    Ok(Json(Notice::info("Book deleted successfully!")))
}

/// List active loans
#[utoipa::path(
    get,
    path = "/admin/loans",
    tag = "admin",
    responses(
        (status = 200, description = "Active loans, oldest first", body = Vec<LoanDetails>)
    )
)]
pub async fn list_loans(State(state): State<crate::AppState>) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.lending.list_loans().await?;
    Ok(Json(loans))
}

/// List every patron that has ever borrowed
#[utoipa::path(
    get,
    path = "/admin/patrons",
    tag = "admin",
    responses(
        (status = 200, description = "Patrons in creation order", body = Vec<Patron>)
    )
)]
pub async fn list_patrons(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Patron>>> {
    let patrons = state.services.lending.list_patrons().await?;
    Ok(Json(patrons))
}
