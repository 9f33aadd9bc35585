//! Book (catalog) endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{Book, CreateBook, NumericField, UpdateBook},
    AppState,
};

use super::{PathParam, ValidatedJson};

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books in insertion order", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> Json<Vec<Book>> {
    Json(state.services.catalog.list_books().await)
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Missing name or author", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<CreateBook>,
) -> (StatusCode, Json<Book>) {
    let book = state.services.catalog.create_book(&data).await;
    (StatusCode::CREATED, Json(book))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 400, description = "Malformed ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Update a book. Only fields present in the body are changed.
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Malformed ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    ValidatedJson(data): ValidatedJson<UpdateBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.update_book(id, &data).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Deletion confirmation", body = String),
        (status = 400, description = "Malformed ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<String> {
    state.services.catalog.delete_book(id).await
}

/// Find books by name (case-insensitive, exact)
#[utoipa::path(
    get,
    path = "/books/names/{name}",
    tag = "books",
    params(("name" = String, Path, description = "Book name")),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 404, description = "No match", body = crate::error::ErrorResponse)
    )
)]
pub async fn find_by_name(
    State(state): State<AppState>,
    PathParam(name): PathParam<String>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.find_by_name(&name).await?;
    Ok(Json(books))
}

/// Find books by author (case-insensitive, exact)
#[utoipa::path(
    get,
    path = "/books/authors/{author}",
    tag = "books",
    params(("author" = String, Path, description = "Author name")),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 404, description = "No match", body = crate::error::ErrorResponse)
    )
)]
pub async fn find_by_author(
    State(state): State<AppState>,
    PathParam(author): PathParam<String>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.find_by_author(&author).await?;
    Ok(Json(books))
}

/// Find books tagged with a genre (case-insensitive)
#[utoipa::path(
    get,
    path = "/books/genres/{genre}",
    tag = "books",
    params(("genre" = String, Path, description = "Genre")),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 404, description = "No match", body = crate::error::ErrorResponse)
    )
)]
pub async fn find_by_genre(
    State(state): State<AppState>,
    PathParam(genre): PathParam<String>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.find_by_genre(&genre).await?;
    Ok(Json(books))
}

/// Find books published within a range of years
#[utoipa::path(
    get,
    path = "/books/years/{range}",
    tag = "books",
    params(("range" = String, Path, description = "Inclusive range, e.g. 1800-1900")),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 400, description = "Malformed range", body = crate::error::ErrorResponse),
        (status = 404, description = "No match", body = crate::error::ErrorResponse)
    )
)]
pub async fn find_by_years(
    State(state): State<AppState>,
    PathParam(range): PathParam<String>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .catalog
        .find_by_range(NumericField::Year, &range)
        .await?;
    Ok(Json(books))
}

/// Find books within a range of page counts
#[utoipa::path(
    get,
    path = "/books/pages/{range}",
    tag = "books",
    params(("range" = String, Path, description = "Inclusive range, e.g. 100-500")),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 400, description = "Malformed range", body = crate::error::ErrorResponse),
        (status = 404, description = "No match", body = crate::error::ErrorResponse)
    )
)]
pub async fn find_by_pages(
    State(state): State<AppState>,
    PathParam(range): PathParam<String>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .catalog
        .find_by_range(NumericField::Pages, &range)
        .await?;
    Ok(Json(books))
}

/// Find books within a range of ratings
#[utoipa::path(
    get,
    path = "/books/ratings/{range}",
    tag = "books",
    params(("range" = String, Path, description = "Inclusive range, e.g. 3.5-5")),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 400, description = "Malformed range", body = crate::error::ErrorResponse),
        (status = 404, description = "No match", body = crate::error::ErrorResponse)
    )
)]
pub async fn find_by_ratings(
    State(state): State<AppState>,
    PathParam(range): PathParam<String>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .catalog
        .find_by_range(NumericField::Rating, &range)
        .await?;
    Ok(Json(books))
}
