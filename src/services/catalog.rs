//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook, NumericField, NumericRange, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

/// Turn an empty filter result into NotFound
fn non_empty(books: Vec<Book>, what: impl FnOnce() -> String) -> AppResult<Vec<Book>> {
    if books.is_empty() {
        Err(AppError::NotFound(what()))
    } else {
        Ok(books)
    }
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self) -> Vec<Book> {
        self.repository.books_list().await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books_get_by_id(id).await
    }

    pub async fn create_book(&self, data: &CreateBook) -> Book {
        let book = self.repository.books_create(data).await;
        tracing::info!("Catalog: created book id={} name={:?}", book.id, book.name);
        book
    }

    pub async fn update_book(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        let book = self.repository.books_update(id, data).await?;
        tracing::info!("Catalog: updated book id={}", id);
        Ok(book)
    }

    /// Delete a book, returning a confirmation message
    pub async fn delete_book(&self, id: i32) -> AppResult<String> {
        self.repository.books_delete(id).await?;
        tracing::info!("Catalog: deleted book id={}", id);
        Ok(format!("Book {} deleted", id))
    }

    /// Books whose name equals `name`, ignoring case
    pub async fn find_by_name(&self, name: &str) -> AppResult<Vec<Book>> {
        let needle = name.to_lowercase();
        let books = self
            .repository
            .books_filter(|b| b.name.to_lowercase() == needle)
            .await;
        tracing::debug!("Catalog: {} book(s) named {:?}", books.len(), name);
        non_empty(books, || format!("No book named '{}'", name))
    }

    /// Books whose author equals `author`, ignoring case
    pub async fn find_by_author(&self, author: &str) -> AppResult<Vec<Book>> {
        let needle = author.to_lowercase();
        let books = self
            .repository
            .books_filter(|b| b.author.to_lowercase() == needle)
            .await;
        tracing::debug!("Catalog: {} book(s) by {:?}", books.len(), author);
        non_empty(books, || format!("No book by '{}'", author))
    }

    /// Books tagged with `genre`, ignoring case
    pub async fn find_by_genre(&self, genre: &str) -> AppResult<Vec<Book>> {
        let books = self.repository.books_filter(|b| b.has_genre(genre)).await;
        tracing::debug!("Catalog: {} book(s) in genre {:?}", books.len(), genre);
        non_empty(books, || format!("No book in genre '{}'", genre))
    }

    /// Books whose `field` lies in the inclusive range given as `"low-high"`
    pub async fn find_by_range(&self, field: NumericField, raw_range: &str) -> AppResult<Vec<Book>> {
        let range = NumericRange::parse(raw_range, field)?;
        let books = self
            .repository
            .books_filter(|b| field.value_of(b).is_some_and(|v| range.contains(v)))
            .await;
        tracing::debug!("Catalog: {} book(s) with {} in {}", books.len(), field, raw_range);
        non_empty(books, || format!("No book with {} in {}", field, raw_range))
    }
}
