//! Book domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook, UpdateBook},
};

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

impl Repository {
    /// List all books in insertion order
    pub async fn books_list(&self) -> Vec<Book> {
        self.shelf.lock().await.books.clone()
    }

    /// Books matching `predicate`, in insertion order
    pub async fn books_filter<F>(&self, predicate: F) -> Vec<Book>
    where
        F: Fn(&Book) -> bool,
    {
        let shelf = self.shelf.lock().await;
        shelf.books.iter().filter(|b| predicate(b)).cloned().collect()
    }

    /// Get book by ID
    pub async fn books_get_by_id(&self, id: i32) -> AppResult<Book> {
        let shelf = self.shelf.lock().await;
        shelf
            .books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Append a book with the next free id
    pub async fn books_create(&self, data: &CreateBook) -> Book {
        let mut shelf = self.shelf.lock().await;
        let current_max = shelf.books.iter().map(|b| b.id).max().unwrap_or(0);
        let id = current_max.max(shelf.last_id) + 1;
        shelf.last_id = id;

        let book = Book::from_create(id, data);
        shelf.books.push(book.clone());
        book
    }

    /// Overwrite the supplied fields of a book
    pub async fn books_update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        let mut shelf = self.shelf.lock().await;
        let book = shelf
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found(id))?;
        data.apply_to(book);
        Ok(book.clone())
    }

    /// Delete book
    pub async fn books_delete(&self, id: i32) -> AppResult<()> {
        let mut shelf = self.shelf.lock().await;
        let pos = shelf
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| not_found(id))?;
        shelf.books.remove(pos);
        Ok(())
    }
}
