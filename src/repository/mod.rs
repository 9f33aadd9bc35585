//! Repository layer holding the in-memory catalogue

pub mod books;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::models::Book;

/// Ordered book sequence plus the highest id ever handed out
#[derive(Debug, Default)]
pub(crate) struct Shelf {
    books: Vec<Book>,
    last_id: i32,
}

/// Main repository struct. Clones share the same shelf.
#[derive(Clone, Default)]
pub struct Repository {
    shelf: Arc<Mutex<Shelf>>,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `books`, in order
    pub fn with_books(books: Vec<Book>) -> Self {
        let last_id = books.iter().map(|b| b.id).max().unwrap_or(0);
        Self {
            shelf: Arc::new(Mutex::new(Shelf { books, last_id })),
        }
    }

    /// Create a repository holding the default catalogue
    pub fn seeded() -> Self {
        Self::with_books(default_books())
    }
}

/// Records every fresh catalogue starts with
pub fn default_books() -> Vec<Book> {
    vec![
        Book {
            id: 1,
            name: "War and Peace".to_string(),
            author: "Leo Tolstoy".to_string(),
            year: None,
            pages: None,
            genre: None,
            rating: None,
        },
        Book {
            id: 2,
            name: "Crime and Punishment".to_string(),
            author: "Feodor Dostoevsky".to_string(),
            year: None,
            pages: None,
            genre: None,
            rating: None,
        },
    ]
}
