//! Book use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for presentation callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::book::{Book, BookId};
use crate::repo::book_repo::{BookListQuery, BookRepository, RepoResult};

/// Use-case service wrapper for book CRUD operations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a catalog record from form input; any caller-side id is ignored.
    ///
    /// # Contract
    /// - Returns the store-assigned id of the new record.
    pub fn add_book(
        &self,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> RepoResult<BookId> {
        let book = Book::new(title, author);
        self.repo.create_book(&book)
    }

    /// Updates an existing record by store-assigned id.
    ///
    /// Returns repository-level not-found errors unchanged.
    pub fn update_book(&self, book: &Book) -> RepoResult<()> {
        self.repo.update_book(book)
    }

    /// Gets one record by id; absent records are `Ok(None)`.
    pub fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        self.repo.get_book(id)
    }

    /// Lists records using filter and pagination options.
    pub fn list_books(&self, query: &BookListQuery) -> RepoResult<Vec<Book>> {
        self.repo.list_books(query)
    }

    /// Deletes a record by id.
    pub fn delete_book(&self, id: BookId) -> RepoResult<()> {
        self.repo.delete_book(id)
    }
}
