//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `bookshelf_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{Book, BookListQuery, BookRepository, SqliteBookRepository};
use std::error::Error;

fn main() {
    println!("bookshelf_core version={}", bookshelf_core::core_version());

    match smoke_round_trip() {
        Ok(count) => println!("bookshelf_core smoke=ok books={count}"),
        Err(err) => {
            eprintln!("bookshelf_core smoke=error {err}");
            std::process::exit(1);
        }
    }
}

// One in-memory insert+list round trip proves migrations and the
// repository wiring without touching any on-disk store.
fn smoke_round_trip() -> Result<usize, Box<dyn Error>> {
    let conn = open_db_in_memory()?;
    let repo = SqliteBookRepository::try_new(&conn)?;
    repo.create_book(&Book::new("Dune", "Herbert"))?;
    let books = repo.list_books(&BookListQuery::default())?;
    Ok(books.len())
}
