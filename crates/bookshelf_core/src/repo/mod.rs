//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for catalog records.
//! - Isolate SQLite query details from service/presentation layers.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors; failures are never logged-and-swallowed here.

pub mod book_repo;
