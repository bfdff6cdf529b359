use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{
    Book, BookListQuery, BookRepository, BookService, RepoError, SqliteBookRepository,
    UNSAVED_BOOK_ID,
};
use rusqlite::Connection;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    let id = repo.create_book(&Book::new("Dune", "Herbert")).unwrap();

    let loaded = repo.get_book(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.title, "Dune");
    assert_eq!(loaded.author, "Herbert");
    assert!(loaded.is_persisted());
}

#[test]
fn create_assigns_store_side_ids_in_insert_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    let first = repo.create_book(&Book::new("Dune", "Herbert")).unwrap();
    let second = repo.create_book(&Book::new("Solaris", "Lem")).unwrap();

    assert!(first > UNSAVED_BOOK_ID);
    assert!(second > first);
}

#[test]
fn create_ignores_caller_side_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    let forged = Book::with_id(777, "Dune", "Herbert");
    let id = repo.create_book(&forged).unwrap();

    assert_ne!(id, 777);
    assert!(repo.get_book(777).unwrap().is_none());
    assert!(repo.get_book(id).unwrap().is_some());
}

#[test]
fn update_existing_book() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    let id = repo.create_book(&Book::new("Dune", "Herbert")).unwrap();
    repo.update_book(&Book::with_id(id, "Dune", "F. Herbert"))
        .unwrap();

    let loaded = repo.get_book(id).unwrap().unwrap();
    assert_eq!(loaded.title, "Dune");
    assert_eq!(loaded.author, "F. Herbert");
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    let err = repo
        .update_book(&Book::with_id(42, "Nothing", "Nobody"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
}

#[test]
fn get_missing_book_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    assert!(repo.get_book(9000).unwrap().is_none());
}

#[test]
fn delete_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    let id = repo.create_book(&Book::new("Dune", "Herbert")).unwrap();
    repo.delete_book(id).unwrap();

    assert!(repo.get_book(id).unwrap().is_none());
    let remaining = repo.list_books(&BookListQuery::default()).unwrap();
    assert!(remaining.iter().all(|book| book.id != id));
}

#[test]
fn delete_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    let err = repo.delete_book(42).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
}

#[test]
fn list_returns_records_in_stable_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    // Deliberately inserted out of alphabetical order.
    repo.create_book(&Book::new("Solaris", "Lem")).unwrap();
    repo.create_book(&Book::new("Dune", "Herbert")).unwrap();
    repo.create_book(&Book::new("Neuromancer", "Gibson")).unwrap();

    let books = repo.list_books(&BookListQuery::default()).unwrap();
    let ids: Vec<_> = books.iter().map(|book| book.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();

    assert_eq!(books.len(), 3);
    assert_eq!(ids, sorted);
    assert_eq!(books[0].title, "Solaris");
}

#[test]
fn list_on_empty_table_returns_empty_vec() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    assert!(repo.list_books(&BookListQuery::default()).unwrap().is_empty());
}

#[test]
fn list_filters_by_title_or_author_substring() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    repo.create_book(&Book::new("Dune", "Frank Herbert")).unwrap();
    repo.create_book(&Book::new("Dune Messiah", "Frank Herbert"))
        .unwrap();
    repo.create_book(&Book::new("Solaris", "Stanislaw Lem")).unwrap();

    let by_title = BookListQuery {
        search: Some("dune".to_string()),
        ..BookListQuery::default()
    };
    assert_eq!(repo.list_books(&by_title).unwrap().len(), 2);

    let by_author = BookListQuery {
        search: Some("Lem".to_string()),
        ..BookListQuery::default()
    };
    let hits = repo.list_books(&by_author).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Solaris");
}

#[test]
fn list_filter_treats_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    repo.create_book(&Book::new("100% Perfect", "Anonymous"))
        .unwrap();
    repo.create_book(&Book::new("Fully Perfect", "Anonymous"))
        .unwrap();

    let query = BookListQuery {
        search: Some("100%".to_string()),
        ..BookListQuery::default()
    };
    let hits = repo.list_books(&query).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "100% Perfect");
}

#[test]
fn list_pagination_with_limit_and_offset_is_stable() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    let id_a = repo.create_book(&Book::new("A", "a")).unwrap();
    let id_b = repo.create_book(&Book::new("B", "b")).unwrap();
    let id_c = repo.create_book(&Book::new("C", "c")).unwrap();

    let query = BookListQuery {
        limit: Some(2),
        offset: 1,
        ..BookListQuery::default()
    };
    let page = repo.list_books(&query).unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, id_b);
    assert_eq!(page[1].id, id_c);
    assert!(id_a < id_b);
}

#[test]
fn list_pagination_with_offset_only_path_is_stable() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    repo.create_book(&Book::new("A", "a")).unwrap();
    let id_b = repo.create_book(&Book::new("B", "b")).unwrap();
    let id_c = repo.create_book(&Book::new("C", "c")).unwrap();

    let query = BookListQuery {
        offset: 1,
        ..BookListQuery::default()
    };
    let page = repo.list_books(&query).unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, id_b);
    assert_eq!(page[1].id, id_c);
}

#[test]
fn service_add_update_delete_scenario() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    let service = BookService::new(repo);

    let id = service.add_book("Dune", "Herbert").unwrap();

    let listed = service.list_books(&BookListQuery::default()).unwrap();
    let matches: Vec<_> = listed
        .iter()
        .filter(|book| book.title == "Dune" && book.author == "Herbert")
        .collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, id);

    service
        .update_book(&Book::with_id(id, "Dune", "F. Herbert"))
        .unwrap();
    let fetched = service.get_book(id).unwrap().unwrap();
    assert_eq!(fetched.author, "F. Herbert");

    service.delete_book(id).unwrap();
    let after_delete = service.list_books(&BookListQuery::default()).unwrap();
    assert!(after_delete.iter().all(|book| book.id != id));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteBookRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_books_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        bookshelf_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqliteBookRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("books"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_books_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        bookshelf_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqliteBookRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "books",
            column: "author"
        })
    ));
}
