//! Application state and command handling.
//!
//! # Responsibility
//! - Dispatch key events into catalog commands.
//! - Rebuild the view state wholesale after every store round trip.
//!
//! # Invariants
//! - Store failures become status-line messages and log events, never
//!   swallowed results.
//! - Each command opens its own connection and drops it before returning.

use bookshelf_core::db::{open_store, DbError};
use bookshelf_core::{
    Book, BookId, BookListQuery, BookRepository, BookService, RepoError, SqliteBookRepository,
    StoreConfig,
};
use crossterm::event::{KeyCode, KeyModifiers};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::form::FormState;
use crate::mode::Mode;

pub type AppResult<T> = Result<T, AppError>;

/// Presentation-layer error wrapping store bootstrap and repository failures.
#[derive(Debug)]
pub enum AppError {
    Db(DbError),
    Repo(RepoError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<DbError> for AppError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Everything the render function needs, rebuilt wholesale on each reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Records in store order, as of the last successful reload.
    pub books: Vec<Book>,
    /// Selection pointer into `books`.
    pub selected: Option<usize>,
    /// Edit form bound to the selection.
    pub form: FormState,
    /// One-line outcome of the last command.
    pub status: Option<String>,
    /// Whether the help overlay is visible.
    pub show_help: bool,
}

/// Single-window application driving the catalog.
pub struct App {
    store: StoreConfig,
    pub mode: Mode,
    pub view: ViewState,
}

impl App {
    /// Opens the configured store once to fail fast, then shows its records.
    pub fn new(store: StoreConfig) -> AppResult<Self> {
        let books = fetch_books(&store)?;
        Ok(Self {
            store,
            mode: Mode::Browse,
            view: ViewState {
                books,
                ..ViewState::default()
            },
        })
    }

    /// Handles a key press; returns `true` when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.mode {
            Mode::Browse => self.handle_browse_key(code),
            Mode::Edit => self.handle_edit_key(code),
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('j') | KeyCode::Down => self.select_offset(1),
            KeyCode::Char('k') | KeyCode::Up => self.select_offset(-1),
            KeyCode::Char('e') | KeyCode::Enter => {
                self.mode = Mode::Edit;
                self.view.status = Some("editing form (Tab next field, Esc done)".to_string());
            }
            KeyCode::Char('a') => self.command_add(),
            KeyCode::Char('u') => self.command_update(),
            KeyCode::Char('d') => self.command_delete(),
            KeyCode::Char('c') => {
                self.view.selected = None;
                self.view.form = FormState::default();
                self.view.status = Some("form cleared".to_string());
            }
            KeyCode::Char('r') => self.reload("reloaded"),
            KeyCode::Char('?') => self.view.show_help = !self.view.show_help,
            _ => {}
        }
        false
    }

    fn handle_edit_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                self.view.status = None;
            }
            KeyCode::Tab | KeyCode::Enter => self.view.form.focus_next(),
            KeyCode::BackTab => self.view.form.focus_prev(),
            KeyCode::Backspace => self.view.form.pop_char(),
            KeyCode::Char(ch) => self.view.form.push_char(ch),
            _ => {}
        }
        false
    }

    /// Moves the selection and populates the form from the selected record.
    fn select_offset(&mut self, delta: isize) {
        if self.view.books.is_empty() {
            self.view.selected = None;
            return;
        }

        let last = self.view.books.len() - 1;
        let next = match self.view.selected {
            None => 0,
            Some(current) => current
                .saturating_add_signed(delta)
                .min(last),
        };

        self.view.selected = Some(next);
        self.view.form = FormState::from_book(&self.view.books[next]);
    }

    fn command_add(&mut self) {
        let title = self.view.form.title.clone();
        let author = self.view.form.author.clone();

        let outcome = (|| -> AppResult<BookId> {
            let conn = open_store(&self.store)?;
            let service = BookService::new(SqliteBookRepository::try_new(&conn)?);
            Ok(service.add_book(title, author)?)
        })();

        match outcome {
            Ok(id) => {
                info!("event=book_add module=tui status=ok id={id}");
                self.reload(format!("added book id={id}"));
            }
            Err(err) => self.report_failure("add", &err),
        }
    }

    fn command_update(&mut self) {
        let id = match self.view.form.parse_id() {
            Ok(id) => id,
            Err(err) => return self.report_parse_failure("update", &err),
        };
        let book = Book::with_id(id, self.view.form.title.clone(), self.view.form.author.clone());

        let outcome = (|| -> AppResult<()> {
            let conn = open_store(&self.store)?;
            let service = BookService::new(SqliteBookRepository::try_new(&conn)?);
            Ok(service.update_book(&book)?)
        })();

        match outcome {
            Ok(()) => {
                info!("event=book_update module=tui status=ok id={id}");
                self.reload(format!("updated book id={id}"));
            }
            Err(err) => self.report_failure("update", &err),
        }
    }

    fn command_delete(&mut self) {
        let id = match self.view.form.parse_id() {
            Ok(id) => id,
            Err(err) => return self.report_parse_failure("delete", &err),
        };

        let outcome = (|| -> AppResult<()> {
            let conn = open_store(&self.store)?;
            let service = BookService::new(SqliteBookRepository::try_new(&conn)?);
            Ok(service.delete_book(id)?)
        })();

        match outcome {
            Ok(()) => {
                info!("event=book_delete module=tui status=ok id={id}");
                self.reload(format!("deleted book id={id}"));
            }
            Err(err) => self.report_failure("delete", &err),
        }
    }

    /// Discards the shown list and rebuilds the view from a fresh store read.
    ///
    /// On reload failure the previous list stays visible and the failure is
    /// reported instead.
    fn reload(&mut self, status: impl Into<String>) {
        match fetch_books(&self.store) {
            Ok(books) => {
                self.view = ViewState {
                    books,
                    selected: None,
                    form: FormState::default(),
                    status: Some(status.into()),
                    show_help: self.view.show_help,
                };
            }
            Err(err) => {
                error!("event=book_list module=tui status=error error={err}");
                self.view.status = Some(format!("reload failed: {err}"));
            }
        }
    }

    fn report_failure(&mut self, command: &str, err: &AppError) {
        error!("event=book_{command} module=tui status=error error={err}");
        self.view.status = Some(format!("{command} failed: {err}"));
    }

    fn report_parse_failure(&mut self, command: &str, err: &crate::form::IdParseError) {
        warn!("event=book_{command} module=tui status=rejected error={err}");
        self.view.status = Some(err.to_string());
    }
}

/// One full-list read on its own connection.
fn fetch_books(store: &StoreConfig) -> AppResult<Vec<Book>> {
    let conn = open_store(store)?;
    let repo = SqliteBookRepository::try_new(&conn)?;
    Ok(repo.list_books(&BookListQuery::default())?)
}
