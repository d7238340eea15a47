//! # pbQL — the phone-book query language
//!
//! pbQL is a small, fixed, Russian-keyword command language for an in-memory
//! address book. A query is a sequence of `;`-terminated statements:
//!
//! ```rust
//! use pbql::prelude::*;
//!
//! let mut store = ContactStore::new();
//! let lines = pbql::run(
//!     &mut store,
//!     "Создай контакт Григорий;\
//!      Добавь телефон 5556667788 и почту grisha@example.com для контакта Григорий;\
//!      Покажи имя и почты для контактов, где есть ий;",
//! )?;
//! assert_eq!(lines, vec!["Григорий;grisha@example.com"]);
//! # Ok::<(), PbqlError>(())
//! ```
//!
//! ## Statements
//!
//! | Statement | Effect |
//! |-----------|--------|
//! | `Создай контакт <имя>` | create an empty contact |
//! | `Удали контакт <имя>` | delete a contact |
//! | `Удали контакты, где есть <запрос>` | delete every contact matching the substring |
//! | `Удали телефон … и почту … для контакта <имя>` | remove phones/emails |
//! | `Добавь телефон … и почту … для контакта <имя>` | add phones/emails |
//! | `Покажи имя и телефоны и почты для контактов, где есть <запрос>` | print matching contacts |
//!
//! Any grammar violation aborts the query with
//! `SyntaxError: Unexpected token at <line>:<column>`.

pub mod ast;
pub mod config;
pub mod engine;
pub mod error;
pub mod fmt;
pub mod parser;
pub mod store;

pub use engine::run;
pub use error::{PbqlError, PbqlResult};
pub use store::{Contact, ContactStore};

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::{Config, OutputFormat};
    pub use crate::engine::{execute, run};
    pub use crate::error::*;
    pub use crate::fmt::{format_phone, render_line};
    pub use crate::parser::{parse, parse_statement, statements, Statement};
    pub use crate::store::{Contact, ContactStore};
}

/// Parse a single pbQL statement (without its trailing `;`).
///
/// # Example
///
/// ```
/// use pbql::{ast::Command, parse_statement};
///
/// let cmd = parse_statement("Удали контакт Вася", 0).unwrap();
/// assert_eq!(cmd, Command::DeleteContact { name: "Вася".to_string() });
/// ```
pub fn parse_statement(text: &str, line: usize) -> PbqlResult<ast::Command> {
    parser::parse_statement(text, line)
}
