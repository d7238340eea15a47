//! Execution engine for pbQL.
//!
//! Statements are parsed and executed one at a time, in textual order, so a
//! syntax error in statement N leaves the effects of statements 1..N-1 in the
//! store and stops before anything else runs.

use tracing::debug;

use crate::ast::Command;
use crate::error::PbqlResult;
use crate::fmt::render_line;
use crate::parser;
use crate::store::ContactStore;

/// Run a pbQL query against `store`, returning the lines produced by
/// `Покажи` statements.
///
/// # Example
///
/// ```
/// use pbql::{run, ContactStore};
///
/// let mut store = ContactStore::new();
/// let lines = run(
///     &mut store,
///     "Создай контакт Вася;\
///      Добавь телефон 9161234567 для контакта Вася;\
///      Покажи имя и телефоны для контактов, где есть Вася;",
/// )
/// .unwrap();
/// assert_eq!(lines, vec!["Вася;+7 (916) 123-45-67"]);
/// ```
pub fn run(store: &mut ContactStore, query: &str) -> PbqlResult<Vec<String>> {
    let mut output = Vec::new();

    for statement in parser::statements(query) {
        let statement = statement.inspect_err(|e| debug!(error = %e, "query aborted"))?;
        let cmd = statement
            .parse()
            .inspect_err(|e| debug!(error = %e, "query aborted"))?;
        debug!(line = statement.index + 1, verb = %cmd.verb(), "executing statement");
        execute(store, &cmd, &mut output);
    }

    Ok(output)
}

/// Apply one parsed command to `store`, appending any result lines to `output`.
///
/// Commands that target missing contacts, or match nothing, do nothing.
pub fn execute(store: &mut ContactStore, cmd: &Command, output: &mut Vec<String>) {
    match cmd {
        Command::Create { name } => {
            store.create(name);
        }
        Command::DeleteContact { name } => {
            store.remove(name);
        }
        Command::DeleteMatching { needle } => {
            store.remove_matching(needle);
        }
        Command::DeleteDetails { details, name } => {
            store.remove_details(name, details);
        }
        Command::Add { details, name } => {
            store.add_details(name, details);
        }
        Command::Show { fields, needle } => {
            if needle.is_empty() {
                return;
            }
            output.extend(
                store
                    .matching(needle)
                    .map(|contact| render_line(contact, fields)),
            );
        }
    }
}
