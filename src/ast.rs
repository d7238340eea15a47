//! Abstract syntax for pbQL statements.
//!
//! Every statement parses into one [`Command`]. `Display` renders the
//! canonical pbQL text of a command (without the trailing `;`), so a parsed
//! statement prints back as something the parser accepts again.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The leading verb of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verb {
    /// `Создай`
    Create,
    /// `Удали`
    Delete,
    /// `Добавь`
    Add,
    /// `Покажи`
    Show,
}

impl Verb {
    /// All verbs, in the order they are documented.
    pub const ALL: [Verb; 4] = [Verb::Create, Verb::Delete, Verb::Add, Verb::Show];

    /// Look up a verb by its exact keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|verb| verb.keyword() == word)
    }

    /// The keyword that introduces this verb.
    pub fn keyword(self) -> &'static str {
        match self {
            Verb::Create => "Создай",
            Verb::Delete => "Удали",
            Verb::Add => "Добавь",
            Verb::Show => "Покажи",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A column requested by `Покажи`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    /// `имя`
    Name,
    /// `телефоны`
    Phones,
    /// `почты`
    Emails,
}

impl Field {
    /// The keyword naming this field in a field list.
    pub fn keyword(self) -> &'static str {
        match self {
            Field::Name => "имя",
            Field::Phones => "телефоны",
            Field::Emails => "почты",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Phones and emails collected from a `телефон … и почту …` clause list,
/// each in the order written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    /// Ten-digit phone numbers without formatting.
    pub phones: Vec<String>,
    pub emails: Vec<String>,
}

impl fmt::Display for ContactDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<String> = self
            .phones
            .iter()
            .map(|phone| format!("телефон {}", phone))
            .chain(self.emails.iter().map(|email| format!("почту {}", email)))
            .collect();
        f.write_str(&clauses.join(" и "))
    }
}

/// One parsed pbQL statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// `Создай контакт <name>`
    Create { name: String },
    /// `Удали контакт <name>`
    DeleteContact { name: String },
    /// `Удали контакты, где есть <needle>`
    DeleteMatching { needle: String },
    /// `Удали <clauses> для контакта <name>`
    DeleteDetails { details: ContactDetails, name: String },
    /// `Добавь <clauses> для контакта <name>`
    Add { details: ContactDetails, name: String },
    /// `Покажи <fields> для контактов, где есть <needle>`
    Show { fields: Vec<Field>, needle: String },
}

impl Command {
    /// The verb this command was introduced by.
    pub fn verb(&self) -> Verb {
        match self {
            Command::Create { .. } => Verb::Create,
            Command::DeleteContact { .. }
            | Command::DeleteMatching { .. }
            | Command::DeleteDetails { .. } => Verb::Delete,
            Command::Add { .. } => Verb::Add,
            Command::Show { .. } => Verb::Show,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Create { name } => write!(f, "Создай контакт {}", name),
            Command::DeleteContact { name } => write!(f, "Удали контакт {}", name),
            Command::DeleteMatching { needle } => {
                write!(f, "Удали контакты, где есть {}", needle)
            }
            Command::DeleteDetails { details, name } => {
                write!(f, "Удали {} для контакта {}", details, name)
            }
            Command::Add { details, name } => {
                write!(f, "Добавь {} для контакта {}", details, name)
            }
            Command::Show { fields, needle } => {
                let fields: Vec<&str> = fields.iter().map(|field| field.keyword()).collect();
                write!(
                    f,
                    "Покажи {} для контактов, где есть {}",
                    fields.join(" и "),
                    needle
                )
            }
        }
    }
}
