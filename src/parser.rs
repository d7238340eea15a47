//! pbQL parser.
//!
//! pbQL is a fixed, space-sensitive keyword grammar. Each grammar rule is a
//! function from a [`Cursor`] to the advanced cursor plus whatever the rule
//! produced, built on `nom`'s complete-input primitives. There is no
//! backtracking: once a keyword matches, the rule commits, so the position
//! of a failure is always the position where the unexpected token starts.
//!
//! # Grammar
//!
//! ```text
//! Query      := (Statement ";")*
//! Statement  := "Создай " "контакт " Name
//!             | "Удали " "контакт " Name
//!             | "Удали " "контакты, " "где " "есть " Needle
//!             | "Удали " Clauses "для " "контакта " Name
//!             | "Добавь " Clauses "для " "контакта " Name
//!             | "Покажи " Fields "контактов, " "где " "есть " Needle
//! Clauses    := Clause ("и " Clause)*
//! Clause     := "телефон " DIGIT{10} " " | "почту " EMAIL " "
//! Fields     := (Item "и ")* Item "для "    ; at least one Item is a Field
//! Item       := Field | "и "
//! Field      := "почты " | "телефоны " | "имя "
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_while_m_n},
    combinator::value,
    IResult,
};

use crate::ast::*;
use crate::error::{PbqlError, PbqlResult};

/// One `;`-terminated slice of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement<'a> {
    /// Statement text without the terminating `;`.
    pub text: &'a str,
    /// 0-based position of the statement in the query.
    pub index: usize,
}

impl<'a> Statement<'a> {
    /// Parse this statement into a command.
    pub fn parse(&self) -> PbqlResult<Command> {
        parse_statement(self.text, self.index)
    }
}

/// Split a query into statements.
///
/// The query must end with `;`. A non-empty tail after the last `;` shows
/// up as an error in the final position of the iterator, after every
/// complete statement has been yielded, so callers that execute as they go
/// see exactly the statements that precede the bad tail.
pub fn statements(query: &str) -> impl Iterator<Item = PbqlResult<Statement<'_>>> {
    let segments: Vec<&str> = query.split(';').collect();
    let last = segments.len() - 1;

    segments
        .into_iter()
        .enumerate()
        .filter_map(move |(index, text)| {
            if index < last {
                Some(Ok(Statement { text, index }))
            } else if text.is_empty() {
                None
            } else {
                Some(Err(PbqlError::syntax(index, text.encode_utf16().count())))
            }
        })
}

/// Parse every statement of a query without executing anything.
pub fn parse(query: &str) -> PbqlResult<Vec<Command>> {
    statements(query)
        .map(|statement| statement.and_then(|s| s.parse()))
        .collect()
}

/// Parse a single statement (text without the trailing `;`).
///
/// `line` is the 0-based statement index, used for error positions.
pub fn parse_statement(text: &str, line: usize) -> PbqlResult<Command> {
    let space = text.find(' ').ok_or_else(|| PbqlError::syntax(line, 0))?;
    let verb = Verb::from_keyword(&text[..space]).ok_or_else(|| PbqlError::syntax(line, 0))?;
    let cur = Cursor {
        text,
        line,
        pos: space + 1,
    };

    match verb {
        Verb::Create => parse_create(cur),
        Verb::Delete => parse_delete(cur),
        Verb::Add => parse_add(cur),
        Verb::Show => parse_show(cur),
    }
}

/// Read position inside one statement.
///
/// `pos` is a byte offset into `text` and only ever moves forward. Error
/// columns are reported in UTF-16 code units.
#[derive(Debug, Clone, Copy)]
struct Cursor<'a> {
    text: &'a str,
    line: usize,
    pos: usize,
}

type Parsed<'a, T> = PbqlResult<(Cursor<'a>, T)>;

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Move to where `remaining` starts. `remaining` must be a suffix of `text`.
    fn at(self, remaining: &'a str) -> Self {
        Self {
            pos: self.text.len() - remaining.len(),
            ..self
        }
    }

    fn column(&self) -> usize {
        self.text[..self.pos].encode_utf16().count()
    }

    fn error(&self) -> PbqlError {
        PbqlError::syntax(self.line, self.column())
    }

    /// Advance past `literal` if the input starts with it.
    fn accept(self, literal: &str) -> Option<Self> {
        let res: IResult<&str, &str> = tag(literal)(self.rest());
        res.ok().map(|(rest, _)| self.at(rest))
    }

    /// Advance past `literal`, or fail at the current position.
    fn expect(self, literal: &str) -> PbqlResult<Self> {
        self.accept(literal).ok_or_else(|| self.error())
    }

    /// Everything up to the end of the statement.
    fn remainder(self) -> String {
        self.rest().to_string()
    }
}

fn parse_create(cur: Cursor<'_>) -> PbqlResult<Command> {
    let name = cur.expect("контакт ")?.remainder();
    Ok(Command::Create { name })
}

fn parse_delete(cur: Cursor<'_>) -> PbqlResult<Command> {
    if let Some(cur) = cur.accept("контакт ") {
        let name = cur.remainder();
        return Ok(Command::DeleteContact { name });
    }

    if let Some(cur) = cur.accept("контакты, ") {
        let needle = where_contains(cur)?;
        return Ok(Command::DeleteMatching { needle });
    }

    let (cur, details) = contact_details(cur)?;
    let name = cur.expect("контакта ")?.remainder();
    Ok(Command::DeleteDetails { details, name })
}

fn parse_add(cur: Cursor<'_>) -> PbqlResult<Command> {
    let (cur, details) = contact_details(cur)?;
    let name = cur.expect("контакта ")?.remainder();
    Ok(Command::Add { details, name })
}

fn parse_show(cur: Cursor<'_>) -> PbqlResult<Command> {
    let (cur, fields) = field_list(cur)?;
    let cur = cur.expect("контактов, ")?;
    let needle = where_contains(cur)?;
    Ok(Command::Show { fields, needle })
}

/// `где есть <needle>`
fn where_contains(cur: Cursor<'_>) -> PbqlResult<String> {
    let cur = cur.expect("где ")?.expect("есть ")?;
    Ok(cur.remainder())
}

/// Parse a clause list up to and including the terminating `для `.
fn contact_details(mut cur: Cursor<'_>) -> Parsed<'_, ContactDetails> {
    let mut details = ContactDetails::default();

    loop {
        cur = if let Some(next) = cur.accept("телефон ") {
            let (next, phone) = phone_number(next)?;
            details.phones.push(phone);
            next
        } else if let Some(next) = cur.accept("почту ") {
            let (next, email) = email(next)?;
            details.emails.push(email);
            next
        } else {
            return Err(cur.error());
        };

        if let Some(next) = cur.accept("и ") {
            cur = next;
        } else if let Some(next) = cur.accept("для ") {
            return Ok((next, details));
        } else {
            return Err(cur.error());
        }
    }
}

/// Exactly ten ASCII digits followed by a space.
fn phone_number(cur: Cursor<'_>) -> Parsed<'_, String> {
    let res: IResult<&str, &str> =
        take_while_m_n(10, 10, |c: char| c.is_ascii_digit())(cur.rest());
    let (rest, digits) = res.map_err(|_| cur.error())?;
    let next = cur.at(rest).expect(" ").map_err(|_| cur.error())?;
    Ok((next, digits.to_string()))
}

/// A non-empty run of non-space characters followed by a space.
fn email(cur: Cursor<'_>) -> Parsed<'_, String> {
    let res: IResult<&str, &str> = take_till(|c: char| c == ' ')(cur.rest());
    let (rest, token) = res.map_err(|_| cur.error())?;
    if token.is_empty() {
        return Err(cur.error());
    }
    let next = cur.at(rest).expect(" ").map_err(|_| cur.error())?;
    Ok((next, token.to_string()))
}

fn field(cur: Cursor<'_>) -> Option<(Cursor<'_>, Field)> {
    let res: IResult<&str, Field> = alt((
        value(Field::Emails, tag("почты ")),
        value(Field::Phones, tag("телефоны ")),
        value(Field::Name, tag("имя ")),
    ))(cur.rest());
    res.ok().map(|(rest, field)| (cur.at(rest), field))
}

/// Parse a Show field list up to and including the terminating `для `.
///
/// A field position also admits a bare `и `, so `и и имя` and
/// `почты и и имя` are accepted. A list that reaches `для ` without any
/// field fails at the `для `.
fn field_list(mut cur: Cursor<'_>) -> Parsed<'_, Vec<Field>> {
    let mut fields = Vec::new();

    loop {
        if let Some((next, field)) = field(cur) {
            fields.push(field);
            cur = next;
        } else {
            cur = cur.expect("и ")?;
        }

        if let Some(next) = cur.accept("и ") {
            cur = next;
        } else if let Some(next) = cur.accept("для ") {
            if fields.is_empty() {
                return Err(cur.error());
            }
            return Ok((next, fields));
        } else {
            return Err(cur.error());
        }
    }
}
