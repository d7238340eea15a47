//! Rendering of `Покажи` result lines.

use crate::ast::Field;
use crate::store::Contact;


/// Render ten raw digits as `+7 (XXX) XXX-XX-XX`.
///
/// Anything that is not exactly ten ASCII digits is returned unchanged.
pub fn format_phone(digits: &str) -> String {
    if digits.len() != 10 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return digits.to_string();
    }
    format!(
        "+7 ({}) {}-{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..8],
        &digits[8..10]
    )
}

/// Render the requested fields of one contact as a single `;`-separated line.
pub fn render_line(contact: &Contact, fields: &[Field]) -> String {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(';');
        }
        match field {
            Field::Name => line.push_str(&contact.name),
            Field::Phones => push_list(&mut line, contact.phones.iter().map(|p| format_phone(p))),
            Field::Emails => push_list(&mut line, contact.emails.iter().cloned()),
        }
    }
    line
}

fn push_list(buffer: &mut String, items: impl Iterator<Item = String>) {
    for (i, item) in items.enumerate() {
        if i > 0 {
            buffer.push(',');
        }
        buffer.push_str(&item);
    }
}
