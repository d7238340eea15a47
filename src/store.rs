//! In-memory contact store.
//!
//! Contacts are kept in insertion order so that `Покажи` output is
//! deterministic. Names are unique and non-empty; phone and email lists never
//! hold duplicates.

use serde::Serialize;
use tracing::trace;

use crate::ast::ContactDetails;

/// A single address-book entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub name: String,
    /// Ten-digit phone numbers without formatting.
    pub phones: Vec<String>,
    pub emails: Vec<String>,
}

impl Contact {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether the name, any raw phone, or any email contains `needle`.
    pub fn has_match(&self, needle: &str) -> bool {
        self.name.contains(needle)
            || self.phones.iter().any(|phone| phone.contains(needle))
            || self.emails.iter().any(|email| email.contains(needle))
    }

    /// Append every phone and email not already present.
    fn add(&mut self, details: &ContactDetails) {
        for phone in &details.phones {
            if !self.phones.contains(phone) {
                self.phones.push(phone.clone());
            }
        }
        for email in &details.emails {
            if !self.emails.contains(email) {
                self.emails.push(email.clone());
            }
        }
    }

    fn remove(&mut self, details: &ContactDetails) {
        self.phones.retain(|phone| !details.phones.contains(phone));
        self.emails.retain(|email| !details.emails.contains(email));
    }
}

/// The address book a pbQL session operates on.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ContactStore {
    contacts: Vec<Contact>,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Contact> {
        self.contacts.iter_mut().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Contacts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    /// Contacts matching `needle`, in insertion order.
    pub fn matching<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a Contact> {
        self.contacts.iter().filter(move |c| c.has_match(needle))
    }

    /// Create an empty contact. Returns `false` if the name is taken or empty.
    pub fn create(&mut self, name: &str) -> bool {
        if name.is_empty() || self.contains(name) {
            return false;
        }
        trace!(name, "contact created");
        self.contacts.push(Contact::new(name));
        true
    }

    /// Remove a contact by exact name. Returns `false` if it did not exist.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|c| c.name != name);
        let removed = self.contacts.len() != before;
        if removed {
            trace!(name, "contact removed");
        }
        removed
    }

    /// Remove every contact matching `needle`. An empty needle removes nothing.
    pub fn remove_matching(&mut self, needle: &str) -> usize {
        if needle.is_empty() {
            return 0;
        }
        let before = self.contacts.len();
        self.contacts.retain(|c| !c.has_match(needle));
        let removed = before - self.contacts.len();
        trace!(needle, removed, "contacts removed by match");
        removed
    }

    /// Add phones and emails to an existing contact. Returns `false` if the
    /// contact does not exist.
    pub fn add_details(&mut self, name: &str, details: &ContactDetails) -> bool {
        match self.get_mut(name) {
            Some(contact) => {
                contact.add(details);
                trace!(name, %details, "details added");
                true
            }
            None => false,
        }
    }

    /// Remove phones and emails from an existing contact. Returns `false` if
    /// the contact does not exist.
    pub fn remove_details(&mut self, name: &str, details: &ContactDetails) -> bool {
        match self.get_mut(name) {
            Some(contact) => {
                contact.remove(details);
                trace!(name, %details, "details removed");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(phones: &[&str], emails: &[&str]) -> ContactDetails {
        ContactDetails {
            phones: phones.iter().map(|s| s.to_string()).collect(),
            emails: emails.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_create_is_idempotent() {
        let mut store = ContactStore::new();
        assert!(store.create("Вася"));
        assert!(!store.create("Вася"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Вася"), Some(&Contact::new("Вася")));
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let mut store = ContactStore::new();
        assert!(!store.create(""));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_skips_duplicates() {
        let mut store = ContactStore::new();
        store.create("Вася");
        store.add_details("Вася", &details(&["1234567890"], &["a@b.ru"]));
        store.add_details(
            "Вася",
            &details(&["1234567890", "0987654321"], &["a@b.ru"]),
        );
        let vasya = store.get("Вася").unwrap();
        assert_eq!(vasya.phones, vec!["1234567890", "0987654321"]);
        assert_eq!(vasya.emails, vec!["a@b.ru"]);
    }

    #[test]
    fn test_details_on_missing_contact() {
        let mut store = ContactStore::new();
        assert!(!store.add_details("Петя", &details(&["1234567890"], &[])));
        assert!(!store.remove_details("Петя", &details(&["1234567890"], &[])));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_details_keeps_order() {
        let mut store = ContactStore::new();
        store.create("Вася");
        store.add_details(
            "Вася",
            &details(&["1111111111", "2222222222", "3333333333"], &["x@y", "z@w"]),
        );
        store.remove_details("Вася", &details(&["2222222222"], &["x@y", "nope"]));
        let vasya = store.get("Вася").unwrap();
        assert_eq!(vasya.phones, vec!["1111111111", "3333333333"]);
        assert_eq!(vasya.emails, vec!["z@w"]);
    }

    #[test]
    fn test_remove_matching() {
        let mut store = ContactStore::new();
        store.create("Вася");
        store.create("Петя");
        store.add_details("Вася", &details(&["9167771234"], &[]));
        store.add_details("Петя", &details(&["9161234567"], &[]));

        assert_eq!(store.remove_matching(""), 0);
        assert_eq!(store.remove_matching("777"), 1);
        assert!(!store.contains("Вася"));
        assert!(store.contains("Петя"));
    }

    #[test]
    fn test_match_uses_raw_digits() {
        let mut contact = Contact::new("Вася");
        contact.phones.push("9161234567".to_string());
        contact.emails.push("vasya@mail.ru".to_string());
        assert!(contact.has_match("916123"));
        assert!(contact.has_match("mail"));
        assert!(contact.has_match("ася"));
        assert!(!contact.has_match("(916)"));
        assert!(!contact.has_match("вася"));
    }

    #[test]
    fn test_iteration_follows_insertion() {
        let mut store = ContactStore::new();
        for name in ["Я", "Б", "А"] {
            store.create(name);
        }
        let names: Vec<&str> = store.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Я", "Б", "А"]);
    }
}
