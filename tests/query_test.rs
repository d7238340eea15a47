use pbql::prelude::*;
use pretty_assertions::assert_eq;

fn run_fresh(query: &str) -> PbqlResult<Vec<String>> {
    let mut store = ContactStore::new();
    pbql::run(&mut store, query)
}

#[test]
fn test_create_add_show() {
    let lines = run_fresh(
        "Создай контакт Вася;\
         Добавь телефон 9161234567 для контакта Вася;\
         Покажи имя и телефоны для контактов, где есть Вася;",
    )
    .expect("query should run");
    assert_eq!(lines, vec!["Вася;+7 (916) 123-45-67"]);
}

#[test]
fn test_create_twice_keeps_one_contact() {
    let mut store = ContactStore::new();
    pbql::run(&mut store, "Создай контакт X;Создай контакт X;").unwrap();
    assert_eq!(store.len(), 1);
    let x = store.get("X").unwrap();
    assert!(x.phones.is_empty());
    assert!(x.emails.is_empty());
}

#[test]
fn test_add_same_phone_twice() {
    let mut store = ContactStore::new();
    pbql::run(
        &mut store,
        "Создай контакт X;\
         Добавь телефон 1234567890 для контакта X;\
         Добавь телефон 1234567890 для контакта X;",
    )
    .unwrap();
    assert_eq!(store.get("X").unwrap().phones, vec!["1234567890"]);
}

#[test]
fn test_missing_targets_are_no_ops() {
    let mut store = ContactStore::new();
    let lines = pbql::run(
        &mut store,
        "Удали контакт Никто;\
         Удали телефон 1234567890 для контакта Никто;\
         Добавь почту a@b.ru для контакта Никто;\
         Удали контакты, где есть Никто;\
         Покажи имя для контактов, где есть Никто;",
    )
    .unwrap();
    assert!(lines.is_empty());
    assert!(store.is_empty());
}

#[test]
fn test_show_field_order_follows_request() {
    let lines = run_fresh(
        "Создай контакт Саша;\
         Добавь телефон 4951112233 и почту sasha@ya.ru для контакта Саша;\
         Покажи имя и телефоны для контактов, где есть а;\
         Покажи почты и имя и телефоны для контактов, где есть а;",
    )
    .unwrap();
    assert_eq!(
        lines,
        vec![
            "Саша;+7 (495) 111-22-33",
            "sasha@ya.ru;Саша;+7 (495) 111-22-33",
        ]
    );
}

#[test]
fn test_show_lists_in_insertion_order() {
    let lines = run_fresh(
        "Создай контакт Григорий;\
         Создай контакт Василий;\
         Создай контакт Иннокентий;\
         Добавь телефон 5556667787 и телефон 5556667788 и почту grisha@example.com для контакта Григорий;\
         Добавь почту vasya@example.com для контакта Василий;\
         Покажи имя и телефоны и почты для контактов, где есть ий;",
    )
    .unwrap();
    assert_eq!(
        lines,
        vec![
            "Григорий;+7 (555) 666-77-87,+7 (555) 666-77-88;grisha@example.com",
            "Василий;;vasya@example.com",
            "Иннокентий;;",
        ]
    );
}

#[test]
fn test_show_matches_phone_digits_and_email() {
    let lines = run_fresh(
        "Создай контакт А;\
         Создай контакт Б;\
         Добавь телефон 9160000000 для контакта А;\
         Добавь почту b@example.com для контакта Б;\
         Покажи имя для контактов, где есть 916;\
         Покажи имя для контактов, где есть example;",
    )
    .unwrap();
    assert_eq!(lines, vec!["А", "Б"]);
}

#[test]
fn test_delete_details() {
    let lines = run_fresh(
        "Создай контакт Григорий;\
         Добавь телефон 5556667787 и телефон 5556667788 и почту grisha@example.com для контакта Григорий;\
         Удали телефон 5556667787 и почту grisha@example.com для контакта Григорий;\
         Покажи имя и телефоны и почты для контактов, где есть Григорий;",
    )
    .unwrap();
    assert_eq!(lines, vec!["Григорий;+7 (555) 666-77-88;"]);
}

#[test]
fn test_bulk_delete_by_phone() {
    let mut store = ContactStore::new();
    pbql::run(
        &mut store,
        "Создай контакт Первый;\
         Создай контакт Второй;\
         Добавь телефон 9167770000 для контакта Первый;\
         Добавь телефон 9161110000 для контакта Второй;\
         Удали контакты, где есть 777;",
    )
    .unwrap();
    assert!(!store.contains("Первый"));
    assert_eq!(store.get("Второй").unwrap().phones, vec!["9161110000"]);
}

#[test]
fn test_bulk_delete_with_empty_needle() {
    let mut store = ContactStore::new();
    pbql::run(&mut store, "Создай контакт А;Удали контакты, где есть ;").unwrap();
    assert!(store.contains("А"));
}

#[test]
fn test_delete_contact_by_name() {
    let mut store = ContactStore::new();
    pbql::run(
        &mut store,
        "Создай контакт А;Создай контакт Б;Удали контакт А;",
    )
    .unwrap();
    let names: Vec<&str> = store.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Б"]);
}

#[test]
fn test_show_without_fields_is_syntax_error() {
    let err = run_fresh("Покажи для контактов, где есть x;").unwrap_err();
    assert_eq!(err.position(), Some((1, 8)));
    assert_eq!(err.to_string(), "SyntaxError: Unexpected token at 1:8");
}

#[test]
fn test_error_discards_results() {
    let mut store = ContactStore::new();
    let res = pbql::run(
        &mut store,
        "Создай контакт А;\
         Покажи имя для контактов, где есть А;\
         Покажи имя для контактов где есть А;",
    );
    // "Покажи имя для " is 15 characters
    assert_eq!(res.unwrap_err().position(), Some((3, 16)));
}

#[test]
fn test_store_persists_across_runs() {
    let mut store = ContactStore::new();
    pbql::run(&mut store, "Создай контакт Вася;").unwrap();
    pbql::run(&mut store, "Добавь почту v@v.ru для контакта Вася;").unwrap();
    let lines = pbql::run(&mut store, "Покажи почты для контактов, где есть Вася;").unwrap();
    assert_eq!(lines, vec!["v@v.ru"]);
}

#[test]
fn test_missing_final_semicolon() {
    let err = run_fresh("Создай контакт Вася").unwrap_err();
    assert_eq!(err.to_string(), "SyntaxError: Unexpected token at 1:20");
}

#[test]
fn test_empty_statement_is_error() {
    let err = run_fresh("Создай контакт Вася;;").unwrap_err();
    assert_eq!(err.position(), Some((2, 1)));
}

#[test]
fn test_parse_only() {
    let commands = parse("Создай контакт Вася;Удали контакты, где есть 1;").unwrap();
    assert_eq!(
        commands,
        vec![
            Command::Create {
                name: "Вася".to_string()
            },
            Command::DeleteMatching {
                needle: "1".to_string()
            },
        ]
    );
}

#[test]
fn test_show_leading_connectors() {
    let lines = run_fresh(
        "Создай контакт Вася;Покажи и и имя для контактов, где есть Вася;",
    )
    .unwrap();
    assert_eq!(lines, vec!["Вася"]);

    let err = run_fresh("Покажи и имя для контактов, где есть Вася;").unwrap_err();
    assert_eq!(err.position(), Some((1, 10)));
}
