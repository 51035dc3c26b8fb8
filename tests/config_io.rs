use std::fs;
use wbi_rank::config::{ConfigError, CountryEntry, CountryList};

#[test]
fn load_json_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("countries.json");
    fs::write(
        &p,
        r#"[{"name":"Zimbabwe","code":"ZWE"},{"name":"Austria","code":"AUT"}]"#,
    )
    .unwrap();
    let list = CountryList::load(&p).unwrap();
    assert_eq!(
        list.entries(),
        [
            CountryEntry::new("Zimbabwe", "ZWE"),
            CountryEntry::new("Austria", "AUT")
        ]
    );
}

#[test]
fn load_csv_trims_and_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("countries.CSV");
    fs::write(&p, "name,code\nNew Zealand, NZL\nJapan,JPN\n\"Korea, Rep.\",KOR\n").unwrap();
    let list = CountryList::load(&p).unwrap();
    let names: Vec<&str> = list.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["New Zealand", "Japan", "Korea, Rep."]);
    assert_eq!(list.entries()[0].code, "NZL");
}

#[test]
fn duplicate_names_in_file_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("dup.json");
    fs::write(
        &p,
        r#"[{"name":"Japan","code":"JPN"},{"name":"Japan","code":"JAP"}]"#,
    )
    .unwrap();
    assert!(matches!(
        CountryList::load(&p),
        Err(ConfigError::DuplicateName(n)) if n == "Japan"
    ));
}

#[test]
fn same_code_under_two_names_is_allowed() {
    let list = CountryList::new(vec![
        CountryEntry::new("Korea", "KOR"),
        CountryEntry::new("South Korea", "KOR"),
    ])
    .unwrap();
    assert_eq!(list.len(), 2);
}

#[test]
fn unknown_extension_and_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("countries.yaml");
    fs::write(&p, "- x").unwrap();
    assert!(matches!(
        CountryList::load(&p),
        Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"
    ));
    assert!(matches!(
        CountryList::load(dir.path().join("nope.json")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn builtin_names_are_unique() {
    let list = CountryList::builtin();
    let mut names: Vec<&str> = list.iter().map(|e| e.name.as_str()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), list.len());
    assert!(list.iter().all(|e| e.code.len() == 3));
}
