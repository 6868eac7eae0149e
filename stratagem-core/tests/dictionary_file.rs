//! Loading dictionaries from disk.

use std::io::Write;
use std::path::Path;

use stratagem_core::{DictionaryLoadError, Direction, Lookup, StratagemDictionary};

fn shipped_dictionary() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../sequences.json"))
}

#[test]
fn shipped_dictionary_loads_and_is_prefix_free() {
    let dict = StratagemDictionary::load_file(shipped_dictionary()).unwrap();
    assert!(dict.len() >= 20);
    assert!(dict.prefix_conflicts().is_empty());

    let reinforce = dict.get("UDRLU").unwrap();
    assert_eq!(reinforce.name(), "Reinforce");
    assert_eq!(reinforce.icon(), "reinforce.svg");
}

#[test]
fn every_shipped_code_is_reachable() {
    let dict = StratagemDictionary::load_file(shipped_dictionary()).unwrap();
    for entry in dict.entries() {
        let sequence: Vec<Direction> = entry
            .code()
            .chars()
            .filter_map(Direction::from_code_char)
            .collect();
        match dict.lookup_class(&sequence) {
            Lookup::Matched(found) => assert_eq!(found, entry),
            other => panic!("{} is unreachable: {:?}", entry.code(), other),
        }
    }
}

#[test]
fn load_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"↑↓→": {{"name": "Test", "icon": "test.png"}}, "LL": {{"name": "Other", "icon": "o.png"}}}}"#
    )
    .unwrap();

    let dict = StratagemDictionary::load_file(file.path()).unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.get("UDR").unwrap().name(), "Test");
    assert_eq!(dict.get("LL").unwrap().icon(), "o.png");
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    let err = StratagemDictionary::load_file(&path).unwrap_err();
    match &err {
        DictionaryLoadError::Io { path: reported, .. } => assert_eq!(reported, &path),
        other => panic!("expected Io error, got {other:?}"),
    }
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{\"UD\": ").unwrap();
    let err = StratagemDictionary::load_file(file.path()).unwrap_err();
    assert!(matches!(err, DictionaryLoadError::Parse(_)));
}
