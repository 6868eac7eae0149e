//! Stratagem dictionary: immutable mapping from direction codes to stratagems.
//!
//! The source document is JSON shaped like
//!
//! ```json
//! { "UDRLU": { "name": "Reinforce", "icon": "reinforce.svg" } }
//! ```
//!
//! Keys may be spelled with the canonical letters (`L U D R`) or with arrow
//! glyphs; both normalize to the letter form at load time. Two keys that
//! normalize to the same code are a load error.
//!
//! Lookup follows a strict candidate count: a sequence matches only when it
//! is the single code having itself as a prefix. A code that is a strict
//! prefix of another code can therefore never match, which is why such pairs
//! are reported by [`StratagemDictionary::prefix_conflicts`].

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde_json::Value;
use thiserror::Error;

use crate::direction::Direction;

/// Errors from loading a dictionary.
#[derive(Debug, Error)]
pub enum DictionaryLoadError {
    #[error("cannot read dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dictionary is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("dictionary must be a mapping of codes to stratagem records, found {found}")]
    NotAMapping { found: &'static str },

    #[error("stratagem {code:?}: record must be an object with string `name` and `icon`")]
    InvalidRecord { code: String },

    #[error("stratagem {code:?}: missing `{field}`")]
    MissingField { code: String, field: &'static str },

    #[error("empty stratagem code")]
    EmptyCode,

    #[error("stratagem code {code:?}: {character:?} is not a direction")]
    InvalidCode { code: String, character: char },

    #[error("duplicate stratagem code {code}: {first:?} and {second:?}")]
    DuplicateCode {
        code: String,
        first: String,
        second: String,
    },
}

/// One named stratagem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StratagemEntry {
    code: String,
    name: String,
    icon: String,
}

impl StratagemEntry {
    /// Canonical code (`"UDL"`).
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opaque icon reference, resolved by the renderer.
    pub fn icon(&self) -> &str {
        &self.icon
    }
}

/// Outcome of classifying a sequence against the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Exactly one code has the sequence as a prefix, and it is the sequence.
    Matched(&'a StratagemEntry),
    /// At least one code still extends the sequence.
    Ambiguous,
    /// No code starts with the sequence.
    Failed,
}

impl Lookup<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            Lookup::Matched(_) => "MATCHED",
            Lookup::Ambiguous => "AMBIGUOUS",
            Lookup::Failed => "FAILED",
        }
    }
}

/// Immutable dictionary keyed by canonical code.
#[derive(Debug, Clone, Default)]
pub struct StratagemDictionary {
    entries: BTreeMap<String, StratagemEntry>,
}

impl StratagemDictionary {
    /// Load a dictionary from a JSON file.
    pub fn load_file(path: &Path) -> Result<Self, DictionaryLoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| DictionaryLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dictionary = Self::load(&content)?;
        tracing::info!(
            path = %path.display(),
            entries = dictionary.len(),
            "stratagem dictionary loaded"
        );
        Ok(dictionary)
    }

    /// Parse a dictionary from JSON text.
    pub fn load(source: &str) -> Result<Self, DictionaryLoadError> {
        let document: Value = serde_json::from_str(source)?;
        if !document.is_object() {
            return Err(DictionaryLoadError::NotAMapping {
                found: json_kind(&document),
            });
        }

        // Parsed again as an ordered list so repeated keys are not collapsed.
        let RawDocument(pairs): RawDocument = serde_json::from_str(source)?;

        let mut records = Vec::with_capacity(pairs.len());
        for (code, value) in pairs {
            let record = RawRecord::deserialize(&value)
                .map_err(|_| DictionaryLoadError::InvalidRecord { code: code.clone() })?;
            let name = record.name.ok_or_else(|| DictionaryLoadError::MissingField {
                code: code.clone(),
                field: "name",
            })?;
            let icon = record.icon.ok_or_else(|| DictionaryLoadError::MissingField {
                code: code.clone(),
                field: "icon",
            })?;
            records.push((code, name, icon));
        }

        Self::from_entries(records)
    }

    /// Build a dictionary from `(code, name, icon)` triples with the same
    /// validation as [`load`](Self::load).
    pub fn from_entries<I, C, N, P>(entries: I) -> Result<Self, DictionaryLoadError>
    where
        I: IntoIterator<Item = (C, N, P)>,
        C: Into<String>,
        N: Into<String>,
        P: Into<String>,
    {
        let mut map: BTreeMap<String, StratagemEntry> = BTreeMap::new();
        for (raw_code, name, icon) in entries {
            let raw_code = raw_code.into();
            let code = normalize_code(&raw_code)?;
            let name = name.into();
            if let Some(existing) = map.get(&code) {
                return Err(DictionaryLoadError::DuplicateCode {
                    code,
                    first: existing.name.clone(),
                    second: name,
                });
            }
            map.insert(
                code.clone(),
                StratagemEntry {
                    code,
                    name,
                    icon: icon.into(),
                },
            );
        }

        let dictionary = Self { entries: map };
        for (shorter, longer) in dictionary.prefix_conflicts() {
            tracing::warn!(
                shorter = shorter.code(),
                longer = longer.code(),
                "stratagem {:?} is a prefix of {:?} and can never match",
                shorter.name(),
                longer.name()
            );
        }
        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup by canonical code.
    pub fn get(&self, code: &str) -> Option<&StratagemEntry> {
        self.entries.get(code)
    }

    /// Entries in canonical code order.
    pub fn entries(&self) -> impl Iterator<Item = &StratagemEntry> {
        self.entries.values()
    }

    /// Classify a direction sequence. `Direction::None` contributes nothing.
    pub fn lookup_class(&self, sequence: &[Direction]) -> Lookup<'_> {
        let key: String = sequence.iter().filter_map(|d| d.code()).collect();
        self.lookup_key(&key)
    }

    /// Classify a canonical sequence string.
    pub fn lookup_key(&self, key: &str) -> Lookup<'_> {
        // Codes extending `key` are contiguous in sorted order starting at `key`.
        let mut candidates = self
            .entries
            .range::<str, _>((Bound::Included(key), Bound::Unbounded))
            .take_while(|(code, _)| code.starts_with(key));

        match (candidates.next(), candidates.next()) {
            (None, _) => Lookup::Failed,
            (Some((code, entry)), None) if code == key => Lookup::Matched(entry),
            _ => Lookup::Ambiguous,
        }
    }

    /// Pairs `(shorter, longer)` where `shorter` is a strict prefix of
    /// `longer`. The shorter code of each pair is unreachable.
    pub fn prefix_conflicts(&self) -> Vec<(&StratagemEntry, &StratagemEntry)> {
        let mut conflicts = Vec::new();
        for (code, entry) in &self.entries {
            let longer = self
                .entries
                .range::<str, _>((Bound::Excluded(code.as_str()), Bound::Unbounded))
                .take_while(|(other, _)| other.starts_with(code.as_str()));
            for (_, other) in longer {
                conflicts.push((entry, other));
            }
        }
        conflicts
    }
}

/// Normalize a dictionary key to canonical letters.
fn normalize_code(raw: &str) -> Result<String, DictionaryLoadError> {
    let mut code = String::with_capacity(raw.len());
    for c in raw.chars() {
        // Emoji presentation selector, as in "➡️".
        if c == '\u{FE0F}' {
            continue;
        }
        match Direction::from_code_char(c).and_then(Direction::code) {
            Some(letter) => code.push(letter),
            None => {
                return Err(DictionaryLoadError::InvalidCode {
                    code: raw.to_string(),
                    character: c,
                })
            }
        }
    }
    if code.is_empty() {
        return Err(DictionaryLoadError::EmptyCode);
    }
    Ok(code)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Deserialize)]
struct RawRecord {
    name: Option<String>,
    icon: Option<String>,
}

/// Top-level object as ordered key/value pairs, duplicates kept.
struct RawDocument(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for RawDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = RawDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of codes to stratagem records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    pairs.push((key, value));
                }
                Ok(RawDocument(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level() -> StratagemDictionary {
        StratagemDictionary::from_entries([("UD", "Reinforce", "a.svg"), ("UDL", "Resupply", "b.svg")])
            .unwrap()
    }

    #[test]
    fn exact_unique_candidate_matches() {
        let dict = two_level();
        match dict.lookup_key("UDL") {
            Lookup::Matched(entry) => {
                assert_eq!(entry.name(), "Resupply");
                assert_eq!(entry.icon(), "b.svg");
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn exact_code_that_prefixes_another_is_ambiguous() {
        assert_eq!(two_level().lookup_key("UD"), Lookup::Ambiguous);
    }

    #[test]
    fn no_candidate_fails() {
        let dict = two_level();
        assert_eq!(dict.lookup_key("R"), Lookup::Failed);
        assert_eq!(dict.lookup_key("UDLL"), Lookup::Failed);
        assert_eq!(dict.lookup_key("UU"), Lookup::Failed);
    }

    #[test]
    fn lookup_labels() {
        let dict = two_level();
        assert_eq!(dict.lookup_key("UDL").label(), "MATCHED");
        assert_eq!(dict.lookup_key("UD").label(), "AMBIGUOUS");
        assert_eq!(dict.lookup_key("R").label(), "FAILED");
    }

    #[test]
    fn empty_sequence() {
        assert_eq!(two_level().lookup_key(""), Lookup::Ambiguous);
        let single = StratagemDictionary::from_entries([("R", "Strike", "s.svg")]).unwrap();
        assert_eq!(single.lookup_key(""), Lookup::Ambiguous);
        assert_eq!(StratagemDictionary::default().lookup_key(""), Lookup::Failed);
    }

    #[test]
    fn lookup_class_uses_canonical_codes() {
        let dict = two_level();
        let seq = [Direction::Up, Direction::Down, Direction::Left];
        assert!(matches!(dict.lookup_class(&seq), Lookup::Matched(e) if e.code() == "UDL"));
    }

    #[test]
    fn sorted_neighbours_do_not_leak_into_candidates() {
        // "UDR" sorts between "UDL" and "UR" but does not extend "UDL".
        let dict = StratagemDictionary::from_entries([
            ("UDL", "A", "a"),
            ("UDR", "B", "b"),
            ("UR", "C", "c"),
        ])
        .unwrap();
        assert!(matches!(dict.lookup_key("UDL"), Lookup::Matched(e) if e.name() == "A"));
        assert_eq!(dict.lookup_key("UD"), Lookup::Ambiguous);
        assert!(matches!(dict.lookup_key("UR"), Lookup::Matched(e) if e.name() == "C"));
    }

    #[test]
    fn prefix_conflicts_are_reported() {
        let dict = two_level();
        let conflicts = dict.prefix_conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].0.code(), "UD");
        assert_eq!(conflicts[0].1.code(), "UDL");
    }

    #[test]
    fn prefix_free_dictionary_has_no_conflicts() {
        let dict = StratagemDictionary::from_entries([
            ("UDRLU", "Reinforce", "r.svg"),
            ("DDUR", "Resupply", "s.svg"),
            ("UDRU", "SOS Beacon", "b.svg"),
        ])
        .unwrap();
        assert!(dict.prefix_conflicts().is_empty());
    }

    #[test]
    fn glyph_keys_normalize() {
        let dict = StratagemDictionary::load(
            r#"{"⬆⬇⮕⬅⬆": {"name": "Reinforce", "icon": "reinforce.svg"}}"#,
        )
        .unwrap();
        assert!(dict.get("UDRLU").is_some());
    }

    #[test]
    fn emoji_selector_is_ignored() {
        let code = normalize_code("\u{27A1}\u{FE0F}\u{2B06}").unwrap();
        assert_eq!(code, "RU");
    }

    #[test]
    fn duplicate_after_normalization_is_rejected() {
        let err = StratagemDictionary::load(
            r#"{"UD": {"name": "A", "icon": "a"}, "⬆⬇": {"name": "B", "icon": "b"}}"#,
        )
        .unwrap_err();
        match err {
            DictionaryLoadError::DuplicateCode { code, first, second } => {
                assert_eq!(code, "UD");
                assert_eq!(first, "A");
                assert_eq!(second, "B");
            }
            other => panic!("expected duplicate, got {other}"),
        }
    }

    #[test]
    fn repeated_json_key_is_rejected() {
        let err = StratagemDictionary::load(
            r#"{"UD": {"name": "A", "icon": "a"}, "UD": {"name": "B", "icon": "b"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DictionaryLoadError::DuplicateCode { .. }));
    }

    #[test]
    fn missing_fields_name_the_code() {
        let err = StratagemDictionary::load(r#"{"UD": {"icon": "a"}}"#).unwrap_err();
        assert!(
            matches!(err, DictionaryLoadError::MissingField { ref code, field: "name" } if code == "UD")
        );

        let err = StratagemDictionary::load(r#"{"UD": {"name": "A"}}"#).unwrap_err();
        assert!(matches!(err, DictionaryLoadError::MissingField { field: "icon", .. }));
    }

    #[test]
    fn non_object_record_is_invalid() {
        let err = StratagemDictionary::load(r#"{"UD": "Reinforce"}"#).unwrap_err();
        assert!(matches!(err, DictionaryLoadError::InvalidRecord { ref code } if code == "UD"));

        let err = StratagemDictionary::load(r#"{"UD": {"name": 7, "icon": "a"}}"#).unwrap_err();
        assert!(matches!(err, DictionaryLoadError::InvalidRecord { .. }));
    }

    #[test]
    fn non_mapping_document_is_rejected() {
        let err = StratagemDictionary::load(r#"["UD", "UDL"]"#).unwrap_err();
        assert!(matches!(err, DictionaryLoadError::NotAMapping { found: "an array" }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = StratagemDictionary::load("{ not json").unwrap_err();
        assert!(matches!(err, DictionaryLoadError::Parse(_)));
    }

    #[test]
    fn bad_code_characters() {
        let err = StratagemDictionary::load(r#"{"UX": {"name": "A", "icon": "a"}}"#).unwrap_err();
        assert!(matches!(err, DictionaryLoadError::InvalidCode { character: 'X', .. }));

        let err = StratagemDictionary::load(r#"{"": {"name": "A", "icon": "a"}}"#).unwrap_err();
        assert!(matches!(err, DictionaryLoadError::EmptyCode));
    }

    #[test]
    fn extra_record_fields_are_ignored() {
        let dict = StratagemDictionary::load(
            r#"{"RRU": {"name": "Orbital Precision Strike", "icon": "ops.svg", "cooldown": 90}}"#,
        )
        .unwrap();
        assert_eq!(dict.len(), 1);
    }
}
