//! Shaping and filtering of the username -> files mapping served by
//! `GET /api/auth/files`.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::FileRecord;

pub type FileMapping = BTreeMap<String, Vec<FileRecord>>;

/// Builds a [`FileMapping`] out of whatever JSON the server returned.
///
/// Returns `None` when the top level is not an object at all; a group
/// whose value is not an array (or whose entries do not look like file
/// records) degrades to an empty group instead of failing the whole
/// response.
pub fn normalize(value: Value) -> Option<FileMapping> {
    let object = match value {
        Value::Object(map) => map,
        _ => return None,
    };

    let mut mapping = FileMapping::new();
    for (username, group) in object {
        let files = match group {
            Value::Array(entries) => entries
                .into_iter()
                .filter_map(|entry| serde_json::from_value::<FileRecord>(entry).ok())
                .collect(),
            _ => Vec::new(),
        };
        mapping.insert(username, files);
    }
    Some(mapping)
}

/// Case-insensitive substring filter over usernames. The file arrays of
/// matching groups are passed through unmodified; an empty query yields
/// the full mapping exactly as given.
pub fn filter(mapping: &FileMapping, query: &str) -> FileMapping {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return mapping.clone();
    }
    mapping
        .iter()
        .filter(|(username, _)| username.to_lowercase().contains(&query))
        .map(|(username, files)| (username.clone(), files.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn record(id: u64, name: &str) -> FileRecord {
        FileRecord {
            id,
            file_name: name.to_string(),
        }
    }

    #[test]
    fn normalize_builds_grouped_mapping() {
        let value = json!({
            "alice": [
                { "id": 1, "fileName": "essay.pdf" },
                { "id": 2, "fileName": "notes.txt" },
            ],
            "bob": [
                { "id": 3, "fileName": "resume.docx" },
            ],
        });

        let mapping = normalize(value).unwrap();
        assert_eq!(
            mapping["alice"],
            vec![record(1, "essay.pdf"), record(2, "notes.txt")]
        );
        assert_eq!(mapping["bob"], vec![record(3, "resume.docx")]);
    }

    #[test]
    fn normalize_tolerates_non_array_groups() {
        let value = json!({
            "alice": "not-an-array",
            "bob": { "id": 9 },
            "carol": null,
        });

        let mapping = normalize(value).unwrap();
        assert_eq!(mapping.len(), 3);
        assert!(mapping.values().all(|files| files.is_empty()));
    }

    #[test]
    fn normalize_skips_malformed_records() {
        let value = json!({
            "alice": [
                { "id": 1, "fileName": "good.pdf" },
                { "fileName": "missing-id.pdf" },
                42,
            ],
        });

        let mapping = normalize(value).unwrap();
        assert_eq!(mapping["alice"], vec![record(1, "good.pdf")]);
    }

    #[test]
    fn normalize_rejects_non_object_top_level() {
        assert_eq!(normalize(json!([1, 2, 3])), None);
        assert_eq!(normalize(json!("nope")), None);
        assert_eq!(normalize(json!(null)), None);
    }

    fn sample_mapping() -> FileMapping {
        let mut mapping = FileMapping::new();
        mapping.insert("Alice".into(), vec![record(1, "a.pdf")]);
        mapping.insert("alison".into(), vec![record(2, "b.pdf")]);
        mapping.insert("Bob".into(), vec![]);
        mapping
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let mapping = sample_mapping();
        let filtered = filter(&mapping, "ALI");
        assert_eq!(
            filtered.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["Alice", "alison"]
        );
        // matching groups keep their file arrays untouched
        assert_eq!(filtered["Alice"], mapping["Alice"]);
    }

    #[test]
    fn empty_filter_restores_full_mapping() {
        let mapping = sample_mapping();
        assert_eq!(filter(&mapping, ""), mapping);
        assert_eq!(filter(&mapping, "   "), mapping);
    }

    #[test]
    fn filter_with_no_match_is_empty() {
        let mapping = sample_mapping();
        assert!(filter(&mapping, "zebra").is_empty());
    }

    proptest! {
        #[test]
        fn filtered_keys_all_contain_query(
            usernames in proptest::collection::btree_set("[a-zA-Z]{1,8}", 0..8),
            query in "[a-zA-Z]{0,4}",
        ) {
            let mapping: FileMapping = usernames
                .into_iter()
                .map(|name| (name, Vec::new()))
                .collect();
            let filtered = filter(&mapping, &query);
            let needle = query.trim().to_lowercase();
            for key in filtered.keys() {
                prop_assert!(key.to_lowercase().contains(&needle));
                prop_assert!(mapping.contains_key(key));
            }
            // every skipped key genuinely does not match
            for key in mapping.keys() {
                if !filtered.contains_key(key) {
                    prop_assert!(!key.to_lowercase().contains(&needle) || needle.is_empty());
                }
            }
        }
    }
}
