//! Property-based tests for the workspace store
//!
//! Generates JSON documents and sanitizable names, then checks that what is
//! written is what comes back and that listings only ever show documents.

use flowspace::backend::WorkspaceStore;
use flowspace::shared::METADATA_FILE_NAME;
use proptest::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Names that survive sanitization unchanged
fn document_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]([A-Za-z0-9_-]{0,14}[A-Za-z0-9])?"
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        (-1.0e9f64..1.0e9).prop_map(Value::from),
        // Integers beyond 64 bits
        "-?[1-9][0-9]{20,30}".prop_map(|digits| serde_json::from_str(&digits).unwrap()),
        "[a-zA-Z0-9 _\"\\\\/-]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_create_then_read_returns_written_document(
        name in document_name(),
        content in json_value(),
    ) {
        let dir = TempDir::new().unwrap();
        let store = WorkspaceStore::new(dir.path());
        let text = content.to_string();

        let stored = store.create_document("guest", &name, text.as_bytes()).unwrap();
        prop_assert_eq!(&stored, &format!("{}.flow.json", name));

        let read = store.read_document("guest", &name).unwrap();
        prop_assert_eq!(read.to_string(), text);
        prop_assert_eq!(read, content);
    }

    #[test]
    fn test_listing_shows_exactly_the_created_documents(
        names in prop::collection::btree_set(document_name(), 0..8),
    ) {
        let dir = TempDir::new().unwrap();
        let store = WorkspaceStore::new(dir.path());
        for name in &names {
            store.create_document("guest", name, b"{}").unwrap();
        }

        let listed: Vec<String> = store
            .list_documents("guest")
            .unwrap()
            .into_iter()
            .map(|summary| summary.name)
            .collect();
        let expected: Vec<String> = names.iter().cloned().collect();
        prop_assert_eq!(&listed, &expected);

        let sidecar = dir.path().join("guest").join(METADATA_FILE_NAME);
        prop_assert_eq!(sidecar.is_file(), !names.is_empty());
        prop_assert!(!listed.iter().any(|name| name.as_str() == METADATA_FILE_NAME));
    }
}
