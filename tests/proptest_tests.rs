// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests verify that the resolution primitives hold their invariants
//! for arbitrary inputs: filter decisions, the sidecar properties codec,
//! filesystem round trips and chain ordering.

use cfgchain::domain::{properties, KeyFilter, SetStatus};
use cfgchain::prelude::*;
use proptest::prelude::*;
use std::sync::Arc;

proptest! {
    #[test]
    fn test_empty_filter_accepts_any_key(key in "\\PC*") {
        let filter = KeyFilter::new();
        prop_assert!(filter.is_valid(&key));
    }
}

proptest! {
    #[test]
    fn test_include_prefix_pattern_decides_by_prefix(key in "[a-z]{0,12}") {
        let filter = KeyFilter::new().include("a.*").unwrap();
        prop_assert_eq!(filter.is_valid(&key), key.starts_with('a'));
    }
}

proptest! {
    #[test]
    fn test_exclude_always_beats_include(key in "[a-z]{1,12}") {
        let filter = KeyFilter::new()
            .include(".*")
            .unwrap()
            .exclude(&regex::escape(&key))
            .unwrap();
        prop_assert!(!filter.is_valid(&key));
    }
}

proptest! {
    #[test]
    fn test_properties_codec_round_trip(
        table in prop::collection::btree_map("[A-Za-z][A-Za-z0-9/.-]{0,12}", "[A-Za-z0-9/:.,_-]{0,20}", 0..8)
    ) {
        let bytes = properties::to_bytes(table.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        let parsed = properties::parse(&bytes).unwrap();
        prop_assert_eq!(parsed.len(), table.len());
        for (key, value) in &table {
            prop_assert_eq!(parsed.get(key.as_str()), Some(value));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_fs_content_round_trip(
        key in "[a-z]{1,8}(/[a-z]{1,8}){0,2}",
        content in prop::collection::vec(any::<u8>(), 0..512)
    ) {
        let dir = tempfile::TempDir::new().unwrap();
        let resolver = FsContentResolver::new(dir.path()).unwrap();

        let status = resolver.set_content(&key, &content).unwrap();
        prop_assert_eq!(status, SetStatus::Success);
        prop_assert_eq!(resolver.get_content(&key), Some(content));
    }
}

proptest! {
    #[test]
    fn test_union_returns_first_member_value(
        first in "[a-z]{1,10}",
        second in "[a-z]{1,10}"
    ) {
        let settings = Settings::new("root");
        let mut head = std::collections::HashMap::new();
        head.insert("k".to_string(), first.clone());
        let mut tail = std::collections::HashMap::new();
        tail.insert("k".to_string(), second);
        settings
            .add_connector(Arc::new(PropertiesConnector::new("head").with_table(head)))
            .unwrap();
        settings
            .add_connector(Arc::new(PropertiesConnector::new("tail").with_table(tail)))
            .unwrap();

        prop_assert_eq!(settings.get_string("k"), Some(first));
    }
}
