//! Property-based tests for the SYML parser
//!
//! These tests verify structural invariants that must hold for ANY input,
//! not just carefully crafted examples. proptest will generate thousands
//! of random inputs and shrink failures to minimal cases.

mod common;

use std::collections::HashMap;

use proptest::prelude::*;
use syml_core::{Document, Error, NodeKind};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        max_shrink_iters: 200,
        ..ProptestConfig::default()
    }
}

// =============================================================================
// Property: Parser Never Panics
// =============================================================================

proptest! {
    #![proptest_config(config())]

    /// Any byte sequence either parses or yields an error.
    #[test]
    fn parser_never_panics(input in prop::collection::vec(any::<u8>(), 0..1000)) {
        let _ = Document::parse(&input);
    }

    /// ASCII input built from the grammar's own punctuation.
    #[test]
    fn parser_never_panics_grammar_chars(input in "[a-z0-9 :,\\[\\]\\n#&.-]{0,400}") {
        if let Ok(doc) = Document::parse(&input) {
            // Every string span must lie inside the buffer
            let _ = format!("{:?}", doc.root());
        }
    }

    /// Parse errors always point inside the input.
    #[test]
    fn error_offsets_in_bounds(input in "[a-z0-9 :,\\[\\]\\n-]{0,200}") {
        if let Err(Error::Structural { offset, line, column, .. }) = Document::parse(&input) {
            prop_assert!(offset <= input.len());
            prop_assert!(line >= 1);
            prop_assert!(column >= 1);
        }
    }
}

// =============================================================================
// Property: Determinism
// =============================================================================

proptest! {
    #![proptest_config(config())]

    #[test]
    fn same_input_same_tree(input in "[a-z0-9 :,\\[\\]\\n-]{0,300}") {
        match (Document::parse(&input), Document::parse(&input)) {
            // Debug output is ordered and prints NaN consistently
            (Ok(a), Ok(b)) => prop_assert_eq!(format!("{:?}", a.root()), format!("{:?}", b.root())),
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "parse outcome differs"),
        }
    }
}

// =============================================================================
// Property: Scalars
// =============================================================================

proptest! {
    #![proptest_config(config())]

    /// Every finite float written in its shortest form reads back exactly.
    #[test]
    fn floats_round_trip(v in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        let doc = Document::parse(format!("v: {v}\n")).unwrap();
        prop_assert_eq!(doc.root().key("v").unwrap().number().unwrap(), v);
    }

    /// Identifier-like tokens are always strings, copied verbatim.
    #[test]
    fn words_are_strings(word in "[a-zA-Z_][a-zA-Z0-9_.-]{0,12}") {
        let doc = Document::parse(format!("w: {word}\n")).unwrap();
        let node = doc.root().key("w").unwrap();
        prop_assert_eq!(node.kind(), NodeKind::String);
        prop_assert_eq!(node.text().unwrap(), word);
    }

    /// A number followed by a letter is never a number.
    #[test]
    fn number_with_suffix_is_string(n in 0u32..100_000, suffix in "[g-z]{1,3}") {
        let token = format!("{n}{suffix}");
        let doc = Document::parse(&token).unwrap();
        prop_assert_eq!(doc.root().text().unwrap(), token);
    }
}

// =============================================================================
// Property: Structure
// =============================================================================

proptest! {
    #![proptest_config(config())]

    #[test]
    fn inline_lists_keep_order(values in prop::collection::vec(-1000i32..1000, 0..40)) {
        let body: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let doc = Document::parse(format!("[{}]", body.join(", "))).unwrap();
        let root = doc.root();

        prop_assert_eq!(root.len().unwrap(), values.len());
        for (i, v) in values.iter().enumerate() {
            prop_assert_eq!(root.index(i).unwrap().number().unwrap(), f64::from(*v));
        }
    }

    #[test]
    fn block_lists_at_any_indent(
        indent in 0usize..8,
        values in prop::collection::vec(-1000i32..1000, 1..20),
    ) {
        let pad = " ".repeat(indent);
        let mut input = String::from("items:\n");
        for v in &values {
            input.push_str(&format!("{pad}- {v}\n"));
        }
        input.push_str("after: 1\n");

        let doc = Document::parse(&input).unwrap();
        let items = doc.root().key("items").unwrap();
        prop_assert_eq!(items.len().unwrap(), values.len());
        prop_assert_eq!(doc.root().key("after").unwrap().number().unwrap(), 1.0);
    }

    /// Repeated keys collapse to one entry holding the last value.
    #[test]
    fn last_write_wins(entries in prop::collection::vec(("[a-z]{1,3}", 0i32..100), 1..30)) {
        let mut input = String::new();
        let mut expected = HashMap::new();
        for (key, value) in &entries {
            input.push_str(&format!("{key}: {value}\n"));
            expected.insert(key.clone(), *value);
        }

        let doc = Document::parse(&input).unwrap();
        let root = doc.root();
        prop_assert_eq!(root.len().unwrap(), expected.len());
        for (key, value) in &expected {
            prop_assert_eq!(root.key(key).unwrap().number().unwrap(), f64::from(*value));
        }
    }
}
