//! Shared helpers for SYML integration tests.
//!
//! Converts a parsed document into an owned, comparable [`Tree`] so tests
//! can assert whole structures with `pretty_assertions`.

#![allow(dead_code)]

use std::collections::BTreeMap;

use syml_core::{Document, Error, Node, NodeKind};

/// Owned snapshot of a node, independent of the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    Map(BTreeMap<String, Tree>),
    List(Vec<Tree>),
    Num(f64),
    Str(String),
}

/// Snapshot a node and everything below it.
pub fn snapshot(node: Node<'_>) -> Tree {
    match node.kind() {
        NodeKind::Map => Tree::Map(
            node.entries()
                .map(|(k, v)| (String::from_utf8_lossy(k).into_owned(), snapshot(v)))
                .collect(),
        ),
        NodeKind::List => Tree::List(node.items().map(snapshot).collect()),
        NodeKind::Number => Tree::Num(node.number().unwrap()),
        NodeKind::String => Tree::Str(node.text().unwrap()),
    }
}

/// Parse and snapshot, panicking on parse errors.
pub fn parse_tree(input: &str) -> Tree {
    let doc = Document::parse(input).unwrap_or_else(|e| panic!("parse failed: {e}\n{input}"));
    snapshot(doc.root())
}

/// Parse input that must fail, returning the error.
pub fn parse_err(input: &str) -> Error {
    match Document::parse(input) {
        Ok(doc) => panic!("expected error, got {:?}", doc.root()),
        Err(e) => e,
    }
}

pub fn num(v: f64) -> Tree {
    Tree::Num(v)
}

pub fn s(v: &str) -> Tree {
    Tree::Str(v.to_owned())
}

pub fn list<const N: usize>(items: [Tree; N]) -> Tree {
    Tree::List(items.into())
}

pub fn map<const N: usize>(entries: [(&str, Tree); N]) -> Tree {
    Tree::Map(entries.into_iter().map(|(k, v)| (k.to_owned(), v)).collect())
}

pub fn nums<const N: usize>(values: [f64; N]) -> Tree {
    Tree::List(values.into_iter().map(Tree::Num).collect())
}
