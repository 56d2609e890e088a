//! Query operations on [`Node`] handles.
//!
//! Every operation is looked up in [`DISPATCH`], a fixed table with one row
//! per [`NodeKind`] and one column per operation. An empty cell means the
//! operation is not defined for that variant; calling it yields
//! [`Error::Type`]. Nodes carry no vtable: the kind tag in the [`NodeId`]
//! selects the row.
//!
//! ```
//! use syml_core::Document;
//!
//! let doc = Document::parse("objects:\n  - id: a\n    size: 3\n  - id: b\n    size: 5\n").unwrap();
//! let objects = doc.root().key("objects").unwrap();
//!
//! assert_eq!(objects.len().unwrap(), 2);
//! assert_eq!(objects.of_id("b").unwrap().key("size").unwrap().number().unwrap(), 5.0);
//! assert!(objects.try_of_id("c").unwrap().is_none());
//! assert!(objects.number().is_err());
//! ```

use crate::error::{Error, LookupError, Op, Result};
use crate::tree::{Node, NodeKind};

type IndexFn = for<'d> fn(Node<'d>, usize) -> Result<Node<'d>>;
type KeyFn = for<'d> fn(Node<'d>, &[u8]) -> Result<Node<'d>>;
type LenFn = fn(Node<'_>) -> usize;
type TextFn = fn(Node<'_>) -> String;
type NumberFn = fn(Node<'_>) -> f64;
type FindFn = for<'d> fn(Node<'d>, &[u8], &[u8]) -> Option<Node<'d>>;

/// One row of the dispatch table.
struct OpRow {
    index: Option<IndexFn>,
    key: Option<KeyFn>,
    len: Option<LenFn>,
    text: Option<TextFn>,
    number: Option<NumberFn>,
    find: Option<FindFn>,
}

const EMPTY: OpRow = OpRow {
    index: None,
    key: None,
    len: None,
    text: None,
    number: None,
    find: None,
};

/// Operation table, indexed by `NodeKind as usize`.
static DISPATCH: [OpRow; NodeKind::COUNT] = [
    // NodeKind::Map
    OpRow {
        key: Some(map_key),
        len: Some(map_len),
        ..EMPTY
    },
    // NodeKind::List
    OpRow {
        index: Some(list_index),
        len: Some(list_len),
        find: Some(list_find),
        ..EMPTY
    },
    // NodeKind::Number
    OpRow {
        number: Some(number_value),
        ..EMPTY
    },
    // NodeKind::String
    OpRow {
        text: Some(string_text),
        ..EMPTY
    },
];

// ============================================================================
// Table cells
// ============================================================================

fn map_key<'d>(node: Node<'d>, key: &[u8]) -> Result<Node<'d>> {
    node.get_bytes(key).ok_or_else(|| {
        LookupError::MissingKey {
            key: String::from_utf8_lossy(key).into_owned(),
        }
        .into()
    })
}

fn map_len(node: Node<'_>) -> usize {
    node.map_entries().map_or(0, |entries| entries.len())
}

fn list_index<'d>(node: Node<'d>, index: usize) -> Result<Node<'d>> {
    let len = node.list_items().len();
    node.get_index(index)
        .ok_or_else(|| LookupError::IndexOutOfRange { index, len }.into())
}

fn list_len(node: Node<'_>) -> usize {
    node.list_items().len()
}

fn list_find<'d>(node: Node<'d>, field: &[u8], value: &[u8]) -> Option<Node<'d>> {
    node.items().find(|item| {
        item.get_bytes(field).and_then(|f| f.as_bytes()) == Some(value)
    })
}

fn number_value(node: Node<'_>) -> f64 {
    node.as_f64().unwrap_or(f64::NAN)
}

fn string_text(node: Node<'_>) -> String {
    String::from_utf8_lossy(node.as_bytes().unwrap_or_default()).into_owned()
}

// ============================================================================
// Public operations
// ============================================================================

impl<'doc> Node<'doc> {
    fn row(&self) -> &'static OpRow {
        &DISPATCH[self.kind() as usize]
    }

    fn unsupported(&self, op: Op) -> Error {
        Error::Type { op, kind: self.kind() }
    }

    /// List item at `index`.
    pub fn index(&self, index: usize) -> Result<Node<'doc>> {
        let op = self.row().index.ok_or_else(|| self.unsupported(Op::Index))?;
        op(*self, index)
    }

    /// Map value under `key`.
    pub fn key(&self, key: &str) -> Result<Node<'doc>> {
        self.key_bytes(key.as_bytes())
    }

    /// Map value under a raw byte key.
    pub fn key_bytes(&self, key: &[u8]) -> Result<Node<'doc>> {
        let op = self.row().key.ok_or_else(|| self.unsupported(Op::Key))?;
        op(*self, key)
    }

    /// Number of entries of a map or items of a list.
    pub fn len(&self) -> Result<usize> {
        let op = self.row().len.ok_or_else(|| self.unsupported(Op::Len))?;
        Ok(op(*self))
    }

    /// Whether a map or list has no children.
    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    /// Owned copy of a string node's text. Invalid UTF-8 is replaced.
    pub fn text(&self) -> Result<String> {
        let op = self.row().text.ok_or_else(|| self.unsupported(Op::Text))?;
        Ok(op(*self))
    }

    /// Value of a number node.
    pub fn number(&self) -> Result<f64> {
        let op = self.row().number.ok_or_else(|| self.unsupported(Op::Number))?;
        Ok(op(*self))
    }

    /// First map element of a list whose `field` is a string equal to
    /// `value`. Fails with [`LookupError::NoMatch`] when nothing matches.
    pub fn find(&self, field: &str, value: &str) -> Result<Node<'doc>> {
        self.try_find(field, value)?.ok_or_else(|| {
            LookupError::NoMatch {
                field: field.to_owned(),
                value: value.to_owned(),
            }
            .into()
        })
    }

    /// Like [`Node::find`], but `Ok(None)` when nothing matches.
    ///
    /// Elements that are not maps, lack `field`, or hold a non-string
    /// there are skipped.
    pub fn try_find(&self, field: &str, value: &str) -> Result<Option<Node<'doc>>> {
        let op = self.row().find.ok_or_else(|| self.unsupported(Op::Find))?;
        Ok(op(*self, field.as_bytes(), value.as_bytes()))
    }

    /// [`Node::find`] on the `id` field.
    pub fn of_id(&self, id: &str) -> Result<Node<'doc>> {
        self.find("id", id)
    }

    /// [`Node::try_find`] on the `id` field.
    pub fn try_of_id(&self, id: &str) -> Result<Option<Node<'doc>>> {
        self.try_find("id", id)
    }

    /// Read an `N`x`N` list of number lists into a row-major array.
    pub fn matrix<const N: usize>(&self) -> Result<[[f64; N]; N]> {
        check_len(N, self.len()?)?;
        let mut out = [[0.0; N]; N];
        for (i, out_row) in out.iter_mut().enumerate() {
            let line = self.index(i)?;
            check_len(N, line.len()?)?;
            for (j, cell) in out_row.iter_mut().enumerate() {
                *cell = line.index(j)?.number()?;
            }
        }
        Ok(out)
    }
}

fn check_len(expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(LookupError::LengthMismatch { expected, found }.into())
    }
}
