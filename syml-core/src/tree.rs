//! Tree representation for SYML documents.
//!
//! A [`Document`] owns the source buffer and every node parsed from it.
//! Nodes live in per-kind arenas and refer to each other by [`NodeId`], so
//! the tree has no pointers, no parent links and no shared subtrees.
//! Numbers go to a bump-allocated [`Slab`]; strings are bare [`Span`]s into
//! the retained buffer and are never copied during parsing.
//!
//! # Example
//!
//! ```
//! use syml_core::Document;
//!
//! let doc = Document::parse("version: 8\nnums: [1, 2, 3]\n").unwrap();
//! let root = doc.root();
//!
//! assert_eq!(root.key("version").unwrap().number().unwrap(), 8.0);
//! for item in root.key("nums").unwrap().items() {
//!     println!("{}", item.number().unwrap());
//! }
//! ```

use std::fmt;
use std::hash::BuildHasher;

use hashbrown::hash_table::{Entry, HashTable};
use hashbrown::DefaultHashBuilder;

use crate::error::{Error, Result, StructuralErrorCode};
use crate::options::ParseOptions;
use crate::parser::Parser;
use crate::slab::{Slab, SlabIndex};
use crate::span::Span;

// ============================================================================
// Core Types
// ============================================================================

/// The variant of a node. Also the row selector of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NodeKind {
    Map = 0,
    List = 1,
    Number = 2,
    String = 3,
}

impl NodeKind {
    /// Number of node variants.
    pub const COUNT: usize = 4;

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Map => "map",
            NodeKind::List => "list",
            NodeKind::Number => "number",
            NodeKind::String => "string",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a node: its kind tag plus an index into that kind's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    kind: NodeKind,
    index: u32,
}

impl NodeId {
    fn new(kind: NodeKind, index: usize) -> Self {
        NodeId { kind, index: index as u32 }
    }

    /// The node's variant.
    #[inline]
    pub fn kind(self) -> NodeKind {
        self.kind
    }

    #[inline]
    fn index(self) -> usize {
        self.index as usize
    }
}

/// Map storage: entries hashed by key content.
#[derive(Debug)]
pub(crate) struct MapData {
    entries: HashTable<(Span, NodeId)>,
}

/// List storage: children in document order.
#[derive(Debug)]
pub(crate) struct ListData {
    items: Vec<NodeId>,
}

/// Node counts for a parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentStats {
    pub maps: usize,
    pub lists: usize,
    pub numbers: usize,
    pub strings: usize,
    /// Slab blocks reserved for numbers.
    pub number_blocks: usize,
}

// ============================================================================
// Document
// ============================================================================

/// A parsed SYML document.
///
/// Owns the source buffer and all node storage; everything is released
/// together when the document is dropped. A document is never modified
/// after parsing, so it can be shared freely between reader threads.
pub struct Document {
    source: Box<[u8]>,
    numbers: Slab<f64>,
    strings: Vec<Span>,
    lists: Vec<ListData>,
    maps: Vec<MapData>,
    hasher: DefaultHashBuilder,
    root: NodeId,
}

impl Document {
    /// Parse input bytes into a document tree.
    ///
    /// The input is copied once into the document; use [`Document::from_vec`]
    /// to hand over an owned buffer instead.
    pub fn parse(input: impl AsRef<[u8]>) -> Result<Self> {
        Self::parse_with(input, &ParseOptions::default())
    }

    /// Parse with explicit options.
    pub fn parse_with(input: impl AsRef<[u8]>, options: &ParseOptions) -> Result<Self> {
        Self::from_vec_with(input.as_ref().to_vec(), options)
    }

    /// Parse an owned buffer, keeping it as the document's source.
    pub fn from_vec(input: Vec<u8>) -> Result<Self> {
        Self::from_vec_with(input, &ParseOptions::default())
    }

    /// Parse an owned buffer with explicit options.
    pub fn from_vec_with(input: Vec<u8>, options: &ParseOptions) -> Result<Self> {
        let source = input.into_boxed_slice();
        if u32::try_from(source.len()).is_err() {
            return Err(Error::structural(StructuralErrorCode::InputTooLarge, &[], 0));
        }

        let (builder, root) = Parser::new(&source, options).parse()?;
        let doc = builder.finish(source, root);

        let stats = doc.stats();
        log::debug!(
            "parsed {} bytes: {} maps, {} lists, {} numbers in {} blocks, {} strings",
            doc.source.len(),
            stats.maps,
            stats.lists,
            stats.numbers,
            stats.number_blocks,
            stats.strings
        );
        Ok(doc)
    }

    /// Get the root node.
    pub fn root(&self) -> Node<'_> {
        Node { doc: self, id: self.root }
    }

    /// Get a node by ID, if it belongs to this document.
    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        let len = match id.kind {
            NodeKind::Map => self.maps.len(),
            NodeKind::List => self.lists.len(),
            NodeKind::Number => self.numbers.len(),
            NodeKind::String => self.strings.len(),
        };
        (id.index() < len).then_some(Node { doc: self, id })
    }

    /// The retained source buffer.
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    pub fn stats(&self) -> DocumentStats {
        DocumentStats {
            maps: self.maps.len(),
            lists: self.lists.len(),
            numbers: self.numbers.len(),
            strings: self.strings.len(),
            number_blocks: self.numbers.blocks(),
        }
    }

    fn map_data(&self, id: NodeId) -> &MapData {
        &self.maps[id.index()]
    }

    fn list_data(&self, id: NodeId) -> &ListData {
        &self.lists[id.index()]
    }

    fn lookup(&self, map: &MapData, key: &[u8]) -> Option<NodeId> {
        let hash = self.hasher.hash_one(key);
        map.entries
            .find(hash, |(k, _)| k.matches(&self.source, key))
            .map(|&(_, value)| value)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.source.len())
            .field("stats", &self.stats())
            .field("root", &self.root())
            .finish()
    }
}

// ============================================================================
// Node (navigation handle)
// ============================================================================

/// A handle for navigating the document tree.
///
/// Pairs a [`NodeId`] with the document that owns it. The borrow ties every
/// handle to the document's lifetime, so a handle can never outlive the
/// buffer its strings point into.
#[derive(Clone, Copy)]
pub struct Node<'doc> {
    pub(crate) doc: &'doc Document,
    pub(crate) id: NodeId,
}

impl<'doc> Node<'doc> {
    /// Get the node's ID.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the node's kind.
    pub fn kind(&self) -> NodeKind {
        self.id.kind
    }

    /// The document this node belongs to.
    pub fn document(&self) -> &'doc Document {
        self.doc
    }

    pub fn is_map(&self) -> bool {
        self.kind() == NodeKind::Map
    }

    pub fn is_list(&self) -> bool {
        self.kind() == NodeKind::List
    }

    pub fn is_number(&self) -> bool {
        self.kind() == NodeKind::Number
    }

    pub fn is_string(&self) -> bool {
        self.kind() == NodeKind::String
    }

    fn wrap(&self, id: NodeId) -> Node<'doc> {
        Node { doc: self.doc, id }
    }

    /// Look up a map entry. `None` for missing keys and non-map nodes.
    pub fn get(&self, key: &str) -> Option<Node<'doc>> {
        self.get_bytes(key.as_bytes())
    }

    /// Look up a map entry by raw key bytes.
    pub fn get_bytes(&self, key: &[u8]) -> Option<Node<'doc>> {
        if !self.is_map() {
            return None;
        }
        let doc = self.doc;
        doc.lookup(doc.map_data(self.id), key).map(|id| self.wrap(id))
    }

    /// Get a list item. `None` when out of range or not a list.
    pub fn get_index(&self, index: usize) -> Option<Node<'doc>> {
        self.list_items().get(index).map(|&id| self.wrap(id))
    }

    /// Iterate over list items in document order. Empty for non-lists.
    pub fn items(&self) -> impl Iterator<Item = Node<'doc>> + 'doc {
        let doc = self.doc;
        self.list_items().iter().map(move |&id| Node { doc, id })
    }

    /// Iterate over map entries as `(key bytes, value)`.
    ///
    /// The order is unspecified. Empty for non-maps.
    pub fn entries(&self) -> impl Iterator<Item = (&'doc [u8], Node<'doc>)> + 'doc {
        let doc = self.doc;
        self.map_entries()
            .into_iter()
            .flat_map(|entries| entries.iter())
            .map(move |&(key, id)| (key.resolve(&doc.source), Node { doc, id }))
    }

    /// Bytes of a string node, borrowed from the source buffer.
    pub fn as_bytes(&self) -> Option<&'doc [u8]> {
        self.span().map(|span| span.resolve(&self.doc.source))
    }

    /// Text of a string node, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&'doc str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Value of a number node.
    pub fn as_f64(&self) -> Option<f64> {
        match self.kind() {
            NodeKind::Number => self.doc.numbers.get(SlabIndex::new(self.id.index())),
            _ => None,
        }
    }

    /// Source span of a string node.
    pub fn span(&self) -> Option<Span> {
        match self.kind() {
            NodeKind::String => self.doc.strings.get(self.id.index()).copied(),
            _ => None,
        }
    }

    pub(crate) fn list_items(&self) -> &'doc [NodeId] {
        match self.kind() {
            NodeKind::List => &self.doc.list_data(self.id).items,
            _ => &[],
        }
    }

    pub(crate) fn map_entries(&self) -> Option<&'doc HashTable<(Span, NodeId)>> {
        match self.kind() {
            NodeKind::Map => Some(&self.doc.map_data(self.id).entries),
            _ => None,
        }
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Map => {
                let source = &self.doc.source;
                let mut entries: Vec<(Span, NodeId)> =
                    self.map_entries().into_iter().flat_map(|t| t.iter()).copied().collect();
                // deterministic output: length-then-bytes key order
                entries.sort_by(|a, b| a.0.compare(&b.0, source));
                f.debug_map()
                    .entries(
                        entries
                            .iter()
                            .map(|&(k, id)| (String::from_utf8_lossy(k.resolve(source)), self.wrap(id))),
                    )
                    .finish()
            }
            NodeKind::List => f.debug_list().entries(self.items()).finish(),
            NodeKind::Number => fmt::Debug::fmt(&self.as_f64().unwrap_or(f64::NAN), f),
            NodeKind::String => {
                fmt::Debug::fmt(&String::from_utf8_lossy(self.as_bytes().unwrap_or_default()), f)
            }
        }
    }
}

// ============================================================================
// TreeBuilder (parser output)
// ============================================================================

/// Accumulates nodes while the parser runs.
pub(crate) struct TreeBuilder {
    numbers: Slab<f64>,
    strings: Vec<Span>,
    lists: Vec<ListData>,
    maps: Vec<MapData>,
    hasher: DefaultHashBuilder,
}

/// A map under construction.
pub(crate) struct MapBuilder {
    entries: HashTable<(Span, NodeId)>,
}

impl TreeBuilder {
    pub(crate) fn new(options: &ParseOptions) -> Self {
        TreeBuilder {
            numbers: Slab::new(options.number_slab_capacity),
            strings: Vec::new(),
            lists: Vec::new(),
            maps: Vec::new(),
            hasher: DefaultHashBuilder::default(),
        }
    }

    pub(crate) fn push_number(&mut self, value: f64) -> NodeId {
        let index = self.numbers.alloc(value);
        NodeId::new(NodeKind::Number, index.index())
    }

    pub(crate) fn push_string(&mut self, span: Span) -> NodeId {
        let id = NodeId::new(NodeKind::String, self.strings.len());
        self.strings.push(span);
        id
    }

    pub(crate) fn push_list(&mut self, items: Vec<NodeId>) -> NodeId {
        let id = NodeId::new(NodeKind::List, self.lists.len());
        self.lists.push(ListData { items });
        id
    }

    pub(crate) fn new_map(&self) -> MapBuilder {
        MapBuilder { entries: HashTable::new() }
    }

    /// Insert into a map under construction; a repeated key replaces the
    /// earlier entry.
    pub(crate) fn insert(&self, map: &mut MapBuilder, source: &[u8], key: Span, value: NodeId) {
        let bytes = key.resolve(source);
        let hasher = &self.hasher;
        let hash = hasher.hash_one(bytes);
        match map.entries.entry(
            hash,
            |(k, _)| k.matches(source, bytes),
            |(k, _)| hasher.hash_one(k.resolve(source)),
        ) {
            Entry::Occupied(mut entry) => *entry.get_mut() = (key, value),
            Entry::Vacant(entry) => {
                entry.insert((key, value));
            }
        }
    }

    pub(crate) fn push_map(&mut self, map: MapBuilder) -> NodeId {
        let id = NodeId::new(NodeKind::Map, self.maps.len());
        self.maps.push(MapData { entries: map.entries });
        id
    }

    pub(crate) fn finish(self, source: Box<[u8]>, root: NodeId) -> Document {
        Document {
            source,
            numbers: self.numbers,
            strings: self.strings,
            lists: self.lists,
            maps: self.maps,
            hasher: self.hasher,
            root,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
