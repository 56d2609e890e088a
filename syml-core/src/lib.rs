//! SYML Core Parser
//!
//! In-memory parser for a restricted, indentation-sensitive YAML subset,
//! plus a read-only query API over the resulting tree.
//!
//! # Architecture
//!
//! - **classify.rs** - Byte classifiers used while scanning
//! - **span.rs** - Zero-copy `(offset, length)` text spans
//! - **slab.rs** - Bump-allocated slabs for numeric leaves
//! - **scalar.rs** - Number vs String typing of scalar tokens
//! - **parser.rs** - Single-pass recursive-descent tree builder
//! - **tree.rs** - Document, node storage and navigation handles
//! - **dispatch.rs** - Per-kind operation table behind the query API
//! - **options.rs** - Parse configuration
//! - **error.rs** - Structural, lookup and type errors
//!
//! # Example
//!
//! ```
//! use syml_core::Document;
//!
//! let doc = Document::parse("version: 8\nnums: [1,2,3]\n").unwrap();
//! let root = doc.root();
//!
//! assert_eq!(root.key("version").unwrap().number().unwrap(), 8.0);
//! assert_eq!(root.key("nums").unwrap().index(2).unwrap().number().unwrap(), 3.0);
//! ```

pub mod classify;
mod dispatch;
pub mod error;
pub mod options;
mod parser;
pub mod scalar;
pub mod slab;
pub mod span;
pub mod tree;

pub use error::{Error, LookupError, Op, Result, StructuralErrorCode};
pub use options::ParseOptions;
pub use scalar::Scalar;
pub use slab::{Slab, SlabIndex};
pub use span::Span;
pub use tree::{Document, DocumentStats, Node, NodeId, NodeKind};
