//! Single-pass recursive-descent parser.
//!
//! Builds the tree directly from the input buffer: there is no token
//! stream and no intermediate event layer. Nested block structure is
//! delimited by indentation columns, measured as the byte offset of a
//! token from the start of its line.
//!
//! # Grammar
//!
//! ```text
//! value       = [anchor] (block-list | inline-list | map | scalar)
//! anchor      = '&' non-ws*                       ; discarded
//! block-list  = ('-' ws value)+                   ; all '-' in one column
//! inline-list = '[' [value (',' value)* [',']] ']'
//! map         = key ':' value (key ':' value)*    ; all keys in one column
//! scalar      = token                             ; Number or String
//! comment     = '#' to end of line                ; wherever ws may appear
//! ```

use memchr::memchr;

use crate::classify::{ends_key, ends_token, is_whitespace};
use crate::error::{Error, Result, StructuralErrorCode};
use crate::options::ParseOptions;
use crate::scalar::Scalar;
use crate::span::Span;
use crate::tree::{NodeId, TreeBuilder};

/// Parser state over one input buffer.
pub(crate) struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    /// Offset of the first byte of the current line
    line_start: usize,
    max_depth: usize,
    builder: TreeBuilder,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a [u8], options: &ParseOptions) -> Self {
        Parser {
            input,
            pos: 0,
            line_start: 0,
            max_depth: options.max_depth,
            builder: TreeBuilder::new(options),
        }
    }

    /// Parse exactly one top-level value and require that nothing but
    /// whitespace and comments follows it.
    pub(crate) fn parse(mut self) -> Result<(TreeBuilder, NodeId)> {
        let root = self.parse_value(0)?;
        self.skip_ws();
        if self.pos < self.input.len() {
            return Err(self.error(StructuralErrorCode::TrailingInput));
        }
        Ok((self.builder, root))
    }

    // ------------------------------------------------------------------------
    // Scanning
    // ------------------------------------------------------------------------

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Indentation column of the current position.
    #[inline]
    fn column(&self) -> usize {
        self.pos - self.line_start
    }

    fn error(&self, code: StructuralErrorCode) -> Error {
        Error::structural(code, self.input, self.pos)
    }

    /// Skip whitespace and comments, tracking line starts.
    fn skip_ws(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'\n' {
                self.pos += 1;
                self.line_start = self.pos;
            } else if is_whitespace(b) {
                self.pos += 1;
            } else if b == b'#' {
                // stop on the newline so the branch above records the line start
                self.pos = match memchr(b'\n', &self.input[self.pos..]) {
                    Some(offset) => self.pos + offset,
                    None => self.input.len(),
                };
            } else {
                break;
            }
        }
    }

    /// Advance until `ends` matches or input runs out.
    fn scan(&mut self, ends: fn(u8) -> bool) -> Span {
        let start = self.pos;
        let rest = &self.input[start..];
        let len = rest.iter().position(|&b| ends(b)).unwrap_or(rest.len());
        self.pos = start + len;
        Span::new(start, self.pos)
    }

    /// A `-` followed by whitespace. A lone trailing `-` is not a marker.
    fn at_list_marker(&self) -> bool {
        self.peek() == Some(b'-')
            && self.input.get(self.pos + 1).is_some_and(|&b| is_whitespace(b))
    }

    // ------------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------------

    fn parse_value(&mut self, depth: usize) -> Result<NodeId> {
        if depth > self.max_depth {
            return Err(self.error(StructuralErrorCode::TooDeep));
        }

        self.skip_ws();
        if self.peek() == Some(b'&') {
            self.scan(is_whitespace);
            self.skip_ws();
        }

        if self.at_list_marker() {
            return self.parse_block_list(depth);
        }
        if self.peek() == Some(b'[') {
            return self.parse_inline_list(depth);
        }

        let column = self.column();
        let token = self.scan(ends_token);
        if token.is_empty() {
            return Err(self.error(StructuralErrorCode::ExpectedValue));
        }

        self.skip_ws();
        if self.peek() == Some(b':') {
            return self.parse_map(token, column, depth);
        }
        Ok(self.scalar(token))
    }

    fn parse_block_list(&mut self, depth: usize) -> Result<NodeId> {
        let indent = self.column();
        let mut items = Vec::new();
        while self.at_list_marker() && self.column() == indent {
            self.pos += 1; // '-'
            items.push(self.parse_value(depth + 1)?);
            self.skip_ws();
        }
        Ok(self.builder.push_list(items))
    }

    fn parse_inline_list(&mut self, depth: usize) -> Result<NodeId> {
        let mut items = Vec::new();
        loop {
            self.pos += 1; // '[' or ','
            self.skip_ws();
            match self.peek() {
                Some(b']') => break,
                None => return Err(self.error(StructuralErrorCode::UnclosedList)),
                Some(_) => {}
            }
            items.push(self.parse_value(depth + 1)?);
            self.skip_ws();
            if self.peek() != Some(b',') {
                break;
            }
        }
        if self.peek() != Some(b']') {
            return Err(self.error(StructuralErrorCode::UnclosedList));
        }
        self.pos += 1;
        Ok(self.builder.push_list(items))
    }

    /// Parse a block map whose first key has already been scanned and whose
    /// `:` is at the current position.
    fn parse_map(&mut self, first_key: Span, indent: usize, depth: usize) -> Result<NodeId> {
        let mut map = self.builder.new_map();

        self.pos += 1; // ':'
        let value = self.parse_value(depth + 1)?;
        self.builder.insert(&mut map, self.input, first_key, value);

        loop {
            self.skip_ws();
            if self.column() != indent {
                break;
            }
            // Later keys may contain ',' and ']'
            let key = self.scan(ends_key);
            if key.is_empty() {
                break;
            }
            self.skip_ws();
            if self.peek() != Some(b':') {
                return Err(self.error(StructuralErrorCode::MissingColon));
            }
            self.pos += 1;
            let value = self.parse_value(depth + 1)?;
            self.builder.insert(&mut map, self.input, key, value);
        }

        Ok(self.builder.push_map(map))
    }

    fn scalar(&mut self, token: Span) -> NodeId {
        match Scalar::classify(token.resolve(self.input)) {
            Scalar::Number(value) => self.builder.push_number(value),
            Scalar::String(_) => self.builder.push_string(token),
        }
    }
}
