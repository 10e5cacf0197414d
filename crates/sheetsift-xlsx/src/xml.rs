//! Minimal XML tokenizer and arena document
//!
//! Parses the subset of XML found in spreadsheet packages into an
//! [`XmlDocument`]: elements with ordered attributes, trimmed text and CDATA.
//! Comments, processing instructions and declarations such as DOCTYPE are
//! skipped. Namespaces are not resolved; prefixed names are kept as written
//! and queries without a prefix match on the local name.
//!
//! ```
//! use sheetsift_xlsx::xml::XmlDocument;
//!
//! let doc = XmlDocument::parse(r#"<a:theme><a:accent1 val="4472C4"/></a:theme>"#).unwrap();
//! let accent = doc.first_descendant(doc.root(), "accent1").unwrap();
//! assert_eq!(doc.attribute(accent, "val"), Some("4472C4"));
//! ```

use std::borrow::Cow;

use quick_xml::escape::unescape;

use crate::error::{XmlError, XmlResult};

/// Index of a node inside its [`XmlDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in the document arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The synthetic root owning the top-level nodes
    Document,
    /// An element with its attributes in source order
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    /// Decoded text or CDATA content
    Text(String),
}

/// A node in the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    /// Node payload
    pub kind: NodeKind,
    /// Owning node; `None` only for the document node
    pub parent: Option<NodeId>,
    /// Child nodes in document order
    pub children: Vec<NodeId>,
}

/// A parsed XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    nodes: Vec<XmlNode>,
}

const ROOT: NodeId = NodeId(0);

impl XmlDocument {
    /// Parse a document from raw bytes (UTF-8, optional BOM)
    pub fn parse_bytes(bytes: &[u8]) -> XmlResult<Self> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let text = std::str::from_utf8(bytes).map_err(|e| XmlError::InvalidEncoding {
            offset: e.valid_up_to(),
        })?;
        Self::parse(text)
    }

    /// Parse a document from text
    pub fn parse(text: &str) -> XmlResult<Self> {
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        Parser::new(text).run()
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// The first top-level element
    pub fn root_element(&self) -> Option<NodeId> {
        self.nodes[ROOT.0]
            .children
            .iter()
            .copied()
            .find(|&id| self.is_element(id))
    }

    /// Access a node
    pub fn node(&self, id: NodeId) -> &XmlNode {
        &self.nodes[id.0]
    }

    /// Number of nodes, including the document node
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document holds nothing besides the document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Tag name of an element node
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Tag name of an element node without its namespace prefix
    pub fn local_tag(&self, id: NodeId) -> Option<&str> {
        self.tag(id).map(local_name)
    }

    /// Check if a node is an element
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Element { .. })
    }

    /// Owning node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Attribute value by name
    ///
    /// An exact name match wins; otherwise a name without a prefix matches an
    /// attribute's local name (`id` finds `r:id`).
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let NodeKind::Element { attributes, .. } = &self.nodes[id.0].kind else {
            return None;
        };

        attributes
            .iter()
            .find(|(k, _)| k == name)
            .or_else(|| {
                if name.contains(':') {
                    None
                } else {
                    attributes.iter().find(|(k, _)| local_name(k) == name)
                }
            })
            .map(|(_, v)| v.as_str())
    }

    /// Element descendants of `id` (excluding `id`) whose tag matches, in
    /// depth-first pre-order
    pub fn descendants<'a>(&'a self, id: NodeId, tag: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.walk(id)
            .filter(move |&n| self.tag(n).is_some_and(|t| tag_matches(t, tag)))
    }

    /// First matching descendant
    pub fn first_descendant(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(id, tag).next()
    }

    /// First descendant element carrying `name="value"`
    pub fn find_by_attribute(&self, id: NodeId, name: &str, value: &str) -> Option<NodeId> {
        self.walk(id)
            .find(|&n| self.is_element(n) && self.attribute(n, name) == Some(value))
    }

    /// Direct child elements whose tag matches
    pub fn child_elements<'a>(&'a self, id: NodeId, tag: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .filter(move |&n| self.tag(n).is_some_and(|t| tag_matches(t, tag)))
    }

    /// First direct child element whose tag matches
    pub fn first_child(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.child_elements(id, tag).next()
    }

    /// Concatenated text of `id` and all its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let NodeKind::Text(text) = &self.nodes[id.0].kind {
            out.push_str(text);
        }
        for n in self.walk(id) {
            if let NodeKind::Text(text) = &self.nodes[n.0].kind {
                out.push_str(text);
            }
        }
        out
    }

    /// All descendants of `id` in pre-order, excluding `id`
    fn walk(&self, id: NodeId) -> Walk<'_> {
        let mut stack: Vec<NodeId> = self.nodes[id.0].children.clone();
        stack.reverse();
        Walk { doc: self, stack }
    }
}

struct Walk<'a> {
    doc: &'a XmlDocument,
    stack: Vec<NodeId>,
}

impl Iterator for Walk<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.nodes[id.0].children.iter().rev().copied());
        Some(id)
    }
}

/// Tag comparison: a query with a prefix must match exactly, otherwise
/// local names are compared
fn tag_matches(tag: &str, query: &str) -> bool {
    if query.contains(':') {
        tag == query
    } else {
        local_name(tag) == query
    }
}

fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// Decode entity references; references that cannot be decoded are kept as
/// written
fn decode_entities(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }
    if let Ok(decoded) = unescape(raw) {
        return decoded;
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';') {
            Some(semi) => {
                let reference = &tail[..=semi];
                match unescape(reference) {
                    Ok(decoded) => out.push_str(&decoded),
                    Err(_) => out.push_str(reference),
                }
                rest = &tail[semi + 1..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
    nodes: Vec<XmlNode>,
    stack: Vec<NodeId>,
    pending_text: String,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            nodes: vec![XmlNode {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
            stack: Vec::new(),
            pending_text: String::new(),
        }
    }

    fn run(mut self) -> XmlResult<XmlDocument> {
        while self.pos < self.text.len() {
            let rest = &self.text[self.pos..];

            if rest.starts_with("<!--") {
                // Comments vanish without splitting the surrounding text
                let end = self.find_from(self.pos + 4, "-->", "comment")?;
                self.pos = end + 3;
            } else if rest.starts_with("<?") {
                self.flush_text();
                let end = self.find_from(self.pos + 2, "?>", "processing instruction")?;
                self.pos = end + 2;
            } else if rest.starts_with("<![CDATA[") {
                self.flush_text();
                let start = self.pos + 9;
                let end = self.find_from(start, "]]>", "CDATA section")?;
                let content = &self.text[start..end];
                if !content.is_empty() {
                    self.push_node(NodeKind::Text(content.to_string()));
                }
                self.pos = end + 3;
            } else if rest.starts_with("<!") {
                self.flush_text();
                self.pos = self.declaration_end()?;
            } else if rest.starts_with("</") {
                self.flush_text();
                self.close_tag()?;
            } else if rest.starts_with('<') && starts_name(&rest[1..]) {
                self.flush_text();
                self.open_tag()?;
            } else {
                // Text up to the next markup; a stray '<' is kept as text
                let skip = if rest.starts_with('<') { 1 } else { 0 };
                let end = rest[skip..]
                    .find('<')
                    .map_or(self.text.len(), |i| self.pos + skip + i);
                self.pending_text.push_str(&self.text[self.pos..end]);
                self.pos = end;
            }
        }

        self.flush_text();

        if let Some(&open) = self.stack.last() {
            let tag = match &self.nodes[open.0].kind {
                NodeKind::Element { tag, .. } => tag.clone(),
                _ => String::new(),
            };
            return Err(XmlError::DanglingTag { tag });
        }

        Ok(XmlDocument { nodes: self.nodes })
    }

    fn find_from(&self, from: usize, needle: &str, construct: &'static str) -> XmlResult<usize> {
        self.text
            .get(from..)
            .and_then(|s| s.find(needle))
            .map(|i| from + i)
            .ok_or(XmlError::Unterminated {
                construct,
                offset: self.pos,
            })
    }

    /// End of a `<!...>` declaration, skipping a bracketed internal subset
    fn declaration_end(&self) -> XmlResult<usize> {
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;

        for (i, &b) in self.text.as_bytes()[self.pos + 2..].iter().enumerate() {
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'[') => depth += 1,
                (None, b']') => depth = depth.saturating_sub(1),
                (None, b'>') if depth == 0 => return Ok(self.pos + 2 + i + 1),
                _ => {}
            }
        }

        Err(XmlError::Unterminated {
            construct: "declaration",
            offset: self.pos,
        })
    }

    fn close_tag(&mut self) -> XmlResult<()> {
        let start = self.pos;
        let end = self.find_from(start + 2, ">", "closing tag")?;
        let name = self.text[start + 2..end].trim();

        let Some(open) = self.stack.pop() else {
            return Err(XmlError::UnexpectedClosingTag {
                tag: name.to_string(),
                offset: start,
            });
        };

        if let NodeKind::Element { tag, .. } = &self.nodes[open.0].kind {
            if tag != name {
                return Err(XmlError::MismatchedTag {
                    expected: tag.clone(),
                    found: name.to_string(),
                    offset: start,
                });
            }
        }

        self.pos = end + 1;
        Ok(())
    }

    fn open_tag(&mut self) -> XmlResult<()> {
        let start = self.pos;
        let bytes = self.text.as_bytes();

        // Find the closing '>' outside quoted attribute values
        let mut quote: Option<u8> = None;
        let mut end = None;
        for (i, &b) in bytes[start + 1..].iter().enumerate() {
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'>') => {
                    end = Some(start + 1 + i);
                    break;
                }
                _ => {}
            }
        }
        let end = end.ok_or(XmlError::Unterminated {
            construct: "tag",
            offset: start,
        })?;

        let mut body = &self.text[start + 1..end];
        let self_closing = body.trim_end().ends_with('/');
        if self_closing {
            body = body.trim_end().strip_suffix('/').unwrap_or(body);
        }

        let name_end = body
            .find(|c: char| c.is_whitespace() || c == '/')
            .unwrap_or(body.len());
        let tag = body[..name_end].to_string();
        let attributes = parse_attributes(&body[name_end..]);

        let id = self.push_node(NodeKind::Element { tag, attributes });
        if !self_closing {
            self.stack.push(id);
        }

        self.pos = end + 1;
        Ok(())
    }

    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let raw = std::mem::take(&mut self.pending_text);
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            let decoded = decode_entities(trimmed).into_owned();
            self.push_node(NodeKind::Text(decoded));
        }
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let parent = self.stack.last().copied().unwrap_or(ROOT);
        let id = NodeId(self.nodes.len());
        self.nodes.push(XmlNode {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }
}

fn starts_name(s: &str) -> bool {
    s.chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == ':')
}

/// Scan `name="value"` / `name='value'` pairs; unquoted values run to the
/// next whitespace and bare names are ignored
fn parse_attributes(s: &str) -> Vec<(String, String)> {
    let mut attributes = Vec::new();
    let mut rest = s.trim_start();

    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        rest = rest[name_end..].trim_start();

        let Some(after_eq) = rest.strip_prefix('=') else {
            // Bare name without a value
            if name.is_empty() {
                // Lone '=' or garbage; skip one character to make progress
                let mut chars = rest.chars();
                chars.next();
                rest = chars.as_str().trim_start();
            }
            continue;
        };
        rest = after_eq.trim_start();

        let value = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let inner = &rest[1..];
                let close = inner.find(q).unwrap_or(inner.len());
                let value = &inner[..close];
                rest = inner.get(close + 1..).unwrap_or("");
                value
            }
            _ => {
                let close = rest.find(char::is_whitespace).unwrap_or(rest.len());
                let value = &rest[..close];
                rest = &rest[close..];
                value
            }
        };

        if !name.is_empty() {
            attributes.push((name.to_string(), decode_entities(value).into_owned()));
        }
        rest = rest.trim_start();
    }

    attributes
}
