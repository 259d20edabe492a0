//! Data model for parsed comment bodies — format-agnostic.

/// One node of mixed comment content, in document order.
///
/// The set of node kinds is closed: plain text, fenced code, inline code,
/// nested paragraphs, cross-references and lists. Rendering dispatches per
/// variant.
#[derive(Debug, Clone, PartialEq)]
pub enum DocNode {
    /// Plain text, passed through verbatim (escaped by the renderer).
    Text(String),
    /// A pre-formatted code block.
    Code(String),
    /// An inline code span.
    InlineCode(String),
    /// A paragraph containing its own mixed content.
    Para(Vec<DocNode>),
    /// A cross-reference to another documented entity.
    See {
        /// Raw identifier-like reference, e.g. `T:Acme.Widget`. Resolved to
        /// an anchor link when it names a known type/member, else rendered
        /// as literal text.
        cref: String,
        /// Optional literal display text.
        text: String,
    },
    /// A list, rendered as a table with a header row.
    List(ListBlock),
}

/// A `<list>` block: bullet, number or table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListBlock {
    pub kind: String,
    pub header: Option<ListItem>,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItem {
    pub term: String,
    pub description: String,
}

/// One documented item from the comments file, addressable by its ID string.
#[derive(Debug, Clone, Default)]
pub struct CommentEntry {
    pub summary: Vec<DocNode>,
    pub remarks: Vec<DocNode>,
    /// Ordered (parameter name, content) pairs. Names are matched
    /// case-sensitively against reflected parameter names; there is no
    /// positional fallback.
    pub params: Vec<(String, Vec<DocNode>)>,
    /// Ordered (type parameter name, content) pairs.
    pub type_params: Vec<(String, Vec<DocNode>)>,
    /// Absent for void-returning members.
    pub returns: Vec<DocNode>,
    /// Ordered (exception type reference, content) pairs. The reference is
    /// an unparsed cref, resolved for linking where possible.
    pub exceptions: Vec<(String, Vec<DocNode>)>,
    pub examples: Vec<Vec<DocNode>>,
}

impl CommentEntry {
    /// Content for a named parameter, exact string match.
    pub fn param(&self, name: &str) -> Option<&[DocNode]> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, nodes)| nodes.as_slice())
    }

    /// Content for a named type parameter, exact string match.
    pub fn type_param(&self, name: &str) -> Option<&[DocNode]> {
        self.type_params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, nodes)| nodes.as_slice())
    }
}

/// The comments document: assembly name plus the raw (id, entry) pairs in
/// file order. Parsed once at startup, read-only afterwards.
#[derive(Debug, Default)]
pub struct CommentDoc {
    pub assembly: String,
    pub members: Vec<(String, CommentEntry)>,
}
