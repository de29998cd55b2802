//! Declarative render tree
//!
//! The closed node vocabulary renderers use to describe document content.
//! Each variant carries only its own fields; the evaluator in `doc` gives
//! them meaning. Renderers build trees with the helper constructors below
//! rather than spelling variants out.

use crate::models::ResourceKind;

/// Visual style tags attached to rendered spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// Section heading line
    Heading,
    /// Column header line above a listing
    ColumnHeader,
    /// Aligned key label in a key-value line
    KeyLabel,
    /// Muted/secondary text ("None.", status columns)
    Dimmed,
    /// An operation is underway ("Fetching...")
    InProgress,
    /// Item is marked for deletion
    Marked,
    /// Delete dispatched, awaiting confirmation from the next poll
    PendingDeletion,
}

/// A run of characters sharing one set of style tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub styles: Vec<StyleTag>,
}

/// Line content: one or more styled spans
///
/// Most lines are a single unstyled span; summary lines compose a plain name
/// column with dimmed status columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    pub spans: Vec<TextSpan>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, text: impl Into<String>) -> Self {
        self.spans.push(TextSpan {
            text: text.into(),
            styles: Vec::new(),
        });
        self
    }

    pub fn push_styled(mut self, text: impl Into<String>, styles: Vec<StyleTag>) -> Self {
        self.spans.push(TextSpan {
            text: text.into(),
            styles,
        });
        self
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        StyledText::new().push(text)
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        StyledText::new().push(text)
    }
}

/// Navigation metadata: which resource a span identifies
///
/// Names are only unique within a namespace, so the namespace is part of
/// the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTarget {
    pub kind: ResourceKind,
    pub namespace: String,
    pub name: String,
}

impl NavTarget {
    pub fn new(
        kind: ResourceKind,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

/// One node of the declarative render tree
#[derive(Debug, Clone)]
pub enum Node {
    /// A section heading line; first child of its section when present
    Heading(String),
    /// A collapsible section with stable identity
    Section {
        id: String,
        /// Collapsed hint used when no recorded state exists for `id`
        collapsed: bool,
        body: Vec<Node>,
    },
    /// Evaluate body one nesting level deeper
    Indent(Vec<Node>),
    /// A single line at the current indentation
    Line(StyledText),
    /// An aligned `key:` label followed by a value
    KeyValue {
        width: usize,
        key: String,
        value: String,
    },
    /// One blank line
    Padding,
    /// Attach style tags to every character produced by body
    Propertize { styles: Vec<StyleTag>, body: Vec<Node> },
    /// Attach navigation metadata to body's output
    Nav { target: NavTarget, body: Vec<Node> },
    /// Attach a clipboard payload to body's output
    Copy { payload: String, body: Vec<Node> },
    /// Shorthand for propertizing body with the marked style
    MarkForDelete(Vec<Node>),
}

pub fn heading(text: impl Into<String>) -> Node {
    Node::Heading(text.into())
}

pub fn section(id: impl Into<String>, body: Vec<Node>) -> Node {
    Node::Section {
        id: id.into(),
        collapsed: false,
        body,
    }
}

pub fn indent(body: Vec<Node>) -> Node {
    Node::Indent(body)
}

pub fn line(text: impl Into<StyledText>) -> Node {
    Node::Line(text.into())
}

pub fn key_value(width: usize, key: impl Into<String>, value: impl Into<String>) -> Node {
    Node::KeyValue {
        width,
        key: key.into(),
        value: value.into(),
    }
}

pub fn padding() -> Node {
    Node::Padding
}

pub fn propertize(styles: Vec<StyleTag>, body: Vec<Node>) -> Node {
    Node::Propertize { styles, body }
}

pub fn nav_prop(target: NavTarget, body: Vec<Node>) -> Node {
    Node::Nav { target, body }
}

pub fn copy_prop(payload: impl Into<String>, body: Vec<Node>) -> Node {
    Node::Copy {
        payload: payload.into(),
        body,
    }
}

pub fn mark_for_delete(body: Vec<Node>) -> Node {
    Node::MarkForDelete(body)
}
