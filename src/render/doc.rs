//! Document model and tree evaluator
//!
//! The evaluator interprets a [`Node`] tree into a [`Document`]: a tree of
//! collapsible sections and styled lines. Section collapse state lives in
//! [`SectionStates`], which outlives any single document so a redraw can
//! rebuild everything from scratch and still restore what the user had
//! collapsed.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::render::ast::{NavTarget, Node, StyleTag, TextSpan};

/// Errors produced while evaluating a render tree
///
/// These are programming defects in a renderer, not user-facing conditions;
/// the caller drops the partial document and aborts the redraw.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("duplicate section identity among siblings: {id}")]
    DuplicateSection { id: String },
}

/// One rendered line: indentation, styled spans, and attribute metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNode {
    pub indent: usize,
    pub spans: Vec<TextSpan>,
    pub nav: Option<NavTarget>,
    pub copy: Option<String>,
}

impl LineNode {
    /// The line's text without indentation
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// The line's text with the indentation prefix applied
    pub fn rendered(&self) -> String {
        let mut out = "  ".repeat(self.indent);
        out.push_str(&self.text());
        out
    }

    /// Whether any span on this line carries the given style tag
    pub fn has_style(&self, tag: StyleTag) -> bool {
        self.spans.iter().any(|s| s.styles.contains(&tag))
    }
}

/// A collapsible region of the document with stable identity
#[derive(Debug, Clone)]
pub struct SectionNode {
    pub id: String,
    pub collapsed: bool,
    pub children: Vec<DocNode>,
}

/// One entry in the document tree
#[derive(Debug, Clone)]
pub enum DocNode {
    Line(LineNode),
    Section(SectionNode),
}

/// The evaluated, render-ready document
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub nodes: Vec<DocNode>,
}

/// A line of the flattened document plus its innermost enclosing section
#[derive(Debug, Clone)]
pub struct VisibleLine<'a> {
    pub line: &'a LineNode,
    pub section: Option<&'a str>,
}

impl Document {
    /// Flatten the tree into visible lines, honoring collapse state
    ///
    /// A collapsed section contributes only its heading line (its first
    /// direct line child); everything beneath is hidden.
    pub fn visible_lines(&self) -> Vec<VisibleLine<'_>> {
        let mut out = Vec::new();
        flatten(&self.nodes, None, true, &mut out);
        out
    }

    /// Flatten the tree into every line, ignoring collapse state
    pub fn all_lines(&self) -> Vec<&LineNode> {
        let mut out = Vec::new();
        flatten(&self.nodes, None, false, &mut out);
        out.into_iter().map(|v| v.line).collect()
    }

    /// Look up a section's collapsed flag by identity
    pub fn section_collapsed(&self, id: &str) -> Option<bool> {
        fn find(nodes: &[DocNode], id: &str) -> Option<bool> {
            for node in nodes {
                if let DocNode::Section(s) = node {
                    if s.id == id {
                        return Some(s.collapsed);
                    }
                    if let Some(found) = find(&s.children, id) {
                        return Some(found);
                    }
                }
            }
            None
        }
        find(&self.nodes, id)
    }
}

fn flatten<'a>(
    nodes: &'a [DocNode],
    section: Option<&'a str>,
    honor_collapse: bool,
    out: &mut Vec<VisibleLine<'a>>,
) {
    for node in nodes {
        match node {
            DocNode::Line(line) => out.push(VisibleLine { line, section }),
            DocNode::Section(s) => {
                if honor_collapse && s.collapsed {
                    // Only the heading survives collapse
                    if let Some(DocNode::Line(line)) = s
                        .children
                        .iter()
                        .find(|c| matches!(c, DocNode::Line(_)))
                    {
                        out.push(VisibleLine {
                            line,
                            section: Some(&s.id),
                        });
                    }
                } else {
                    flatten(&s.children, Some(&s.id), honor_collapse, out);
                }
            }
        }
    }
}

/// Collapse state remembered across redraws, keyed by section identity
#[derive(Debug, Clone, Default)]
pub struct SectionStates {
    collapsed: HashMap<String, bool>,
}

impl SectionStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded collapse flag for a section, if the user ever touched it
    pub fn collapsed(&self, id: &str) -> Option<bool> {
        self.collapsed.get(id).copied()
    }

    pub fn set_collapsed(&mut self, id: &str, collapsed: bool) {
        self.collapsed.insert(id.to_string(), collapsed);
    }

    /// Flip a section's collapse flag; unrecorded sections count as expanded
    pub fn toggle(&mut self, id: &str) {
        let current = self.collapsed.get(id).copied().unwrap_or(false);
        self.collapsed.insert(id.to_string(), !current);
    }
}

/// Evaluation context threaded through the recursive walk
#[derive(Default)]
struct EvalCtx {
    depth: usize,
    styles: Vec<StyleTag>,
    nav: Option<NavTarget>,
    copy: Option<String>,
}

impl EvalCtx {
    fn span(&self, text: String, extra: Option<StyleTag>) -> TextSpan {
        let mut styles = self.styles.clone();
        if let Some(tag) = extra {
            styles.push(tag);
        }
        TextSpan { text, styles }
    }

    fn make_line(&self, spans: Vec<TextSpan>) -> LineNode {
        LineNode {
            indent: self.depth,
            spans,
            nav: self.nav.clone(),
            copy: self.copy.clone(),
        }
    }
}

/// Recursive interpreter for render trees
pub struct Evaluator<'a> {
    states: &'a SectionStates,
}

impl<'a> Evaluator<'a> {
    pub fn new(states: &'a SectionStates) -> Self {
        Self { states }
    }

    /// Evaluate a sequence of root nodes into a document
    pub fn eval(&self, roots: &[Node]) -> Result<Document, RenderError> {
        let mut ctx = EvalCtx::default();
        let mut sibling_ids = HashSet::new();
        let mut nodes = Vec::new();
        for node in roots {
            self.eval_node(node, &mut ctx, &mut sibling_ids, &mut nodes)?;
        }
        Ok(Document { nodes })
    }

    fn eval_node(
        &self,
        node: &Node,
        ctx: &mut EvalCtx,
        sibling_ids: &mut HashSet<String>,
        out: &mut Vec<DocNode>,
    ) -> Result<(), RenderError> {
        match node {
            Node::Heading(text) => {
                let span = ctx.span(text.clone(), Some(StyleTag::Heading));
                out.push(DocNode::Line(ctx.make_line(vec![span])));
            }
            Node::Section {
                id,
                collapsed,
                body,
            } => {
                if !sibling_ids.insert(id.clone()) {
                    return Err(RenderError::DuplicateSection { id: id.clone() });
                }
                let collapsed = self.states.collapsed(id).unwrap_or(*collapsed);
                let mut children = Vec::new();
                let mut child_ids = HashSet::new();
                for child in body {
                    self.eval_node(child, ctx, &mut child_ids, &mut children)?;
                }
                out.push(DocNode::Section(SectionNode {
                    id: id.clone(),
                    collapsed,
                    children,
                }));
            }
            Node::Indent(body) => {
                ctx.depth += 1;
                for child in body {
                    self.eval_node(child, ctx, sibling_ids, out)?;
                }
                ctx.depth -= 1;
            }
            Node::Line(text) => {
                // Wrapper styles follow span styles; the theme gives later
                // tags precedence, so a mark/pending wrapper overrides the
                // column styling underneath
                let spans = text
                    .spans
                    .iter()
                    .map(|s| {
                        let mut styles = s.styles.clone();
                        styles.extend_from_slice(&ctx.styles);
                        TextSpan {
                            text: s.text.clone(),
                            styles,
                        }
                    })
                    .collect();
                out.push(DocNode::Line(ctx.make_line(spans)));
            }
            Node::KeyValue { width, key, value } => {
                let label = format!("{:<width$} ", format!("{}:", key), width = *width);
                let key_span = ctx.span(label, Some(StyleTag::KeyLabel));
                let value_span = ctx.span(value.clone(), None);
                out.push(DocNode::Line(ctx.make_line(vec![key_span, value_span])));
            }
            Node::Padding => {
                out.push(DocNode::Line(ctx.make_line(Vec::new())));
            }
            Node::Propertize { styles, body } => {
                let saved = ctx.styles.len();
                ctx.styles.extend_from_slice(styles);
                for child in body {
                    self.eval_node(child, ctx, sibling_ids, out)?;
                }
                ctx.styles.truncate(saved);
            }
            Node::Nav { target, body } => {
                let saved = ctx.nav.replace(target.clone());
                for child in body {
                    self.eval_node(child, ctx, sibling_ids, out)?;
                }
                ctx.nav = saved;
            }
            Node::Copy { payload, body } => {
                let saved = ctx.copy.replace(payload.clone());
                for child in body {
                    self.eval_node(child, ctx, sibling_ids, out)?;
                }
                ctx.copy = saved;
            }
            Node::MarkForDelete(body) => {
                let saved = ctx.styles.len();
                ctx.styles.push(StyleTag::Marked);
                for child in body {
                    self.eval_node(child, ctx, sibling_ids, out)?;
                }
                ctx.styles.truncate(saved);
            }
        }
        Ok(())
    }
}
