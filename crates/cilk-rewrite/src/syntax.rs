//! Read-only syntax tree view.
//!
//! The tree-sitter tree is lowered once into owned [`SyntaxNode`]s so the
//! walker only depends on node kinds, byte spans and the children relation.

use std::borrow::Cow;
use std::ops::Range;

use tree_sitter::{Node, Parser};

use crate::error::{Error, Result};

/// Half-open byte range `[start, end)` into the original buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Node kinds the rewriter dispatches on. Everything else is `Other`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Declaration,
    ExpressionStatement,
    IfStatement,
    Other(String),
}

impl NodeKind {
    /// Map a tree-sitter-c grammar kind.
    pub fn from_grammar(kind: &str) -> Self {
        match kind {
            "declaration" => NodeKind::Declaration,
            "expression_statement" => NodeKind::ExpressionStatement,
            "if_statement" => NodeKind::IfStatement,
            other => NodeKind::Other(other.to_owned()),
        }
    }

    /// Does this node take exactly one sub-statement (a loop or branch
    /// body written without braces)?
    pub fn holds_single_statement(&self) -> bool {
        match self {
            NodeKind::IfStatement => true,
            NodeKind::Other(kind) => matches!(
                kind.as_str(),
                "for_statement" | "while_statement" | "do_statement" | "else_clause"
            ),
            NodeKind::Declaration | NodeKind::ExpressionStatement => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxNode {
    kind: NodeKind,
    span: Span,
    children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, span: Span, children: Vec<SyntaxNode>) -> Self {
        Self {
            kind,
            span,
            children,
        }
    }

    pub fn leaf(kind: NodeKind, span: Span) -> Self {
        Self::new(kind, span, Vec::new())
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    /// Text covered by this node. Invalid UTF-8 is replaced, not rejected.
    pub fn text<'s>(&self, source: &'s [u8]) -> Cow<'s, str> {
        String::from_utf8_lossy(&source[self.span.range()])
    }
}

impl From<Node<'_>> for SyntaxNode {
    fn from(node: Node<'_>) -> Self {
        let mut cursor = node.walk();
        let children = node.children(&mut cursor).map(SyntaxNode::from).collect();
        SyntaxNode::new(
            NodeKind::from_grammar(node.kind()),
            Span::new(node.start_byte(), node.end_byte()),
            children,
        )
    }
}

/// tree-sitter parser loaded with the C grammar.
pub struct CParser {
    parser: Parser,
}

impl CParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_c::LANGUAGE.into())?;
        Ok(CParser { parser })
    }

    /// Parse `source` and lower the tree rooted at the translation unit.
    ///
    /// Error-recovery nodes are kept as ordinary `Other` nodes: slice
    /// notation is not C, so the grammar routinely recovers around it.
    pub fn parse(&mut self, source: &[u8]) -> Result<SyntaxNode> {
        let tree = self.parser.parse(source, None).ok_or(Error::Unparseable)?;
        Ok(SyntaxNode::from(tree.root_node()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SyntaxNode {
        CParser::new()
            .expect("C grammar loads")
            .parse(source.as_bytes())
            .expect("tree")
    }

    fn find<'n>(node: &'n SyntaxNode, kind: &NodeKind) -> Option<&'n SyntaxNode> {
        if node.kind() == kind {
            return Some(node);
        }
        node.children().iter().find_map(|child| find(child, kind))
    }

    #[test]
    fn test_span_len() {
        let span = Span::new(3, 10);
        assert_eq!(span.len(), 7);
        assert!(!span.is_empty());
        assert!(Span::new(4, 4).is_empty());
        assert_eq!(span.range(), 3..10);
    }

    #[test]
    fn test_node_kind_mapping() {
        assert_eq!(NodeKind::from_grammar("declaration"), NodeKind::Declaration);
        assert_eq!(
            NodeKind::from_grammar("expression_statement"),
            NodeKind::ExpressionStatement
        );
        assert_eq!(NodeKind::from_grammar("if_statement"), NodeKind::IfStatement);
        assert_eq!(
            NodeKind::from_grammar("for_statement"),
            NodeKind::Other("for_statement".to_owned())
        );
    }

    #[test]
    fn test_single_statement_holders() {
        for kind in ["for_statement", "while_statement", "do_statement", "else_clause"] {
            assert!(NodeKind::from_grammar(kind).holds_single_statement(), "{kind}");
        }
        assert!(NodeKind::IfStatement.holds_single_statement());
        assert!(!NodeKind::from_grammar("compound_statement").holds_single_statement());
        assert!(!NodeKind::from_grammar("translation_unit").holds_single_statement());
        assert!(!NodeKind::ExpressionStatement.holds_single_statement());
    }

    #[test]
    fn test_unbraced_loop_body_is_direct_child() {
        let source = "void f(void) {\n    for (int j = 0; j < 4; j++)\n        s = g(x);\n}\n";
        let root = parse(source);
        let for_stmt = find(&root, &NodeKind::Other("for_statement".to_owned())).expect("for");
        assert!(
            for_stmt
                .children()
                .iter()
                .any(|child| child.kind() == &NodeKind::ExpressionStatement)
        );
    }

    #[test]
    fn test_root_covers_translation_unit() {
        let source = "int x = 1;\n";
        let root = parse(source);
        assert_eq!(root.kind(), &NodeKind::Other("translation_unit".to_owned()));
        assert_eq!(root.span().start, 0);
    }

    #[test]
    fn test_declaration_text_includes_semicolon() {
        let source = "void f(void) {\n    double s = g(x);\n}\n";
        let root = parse(source);
        let decl = find(&root, &NodeKind::Declaration).expect("declaration");
        assert_eq!(decl.text(source.as_bytes()), "double s = g(x);");
    }

    #[test]
    fn test_if_statement_spans_else_branch() {
        let source = "void f(void) {\n    if (a) {\n        b = 1;\n    } else {\n        b = 2;\n    }\n}\n";
        let root = parse(source);
        let stmt = find(&root, &NodeKind::IfStatement).expect("if statement");
        let text = stmt.text(source.as_bytes());
        assert!(text.starts_with("if (a)"));
        assert!(text.ends_with("b = 2;\n    }"));
    }

    #[test]
    fn test_lossy_text() {
        let source = b"ab\xffcd";
        let node = SyntaxNode::leaf(NodeKind::Other("x".to_owned()), Span::new(0, 5));
        assert_eq!(node.text(source), "ab\u{FFFD}cd");
    }
}
