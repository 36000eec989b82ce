//! Template parsing on top of the tree-sitter PHP grammar.
//!
//! The whole source goes through `tree-sitter-php`. A tree holding any error
//! or missing node rejects the template. Otherwise every top-level statement
//! becomes one [`Verbatim`] chunk: its source text plus everything before it
//! since the previous statement, so comments, whitespace and inline HTML stay
//! exactly where they were.

use tree_sitter::{Node, Parser};

use super::ParseError;
use super::ast::{Document, Stmt, Verbatim};

/// Parse PHP template source into a [`Document`] of verbatim statements.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
        .map_err(|e| ParseError::grammar(&e.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::grammar("parser produced no tree"))?;
    let root = tree.root_node();

    if root.has_error() {
        let offset = first_error(root).map_or(source.len(), |node| node.start_byte());
        return Err(unexpected_at(source, offset));
    }

    Ok(split(source, root))
}

/// Cut the source at the end of each top-level statement.
fn split(source: &str, root: Node<'_>) -> Document {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut in_php = false;

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        match child.kind() {
            "php_tag" => in_php = true,
            // `?> text` optionally followed by a new open tag.
            "text_interpolation" => in_php = reopens_php(child),
            "text" | "comment" => {}
            _ => {
                let end = child.end_byte();
                push_chunk(&mut chunks, &source[start..end], in_php);
                start = end;
            }
        }
    }
    push_chunk(&mut chunks, &source[start..], in_php);

    Document::from_stmts(chunks)
}

fn push_chunk(chunks: &mut Vec<Stmt>, text: &str, ends_in_php: bool) {
    if !text.is_empty() {
        chunks.push(Stmt::Verbatim(Verbatim {
            text: text.to_string(),
            ends_in_php,
        }));
    }
}

fn reopens_php(interpolation: Node<'_>) -> bool {
    let mut cursor = interpolation.walk();
    interpolation
        .children(&mut cursor)
        .any(|n| n.kind() == "php_tag")
}

/// The earliest error or missing node, in source order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    node.children(&mut cursor).find_map(first_error)
}

fn unexpected_at(source: &str, offset: usize) -> ParseError {
    let rest = source.get(offset..).unwrap_or("");
    let token = rest.trim_start();
    let at = offset + (rest.len() - token.len());
    let line = 1 + source[..at].matches('\n').count();

    if token.is_empty() {
        ParseError::unexpected("EOF", line)
    } else {
        ParseError::unexpected(&format!("'{}'", leading_token(token)), line)
    }
}

/// The token `rest` starts with: a close tag, a variable, a word or one character.
fn leading_token(rest: &str) -> &str {
    let word_len = |s: &str| {
        s.find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(s.len())
    };
    let len = match rest.chars().next() {
        Some('?') if rest.starts_with("?>") => 2,
        Some('$') => 1 + word_len(&rest[1..]),
        Some(c) if c.is_alphanumeric() || c == '_' => word_len(rest),
        Some(c) => c.len_utf8(),
        None => 0,
    };
    &rest[..len]
}
