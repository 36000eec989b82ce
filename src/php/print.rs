//! Rendering a [`Document`] back to PHP source.
//!
//! Verbatim statements are copied through unchanged. Generated statements are
//! pretty-printed: one statement per line, array literals in short syntax
//! with one item per line and a trailing comma, bodies indented by a fixed
//! number of spaces per level.

use super::ast::{ArrayItem, Document, Expr, Scalar, Stmt};

impl Document {
    /// Render the document to source text, indenting generated code by
    /// `indent` spaces per nesting level.
    pub fn render(&self, indent: usize) -> String {
        let mut printer = Printer {
            out: String::new(),
            indent,
            in_php: false,
        };
        for stmt in self.stmts() {
            printer.top_level(stmt);
        }
        printer.out
    }
}

struct Printer {
    out: String,
    indent: usize,
    in_php: bool,
}

impl Printer {
    fn top_level(&mut self, stmt: &Stmt) {
        if let Stmt::Verbatim(v) = stmt {
            self.out.push_str(&v.text);
            self.in_php = v.ends_in_php;
            return;
        }

        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        if !self.in_php {
            self.out.push_str("<?php\n");
            self.in_php = true;
        }

        let comments = stmt.comments();
        if !comments.is_empty() {
            if !self.out.is_empty() && !self.out.ends_with("\n\n") {
                self.out.push('\n');
            }
            for (i, comment) in comments.iter().enumerate() {
                if i > 0 {
                    self.out.push('\n');
                }
                self.out.push_str(comment.text());
                self.out.push('\n');
            }
        }

        let text = self.stmt(stmt, 0);
        self.out.push_str(&text);
        self.out.push('\n');
    }

    fn pad(&self, depth: usize) -> String {
        " ".repeat(self.indent * depth)
    }

    /// A generated statement at `depth`, without leading indentation or
    /// trailing newline.
    fn stmt(&self, stmt: &Stmt, depth: usize) -> String {
        match stmt {
            Stmt::Verbatim(v) => v.text.clone(),
            Stmt::Expression { expr, .. } => format!("{};", self.expr(expr, depth)),
            Stmt::If { cond, body, .. } => {
                let mut s = format!("if ({}) {{\n", self.expr(cond, depth));
                let inner = self.pad(depth + 1);
                for child in body {
                    for comment in child.comments() {
                        for line in comment.text().lines() {
                            s.push_str(&inner);
                            s.push_str(line);
                            s.push('\n');
                        }
                    }
                    s.push_str(&inner);
                    s.push_str(&self.stmt(child, depth + 1));
                    s.push('\n');
                }
                s.push_str(&self.pad(depth));
                s.push('}');
                s
            }
        }
    }

    fn expr(&self, expr: &Expr, depth: usize) -> String {
        match expr {
            Expr::Variable(name) => variable(name),
            Expr::DimFetch { var, dim } => {
                format!("{}[{}]", self.expr(var, depth), self.expr(dim, depth))
            }
            Expr::Assign { var, value } => {
                format!("{} = {}", self.expr(var, depth), self.expr(value, depth))
            }
            Expr::Call { name, args } => {
                let args: Vec<String> = args.iter().map(|a| self.expr(a, depth)).collect();
                format!("{name}({})", args.join(", "))
            }
            Expr::Include { kind, path } => {
                format!("{} {}", kind.keyword(), self.expr(path, depth))
            }
            Expr::Array(items) => self.array(items, depth),
            Expr::Scalar(scalar) => literal(scalar),
        }
    }

    fn array(&self, items: &[ArrayItem], depth: usize) -> String {
        if items.is_empty() {
            return "[]".into();
        }
        let inner = self.pad(depth + 1);
        let mut s = String::from("[\n");
        for item in items {
            s.push_str(&inner);
            if let Some(key) = &item.key {
                s.push_str(&self.expr(key, depth + 1));
                s.push_str(" => ");
            }
            s.push_str(&self.expr(&item.value, depth + 1));
            s.push_str(",\n");
        }
        s.push_str(&self.pad(depth));
        s.push(']');
        s
    }
}

fn variable(name: &str) -> String {
    let mut bytes = name.bytes();
    let valid = bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_' || b >= 0x80)
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80);
    if valid {
        format!("${name}")
    } else {
        format!("${{{}}}", quote(name))
    }
}

fn literal(scalar: &Scalar) -> String {
    match scalar {
        Scalar::String(s) => quote(s),
        Scalar::Int(i64::MIN) => "PHP_INT_MIN".into(),
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) if f.is_nan() => "NAN".into(),
        Scalar::Float(f) if f.is_infinite() => {
            if *f > 0.0 { "INF".into() } else { "-INF".into() }
        }
        // Debug formatting always keeps a `.` or exponent, so the value
        // stays a float when read back.
        Scalar::Float(f) => format!("{f:?}"),
    }
}

/// Single-quoted PHP string literal.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}
