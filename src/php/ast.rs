/// A parsed template plus any statements appended to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    stmts: Vec<Stmt>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_stmts(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }

    /// Append a statement after everything already in the document.
    pub fn push(&mut self, stmt: Stmt) {
        self.stmts.push(stmt);
    }

    pub fn stmts(&self) -> &[Stmt] {
        &self.stmts
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

/// Template text carried through untouched.
///
/// Holds one statement together with the whitespace, comments and inline
/// HTML that precede it, or the trailing text after the last statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verbatim {
    pub text: String,
    /// Whether the engine is in PHP mode (rather than inline HTML) after this text.
    pub ends_in_php: bool,
}

/// A comment attached to a generated statement, printed as-is above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment(String);

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Verbatim(Verbatim),
    If {
        cond: Expr,
        body: Vec<Stmt>,
        comments: Vec<Comment>,
    },
    Expression {
        expr: Expr,
        comments: Vec<Comment>,
    },
}

impl Stmt {
    /// An expression statement with no comments.
    pub fn expression(expr: Expr) -> Self {
        Stmt::Expression {
            expr,
            comments: Vec::new(),
        }
    }

    /// Replace the comments of a generated statement. Verbatim text keeps its own.
    pub fn with_comments(mut self, new: Vec<Comment>) -> Self {
        match &mut self {
            Stmt::Verbatim(_) => {}
            Stmt::If { comments, .. } | Stmt::Expression { comments, .. } => *comments = new,
        }
        self
    }

    pub fn comments(&self) -> &[Comment] {
        match self {
            Stmt::Verbatim(_) => &[],
            Stmt::If { comments, .. } | Stmt::Expression { comments, .. } => comments,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeKind {
    Include,
    IncludeOnce,
    Require,
    RequireOnce,
}

impl IncludeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            IncludeKind::Include => "include",
            IncludeKind::IncludeOnce => "include_once",
            IncludeKind::Require => "require",
            IncludeKind::RequireOnce => "require_once",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayItem {
    pub key: Option<Expr>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Variable(String),
    /// `$var[dim]`
    DimFetch {
        var: Box<Expr>,
        dim: Box<Expr>,
    },
    Assign {
        var: Box<Expr>,
        value: Box<Expr>,
    },
    /// Call of a global function by name.
    Call {
        name: String,
        args: Vec<Expr>,
    },
    Include {
        kind: IncludeKind,
        path: Box<Expr>,
    },
    Array(Vec<ArrayItem>),
    Scalar(Scalar),
}

impl Expr {
    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Scalar(Scalar::String(value.into()))
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    /// `self[dim]`
    pub fn dim(self, dim: Expr) -> Self {
        Expr::DimFetch {
            var: Box::new(self),
            dim: Box::new(dim),
        }
    }

    /// `self = value`
    pub fn assign(self, value: Expr) -> Self {
        Expr::Assign {
            var: Box::new(self),
            value: Box::new(value),
        }
    }
}
