//! Structured TypeScript builder
//!
//! Emitters build a small expression tree instead of concatenating template
//! strings. [`Emitter`] renders the tree in a single pass and is the only
//! place where user text meets source syntax:
//!
//! - string values are always rendered through [`quote`]
//! - property keys that are not identifiers are quoted
//! - comment text cannot terminate its comment
//!
//! Opaque fragments (hook matchers, handler bodies) are the exception: they
//! are carried as [`Expr::Raw`] or [`Stmt::Verbatim`] and emitted as given.

mod emit;
mod literal;

pub use emit::Emitter;
pub use literal::{doc_comment_text, line_comment_text, needs_escaping, quote, LiteralPolicy};

/// An expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// String literal
    Str(String),
    /// Boolean literal
    Bool(bool),
    /// Non-negative integer literal
    Int(u64),
    /// `null`
    Null,
    /// Source text emitted as given
    Raw(String),
    /// Object literal
    Object(ObjectLit),
    /// Array literal
    Array(Vec<Expr>),
    /// Arrow function
    Arrow(Box<Arrow>),
    /// Call with a plain callee
    Call(Box<Call>),
}

impl Expr {
    /// String literal
    #[must_use]
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// Raw source text
    #[must_use]
    pub fn raw(source: impl Into<String>) -> Self {
        Self::Raw(source.into())
    }

    /// `callee(args...)`
    #[must_use]
    pub fn call(callee: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Call(Box::new(Call {
            callee: callee.into(),
            args,
        }))
    }

    /// Arrow function with an expression body
    #[must_use]
    pub fn arrow(params: &[&str], body: Self) -> Self {
        Self::Arrow(Box::new(Arrow {
            is_async: false,
            params: params.iter().map(ToString::to_string).collect(),
            body: ArrowBody::Expr(body),
        }))
    }

    /// `async` arrow function with a block body
    #[must_use]
    pub fn async_block(params: &[&str], body: Vec<Stmt>) -> Self {
        Self::Arrow(Box::new(Arrow {
            is_async: true,
            params: params.iter().map(ToString::to_string).collect(),
            body: ArrowBody::Block(body),
        }))
    }
}

impl From<ObjectLit> for Expr {
    fn from(object: ObjectLit) -> Self {
        Self::Object(object)
    }
}

/// An object literal with an optional leading line comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectLit {
    /// Comment emitted as the first line inside the braces
    pub comment: Option<String>,
    /// Properties in insertion order
    pub props: Vec<(String, Expr)>,
}

impl ObjectLit {
    /// Empty object
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the leading comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Append a property
    #[must_use]
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.props.push((key.into(), value.into()));
        self
    }

    /// Append a property only when `value` is present
    #[must_use]
    pub fn prop_opt(self, key: impl Into<String>, value: Option<Expr>) -> Self {
        let Some(value) = value else {
            return self;
        };
        self.prop(key, value)
    }

    /// Whether the object has no properties
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

/// Arrow function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrow {
    /// Prefix with `async`
    pub is_async: bool,
    /// Parameter names
    pub params: Vec<String>,
    /// Function body
    pub body: ArrowBody,
}

/// Body of an arrow function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrowBody {
    /// `=> expr`
    Expr(Expr),
    /// `=> { ... }`
    Block(Vec<Stmt>),
}

/// Function call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Callee source text
    pub callee: String,
    /// Arguments
    pub args: Vec<Expr>,
}

/// A statement inside a block body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// Opaque code fragment
    ///
    /// Re-indented line by line, unless a template literal in it spans a
    /// line break. Then the fragment is kept byte for byte.
    Verbatim(String),
    /// `// text`
    Comment(String),
    /// Empty line
    Blank,
    /// `return expr;`
    Return(Expr),
}

/// An import declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// `import type` instead of `import`
    pub type_only: bool,
    /// Imported names
    pub names: Vec<String>,
    /// Module specifier
    pub from: String,
}

impl Import {
    /// `import { names } from "from";`
    #[must_use]
    pub fn named(names: &[&str], from: impl Into<String>) -> Self {
        Self {
            type_only: false,
            names: names.iter().map(ToString::to_string).collect(),
            from: from.into(),
        }
    }

    /// `import type { names } from "from";`
    #[must_use]
    pub fn types(names: &[&str], from: impl Into<String>) -> Self {
        Self {
            type_only: true,
            ..Self::named(names, from)
        }
    }

    /// Render the declaration
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "import {}{{ {} }} from {};",
            if self.type_only { "type " } else { "" },
            self.names.join(", "),
            quote(&self.from)
        )
    }
}

/// Render a list of imports, one per line
#[must_use]
pub fn render_imports(imports: &[Import]) -> String {
    imports
        .iter()
        .map(Import::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A `/** ... */` block, one line per line of text
#[must_use]
pub fn doc_comment(text: &str) -> String {
    let mut out = String::from("/**\n");
    for line in doc_comment_text(text).lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(" * ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str(" */");
    out
}
