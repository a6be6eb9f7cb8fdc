//! Single-pass renderer for the expression tree

use super::{line_comment_text, quote, ArrowBody, Expr, ObjectLit, Stmt};
use crate::naming::is_identifier;

const INDENT: &str = "  ";

/// Renders [`Expr`] trees as TypeScript source
///
/// Multi-line constructs are laid out with a two-space indent, starting from
/// the level the emitter was created with. The first line is never indented:
/// the caller decides what precedes it.
#[derive(Debug, Default)]
pub struct Emitter {
    out: String,
    level: usize,
}

impl Emitter {
    /// Create an emitter whose nested lines start at `level`
    #[must_use]
    pub const fn at_level(level: usize) -> Self {
        Self {
            out: String::new(),
            level,
        }
    }

    /// Render a single expression at `level`
    #[must_use]
    pub fn render(expr: &Expr, level: usize) -> String {
        let mut emitter = Self::at_level(level);
        emitter.expr(expr);
        emitter.finish()
    }

    /// Take the rendered source
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }

    /// Append an expression
    pub fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Str(value) => self.out.push_str(&quote(value)),
            Expr::Bool(value) => self.out.push_str(if *value { "true" } else { "false" }),
            Expr::Int(value) => self.out.push_str(&value.to_string()),
            Expr::Null => self.out.push_str("null"),
            Expr::Raw(source) => self.out.push_str(source),
            Expr::Object(object) => self.object(object),
            Expr::Array(items) => self.array(items),
            Expr::Arrow(arrow) => {
                if arrow.is_async {
                    self.out.push_str("async ");
                }
                self.out.push('(');
                self.out.push_str(&arrow.params.join(", "));
                self.out.push_str(") => ");
                match &arrow.body {
                    ArrowBody::Expr(Expr::Object(object)) => {
                        self.out.push('(');
                        self.object(object);
                        self.out.push(')');
                    }
                    ArrowBody::Expr(body) => self.expr(body),
                    ArrowBody::Block(stmts) => self.block(stmts),
                }
            }
            Expr::Call(call) => {
                self.out.push_str(&call.callee);
                self.out.push('(');
                for (index, arg) in call.args.iter().enumerate() {
                    if index > 0 {
                        self.out.push_str(", ");
                    }
                    self.expr(arg);
                }
                self.out.push(')');
            }
        }
    }

    fn object(&mut self, object: &ObjectLit) {
        if object.is_empty() && object.comment.is_none() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{\n");
        self.level += 1;
        if let Some(comment) = &object.comment {
            self.comment_line(comment);
        }
        for (key, value) in &object.props {
            self.pad();
            self.key(key);
            self.out.push_str(": ");
            self.expr(value);
            self.out.push_str(",\n");
        }
        self.level -= 1;
        self.pad();
        self.out.push('}');
    }

    fn array(&mut self, items: &[Expr]) {
        if items.is_empty() {
            self.out.push_str("[]");
            return;
        }
        self.out.push_str("[\n");
        self.level += 1;
        for item in items {
            self.pad();
            self.expr(item);
            self.out.push_str(",\n");
        }
        self.level -= 1;
        self.pad();
        self.out.push(']');
    }

    fn block(&mut self, stmts: &[Stmt]) {
        self.out.push_str("{\n");
        self.level += 1;
        for stmt in stmts {
            self.stmt(stmt);
        }
        self.level -= 1;
        self.pad();
        self.out.push('}');
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Verbatim(code) => self.verbatim(code),
            Stmt::Comment(text) => self.comment_line(text),
            Stmt::Blank => self.out.push('\n'),
            Stmt::Return(expr) => {
                self.pad();
                self.out.push_str("return ");
                self.expr(expr);
                self.out.push_str(";\n");
            }
        }
    }

    /// Emit an opaque fragment
    ///
    /// Leading blank lines and trailing whitespace are dropped. A fragment
    /// with a multi-line template literal keeps its bytes, since re-indenting
    /// would change the literal's value. All others are dedented and
    /// re-indented to the current level.
    fn verbatim(&mut self, code: &str) {
        let lines: Vec<&str> = code
            .trim_end()
            .lines()
            .skip_while(|line| line.trim().is_empty())
            .collect();
        if lines.is_empty() {
            return;
        }

        if has_multiline_template(code) {
            self.out.push_str(&lines.join("\n"));
            self.out.push('\n');
            return;
        }

        let common = lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.len() - line.trim_start().len())
            .min()
            .unwrap_or(0);

        for line in lines {
            if line.trim().is_empty() {
                self.out.push('\n');
            } else {
                self.pad();
                let dedented = line.get(common..).unwrap_or_else(|| line.trim_start());
                self.out.push_str(dedented.trim_end());
                self.out.push('\n');
            }
        }
    }

    fn comment_line(&mut self, text: &str) {
        self.pad();
        let text = line_comment_text(text);
        if text.is_empty() {
            self.out.push_str("//\n");
        } else {
            self.out.push_str("// ");
            self.out.push_str(&text);
            self.out.push('\n');
        }
    }

    fn key(&mut self, key: &str) {
        if is_identifier(key) {
            self.out.push_str(key);
        } else {
            self.out.push_str(&quote(key));
        }
    }

    fn pad(&mut self) {
        for _ in 0..self.level {
            self.out.push_str(INDENT);
        }
    }
}

/// Whether a template literal in `code` contains a line break
///
/// Backticks inside comments and quoted strings are ignored.
#[allow(clippy::cognitive_complexity)]
fn has_multiline_template(code: &str) -> bool {
    let mut chars = code.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '/' if chars.peek() == Some(&'/') => {
                for inner in chars.by_ref() {
                    if inner == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = ' ';
                for inner in chars.by_ref() {
                    if previous == '*' && inner == '/' {
                        break;
                    }
                    previous = inner;
                }
            }
            '"' | '\'' => {
                while let Some(inner) = chars.next() {
                    match inner {
                        '\\' => {
                            chars.next();
                        }
                        '\n' => break,
                        _ if inner == c => break,
                        _ => {}
                    }
                }
            }
            '`' => {
                while let Some(inner) = chars.next() {
                    match inner {
                        '\\' => {
                            chars.next();
                        }
                        '\n' => return true,
                        '`' => break,
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
    false
}
