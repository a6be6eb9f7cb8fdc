//! Middlewares section

use super::{display_name, logic_or};
use crate::codegen::{Expr, ObjectLit, Stmt};
use crate::model::Middleware;

/// Render the `middlewares` section, or `None` when no middleware has a path
#[must_use]
pub fn middlewares_section(middlewares: &[Middleware]) -> Option<Expr> {
    let entries: Vec<Expr> = middlewares
        .iter()
        .filter(|middleware| middleware.has_path())
        .map(middleware_entry)
        .collect();
    (!entries.is_empty()).then_some(Expr::Array(entries))
}

fn middleware_entry(middleware: &Middleware) -> Expr {
    let body = logic_or(&middleware.logic, || placeholder(&middleware.name));
    ObjectLit::new()
        .with_comment(display_name(&middleware.name, "Unnamed Middleware"))
        .prop("path", Expr::str(&middleware.path))
        .prop(
            "middleware",
            Expr::call("createAuthMiddleware", vec![Expr::async_block(&["ctx"], body)]),
        )
        .into()
}

fn placeholder(name: &str) -> Vec<Stmt> {
    let comment = |text: &str| Stmt::Comment(text.to_string());
    vec![
        Stmt::Comment(format!("{} logic", display_name(name, "Middleware"))),
        Stmt::Verbatim(r#"console.log("Middleware triggered for:", ctx.path);"#.to_string()),
        Stmt::Blank,
        comment("Add your middleware logic here"),
        comment("Example: Check authorization"),
        comment(r#"const authHeader = ctx.headers.get("authorization");"#),
        comment("if (!authHeader) {"),
        comment(r#"  throw new APIError("UNAUTHORIZED", { message: "Missing authorization header" });"#),
        comment("}"),
    ]
}
