//! Hooks section: before and after lifecycle handlers

use super::{display_name, logic_or};
use crate::codegen::{quote, Expr, ObjectLit, Stmt};
use crate::model::{Hook, HookGuard, HookTiming};

/// Render the `hooks` section, or `None` when no hook resolves to a guard
///
/// Each phase list only appears when it has entries. Entries keep their
/// configured order within a phase.
#[must_use]
pub fn hooks_section(hooks: &[Hook]) -> Option<Expr> {
    let before = phase(hooks, HookTiming::Before);
    let after = phase(hooks, HookTiming::After);
    if before.is_empty() && after.is_empty() {
        return None;
    }

    let non_empty = |entries: Vec<Expr>| (!entries.is_empty()).then_some(Expr::Array(entries));
    Some(
        ObjectLit::new()
            .prop_opt("before", non_empty(before))
            .prop_opt("after", non_empty(after))
            .into(),
    )
}

fn phase(hooks: &[Hook], timing: HookTiming) -> Vec<Expr> {
    hooks
        .iter()
        .filter(|hook| hook.timing == timing)
        .filter_map(hook_entry)
        .collect()
}

fn hook_entry(hook: &Hook) -> Option<Expr> {
    let matcher = match hook.guard()? {
        HookGuard::Matcher(expression) => Expr::raw(expression.trim()),
        HookGuard::StartsWith(endpoint) => {
            Expr::raw(format!("context.path.startsWith({})", quote(endpoint)))
        }
    };

    let handler = match hook.timing {
        HookTiming::Before => Expr::call(
            "createAuthMiddleware",
            vec![Expr::async_block(&["ctx"], before_body(hook))],
        ),
        HookTiming::After => Expr::async_block(&["ctx"], after_body(hook)),
    };

    Some(
        ObjectLit::new()
            .with_comment(display_name(&hook.name, "Unnamed Hook"))
            .prop("matcher", Expr::arrow(&["context"], matcher))
            .prop("handler", handler)
            .into(),
    )
}

fn before_body(hook: &Hook) -> Vec<Stmt> {
    let mut body = logic_or(&hook.logic, || {
        vec![
            Stmt::Comment(format!("{} logic", display_name(&hook.name, "Hook"))),
            Stmt::Verbatim(r#"console.log("Hook triggered for:", ctx.path);"#.to_string()),
            Stmt::Blank,
            Stmt::Comment("Add your custom logic here".to_string()),
            Stmt::Comment("const { data } = ctx.body;".to_string()),
        ]
    });
    body.push(Stmt::Blank);
    body.push(Stmt::Return(Expr::raw("{ context: ctx }")));
    body
}

fn after_body(hook: &Hook) -> Vec<Stmt> {
    let mut body = logic_or(&hook.logic, || {
        vec![
            Stmt::Comment(format!("{} logic", display_name(&hook.name, "Hook"))),
            Stmt::Verbatim(
                r#"console.log("After hook triggered for:", ctx.path);"#.to_string(),
            ),
            Stmt::Blank,
            Stmt::Comment("Add your custom logic here".to_string()),
        ]
    });
    body.extend([
        Stmt::Blank,
        Stmt::Comment("Return modified response if needed".to_string()),
        Stmt::Comment(r#"return ctx.json({ message: "Modified response" });"#.to_string()),
    ]);
    body
}
