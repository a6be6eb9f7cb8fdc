//! Section emitters
//!
//! Each emitter turns one part of a [`PluginConfig`](crate::PluginConfig)
//! into an expression for the plugin body, or `None` when the section has
//! nothing to show and must be left out entirely. Draft entries (no name,
//! no path, nothing to match on) are skipped here; malformed values are the
//! validator's job.

mod hooks;
mod middleware;
mod rate_limit;
mod schema;

pub use hooks::hooks_section;
pub use middleware::middlewares_section;
pub use rate_limit::rate_limit_section;
pub use schema::schema_section;

use crate::codegen::Stmt;

/// `name`, or `fallback` when the name is blank
fn display_name<'a>(name: &'a str, fallback: &'a str) -> &'a str {
    let name = name.trim();
    if name.is_empty() {
        fallback
    } else {
        name
    }
}

/// The user's handler body, or the placeholder when it is blank
fn logic_or(logic: &str, placeholder: impl FnOnce() -> Vec<Stmt>) -> Vec<Stmt> {
    if logic.trim().is_empty() {
        placeholder()
    } else {
        vec![Stmt::Verbatim(logic.to_string())]
    }
}
