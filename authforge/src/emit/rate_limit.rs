//! Rate-limit section

use super::display_name;
use crate::codegen::{quote, Expr, ObjectLit};
use crate::model::{PathType, RateLimit};

/// Render the `rateLimit` section, or `None` when no rate limit has a path
#[must_use]
pub fn rate_limit_section(limits: &[RateLimit]) -> Option<Expr> {
    let entries: Vec<Expr> = limits
        .iter()
        .filter(|limit| limit.has_path())
        .map(rate_limit_entry)
        .collect();
    (!entries.is_empty()).then_some(Expr::Array(entries))
}

fn rate_limit_entry(limit: &RateLimit) -> Expr {
    let test = match limit.path_type {
        PathType::Exact => format!("path === {}", quote(&limit.path)),
        PathType::Pattern => format!("path.startsWith({})", quote(&limit.path)),
    };

    ObjectLit::new()
        .with_comment(display_name(&limit.name, "Unnamed Rate Limit"))
        .prop("pathMatcher", Expr::arrow(&["path"], Expr::raw(test)))
        .prop("limit", Expr::Int(limit.limit.into()))
        .prop("window", Expr::Int(limit.window.into()))
        .prop_opt("key", limit.custom_key().map(Expr::str))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::Emitter;
    use pretty_assertions::assert_eq;

    fn limit(path: &str, path_type: PathType) -> RateLimit {
        RateLimit {
            path: path.to_string(),
            path_type,
            ..RateLimit::draft("r1")
        }
    }

    #[test]
    fn test_exact_path() {
        let rendered = Emitter::render(&rate_limit_section(&[limit("/sign-in", PathType::Exact)]).unwrap(), 0);
        assert_eq!(
            rendered,
            r#"[
  {
    // Unnamed Rate Limit
    pathMatcher: (path) => path === "/sign-in",
    limit: 10,
    window: 60,
  },
]"#
        );
    }

    #[test]
    fn test_pattern_path_and_key() {
        let mut api = limit("/api/", PathType::Pattern);
        api.name = "API".to_string();
        api.limit = 100;
        api.window = 3600;
        api.key = Some("ip".to_string());

        let rendered = Emitter::render(&rate_limit_section(&[api]).unwrap(), 0);
        assert!(rendered.contains("// API\n"));
        assert!(rendered.contains("pathMatcher: (path) => path.startsWith(\"/api/\"),"));
        assert!(rendered.contains("limit: 100,"));
        assert!(rendered.contains("window: 3600,"));
        assert!(rendered.contains("key: \"ip\","));
    }

    #[test]
    fn test_empty_key_is_omitted() {
        let mut keyed = limit("/x", PathType::Exact);
        keyed.key = Some(String::new());
        let rendered = Emitter::render(&rate_limit_section(&[keyed]).unwrap(), 0);
        assert!(!rendered.contains("key:"));
    }

    #[test]
    fn test_drafts_are_skipped() {
        assert_eq!(rate_limit_section(&[RateLimit::draft("r1")]), None);
    }
}
