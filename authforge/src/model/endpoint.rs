//! Hooks, middlewares and rate limits

use serde::{Deserialize, Serialize};

/// Starter body given to new hooks and middlewares
pub const STARTER_LOGIC: &str = "const context = ctx;\n\n";

/// Endpoint matched by `sign-up` hooks
pub const SIGN_UP_ENDPOINT: &str = "/sign-up/email";

/// Endpoint matched by `sign-in` hooks
pub const SIGN_IN_ENDPOINT: &str = "/sign-in/email";

/// Whether a hook runs before or after the endpoint handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookTiming {
    /// Pre-processing: the handler returns a context object
    #[default]
    Before,
    /// Post-processing: the handler may replace the response
    After,
}

/// Lifecycle action a hook is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookAction {
    /// Email sign-up
    #[default]
    SignUp,
    /// Email sign-in
    SignIn,
    /// Any endpoint given by `custom_path`
    Custom,
}

/// How a path is compared against the request path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    /// Exact equality
    #[default]
    Exact,
    /// Prefix match
    Pattern,
}

/// Logic run before or after a lifecycle action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hook {
    /// Caller-assigned id
    pub id: String,
    /// Display name, emitted as a comment
    #[serde(default)]
    pub name: String,
    /// Before or after
    #[serde(default)]
    pub timing: HookTiming,
    /// Lifecycle action
    #[serde(default)]
    pub action: HookAction,
    /// Endpoint for [`HookAction::Custom`]
    #[serde(default)]
    pub custom_path: String,
    /// Raw boolean expression replacing the default path guard
    #[serde(default)]
    pub matcher: String,
    /// Opaque handler body
    #[serde(default)]
    pub logic: String,
}

/// Guard deciding which requests a hook runs for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookGuard<'a> {
    /// User-supplied boolean expression, used verbatim
    Matcher(&'a str),
    /// `context.path.startsWith(endpoint)`
    StartsWith(&'a str),
}

impl Hook {
    /// A hook as created by "add hook"
    #[must_use]
    pub fn draft(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            timing: HookTiming::Before,
            action: HookAction::SignUp,
            custom_path: String::new(),
            matcher: String::new(),
            logic: STARTER_LOGIC.to_string(),
        }
    }

    /// Endpoint derived from the action
    #[must_use]
    pub fn endpoint(&self) -> &str {
        match self.action {
            HookAction::SignUp => SIGN_UP_ENDPOINT,
            HookAction::SignIn => SIGN_IN_ENDPOINT,
            HookAction::Custom => &self.custom_path,
        }
    }

    /// Resolve the guard, or `None` for a custom hook with nothing to match on
    #[must_use]
    pub fn guard(&self) -> Option<HookGuard<'_>> {
        if !self.matcher.trim().is_empty() {
            return Some(HookGuard::Matcher(&self.matcher));
        }
        let endpoint = self.endpoint();
        (!endpoint.trim().is_empty()).then_some(HookGuard::StartsWith(endpoint))
    }
}

/// Logic run for every request matching a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Middleware {
    /// Caller-assigned id
    pub id: String,
    /// Display name, emitted as a comment
    #[serde(default)]
    pub name: String,
    /// Request path; blank middlewares are drafts and are not emitted
    #[serde(default)]
    pub path: String,
    /// Kept for parity with rate limits; middlewares are always path-keyed
    #[serde(default)]
    pub path_type: PathType,
    /// Opaque handler body
    #[serde(default)]
    pub logic: String,
}

impl Middleware {
    /// A middleware as created by "add middleware"
    #[must_use]
    pub fn draft(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            path: String::new(),
            path_type: PathType::Exact,
            logic: STARTER_LOGIC.to_string(),
        }
    }

    /// Whether the middleware carries a path and will be emitted
    #[must_use]
    pub fn has_path(&self) -> bool {
        !self.path.trim().is_empty()
    }
}

/// Request-count ceiling over a time window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    /// Caller-assigned id
    pub id: String,
    /// Display name, emitted as a comment
    #[serde(default)]
    pub name: String,
    /// Request path; blank rate limits are drafts and are not emitted
    #[serde(default)]
    pub path: String,
    /// Exact or prefix match
    #[serde(default)]
    pub path_type: PathType,
    /// Maximum number of requests per window
    pub limit: u32,
    /// Window length in seconds
    pub window: u32,
    /// Optional custom rate-limit key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl RateLimit {
    /// Default request ceiling
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Default window in seconds
    pub const DEFAULT_WINDOW: u32 = 60;

    /// A rate limit as created by "add rate limit"
    #[must_use]
    pub fn draft(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            path: String::new(),
            path_type: PathType::Exact,
            limit: Self::DEFAULT_LIMIT,
            window: Self::DEFAULT_WINDOW,
            key: None,
        }
    }

    /// Whether the rate limit carries a path and will be emitted
    #[must_use]
    pub fn has_path(&self) -> bool {
        !self.path.trim().is_empty()
    }

    /// The custom key, if one is set
    #[must_use]
    pub fn custom_key(&self) -> Option<&str> {
        self.key.as_deref().filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_guard_defaults() {
        let mut hook = Hook::draft("h1");
        assert_eq!(hook.guard(), Some(HookGuard::StartsWith("/sign-up/email")));

        hook.action = HookAction::SignIn;
        assert_eq!(hook.guard(), Some(HookGuard::StartsWith("/sign-in/email")));
    }

    #[test]
    fn test_hook_matcher_overrides_endpoint() {
        let mut hook = Hook::draft("h1");
        hook.matcher = "context.path === \"/x\"".to_string();
        assert_eq!(hook.guard(), Some(HookGuard::Matcher("context.path === \"/x\"")));
    }

    #[test]
    fn test_custom_hook_without_path_has_no_guard() {
        let mut hook = Hook::draft("h1");
        hook.action = HookAction::Custom;
        assert_eq!(hook.guard(), None);

        hook.custom_path = "/update-user".to_string();
        assert_eq!(hook.guard(), Some(HookGuard::StartsWith("/update-user")));
    }

    #[test]
    fn test_hook_action_serde_names() {
        let action: HookAction = serde_json::from_str("\"sign-up\"").unwrap();
        assert_eq!(action, HookAction::SignUp);
        assert_eq!(serde_json::to_string(&HookAction::Custom).unwrap(), "\"custom\"");
    }

    #[test]
    fn test_rate_limit_defaults() {
        let limit = RateLimit::draft("r1");
        assert_eq!(limit.limit, 10);
        assert_eq!(limit.window, 60);
        assert!(!limit.has_path());
        assert_eq!(limit.custom_key(), None);
    }
}
