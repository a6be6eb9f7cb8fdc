//! Error types for plugin generation and configuration editing

use thiserror::Error;

/// Result alias used throughout the generation core
pub type Result<T, E = GenerateError> = std::result::Result<T, E>;

/// Errors that stop a generation run
///
/// Generation fails fast: the first problem found (in configuration order)
/// is returned and no partially built source is produced.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The plugin name is blank
    #[error("plugin name must not be empty")]
    EmptyPluginName,

    /// A name that becomes a source identifier is not a valid identifier
    #[error("{context} '{name}' is not a valid identifier")]
    InvalidIdentifier {
        /// Where the name is used (e.g. "plugin name", "table name")
        context: String,
        /// The offending name as derived from the configuration
        name: String,
    },

    /// A value destined for a string literal would break out of it
    #[error("{context} contains a quote, backslash or line break: {value:?}")]
    UnterminatedLiteral {
        /// Where the value is used
        context: String,
        /// The offending value
        value: String,
    },

    /// Two entries would become the same object key
    #[error("{context} '{name}' is declared more than once")]
    DuplicateName {
        /// Which kind of entry is repeated (e.g. "table")
        context: String,
        /// The repeated name
        name: String,
    },

    /// A table extends a core table that does not exist
    #[error("'{name}' is not a core table (expected user, session, account or verification)")]
    UnknownCoreTable {
        /// The table name as configured
        name: String,
    },

    /// A rate limit carries a zero limit or window
    #[error("rate limit '{name}': {reason}")]
    InvalidRateLimit {
        /// Display name of the rate limit
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// The fragment checker refused an opaque code fragment
    #[error("{owner}: {reason}")]
    RejectedFragment {
        /// Which entry owns the fragment (e.g. "before hook 'welcome' logic")
        owner: String,
        /// Reason reported by the checker
        reason: String,
    },

    /// A module frame failed to render
    #[error("failed to render template: {0}")]
    Template(#[from] handlebars::RenderError),

    /// A module frame failed to register
    #[error("failed to register template: {0}")]
    TemplateRegistration(#[from] Box<handlebars::TemplateError>),
}

impl GenerateError {
    /// Create an invalid identifier error
    #[must_use]
    pub fn invalid_identifier(context: impl Into<String>, name: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            context: context.into(),
            name: name.into(),
        }
    }

    /// Create a duplicate name error
    #[must_use]
    pub fn duplicate_name(context: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            context: context.into(),
            name: name.into(),
        }
    }

    /// Create an unterminated literal error
    #[must_use]
    pub fn unterminated_literal(context: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnterminatedLiteral {
            context: context.into(),
            value: value.into(),
        }
    }
}

/// Kind of entity addressed by an editor operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A schema table
    Table,
    /// A field inside a schema table
    Field,
    /// A lifecycle hook
    Hook,
    /// A path-scoped middleware
    Middleware,
    /// A path-scoped rate limit
    RateLimit,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Table => "table",
            Self::Field => "field",
            Self::Hook => "hook",
            Self::Middleware => "middleware",
            Self::RateLimit => "rate limit",
        };
        f.write_str(label)
    }
}

/// Errors returned by [`crate::editor::ConfigEditor`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// No entity with the given id exists
    #[error("no {kind} with id '{id}'")]
    NotFound {
        /// Kind of entity that was looked up
        kind: EntityKind,
        /// The id that was not found
        id: String,
    },
}

impl EditError {
    pub(crate) fn not_found(kind: EntityKind, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
