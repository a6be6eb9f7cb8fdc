//! Naming conventions for generated code
//!
//! The plugin name is free-form text. Two forms are derived from it,
//! independently and always from the raw name:
//!
//! - a `camelCase` symbol used for the exported plugin function
//! - a kebab-case path segment used for the module location
//!   (`./<kebab>-plugin` and `./<kebab>-plugin/client`)
//!
//! The transforms are not inverses of each other.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-_\s]+(.)?").expect("separator pattern is valid"));

static LOWER_UPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])([A-Z])").expect("case boundary pattern is valid"));

static ACRONYM_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z])([A-Z][a-z])").expect("acronym boundary pattern is valid"));

static UNDERSCORE_OR_SPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[_\s]+").expect("whitespace pattern is valid"));

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[$_\p{L}][$_\p{L}\p{Nd}]*$").expect("identifier pattern is valid")
});

/// Words that cannot be used as binding names in an ES module
const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Convert a name to `camelCase`
///
/// Every run of `-`, `_` or whitespace is removed and the character that
/// follows it is upper-cased. Nothing else changes, including the case of
/// the first character.
///
/// # Examples
///
/// ```
/// use authforge::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("birthday plugin"), "birthdayPlugin");
/// assert_eq!(to_camel_case("two-factor_auth"), "twoFactorAuth");
/// assert_eq!(to_camel_case("Admin"), "Admin");
/// ```
#[must_use]
pub fn to_camel_case(input: &str) -> String {
    SEPARATOR_RUN
        .replace_all(input, |caps: &Captures<'_>| {
            caps.get(1)
                .map_or_else(String::new, |next| next.as_str().to_uppercase())
        })
        .into_owned()
}

/// Convert a name to kebab-case
///
/// A `-` is inserted at every lower-to-upper letter boundary and where an
/// upper-case run ends in a capitalised word, the result is lower-cased,
/// and runs of `_` or whitespace collapse into a single `-`.
///
/// # Examples
///
/// ```
/// use authforge::naming::to_kebab_case;
///
/// assert_eq!(to_kebab_case("birthdayPlugin"), "birthday-plugin");
/// assert_eq!(to_kebab_case("TOSAgreement"), "tos-agreement");
/// assert_eq!(to_kebab_case("birthday plugin"), "birthday-plugin");
/// ```
#[must_use]
pub fn to_kebab_case(input: &str) -> String {
    let split = LOWER_UPPER.replace_all(input, "$1-$2");
    let split = ACRONYM_END.replace_all(&split, "$1-$2");
    let lowered = split.to_lowercase();
    UNDERSCORE_OR_SPACE_RUN.replace_all(&lowered, "-").into_owned()
}

/// Upper-case the first character and keep the rest
///
/// # Examples
///
/// ```
/// use authforge::naming::capitalize;
///
/// assert_eq!(capitalize("birthdayPlugin"), "BirthdayPlugin");
/// assert_eq!(capitalize(""), "");
/// ```
#[must_use]
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Whether `name` can be used as a binding or property name without quoting
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Whether `name` is an identifier that is also not a reserved word
#[must_use]
pub fn is_binding_name(name: &str) -> bool {
    is_identifier(name) && !RESERVED_WORDS.contains(&name)
}

/// All names derived from a plugin name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginNames {
    /// `camelCase` symbol of the server plugin export (also the plugin id)
    pub symbol: String,
    /// Symbol of the client plugin export
    pub client_symbol: String,
    /// Type alias naming the server plugin factory in the client module
    pub type_alias: String,
    /// kebab-case path segment
    pub kebab: String,
}

impl PluginNames {
    /// Derive every name from the raw plugin name
    #[must_use]
    pub fn derive(raw: &str) -> Self {
        let symbol = to_camel_case(raw);
        Self {
            client_symbol: format!("{symbol}Client"),
            type_alias: format!("{}Plugin", capitalize(&symbol)),
            kebab: to_kebab_case(raw),
            symbol,
        }
    }

    /// Import path of the server plugin module
    #[must_use]
    pub fn server_import_path(&self) -> String {
        format!("./{}-plugin", self.kebab)
    }

    /// Import path of the client plugin module
    #[must_use]
    pub fn client_import_path(&self) -> String {
        format!("./{}-plugin/client", self.kebab)
    }

    /// Directory the plugin modules are expected to live in
    #[must_use]
    pub fn module_dir(&self) -> String {
        format!("{}-plugin", self.kebab)
    }
}
