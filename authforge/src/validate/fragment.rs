//! Pluggable checks for opaque code fragments
//!
//! Hook matchers and handler bodies are emitted exactly as written. A
//! [`FragmentCheck`] gets one look at each of them before generation and
//! may refuse it. Nothing here parses TypeScript.

use std::fmt;

/// What an opaque fragment is used as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Boolean guard expression of a hook
    Matcher,
    /// Handler body of a hook or middleware
    Body,
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matcher => write!(f, "matcher"),
            Self::Body => write!(f, "logic"),
        }
    }
}

/// A fragment presented to a checker
#[derive(Debug, Clone, Copy)]
pub struct Fragment<'a> {
    /// Which entry owns the fragment, e.g. `before hook 'Welcome'`
    pub owner: &'a str,
    /// How the fragment is used
    pub kind: FragmentKind,
    /// The fragment text as configured
    pub code: &'a str,
}

/// Decides whether an opaque fragment may be emitted
pub trait FragmentCheck: fmt::Debug + Send + Sync {
    /// Accept the fragment, or explain why it is refused
    ///
    /// # Errors
    ///
    /// Returns the reason the fragment cannot be emitted.
    fn check(&self, fragment: &Fragment<'_>) -> Result<(), String>;
}

/// Accepts every fragment
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl FragmentCheck for AcceptAll {
    fn check(&self, _fragment: &Fragment<'_>) -> Result<(), String> {
        Ok(())
    }
}

/// Requires `()`, `[]` and `{}` to be balanced
///
/// String literals, template literals and comments are skipped. Regex
/// literals are not recognised, so a bracket inside one counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancedDelimiters;

#[derive(Clone, Copy)]
enum Scan {
    Code,
    Quoted(char),
    Template,
    LineComment,
    BlockComment,
}

impl FragmentCheck for BalancedDelimiters {
    #[allow(clippy::cognitive_complexity)]
    fn check(&self, fragment: &Fragment<'_>) -> Result<(), String> {
        let mut open: Vec<(char, usize)> = Vec::new();
        let mut state = Scan::Code;
        let mut line = 1;
        let mut chars = fragment.code.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\n' {
                line += 1;
            }
            state = match state {
                Scan::Code => match c {
                    '\'' | '"' => Scan::Quoted(c),
                    '`' => Scan::Template,
                    '/' if chars.peek() == Some(&'/') => {
                        chars.next();
                        Scan::LineComment
                    }
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        Scan::BlockComment
                    }
                    '(' | '[' | '{' => {
                        open.push((c, line));
                        Scan::Code
                    }
                    ')' | ']' | '}' => {
                        match open.pop() {
                            Some((opener, _)) if closer(opener) == c => {}
                            Some((opener, opened)) => {
                                return Err(format!(
                                    "'{c}' on line {line} does not close '{opener}' from line {opened}"
                                ));
                            }
                            None => return Err(format!("unexpected '{c}' on line {line}")),
                        }
                        Scan::Code
                    }
                    _ => Scan::Code,
                },
                Scan::Quoted(quote) => match c {
                    '\\' => {
                        chars.next();
                        state
                    }
                    '\n' => return Err(format!("unterminated string literal on line {}", line - 1)),
                    _ if c == quote => Scan::Code,
                    _ => state,
                },
                Scan::Template => match c {
                    '\\' => {
                        if chars.next() == Some('\n') {
                            line += 1;
                        }
                        state
                    }
                    '`' => Scan::Code,
                    _ => state,
                },
                Scan::LineComment if c == '\n' => Scan::Code,
                Scan::BlockComment if c == '*' && chars.peek() == Some(&'/') => {
                    chars.next();
                    Scan::Code
                }
                Scan::LineComment | Scan::BlockComment => state,
            };
        }

        match state {
            Scan::Quoted(_) => return Err("unterminated string literal".to_string()),
            Scan::Template => return Err("unterminated template literal".to_string()),
            Scan::BlockComment => return Err("unterminated block comment".to_string()),
            Scan::Code | Scan::LineComment => {}
        }
        open.pop().map_or(Ok(()), |(opener, opened)| {
            Err(format!("'{opener}' from line {opened} is never closed"))
        })
    }
}

const fn closer(opener: char) -> char {
    match opener {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}
