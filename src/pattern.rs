use std::{convert::Infallible, fmt};

use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("Invalid pattern: glob patterns cannot be empty.")]
    Empty,
    #[error("Invalid pattern: {0}")]
    Glob(#[from] globset::Error),
}

impl From<Infallible> for PatternError {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}

/// A pattern matched against the whole string form of a path.
#[derive(Clone, Debug)]
pub enum Pattern {
    Glob(Glob),
    /// Matches if the expression matches at the start of the path.
    Regex(Regex),
}

impl Pattern {
    pub fn is_match(&self, s: &str) -> bool {
        match self {
            Pattern::Glob(glob) => glob.is_match(s),
            Pattern::Regex(regex) => regex.find(s).is_some_and(|m| m.start() == 0),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Glob(glob) => glob.as_str(),
            Pattern::Regex(regex) => regex.as_str(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Pattern {
    type Error = PatternError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Glob::new(value).map(Pattern::Glob)
    }
}

impl TryFrom<&String> for Pattern {
    type Error = PatternError;

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Glob> for Pattern {
    fn from(value: Glob) -> Self {
        Pattern::Glob(value)
    }
}

impl From<Regex> for Pattern {
    fn from(value: Regex) -> Self {
        Pattern::Regex(value)
    }
}

impl From<&Regex> for Pattern {
    fn from(value: &Regex) -> Self {
        Pattern::Regex(value.clone())
    }
}

impl From<&Pattern> for Pattern {
    fn from(value: &Pattern) -> Self {
        value.clone()
    }
}

/// A shell-style wildcard pattern.
///
/// `*` matches any run of characters,
/// including separators and the empty run.
/// `?` matches one character.
/// `[abc]`, `[a-z]`, and `[!abc]` match one character in,
/// or with `!` not in,
/// the class.
/// A `]` or `-` first in a class is literal,
/// as are braces
/// and a `[` without a closing `]`.
/// Matching is case-sensitive.
#[derive(Clone, Debug)]
pub struct Glob {
    source: String,
    matcher: GlobMatcher,
}

impl Glob {
    pub fn new<S>(pattern: S) -> Result<Glob, PatternError>
    where
        S: Into<String>,
    {
        let source = pattern.into();
        if source.is_empty() {
            return Err(PatternError::Empty);
        }
        let matcher = GlobBuilder::new(&translate(&source))
            .literal_separator(false)
            .backslash_escape(false)
            .build()?
            .compile_matcher();
        Ok(Glob { source, matcher })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, s: &str) -> bool {
        self.matcher.is_match(s)
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Rewrite `pattern` into `globset` syntax
/// without changing what it matches.
fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        match c {
            // Consecutive stars match the same strings as one.
            '*' => {
                if !out.ends_with('*') {
                    out.push('*')
                }
            }
            '[' => match class_len(rest) {
                Some(len) => {
                    push_class(&mut out, &rest[..len]);
                    rest = &rest[len..];
                }
                None => out.push_str("[[]"),
            },
            '{' => out.push_str("[{]"),
            '}' => out.push_str("[}]"),
            c => out.push(c),
        }
    }
    out
}

/// Length of the class following a `[`,
/// including the closing `]`.
fn class_len(rest: &str) -> Option<usize> {
    let mut start = usize::from(rest.starts_with('!'));
    if rest[start..].starts_with(']') {
        start += 1;
    }
    rest[start..].find(']').map(|end| start + end + 1)
}

/// `globset` reads a leading `^` as negation.
fn push_class(out: &mut String, class: &str) {
    match class.strip_prefix('^') {
        Some("]") => out.push('^'),
        Some(tail) => {
            out.push('[');
            out.push_str(&tail[..tail.len() - 1]);
            out.push_str("^]");
        }
        None => {
            out.push('[');
            out.push_str(class);
        }
    }
}
