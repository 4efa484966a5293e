use std::borrow::Cow;

use itertools::Itertools;

use crate::SEPARATOR;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("`{parser}.{attribute}` is unsupported")]
pub struct UnsupportedOperation {
    parser: &'static str,
    attribute: &'static str,
}

impl UnsupportedOperation {
    pub fn new(parser: &'static str, attribute: &'static str) -> Self {
        Self { parser, attribute }
    }

    pub fn attribute(&self) -> &'static str {
        self.attribute
    }
}

/// Low-level path manipulation.
///
/// Every primitive is optional:
/// a parser only implements what it supports
/// and the rest report `UnsupportedOperation`.
pub trait Parser {
    /// Name used in error messages.
    fn name(&self) -> &'static str;

    /// The character separating path components.
    fn sep(&self) -> Result<char, UnsupportedOperation> {
        Err(UnsupportedOperation::new(self.name(), "sep"))
    }

    /// Join path segments.
    fn join(&self, _segments: &[&str]) -> Result<String, UnsupportedOperation> {
        Err(UnsupportedOperation::new(self.name(), "join()"))
    }

    /// Split a path into everything before the final separator
    /// and everything after.
    fn split<'a>(&self, _path: &'a str) -> Result<(&'a str, &'a str), UnsupportedOperation> {
        Err(UnsupportedOperation::new(self.name(), "split()"))
    }

    /// Split a path into a drive and everything after it.
    fn splitdrive<'a>(&self, _path: &'a str) -> Result<(&'a str, &'a str), UnsupportedOperation> {
        Err(UnsupportedOperation::new(self.name(), "splitdrive()"))
    }

    /// Normalize the case of a path.
    fn normcase<'a>(&self, _path: &'a str) -> Result<Cow<'a, str>, UnsupportedOperation> {
        Err(UnsupportedOperation::new(self.name(), "normcase()"))
    }

    /// Whether a path is anchored at the separator.
    fn isabs(&self, _path: &str) -> Result<bool, UnsupportedOperation> {
        Err(UnsupportedOperation::new(self.name(), "isabs()"))
    }
}

/// Parser for paths delimited by a single separator character.
///
/// Paths are case-sensitive and have no drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeparatorParser {
    sep: char,
}

impl SeparatorParser {
    pub const DEFAULT: SeparatorParser = SeparatorParser::new(SEPARATOR);

    pub const fn new(sep: char) -> Self {
        Self { sep }
    }

    pub fn sep(&self) -> char {
        self.sep
    }

    /// Remove every leading and trailing separator.
    pub fn strip<'a>(&self, path: &'a str) -> &'a str {
        path.trim_matches(self.sep)
    }

    /// Collapse runs of separators
    /// and remove leading and trailing separators.
    pub fn normalize(&self, path: &str) -> String {
        let mut normalized = String::with_capacity(path.len());
        let mut last_was_sep = false;
        for c in self.strip(path).chars() {
            let is_sep = c == self.sep;
            if !(is_sep && last_was_sep) {
                normalized.push(c);
            }
            last_was_sep = is_sep;
        }
        normalized
    }

    /// Join path segments.
    ///
    /// Each segment is stripped of leading and trailing separators,
    /// so empty segments contribute nothing
    /// and the result is never anchored.
    pub fn join<I, S>(&self, segments: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sep = self.sep.to_string();
        let joined = segments
            .into_iter()
            .map(|segment| self.strip(segment.as_ref()).to_owned())
            .join(&sep);
        self.normalize(&joined)
    }

    /// Split `path` into `(head, tail)`.
    ///
    /// A path with one separator at its start keeps that separator as `head`,
    /// so repeated splitting never loses the anchor.
    pub fn split<'a>(&self, path: &'a str) -> (&'a str, &'a str) {
        match path.rfind(self.sep) {
            None => ("", path),
            Some(0) => path.split_at(self.sep.len_utf8()),
            Some(i) => (&path[..i], &path[(i + self.sep.len_utf8())..]),
        }
    }

    pub fn splitdrive<'a>(&self, path: &'a str) -> (&'a str, &'a str) {
        ("", path)
    }

    pub fn normcase<'a>(&self, path: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(path)
    }

    pub fn isabs(&self, path: &str) -> bool {
        path.starts_with(self.sep)
    }
}

impl Default for SeparatorParser {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Parser for SeparatorParser {
    fn name(&self) -> &'static str {
        "SeparatorParser"
    }

    fn sep(&self) -> Result<char, UnsupportedOperation> {
        Ok(SeparatorParser::sep(self))
    }

    fn join(&self, segments: &[&str]) -> Result<String, UnsupportedOperation> {
        Ok(SeparatorParser::join(self, segments))
    }

    fn split<'a>(&self, path: &'a str) -> Result<(&'a str, &'a str), UnsupportedOperation> {
        Ok(SeparatorParser::split(self, path))
    }

    fn splitdrive<'a>(&self, path: &'a str) -> Result<(&'a str, &'a str), UnsupportedOperation> {
        Ok(SeparatorParser::splitdrive(self, path))
    }

    fn normcase<'a>(&self, path: &'a str) -> Result<Cow<'a, str>, UnsupportedOperation> {
        Ok(SeparatorParser::normcase(self, path))
    }

    fn isabs(&self, path: &str) -> Result<bool, UnsupportedOperation> {
        Ok(SeparatorParser::isabs(self, path))
    }
}
