mod member_index;
mod relative;

use std::{
    borrow::Borrow,
    convert::Infallible,
    ops::{Deref, Div},
    str::FromStr,
};

use derive_more::Display;
use ref_cast::{ref_cast_custom, RefCastCustom};
use smallvec::SmallVec;

use crate::{
    parser::SeparatorParser,
    pattern::{Pattern, PatternError},
    SEPARATOR,
};

pub use self::relative::RelativeToError;

const PARSER: SeparatorParser = SeparatorParser::DEFAULT;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Invalid name: `{0}`. Names cannot contain `{SEPARATOR}`.")]
pub struct NameError(String);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` has an empty name")]
pub struct EmptyNameError(Path);

/// A normalized, separator-delimited tag path.
///
/// Paths never contain a run of separators
/// and never end with a separator,
/// except for the anchor itself.
#[derive(Clone, Debug, Default, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path(String);

#[derive(Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, RefCastCustom)]
#[repr(transparent)]
pub struct PathRef(str);

impl Path {
    /// Join `segments` into a path.
    ///
    /// Separators are stripped from both ends of every segment,
    /// so the result is never anchored.
    pub fn new<I, S>(segments: I) -> Path
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Path(PARSER.join(segments))
    }

    /// The path consisting of only the separator.
    pub fn anchor() -> Path {
        Path(SEPARATOR.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl PathRef {
    #[ref_cast_custom]
    const fn new(s: &str) -> &Self;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_absolute(&self) -> bool {
        PARSER.isabs(&self.0)
    }

    /// The final component, if any.
    pub fn name(&self) -> &str {
        PARSER.split(&self.0).1
    }

    /// The final component without its member index.
    pub fn stem(&self) -> &str {
        let name = self.name();
        member_index::split(name).map_or(name, |(stem, _)| stem)
    }

    /// The `N` in a final component ending in `[N]`.
    pub fn member_index(&self) -> Option<usize> {
        member_index::split(self.name()).map(|(_, index)| index)
    }

    /// The path without its final component.
    ///
    /// The anchor and the empty path are their own parents.
    pub fn parent(&self) -> &PathRef {
        PathRef::new(PARSER.split(&self.0).0)
    }

    /// Every ancestor,
    /// from the immediate parent
    /// to the anchor or empty path.
    pub fn parents(&self) -> Parents<'_> {
        Parents { path: &self.0 }
    }

    /// Components of the path,
    /// starting with the anchor if the path has one.
    pub fn parts(&self) -> Vec<&str> {
        let (anchor, names) = self.stack();
        (!anchor.is_empty())
            .then_some(anchor)
            .into_iter()
            .chain(names.into_iter().rev())
            .collect()
    }

    /// Split into the anchor (or empty string)
    /// and the names following it,
    /// last name first.
    pub(crate) fn stack(&self) -> (&str, SmallVec<[&str; 8]>) {
        let mut path = self.as_str();
        let mut names = SmallVec::new();
        loop {
            let (parent, name) = PARSER.split(path);
            if parent == path {
                return (path, names);
            }
            names.push(name);
            path = parent;
        }
    }

    pub fn join<S>(&self, segment: S) -> Path
    where
        S: AsRef<str>,
    {
        self.joinpath([segment])
    }

    /// Join this path with `segments`,
    /// keeping the anchor if this path has one.
    pub fn joinpath<I, S>(&self, segments: I) -> Path
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = segments.into_iter().collect::<SmallVec<[S; 4]>>();
        let joined = PARSER.join(
            std::iter::once(self.as_str()).chain(segments.iter().map(|segment| segment.as_ref())),
        );
        if self.is_absolute() {
            Path(format!("{SEPARATOR}{joined}"))
        } else {
            Path(joined)
        }
    }

    /// Replace the final component.
    ///
    /// An empty `name` removes it.
    pub fn with_name<N>(&self, name: N) -> Result<Path, NameError>
    where
        N: AsRef<str>,
    {
        let name = name.as_ref();
        if name.contains(SEPARATOR) {
            Err(NameError(name.to_owned()))
        } else {
            Ok(self.parent().join(name))
        }
    }

    /// Replace the member index of the final component,
    /// adding one if it has none.
    pub fn with_member_index(&self, index: usize) -> Result<Path, EmptyNameError> {
        let stem = self.stem();
        if stem.is_empty() {
            return Err(EmptyNameError(self.to_owned()));
        }
        self.with_name(format!("{stem}[{index}]"))
            .map_err(|_| EmptyNameError(self.to_owned()))
    }

    /// Whether the whole path matches `pattern`.
    pub fn matches(&self, pattern: &Pattern) -> bool {
        pattern.is_match(self.as_str())
    }

    /// Match against a glob string
    /// or a precompiled regular expression.
    pub fn match_pattern<P>(&self, pattern: P) -> Result<bool, PatternError>
    where
        P: TryInto<Pattern>,
        PatternError: From<P::Error>,
    {
        Ok(self.matches(&pattern.try_into()?))
    }
}

pub struct Parents<'a> {
    path: &'a str,
}

impl<'a> Iterator for Parents<'a> {
    type Item = &'a PathRef;

    fn next(&mut self) -> Option<Self::Item> {
        let parent = PARSER.split(self.path).0;
        if parent == self.path {
            None
        } else {
            self.path = parent;
            Some(PathRef::new(parent))
        }
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::new([s]))
    }
}

impl From<&str> for Path {
    fn from(value: &str) -> Self {
        Path::new([value])
    }
}

impl From<Path> for String {
    fn from(value: Path) -> Self {
        value.0
    }
}

impl Deref for Path {
    type Target = PathRef;

    fn deref(&self) -> &Self::Target {
        self.borrow()
    }
}

impl AsRef<PathRef> for Path {
    fn as_ref(&self) -> &PathRef {
        self.borrow()
    }
}

impl AsRef<PathRef> for PathRef {
    fn as_ref(&self) -> &PathRef {
        self
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PathRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<PathRef> for Path {
    fn borrow(&self) -> &PathRef {
        PathRef::new(self.0.as_str())
    }
}

impl<'a> From<&'a PathRef> for Path {
    fn from(value: &'a PathRef) -> Self {
        value.to_owned()
    }
}

impl ToOwned for PathRef {
    type Owned = Path;

    fn to_owned(&self) -> Self::Owned {
        Path(self.0.to_owned())
    }
}

impl Div<&str> for &PathRef {
    type Output = Path;

    fn div(self, rhs: &str) -> Path {
        self.join(rhs)
    }
}

impl Div<&PathRef> for &PathRef {
    type Output = Path;

    fn div(self, rhs: &PathRef) -> Path {
        self.join(rhs)
    }
}

impl Div<&str> for &Path {
    type Output = Path;

    fn div(self, rhs: &str) -> Path {
        self.join(rhs)
    }
}

impl Div<&Path> for &Path {
    type Output = Path;

    fn div(self, rhs: &Path) -> Path {
        self.join(rhs)
    }
}

impl Div<&str> for Path {
    type Output = Path;

    fn div(self, rhs: &str) -> Path {
        self.join(rhs)
    }
}

impl Div<&PathRef> for &str {
    type Output = Path;

    fn div(self, rhs: &PathRef) -> Path {
        Path::new([self, rhs.as_str()])
    }
}

impl Div<&Path> for &str {
    type Output = Path;

    fn div(self, rhs: &Path) -> Path {
        Path::new([self, rhs.as_str()])
    }
}
