use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::Div,
};

use rustc_hash::FxHashSet;

use crate::{parser::SeparatorParser, pattern::PatternError, Path, PathRef, Registry};

/// A path bound to a registry.
///
/// Creating a tag registers its path.
/// A tag is rendered as the registry root joined with its path,
/// and tags compare by that rendering.
#[derive(Clone)]
pub struct Tag<'r> {
    rendered: String,
    path: Path,
    registry: &'r Registry,
}

impl<'r> Tag<'r> {
    pub fn new<S>(registry: &'r Registry, path: S) -> Tag<'r>
    where
        S: AsRef<str>,
    {
        Self::from_path(registry, Path::new([path]))
    }

    pub fn from_path(registry: &'r Registry, path: Path) -> Tag<'r> {
        registry.register(&path);
        let rendered = SeparatorParser::DEFAULT.join([registry.root(), path.as_str()]);
        Tag {
            rendered,
            path,
            registry,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> Path {
        self.path
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    /// A new tag for this path joined with `segment`.
    pub fn join<S>(&self, segment: S) -> Tag<'r>
    where
        S: AsRef<str>,
    {
        Self::from_path(self.registry, self.path.join(segment))
    }

    /// Tags for registered paths matching the glob `pattern`.
    ///
    /// If `relative`,
    /// only paths under this tag's path are returned.
    pub fn query(
        &self,
        pattern: &str,
        relative: bool,
    ) -> Result<FxHashSet<Tag<'r>>, PatternError> {
        Ok(self
            .registry
            .query(pattern)?
            .into_iter()
            .filter(|path| !relative || path.is_relative_to(&self.path))
            .map(|path| Tag::from_path(self.registry, path))
            .collect())
    }
}

impl fmt::Debug for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("path", &self.path)
            .field("root", &self.registry.root())
            .finish()
    }
}

impl fmt::Display for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl Eq for Tag<'_> {}
impl PartialEq for Tag<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.rendered.eq(&other.rendered)
    }
}
impl Hash for Tag<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rendered.hash(state)
    }
}

/// The tag's path,
/// so a tag joins other paths and tags as its path.
/// Use `as_str` for the rendering.
impl AsRef<str> for Tag<'_> {
    fn as_ref(&self) -> &str {
        self.path.as_str()
    }
}

impl AsRef<PathRef> for Tag<'_> {
    fn as_ref(&self) -> &PathRef {
        &self.path
    }
}

impl From<Tag<'_>> for String {
    fn from(value: Tag<'_>) -> Self {
        value.rendered
    }
}

impl<'r> Div<&str> for &Tag<'r> {
    type Output = Tag<'r>;

    fn div(self, rhs: &str) -> Tag<'r> {
        self.join(rhs)
    }
}

impl<'r> Div<&str> for Tag<'r> {
    type Output = Tag<'r>;

    fn div(self, rhs: &str) -> Tag<'r> {
        self.join(rhs)
    }
}

impl<'r> Div<&PathRef> for &Tag<'r> {
    type Output = Tag<'r>;

    fn div(self, rhs: &PathRef) -> Tag<'r> {
        self.join(rhs)
    }
}

impl<'r> Div<&Path> for &Tag<'r> {
    type Output = Tag<'r>;

    fn div(self, rhs: &Path) -> Tag<'r> {
        self.join(rhs)
    }
}

impl<'r> Div<&Tag<'_>> for &Tag<'r> {
    type Output = Tag<'r>;

    fn div(self, rhs: &Tag<'_>) -> Tag<'r> {
        self.join(&rhs.path)
    }
}

impl<'r> Div<&Tag<'r>> for &str {
    type Output = Tag<'r>;

    fn div(self, rhs: &Tag<'r>) -> Tag<'r> {
        Tag::from_path(rhs.registry, self / &rhs.path)
    }
}

impl<'r> Div<&Tag<'r>> for &Path {
    type Output = Tag<'r>;

    fn div(self, rhs: &Tag<'r>) -> Tag<'r> {
        Tag::from_path(rhs.registry, self / &rhs.path)
    }
}

#[cfg(test)]
mod tests {
    use crate::{testing::*, DEFAULT_ROOT};

    use super::*;

    fn setup(registry: &Registry) -> [Tag<'_>; 4] {
        let root_1 = Tag::new(registry, "root_1");
        let root_2 = Tag::new(registry, "root_2");
        let a_1_1 = &root_1 / "a/1";
        let a_1_2 = &root_2 / "a/1";
        [root_1, root_2, a_1_1, a_1_2]
    }

    #[test]
    fn new_registers_path() {
        let registry = Registry::default();
        let tag = Tag::new(&registry, "a/b");
        assert!(registry.contains(tag.path()));
        assert!(!registry.contains(path("a")));
    }

    #[test]
    fn new_registers_empty_path() {
        let registry = Registry::default();
        let tag = Tag::new(&registry, "");
        assert_eq!(tag.path(), &path(""));
        assert!(registry.contains(path("")));
        assert_eq!(tag.to_string(), DEFAULT_ROOT);
    }

    #[test]
    fn creating_a_tag_twice_registers_once() {
        let registry = Registry::default();
        Tag::new(&registry, "a");
        Tag::new(&registry, "a");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn tag_renders_as_root_joined_with_path() {
        let registry = Registry::new("TestContext");
        assert_eq!(Tag::new(&registry, "a/b").to_string(), "TestContext/a/b");
        assert_eq!(Tag::new(&registry, "/a//b/").as_str(), "TestContext/a/b");
    }

    #[test]
    fn tags_with_equal_renderings_are_equal() {
        let registry = Registry::default();
        assert_eq!(Tag::new(&registry, "abc"), Tag::new(&registry, "abc"));
        assert_ne!(Tag::new(&registry, "abc"), Tag::new(&registry, "def"));
    }

    #[test]
    fn tags_from_registries_with_equal_roots_are_equal() {
        let registry = Registry::new("TestContext");
        let other = Registry::new("TestContext");
        assert_eq!(Tag::new(&registry, "abc"), Tag::new(&other, "abc"));
        assert_ne!(
            Tag::new(&registry, "abc"),
            Tag::new(&Registry::new("OtherContext"), "abc")
        );
    }

    #[test]
    fn tags_are_composable() {
        let registry = Registry::default();
        assert_eq!(
            &Tag::new(&registry, "a") / "b",
            Tag::new(&registry, "a/b")
        );
        assert_eq!(
            "a" / &Tag::new(&registry, "b"),
            Tag::new(&registry, "a/b")
        );
        assert_eq!(
            &Tag::new(&registry, "a") / &Tag::new(&registry, "b/c"),
            Tag::new(&registry, "a/b/c")
        );
        assert_eq!(
            &path("a") / &Tag::new(&registry, "b"),
            Tag::new(&registry, "a/b")
        );
        assert_eq!(
            Tag::new(&registry, "a") / "b" / "c",
            Tag::new(&registry, "a/b/c")
        );
    }

    #[test]
    fn joining_a_tag_joins_its_path() {
        let registry = Registry::new("R");
        let a = Tag::new(&registry, "a");
        let b = Tag::new(&registry, "b");
        assert_eq!(a.join(&b).path(), &path("a/b"));
        assert_eq!(a.join(&b).as_str(), "R/a/b");
        assert_eq!(Tag::new(&registry, &b).path(), &path("b"));
        assert_eq!(path("x").join(&b), path("x/b"));
        assert!(!registry.contains(path("a/R/b")));
    }

    #[test]
    fn composing_registers_result() {
        let registry = Registry::default();
        let tag = Tag::new(&registry, "a");
        let _ = &tag / "b/c";
        assert!(registry.contains(path("a/b/c")));
        assert!(!registry.contains(path("a/b")));
        let _ = "x" / &tag;
        assert!(registry.contains(path("x/a")));
    }

    #[test]
    fn composing_tags_uses_left_registry() {
        let registry = Registry::new("Left");
        let other = Registry::new("Right");
        let tag = &Tag::new(&registry, "a") / &Tag::new(&other, "b");
        assert_eq!(tag.as_str(), "Left/a/b");
        assert!(registry.contains(path("a/b")));
        assert!(!other.contains(path("a/b")));
    }

    #[test]
    fn query_returns_only_relative_tags_by_default() {
        let registry = Registry::new("TestContext1");
        let [root_1, _, a_1_1, a_1_2] = setup(&registry);

        let results = root_1.query("*/a/1", true).unwrap();
        assert!(results.contains(&a_1_1));
        assert!(!results.contains(&a_1_2));
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn query_returns_all_tags_if_not_relative() {
        let registry = Registry::new("TestContext1");
        let [root_1, _, a_1_1, a_1_2] = setup(&registry);

        let results = root_1.query("*/a/1", false).unwrap();
        assert!(results.contains(&a_1_1));
        assert!(results.contains(&a_1_2));
    }

    #[test]
    fn query_includes_the_tag_itself() {
        let registry = Registry::new("TestContext1");
        let [root_1, ..] = setup(&registry);

        let results = root_1.query("root_?", true).unwrap();
        assert_eq!(results, [root_1.clone()].into_iter().collect());
    }

    #[test]
    fn query_returns_err_for_empty_pattern() {
        let registry = Registry::default();
        assert!(Tag::new(&registry, "a").query("", true).is_err());
    }
}
